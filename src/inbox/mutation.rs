use super::{Email, EmailId, EmailPatch, InboxState};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, warn};

pub const OWN_ADDRESS: &str = "me@mycompany.com";
const SNIPPET_LEN: usize = 100;

impl InboxState {
    /// Patches every listed email that exists. Does not recompute the filtered
    /// list; follow with `reapply_folder_filter` when membership flags change.
    pub fn bulk_update(mut self, ids: &[EmailId], patch: EmailPatch) -> Self {
        for id in ids {
            let Some(email) = self.emails.get_mut(id) else {
                continue;
            };
            patch.apply(email);
            match patch.is_selected {
                Some(true) => {
                    self.selected_emails.insert(id.clone());
                }
                Some(false) => {
                    self.selected_emails.shift_remove(id);
                }
                None => {}
            }
        }
        self
    }

    pub fn mark_as_read(self, ids: &[EmailId]) -> Self {
        self.bulk_update(ids, EmailPatch::read(true))
    }

    pub fn mark_as_unread(self, ids: &[EmailId]) -> Self {
        self.bulk_update(ids, EmailPatch::read(false))
    }

    pub fn mark_as_spam(self, ids: &[EmailId]) -> Self {
        self.bulk_update(ids, EmailPatch::spam(true))
            .reapply_folder_filter()
    }

    pub fn mark_as_not_spam(self, ids: &[EmailId]) -> Self {
        self.bulk_update(ids, EmailPatch::spam(false))
            .reapply_folder_filter()
    }

    /// Appends a new email. An id already in the store is rejected.
    pub fn add_email(mut self, email: Email) -> Self {
        if self.contains(&email.id) {
            warn!("Ignoring email with duplicate id {}", email.id);
            return self;
        }
        if email.is_selected {
            self.selected_emails.insert(email.id.clone());
        }
        self.emails.insert(email.id.clone(), email);
        self.reproject()
    }

    /// Permanently removes the listed emails. Missing ids are ignored.
    pub fn delete_emails(mut self, ids: &[EmailId]) -> Self {
        let doomed: HashSet<&EmailId> = ids.iter().collect();
        let before = self.emails.len();

        self.emails.retain(|id, _| !doomed.contains(id));
        self.filtered_email_ids.retain(|id| !doomed.contains(id));
        self.selected_emails.retain(|id| !doomed.contains(id));
        if self
            .current_email
            .as_ref()
            .is_some_and(|id| doomed.contains(id))
        {
            self.current_email = None;
        }

        debug!("Deleted {} emails", before - self.emails.len());
        self.settle_select_all()
    }

    /// Records a reply to `original` as a sent email and closes the detail view.
    /// Blank replies and unknown originals change nothing.
    pub fn send_reply(self, original: &EmailId, content: &str, now: DateTime<Utc>) -> Self {
        let Some(reply) = self
            .email(original)
            .and_then(|email| compose_reply(email, content, now))
        else {
            return self;
        };
        let id = self.unused_id(reply.id.as_str());
        self.add_email(Email { id, ..reply })
            .set_current_email(None)
    }

    fn unused_id(&self, base: &str) -> EmailId {
        let mut candidate = EmailId::new(base);
        let mut n = 1;
        while self.contains(&candidate) {
            candidate = EmailId::new(format!("{base}-{n}"));
            n += 1;
        }
        candidate
    }
}

/// Builds the sent email for a reply, or `None` for a blank reply.
pub fn compose_reply(original: &Email, content: &str, now: DateTime<Utc>) -> Option<Email> {
    if content.trim().is_empty() {
        return None;
    }

    let subject = if original.subject.starts_with("Re: ") {
        original.subject.clone()
    } else {
        format!("Re: {}", original.subject)
    };

    let mut snippet: String = content.chars().take(SNIPPET_LEN).collect();
    if content.chars().count() > SNIPPET_LEN {
        snippet.push_str("...");
    }

    Some(Email {
        id: EmailId::new(format!("email-sent-{}", now.timestamp_millis())),
        sender: OWN_ADDRESS.to_string(),
        receiver: Some(original.sender.clone()),
        subject,
        snippet,
        body: content.to_string(),
        date: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        is_read: true,
        is_spam: false,
        is_sent: true,
        is_selected: false,
    })
}
