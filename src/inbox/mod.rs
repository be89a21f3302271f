//! Normalized inbox state.
//!
//! `InboxState` owns every email in an ordered map (arrival order) and the
//! view state derived from it. Transitions take the snapshot by value and
//! return the next one, so a caller that wants to keep the old snapshot
//! clones it first.
//!
//! Invariants held after every transition:
//! - `filtered_email_ids` is an ordered subset of the map's keys.
//! - an id is in `selected_emails` iff that email's `is_selected` is true.
//! - `current_email`, when set, names an email in the map.
//! - select-all is off whenever the filtered list is empty.

pub mod mutation;
pub mod navigation;
pub mod projector;
pub mod selection;
pub mod view;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

pub use view::FolderCounts;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmailId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    pub subject: String,
    pub snippet: String,
    pub body: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub is_read: bool,
    pub is_spam: bool,
    pub is_sent: bool,
    #[serde(default)]
    pub is_selected: bool,
}

/// Partial update of the mutable flags of an email. There is no id field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailPatch {
    pub is_read: Option<bool>,
    pub is_spam: Option<bool>,
    pub is_sent: Option<bool>,
    pub is_selected: Option<bool>,
}

impl EmailPatch {
    pub fn read(is_read: bool) -> Self {
        Self {
            is_read: Some(is_read),
            ..Self::default()
        }
    }

    pub fn spam(is_spam: bool) -> Self {
        Self {
            is_spam: Some(is_spam),
            ..Self::default()
        }
    }

    pub fn selected(is_selected: bool) -> Self {
        Self {
            is_selected: Some(is_selected),
            ..Self::default()
        }
    }

    fn apply(&self, email: &mut Email) {
        if let Some(v) = self.is_read {
            email.is_read = v;
        }
        if let Some(v) = self.is_spam {
            email.is_spam = v;
        }
        if let Some(v) = self.is_sent {
            email.is_sent = v;
        }
        if let Some(v) = self.is_selected {
            email.is_selected = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    Inbox,
    Sent,
    Spam,
    Trash,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown folder: {0}")]
pub struct UnknownFolder(pub String);

impl Folder {
    pub const ALL: [Folder; 4] = [Folder::Inbox, Folder::Sent, Folder::Spam, Folder::Trash];

    pub fn as_str(self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Spam => "spam",
            Folder::Trash => "trash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Spam => "Spam",
            Folder::Trash => "Trash",
        }
    }

    /// Folder membership predicate. Trash never holds anything: deletes are hard.
    pub fn contains(self, email: &Email) -> bool {
        match self {
            Folder::Inbox => !email.is_spam && !email.is_sent,
            Folder::Sent => email.is_sent,
            Folder::Spam => email.is_spam,
            Folder::Trash => false,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folder {
    type Err = UnknownFolder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Folder::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFolder(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InboxState {
    emails: IndexMap<EmailId, Email>,
    filtered_email_ids: Vec<EmailId>,
    selected_emails: IndexSet<EmailId>,
    /// `None` is the unfiltered view that unknown folder names land on.
    current_folder: Option<Folder>,
    search_query: String,
    current_email: Option<EmailId>,
    is_select_all_active: bool,
}

impl Default for InboxState {
    fn default() -> Self {
        Self {
            emails: IndexMap::new(),
            filtered_email_ids: Vec::new(),
            selected_emails: IndexSet::new(),
            current_folder: Some(Folder::Inbox),
            search_query: String::new(),
            current_email: None,
            is_select_all_active: false,
        }
    }
}

impl InboxState {
    /// Builds a state showing the inbox folder. Later duplicates of an id are dropped.
    pub fn from_emails(emails: impl IntoIterator<Item = Email>) -> Self {
        let mut state = Self::default();
        for email in emails {
            if state.emails.contains_key(&email.id) {
                warn!("Dropping duplicate email id {}", email.id);
                continue;
            }
            if email.is_selected {
                state.selected_emails.insert(email.id.clone());
            }
            state.emails.insert(email.id.clone(), email);
        }
        state.reproject()
    }

    pub fn email(&self, id: &EmailId) -> Option<&Email> {
        self.emails.get(id)
    }

    pub fn contains(&self, id: &EmailId) -> bool {
        self.emails.contains_key(id)
    }

    /// All ids in arrival order.
    pub fn email_ids(&self) -> impl Iterator<Item = &EmailId> {
        self.emails.keys()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn filtered_email_ids(&self) -> &[EmailId] {
        &self.filtered_email_ids
    }

    /// Selected ids in the order they were selected.
    pub fn selected_ids(&self) -> impl Iterator<Item = &EmailId> {
        self.selected_emails.iter()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_emails.len()
    }

    pub fn is_selected(&self, id: &EmailId) -> bool {
        self.selected_emails.contains(id)
    }

    pub fn current_folder(&self) -> Option<Folder> {
        self.current_folder
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_email_id(&self) -> Option<&EmailId> {
        self.current_email.as_ref()
    }

    pub fn is_select_all_active(&self) -> bool {
        self.is_select_all_active
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Email, EmailId, InboxState};

    pub fn email(id: &str, sender: &str, subject: &str) -> Email {
        Email {
            id: EmailId::from(id),
            sender: sender.to_string(),
            receiver: None,
            subject: subject.to_string(),
            snippet: format!("{subject}..."),
            body: format!("Body of {subject}"),
            date: "2024-10-27T10:00:00Z".to_string(),
            is_read: false,
            is_spam: false,
            is_sent: false,
            is_selected: false,
        }
    }

    pub fn ids(raw: &[&str]) -> Vec<EmailId> {
        raw.iter().map(|id| EmailId::from(*id)).collect()
    }

    /// A in the inbox, B sent, C spam.
    pub fn abc_state() -> InboxState {
        let a = email("a", "alice@x.com", "Lunch");
        let mut b = email("b", "me@x.com", "Report");
        b.is_sent = true;
        b.receiver = Some("bob@x.com".to_string());
        let mut c = email("c", "winner@spam.com", "Prize");
        c.is_spam = true;
        InboxState::from_emails([a, b, c])
    }

    pub fn assert_invariants(state: &InboxState) {
        for id in &state.filtered_email_ids {
            assert!(state.emails.contains_key(id), "filtered id {id} not in store");
        }
        for id in &state.selected_emails {
            let email = state.emails.get(id).expect("selected id missing from store");
            assert!(email.is_selected, "selected id {id} has is_selected=false");
        }
        for (id, email) in &state.emails {
            assert_eq!(&email.id, id);
            if email.is_selected {
                assert!(state.selected_emails.contains(id), "{id} flagged but not tracked");
            }
        }
        if let Some(current) = &state.current_email {
            assert!(state.emails.contains_key(current));
        }
        assert_eq!(state.folder_counts().trash, 0);
        if state.filtered_email_ids.is_empty() {
            assert!(!state.is_select_all_active, "select-all on over an empty view");
        }
    }
}
