use super::{Email, Folder, InboxState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderCounts {
    pub inbox: usize,
    pub sent: usize,
    pub spam: usize,
    pub trash: usize,
}

impl FolderCounts {
    pub fn get(&self, folder: Folder) -> usize {
        match folder {
            Folder::Inbox => self.inbox,
            Folder::Sent => self.sent,
            Folder::Spam => self.spam,
            Folder::Trash => self.trash,
        }
    }
}

impl InboxState {
    /// Emails of the filtered view, in display order.
    pub fn display_emails(&self) -> Vec<&Email> {
        self.filtered_email_ids
            .iter()
            .filter_map(|id| self.emails.get(id))
            .collect()
    }

    /// Selected emails, in selection order.
    pub fn selected_emails(&self) -> Vec<&Email> {
        self.selected_emails
            .iter()
            .filter_map(|id| self.emails.get(id))
            .collect()
    }

    pub fn current_email(&self) -> Option<&Email> {
        self.current_email.as_ref().and_then(|id| self.emails.get(id))
    }

    /// Full scan of the store, ignoring the current filter.
    pub fn folder_counts(&self) -> FolderCounts {
        let mut counts = FolderCounts::default();
        for email in self.emails.values() {
            if Folder::Inbox.contains(email) {
                counts.inbox += 1;
            }
            if Folder::Sent.contains(email) {
                counts.sent += 1;
            }
            if Folder::Spam.contains(email) {
                counts.spam += 1;
            }
        }
        counts
    }
}
