use super::{EmailId, Folder, InboxState};
use std::slice;
use tracing::warn;

impl InboxState {
    /// Switches folder as one update: folder filter, then the stored search,
    /// then selection (re-select the new view if select-all is on, else clear).
    pub fn set_current_folder(self, folder: Folder) -> Self {
        self.switch_folder(Some(folder))
    }

    /// Like `set_current_folder`, but unknown names fall back to showing every email.
    pub fn set_folder_named(self, name: &str) -> Self {
        let folder = match name.parse::<Folder>() {
            Ok(folder) => Some(folder),
            Err(e) => {
                warn!("{e}, showing all emails");
                None
            }
        };
        self.switch_folder(folder)
    }

    fn switch_folder(mut self, folder: Option<Folder>) -> Self {
        self.current_folder = folder;
        let query = self.search_query.clone();
        let state = self.filter_by_folder().filter_by_search(&query).clear_selection();
        if state.is_select_all_active {
            state.select_all()
        } else {
            state
        }
    }

    pub fn set_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self.reproject()
    }

    /// Opens or closes the detail view. Ids not in the store close it.
    pub fn set_current_email(mut self, id: Option<&EmailId>) -> Self {
        self.current_email = id.filter(|id| self.emails.contains_key(*id)).cloned();
        self
    }

    /// Opens an email and marks it read.
    pub fn open_email(self, id: &EmailId) -> Self {
        self.set_current_email(Some(id))
            .mark_as_read(slice::from_ref(id))
    }
}
