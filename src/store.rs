use crate::error::AppError;
use crate::inbox::{Email, EmailId, Folder, FolderCounts, InboxState};
use chrono::{DateTime, Utc};
use tracing::debug;

/// One user action. Each is applied as a single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum InboxAction {
    ChangeFolder(Folder),
    Search(String),
    ToggleSelection(EmailId),
    SelectAll,
    DeselectAll,
    MarkRead(Vec<EmailId>),
    MarkUnread(Vec<EmailId>),
    MarkSpam(Vec<EmailId>),
    MarkNotSpam(Vec<EmailId>),
    Delete(Vec<EmailId>),
    Open(EmailId),
    CloseDetail,
    Reply {
        to: EmailId,
        content: String,
        at: DateTime<Utc>,
    },
}

pub fn reduce(state: InboxState, action: InboxAction) -> InboxState {
    match action {
        InboxAction::ChangeFolder(folder) => state.set_current_folder(folder).set_current_email(None),
        InboxAction::Search(query) => state.set_search_query(query),
        InboxAction::ToggleSelection(id) => state.toggle_selection(&id),
        InboxAction::SelectAll => state.set_select_all_active(true).select_all(),
        InboxAction::DeselectAll => state.set_select_all_active(false).clear_selection(),
        InboxAction::MarkRead(ids) => state.mark_as_read(&ids),
        InboxAction::MarkUnread(ids) => state.mark_as_unread(&ids),
        InboxAction::MarkSpam(ids) => state.mark_as_spam(&ids),
        InboxAction::MarkNotSpam(ids) => state.mark_as_not_spam(&ids),
        InboxAction::Delete(ids) => state.delete_emails(&ids),
        InboxAction::Open(id) => state.open_email(&id),
        InboxAction::CloseDetail => state.set_current_email(None),
        InboxAction::Reply { to, content, at } => state.send_reply(&to, &content, at),
    }
}

/// Owner of the live snapshot. Reads and dispatches fail until a state is installed.
#[derive(Debug, Default)]
pub struct InboxStore {
    state: Option<InboxState>,
}

impl InboxStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: InboxState) -> Self {
        Self { state: Some(state) }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Installs a whole snapshot at once.
    pub fn replace(&mut self, state: InboxState) {
        debug!("Installing inbox state with {} emails", state.len());
        self.state = Some(state);
    }

    pub fn state(&self) -> Result<&InboxState, AppError> {
        self.state.as_ref().ok_or(AppError::Uninitialized)
    }

    pub fn dispatch(&mut self, action: InboxAction) -> Result<(), AppError> {
        let state = self.state.take().ok_or(AppError::Uninitialized)?;
        debug!(?action, "dispatch");
        self.state = Some(reduce(state, action));
        Ok(())
    }

    pub fn display_emails(&self) -> Result<Vec<&Email>, AppError> {
        Ok(self.state()?.display_emails())
    }

    pub fn selected_emails(&self) -> Result<Vec<&Email>, AppError> {
        Ok(self.state()?.selected_emails())
    }

    pub fn folder_counts(&self) -> Result<FolderCounts, AppError> {
        Ok(self.state()?.folder_counts())
    }

    pub fn current_email(&self) -> Result<Option<&Email>, AppError> {
        Ok(self.state()?.current_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::testing::{abc_state, assert_invariants, email, ids};
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_uninitialized_store_rejects_reads() {
        let store = InboxStore::new();
        assert!(!store.is_initialized());
        assert_eq!(store.state().unwrap_err(), AppError::Uninitialized);
        assert_eq!(store.folder_counts().unwrap_err(), AppError::Uninitialized);
        assert!(store.display_emails().is_err());
    }

    #[test]
    fn test_uninitialized_store_rejects_dispatch() {
        let mut store = InboxStore::new();
        let result = store.dispatch(InboxAction::SelectAll);
        assert_eq!(result, Err(AppError::Uninitialized));
        assert!(!store.is_initialized());
    }

    #[test]
    fn test_replace_then_query() {
        let mut store = InboxStore::new();
        store.replace(abc_state());
        assert_eq!(store.display_emails().unwrap().len(), 1);
        assert_eq!(store.folder_counts().unwrap().sent, 1);
    }

    #[test]
    fn test_select_all_and_deselect_all_drive_flag() {
        let mut store = InboxStore::with_state(abc_state());
        store.dispatch(InboxAction::SelectAll).unwrap();
        let state = store.state().unwrap();
        assert!(state.is_select_all_active());
        assert_eq!(state.selected_count(), 1);

        store.dispatch(InboxAction::DeselectAll).unwrap();
        let state = store.state().unwrap();
        assert!(!state.is_select_all_active());
        assert_eq!(state.selected_count(), 0);
        assert_invariants(state);
    }

    #[test]
    fn test_change_folder_closes_detail() {
        let mut store = InboxStore::with_state(abc_state());
        store.dispatch(InboxAction::Open("a".into())).unwrap();
        assert!(store.current_email().unwrap().is_some());

        store.dispatch(InboxAction::ChangeFolder(Folder::Spam)).unwrap();
        assert!(store.current_email().unwrap().is_none());
        assert_eq!(store.state().unwrap().current_folder(), Some(Folder::Spam));
    }

    #[test]
    fn test_bulk_actions_on_selection() {
        let mut store = InboxStore::with_state(abc_state());
        store.dispatch(InboxAction::ToggleSelection("a".into())).unwrap();
        let picked: Vec<EmailId> = store.state().unwrap().selected_ids().cloned().collect();

        store.dispatch(InboxAction::MarkSpam(picked.clone())).unwrap();
        assert!(store.display_emails().unwrap().is_empty());
        assert_eq!(store.folder_counts().unwrap().spam, 2);

        store.dispatch(InboxAction::Delete(picked)).unwrap();
        assert!(store.selected_emails().unwrap().is_empty());
        assert_eq!(store.folder_counts().unwrap().spam, 1);
        assert_invariants(store.state().unwrap());
    }

    #[test]
    fn test_reply_action() {
        let at = Utc.with_ymd_and_hms(2024, 10, 28, 9, 30, 0).unwrap();
        let mut store = InboxStore::with_state(abc_state());
        store
            .dispatch(InboxAction::Reply {
                to: "a".into(),
                content: "Sounds good".to_string(),
                at,
            })
            .unwrap();
        assert_eq!(store.folder_counts().unwrap().sent, 2);
    }

    #[test]
    fn test_search_then_not_spam() {
        let mut store = InboxStore::with_state(abc_state());
        store.dispatch(InboxAction::ChangeFolder(Folder::Spam)).unwrap();
        store.dispatch(InboxAction::Search("prize".to_string())).unwrap();
        assert_eq!(store.state().unwrap().filtered_email_ids(), ids(&["c"]).as_slice());

        store.dispatch(InboxAction::MarkNotSpam(ids(&["c"]))).unwrap();
        assert!(store.display_emails().unwrap().is_empty());
        store.dispatch(InboxAction::MarkRead(ids(&["c"]))).unwrap();
        store.dispatch(InboxAction::MarkUnread(ids(&["c"]))).unwrap();
        store.dispatch(InboxAction::CloseDetail).unwrap();
        assert!(!store.state().unwrap().email(&"c".into()).unwrap().is_read);
    }

    #[test]
    fn test_select_all_in_empty_folder_stays_off() {
        let mut store = InboxStore::with_state(abc_state());
        store.dispatch(InboxAction::ChangeFolder(Folder::Trash)).unwrap();
        store.dispatch(InboxAction::SelectAll).unwrap();
        let state = store.state().unwrap();
        assert!(!state.is_select_all_active());
        assert_invariants(state);
    }

    // a, b, c and d exist; "ghost" never does.
    fn arb_id() -> impl Strategy<Value = EmailId> {
        prop::sample::select(vec!["a", "b", "c", "d", "ghost"]).prop_map(EmailId::from)
    }

    fn arb_ids() -> impl Strategy<Value = Vec<EmailId>> {
        prop::collection::vec(arb_id(), 0..4)
    }

    fn arb_action() -> impl Strategy<Value = InboxAction> {
        let at = Utc.with_ymd_and_hms(2024, 10, 28, 12, 0, 0).unwrap();
        prop_oneof![
            prop::sample::select(Folder::ALL.to_vec()).prop_map(InboxAction::ChangeFolder),
            prop::sample::select(vec!["", " ", "a", "JOHN", "x.com", "zzz"])
                .prop_map(|q| InboxAction::Search(q.to_string())),
            arb_id().prop_map(InboxAction::ToggleSelection),
            Just(InboxAction::SelectAll),
            Just(InboxAction::DeselectAll),
            arb_ids().prop_map(InboxAction::MarkRead),
            arb_ids().prop_map(InboxAction::MarkUnread),
            arb_ids().prop_map(InboxAction::MarkSpam),
            arb_ids().prop_map(InboxAction::MarkNotSpam),
            arb_ids().prop_map(InboxAction::Delete),
            arb_id().prop_map(InboxAction::Open),
            Just(InboxAction::CloseDetail),
            (arb_id(), prop::sample::select(vec!["", "ok", "Sounds good"])).prop_map(
                move |(to, content)| InboxAction::Reply {
                    to,
                    content: content.to_string(),
                    at,
                }
            ),
        ]
    }

    proptest! {
        /// Every reachable state keeps the store, view and selection consistent.
        #[test]
        fn proptest_invariants_hold_after_every_action(
            actions in prop::collection::vec(arb_action(), 0..40)
        ) {
            let mut state = abc_state().add_email(email("d", "john.doe@x.com", "Hi"));
            assert_invariants(&state);

            for action in actions {
                state = reduce(state, action);
                assert_invariants(&state);
                let projected = state.project();
                prop_assert_eq!(state.filtered_email_ids(), projected.as_slice());

                let cleared = state.clone().clear_selection();
                prop_assert_eq!(cleared.clone().clear_selection(), cleared);

                let wiped = state.clone().select_all().clear_selection();
                prop_assert_eq!(wiped.selected_count(), 0);
                prop_assert!(wiped
                    .email_ids()
                    .filter_map(|id| wiped.email(id))
                    .all(|e| !e.is_selected));
            }
        }
    }
}
