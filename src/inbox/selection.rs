use super::{EmailId, InboxState};

impl InboxState {
    /// Flips one email's selection. Unknown ids are ignored.
    pub fn toggle_selection(mut self, id: &EmailId) -> Self {
        let Some(email) = self.emails.get_mut(id) else {
            return self;
        };
        email.is_selected = !email.is_selected;
        if email.is_selected {
            self.selected_emails.insert(id.clone());
        } else {
            self.selected_emails.shift_remove(id);
        }
        self
    }

    /// Selects everything in the filtered view, or every email when no filter
    /// narrows the view. Already-selected emails stay selected.
    pub fn select_all(mut self) -> Self {
        let scope: Vec<EmailId> = if self.has_active_filter() {
            self.filtered_email_ids.clone()
        } else {
            self.emails.keys().cloned().collect()
        };
        for id in scope {
            if let Some(email) = self.emails.get_mut(&id) {
                email.is_selected = true;
                self.selected_emails.insert(id);
            }
        }
        self.settle_select_all()
    }

    /// Deselects every email, visible or not.
    pub fn clear_selection(mut self) -> Self {
        for email in self.emails.values_mut() {
            email.is_selected = false;
        }
        self.selected_emails.clear();
        self
    }

    pub fn set_select_all_active(mut self, active: bool) -> Self {
        self.is_select_all_active = active;
        self
    }
}
