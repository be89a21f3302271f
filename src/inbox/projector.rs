use super::{Email, EmailId, Folder, InboxState};
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use tracing::warn;

/// `None` means no folder filter.
pub fn matches_folder(folder: Option<Folder>, email: &Email) -> bool {
    folder.map_or(true, |f| f.contains(email))
}

/// Case-insensitive literal matcher. Filtering and match highlighting both go
/// through it so a row is highlighted exactly when it passes the filter.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    re: Option<Regex>,
}

impl SearchMatcher {
    /// `None` for a blank query.
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        let re = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Search query cannot be matched, showing nothing: {e}");
                None
            }
        };
        Some(Self { re })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Sender or subject contains the query.
    pub fn matches(&self, email: &Email) -> bool {
        self.is_match(&email.sender) || self.is_match(&email.subject)
    }

    /// Byte ranges of non-overlapping matches in `text`.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.re
            .as_ref()
            .map(|re| re.find_iter(text).map(|m| m.range()).collect())
            .unwrap_or_default()
    }
}

impl InboxState {
    /// Recomputes the filtered list from the current folder alone.
    pub fn filter_by_folder(mut self) -> Self {
        let folder = self.current_folder;
        self.filtered_email_ids = self
            .emails
            .values()
            .filter(|email| matches_folder(folder, email))
            .map(|email| email.id.clone())
            .collect();
        self.settle_select_all()
    }

    /// Narrows the current filtered list by sender/subject. Blank queries change nothing.
    pub fn filter_by_search(mut self, query: &str) -> Self {
        let Some(matcher) = SearchMatcher::new(query) else {
            return self;
        };
        let emails = &self.emails;
        self.filtered_email_ids
            .retain(|id| emails.get(id).is_some_and(|email| matcher.matches(email)));
        self.settle_select_all()
    }

    /// Derives the filtered list from folder and search together.
    pub fn project(&self) -> Vec<EmailId> {
        let matcher = SearchMatcher::new(&self.search_query);
        self.emails
            .values()
            .filter(|email| matches_folder(self.current_folder, email))
            .filter(|email| matcher.as_ref().map_or(true, |m| m.matches(email)))
            .map(|email| email.id.clone())
            .collect()
    }

    /// Folder filter followed by the stored search query.
    pub fn reapply_folder_filter(mut self) -> Self {
        self.filtered_email_ids = self.project();
        self.settle_select_all()
    }

    pub(crate) fn reproject(self) -> Self {
        self.reapply_folder_filter()
    }

    /// Select-all switches itself off once the filtered view is empty.
    pub(crate) fn settle_select_all(mut self) -> Self {
        if self.filtered_email_ids.is_empty() {
            self.is_select_all_active = false;
        }
        self
    }

    /// True when some criterion narrows the view.
    pub(crate) fn has_active_filter(&self) -> bool {
        self.current_folder.is_some() || !self.search_query.trim().is_empty()
    }
}
