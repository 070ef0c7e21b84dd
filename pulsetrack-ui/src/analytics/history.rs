//! Recent search keywords.

/// Number of keywords kept
pub const MAX_HISTORY: usize = 5;

/// Most-recent-first list of searched keywords, session lifetime only
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchHistory {
    keywords: Vec<String>,
}

impl SearchHistory {
    /// Record a search. Keywords already present keep their position.
    pub fn record(&mut self, keyword: &str) {
        if self.keywords.iter().any(|k| k == keyword) {
            return;
        }
        self.keywords.insert(0, keyword.to_string());
        self.keywords.truncate(MAX_HISTORY);
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }
}
