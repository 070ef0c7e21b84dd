//! Ordering of overlapping searches and push updates.
//!
//! Every search takes a sequence number; only the response to the latest one
//! is applied. Push updates only replace the view when they are about the
//! keyword on screen.

/// Issues monotonically increasing request numbers
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    /// Issue the next sequence number
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether `seq` is the most recently issued number
    pub fn is_current(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Whether a push for `incoming` may replace the view of `current`
pub fn push_applies(current: &str, incoming: &str) -> bool {
    current.is_empty() || current.to_lowercase() == incoming.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert_eq!(sequencer.latest(), second);
    }

    #[test]
    fn test_nothing_current_before_issue() {
        let sequencer = RequestSequencer::default();
        assert!(!sequencer.is_current(0));
    }

    #[test]
    fn test_push_matches_keyword_case_insensitively() {
        assert!(push_applies("Rust", "rust"));
        assert!(!push_applies("rust", "golang"));
    }

    #[test]
    fn test_push_applies_before_first_search() {
        assert!(push_applies("", "anything"));
    }
}
