//! Bounded history of generated passwords.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// The most recent generated passwords, oldest first.
///
/// Append-only; once full, each new entry evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    /// Creates an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Appends a password, dropping the oldest if the history is full.
    pub fn push(&mut self, password: impl Into<String>) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(password.into());
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Serialize for History {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent_five() {
        let mut history = History::new(5);
        for i in 0..8 {
            history.push(format!("pw{}", i));
        }

        assert_eq!(history.len(), 5);
        let entries: Vec<&str> = history.iter().collect();
        assert_eq!(entries, vec!["pw3", "pw4", "pw5", "pw6", "pw7"]);
    }

    #[test]
    fn test_zero_limit_clamped() {
        let mut history = History::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.limit(), 1);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_starts_empty() {
        let history = History::new(5);
        assert!(history.is_empty());
    }
}
