//! Rolling history of recently picked exercises.
//!
//! The builder threads one `RecencyHistory` through a program build by
//! value: it takes a seed and returns the updated history, so independent
//! builds never share a buffer.

use serde::{Deserialize, Serialize};

/// Entries retained across a whole program build
pub const HISTORY_CAPACITY: usize = 30;

/// Ordered exercise ids, oldest first, capped to the most recent entries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyHistory {
    ids: Vec<String>,
}

impl RecencyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one id, dropping the oldest entries past capacity
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
        self.truncate_front();
    }

    pub fn extend<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self.truncate_front();
    }

    /// The most recent `n` entries (fewer if the history is shorter)
    pub fn window(&self, n: usize) -> &[String] {
        recent_window(&self.ids, n)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn truncate_front(&mut self) {
        if self.ids.len() > HISTORY_CAPACITY {
            let excess = self.ids.len() - HISTORY_CAPACITY;
            self.ids.drain(..excess);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for RecencyHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut history = Self::new();
        history.extend(iter);
        history
    }
}

/// Suffix of `ids` holding at most `n` entries
pub fn recent_window(ids: &[String], n: usize) -> &[String] {
    &ids[ids.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_keeps_order() {
        let mut history = RecencyHistory::new();
        history.push("a");
        history.push("b");
        assert_eq!(history.as_slice(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let history: RecencyHistory = (0..35).map(|i| format!("ex{}", i)).collect();

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.as_slice()[0], "ex5");
        assert_eq!(history.as_slice()[HISTORY_CAPACITY - 1], "ex34");
    }

    #[test]
    fn test_window_returns_most_recent() {
        let history: RecencyHistory = ["a", "b", "c", "d"].into_iter().collect();

        assert_eq!(history.window(2), ["c".to_string(), "d".to_string()]);
        assert_eq!(history.window(10).len(), 4);
        assert!(history.window(0).is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut first: RecencyHistory = ["a"].into_iter().collect();
        let second = first.clone();
        first.push("b");

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
    }
}
