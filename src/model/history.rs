//! Whole-buffer snapshot history for undo/redo.
//!
//! Snapshots are recorded by the debounced history task, so one snapshot
//! usually covers a burst of typing rather than a single keystroke.

/// Default number of snapshots kept per document
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: Vec<String>,
    index: usize,
    limit: usize,
}

impl SnapshotHistory {
    /// Start a history whose only state is `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        Self {
            snapshots: vec![initial.into()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// The snapshot the document is currently at
    pub fn current(&self) -> &str {
        &self.snapshots[self.index]
    }

    /// Record a new state. Returns false when `content` equals the current
    /// snapshot and nothing was recorded.
    ///
    /// Recording discards any redo states and evicts the oldest snapshot once
    /// the limit is exceeded.
    pub fn record(&mut self, content: &str) -> bool {
        if self.current() == content {
            return false;
        }

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(content.to_string());
        self.index += 1;

        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
            self.index -= 1;
        }
        true
    }

    /// Step back one snapshot, returning the content to restore
    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot, returning the content to restore
    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_undo_redo() {
        let mut history = SnapshotHistory::new("a");
        assert!(history.record("ab"));
        assert!(history.record("abc"));

        assert_eq!(history.undo(), Some("ab"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("ab"));
        assert_eq!(history.redo(), Some("abc"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_skips_duplicate_of_current() {
        let mut history = SnapshotHistory::new("same");
        assert!(!history.record("same"));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_record_after_undo_drops_redo_states() {
        let mut history = SnapshotHistory::new("1");
        history.record("2");
        history.record("3");
        history.undo();
        history.record("2b");

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some("2"));
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = SnapshotHistory::with_limit("0", 3);
        for i in 1..=5 {
            history.record(&i.to_string());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), "5");
        assert_eq!(history.undo(), Some("4"));
        assert_eq!(history.undo(), Some("3"));
        assert_eq!(history.undo(), None);
    }
}
