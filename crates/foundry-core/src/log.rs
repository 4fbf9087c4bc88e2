//! The station's operations log.
//!
//! An append-only, capped event history: the newest entry is always first
//! and only the 10 most recent entries are retained. Each entry is tagged
//! with the simulated day current at the time of append.

use std::collections::VecDeque;

use foundry_types::LogEntry;

/// Maximum number of entries retained. Older entries are evicted.
pub const MAX_LOG_ENTRIES: usize = 10;

/// Bounded, newest-first operations log.
#[derive(Debug, Clone, Default)]
pub struct OperationsLog {
    entries: VecDeque<LogEntry>,
}

impl OperationsLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append a message tagged with the given day.
    ///
    /// The new entry becomes the first element; if the log already holds
    /// [`MAX_LOG_ENTRIES`] entries, the oldest is evicted.
    pub fn append(&mut self, day: u64, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            day,
            message: message.into(),
        });
        self.entries.truncate(MAX_LOG_ENTRIES);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Clone the retained entries, newest-first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Render the retained entries as `[Day N] message` lines, newest-first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
