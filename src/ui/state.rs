//! Session history for the interactive prompt

use crate::intent::Intent;
use std::collections::VecDeque;

/// Maximum history entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Completed interactions, oldest first
#[derive(Debug)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
    next_sequence: u64,
}

/// An entry in the session log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub sequence: u64,
    pub command: String,
    pub intent: Intent,
    pub summary: String,
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            next_sequence: 1,
        }
    }

    /// Add an entry, evicting the oldest when full
    pub fn record(&mut self, command: &str, intent: Intent, summary: String) {
        if self.entries.len() >= MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            sequence: self.next_sequence,
            command: command.to_string(),
            intent,
            summary,
        });
        self.next_sequence += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
