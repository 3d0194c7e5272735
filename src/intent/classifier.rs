//! Keyword classifier - converts a raw command into an Intent

use crate::intent::rules::{builtin_table, IntentTable};
use crate::intent::Intent;

/// Classifies commands against an ordered keyword table
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier<'a> {
    table: &'a IntentTable,
}

impl Default for IntentClassifier<'static> {
    fn default() -> Self {
        Self {
            table: builtin_table(),
        }
    }
}

impl<'a> IntentClassifier<'a> {
    pub fn with_table(table: &'a IntentTable) -> Self {
        Self { table }
    }

    /// Classify a command; total over all strings
    ///
    /// Phrases match as contiguous substrings of the lowercased command, so
    /// "resort by date" still hits "sort by".
    pub fn classify(&self, command: &str) -> Intent {
        let lowered = command.to_lowercase();
        let intent = self
            .table
            .first_match(&lowered)
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unknown);

        tracing::debug!(command, %intent, "classified command");
        intent
    }
}
