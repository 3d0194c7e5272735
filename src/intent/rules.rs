//! Keyword rules and the ordered intent table

use crate::core::error::{AssistantError, Result};
use crate::intent::Intent;
use std::sync::OnceLock;

/// An intent and the phrases that trigger it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRule {
    pub intent: Intent,
    pub phrases: Vec<String>,
}

impl IntentRule {
    pub fn new(intent: Intent, phrases: &[&str]) -> Self {
        Self {
            intent,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// True if any phrase occurs in the (already lowercased) command
    pub fn matches(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// Ordered rules; earlier rules win ties
#[derive(Debug, Clone)]
pub struct IntentTable {
    rules: Vec<IntentRule>,
}

impl IntentTable {
    /// Build a table, rejecting `Unknown` rules and non-lowercase phrases
    pub fn new(rules: Vec<IntentRule>) -> Result<Self> {
        for rule in &rules {
            if rule.intent == Intent::Unknown {
                return Err(AssistantError::InvalidIntentTable(
                    "'unknown' is the fallback and cannot have trigger phrases".into(),
                ));
            }
            if let Some(phrase) = rule.phrases.iter().find(|p| **p != p.to_lowercase()) {
                return Err(AssistantError::InvalidIntentTable(format!(
                    "phrase '{}' for {} is not lowercase",
                    phrase, rule.intent
                )));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// First rule matching the lowercased command
    pub fn first_match(&self, lowered: &str) -> Option<&IntentRule> {
        self.rules.iter().find(|rule| rule.matches(lowered))
    }
}

const BUILTIN_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::ShowColumns,
        &["show columns", "what are the columns", "list the columns"],
    ),
    (
        Intent::ShowStatistics,
        &["show statistics", "describe the data", "get data statistics"],
    ),
    (
        Intent::ShowMissing,
        &["missing values", "null values", "check missing"],
    ),
    (
        Intent::PlotLine,
        &["plot line chart", "show line chart", "line plot"],
    ),
    (Intent::PlotHistogram, &["show histogram", "plot histogram"]),
    (
        Intent::FilterValue,
        &["filter by value", "filter rows by value"],
    ),
    (
        Intent::FilterCondition,
        &["filter by condition", "select rows where"],
    ),
    (
        Intent::SortData,
        &["sort the data", "order the data", "sort by"],
    ),
    (Intent::ShowTop, &["show top rows", "show first rows"]),
    (Intent::ShowBottom, &["show bottom rows", "show last rows"]),
    (
        Intent::CorrelationHeatmap,
        &["show correlation heatmap", "correlation plot"],
    ),
];

static BUILTIN: OnceLock<IntentTable> = OnceLock::new();

/// The process-wide keyword table, built once on first use
pub fn builtin_table() -> &'static IntentTable {
    BUILTIN.get_or_init(|| IntentTable {
        rules: BUILTIN_RULES
            .iter()
            .map(|(intent, phrases)| IntentRule::new(*intent, phrases))
            .collect(),
    })
}
