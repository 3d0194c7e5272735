//! Results of dispatching one command

use crate::chart::Chart;
use crate::command::params::ParamRequest;
use crate::table::{MissingCount, StatsSummary, Table};
use serde::Serialize;

/// What a dispatched intent produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// Column names in declared order
    Columns(Vec<String>),
    Statistics(StatsSummary),
    Missing(Vec<MissingCount>),
    /// A derived view: filtered, sorted, head or tail
    Rows(Table),
    Chart(Chart),
    /// Required parameters are still unanswered; no operation ran
    NeedsInput(Vec<ParamRequest>),
    Diagnostic(Diagnostic),
}

impl Outcome {
    /// One-line description for the session log
    pub fn summary(&self) -> String {
        match self {
            Outcome::Columns(names) => format!("{} columns", names.len()),
            Outcome::Statistics(s) => format!("statistics for {} columns", s.columns.len()),
            Outcome::Missing(counts) => format!(
                "{} missing cells",
                counts.iter().map(|m| m.missing).sum::<usize>()
            ),
            Outcome::Rows(t) => format!("{} rows", t.row_count()),
            Outcome::Chart(c) => format!("{} chart", c.kind()),
            Outcome::NeedsInput(reqs) => format!("awaiting {} parameter(s)", reqs.len()),
            Outcome::Diagnostic(d) => d.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A condition-filter value did not parse as a number
    InvalidNumericValue,
    /// No rule matched the command
    UnrecognizedIntent,
    /// The operation has nothing to work on (e.g. no numeric columns)
    NotApplicable,
}

/// A user-visible message in place of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn invalid_numeric_value() -> Self {
        Self {
            level: Level::Error,
            kind: DiagnosticKind::InvalidNumericValue,
            message: "Invalid numeric value.".into(),
        }
    }

    pub fn unrecognized() -> Self {
        Self {
            level: Level::Warning,
            kind: DiagnosticKind::UnrecognizedIntent,
            message: "Command not recognized. Try something like 'show statistics' or 'plot histogram'."
                .into(),
        }
    }

    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            kind: DiagnosticKind::NotApplicable,
            message: message.into(),
        }
    }
}
