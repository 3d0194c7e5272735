//! Parameter requests exchanged between the dispatcher and the interaction surface
//!
//! The dispatcher never blocks for input. It describes what it needs as
//! `ParamRequest`s; a `ParamSource` answers what it can. Unanswered required
//! requests come back to the surface as `Outcome::NeedsInput`, and the
//! surface re-runs the command once it has collected answers.

use crate::table::Comparison;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Named parameter slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    /// X-axis column of a line chart
    X,
    /// Y-axis column of a line chart
    Y,
    /// Column to histogram, filter or sort by
    Column,
    /// Comparison operator for a condition filter
    Operator,
    /// Literal or numeric text for a filter
    Value,
    /// Sort direction
    Ascending,
}

impl ParamKey {
    pub const ALL: [ParamKey; 6] = [
        ParamKey::X,
        ParamKey::Y,
        ParamKey::Column,
        ParamKey::Operator,
        ParamKey::Value,
        ParamKey::Ascending,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::X => "x",
            ParamKey::Y => "y",
            ParamKey::Column => "column",
            ParamKey::Operator => "operator",
            ParamKey::Value => "value",
            ParamKey::Ascending => "ascending",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ParamKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = ParamKey::ALL.iter().map(|k| k.name()).collect();
                format!("unknown parameter '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// What kind of answer a request accepts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    /// One of the listed column names
    Column { choices: Vec<String> },
    /// One of the listed operators
    Operator { choices: Vec<String> },
    /// Any non-empty text
    Text,
    /// Yes/no; unanswered falls back to the default
    Flag { default: bool },
}

/// A parameter the dispatcher needs before it can run an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRequest {
    pub key: ParamKey,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamRequest {
    pub fn column(key: ParamKey, prompt: &str, choices: Vec<String>) -> Self {
        Self {
            key,
            prompt: prompt.to_string(),
            kind: ParamKind::Column { choices },
        }
    }

    pub fn operator(prompt: &str) -> Self {
        Self {
            key: ParamKey::Operator,
            prompt: prompt.to_string(),
            kind: ParamKind::Operator {
                choices: Comparison::ALL.iter().map(|op| op.to_string()).collect(),
            },
        }
    }

    pub fn text(key: ParamKey, prompt: &str) -> Self {
        Self {
            key,
            prompt: prompt.to_string(),
            kind: ParamKind::Text,
        }
    }

    pub fn flag(key: ParamKey, prompt: &str, default: bool) -> Self {
        Self {
            key,
            prompt: prompt.to_string(),
            kind: ParamKind::Flag { default },
        }
    }

    /// Flags have defaults; everything else must be answered
    pub fn is_required(&self) -> bool {
        !matches!(self.kind, ParamKind::Flag { .. })
    }

    /// Allowed answers, when the request is a choice
    pub fn choices(&self) -> Option<&[String]> {
        match &self.kind {
            ParamKind::Column { choices } | ParamKind::Operator { choices } => Some(choices),
            _ => None,
        }
    }

    /// Normalize a raw answer, or None if the request does not accept it
    ///
    /// Column names must match exactly. Text is kept verbatim (no trimming)
    /// but must be non-empty. Flags become "true"/"false".
    pub fn accept(&self, raw: &str) -> Option<String> {
        match &self.kind {
            ParamKind::Column { choices } => choices.iter().find(|c| *c == raw).cloned(),
            ParamKind::Operator { choices } => {
                choices.iter().find(|c| c.as_str() == raw.trim()).cloned()
            }
            ParamKind::Text => (!raw.is_empty()).then(|| raw.to_string()),
            ParamKind::Flag { .. } => parse_flag(raw).map(|b| b.to_string()),
        }
    }
}

/// Read yes/no style answers
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Anything that can answer parameter requests
pub trait ParamSource {
    /// Raw answer for the request, if one is available
    fn answer(&self, request: &ParamRequest) -> Option<String>;
}

/// Answers collected so far, keyed by parameter
///
/// This is the state the surface re-supplies on every re-run of a command.
#[derive(Debug, Clone, Default)]
pub struct SuppliedParams {
    values: AHashMap<ParamKey, String>,
}

impl SuppliedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: ParamKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: ParamKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParamSource for SuppliedParams {
    fn answer(&self, request: &ParamRequest) -> Option<String> {
        self.get(request.key).map(str::to_owned)
    }
}

/// Parse a `KEY=VALUE` pair as given on the command line
pub fn parse_assignment(raw: &str) -> Result<(ParamKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    Ok((key.parse()?, value.to_string()))
}
