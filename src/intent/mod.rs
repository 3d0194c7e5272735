//! Intent detection
//!
//! Maps free-text commands to one of a fixed set of data-exploration intents
//! by literal, case-insensitive substring matching against a static keyword
//! table. There is no tokenization or scoring: the first rule (in table order)
//! with a matching trigger phrase wins.

pub mod classifier;
pub mod rules;

pub use classifier::IntentClassifier;
pub use rules::{builtin_table, IntentRule, IntentTable};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data-exploration operations a command can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// List column names in declared order
    ShowColumns,
    /// Descriptive statistics per numeric column
    ShowStatistics,
    /// Missing-value count per column
    ShowMissing,
    /// Line chart of one column against another
    PlotLine,
    /// Histogram of a numeric column
    PlotHistogram,
    /// Rows whose textual value equals a literal
    FilterValue,
    /// Rows satisfying a numeric comparison
    FilterCondition,
    /// Rows reordered by a column
    SortData,
    /// Leading rows
    ShowTop,
    /// Trailing rows
    ShowBottom,
    /// Correlation matrix of numeric columns as a heatmap
    CorrelationHeatmap,
    /// No rule matched
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 12] = [
        Intent::ShowColumns,
        Intent::ShowStatistics,
        Intent::ShowMissing,
        Intent::PlotLine,
        Intent::PlotHistogram,
        Intent::FilterValue,
        Intent::FilterCondition,
        Intent::SortData,
        Intent::ShowTop,
        Intent::ShowBottom,
        Intent::CorrelationHeatmap,
        Intent::Unknown,
    ];

    /// Stable snake_case tag
    pub fn name(self) -> &'static str {
        match self {
            Intent::ShowColumns => "show_columns",
            Intent::ShowStatistics => "show_statistics",
            Intent::ShowMissing => "show_missing",
            Intent::PlotLine => "plot_line",
            Intent::PlotHistogram => "plot_histogram",
            Intent::FilterValue => "filter_value",
            Intent::FilterCondition => "filter_condition",
            Intent::SortData => "sort_data",
            Intent::ShowTop => "show_top",
            Intent::ShowBottom => "show_bottom",
            Intent::CorrelationHeatmap => "correlation_heatmap",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| format!("unknown intent tag '{}'", s))
    }
}
