//! Command dispatch - routes a classified intent to one table operation

use crate::chart::{Chart, Heatmap, Histogram, LineChart};
use crate::command::outcome::{Diagnostic, Outcome};
use crate::command::params::{ParamKey, ParamKind, ParamRequest, ParamSource};
use crate::core::config::{config, AssistantConfig};
use crate::intent::Intent;
use crate::table::{describe, missing_counts, Comparison, Table};
use ahash::AHashMap;

/// Runs exactly one operation per intent against a read-only table
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    preview_rows: usize,
    histogram_bins: usize,
    correlation_decimals: usize,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(config())
    }
}

impl CommandDispatcher {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            preview_rows: config.preview_rows,
            histogram_bins: config.histogram_bins,
            correlation_decimals: config.correlation_decimals,
        }
    }

    /// Parameters an intent asks for, given the table's columns
    pub fn requests_for(intent: Intent, table: &Table) -> Vec<ParamRequest> {
        let columns = table.column_names();
        match intent {
            Intent::PlotLine => vec![
                ParamRequest::column(ParamKey::X, "Select X-axis", columns.clone()),
                ParamRequest::column(ParamKey::Y, "Select Y-axis", columns),
            ],
            Intent::PlotHistogram => vec![ParamRequest::column(
                ParamKey::Column,
                "Select numeric column",
                table.numeric_column_names(),
            )],
            Intent::FilterValue => vec![
                ParamRequest::column(ParamKey::Column, "Column to filter", columns),
                ParamRequest::text(ParamKey::Value, "Exact value to match"),
            ],
            Intent::FilterCondition => vec![
                ParamRequest::column(ParamKey::Column, "Column for condition", columns),
                ParamRequest::operator("Operator"),
                ParamRequest::text(ParamKey::Value, "Value to compare"),
            ],
            Intent::SortData => vec![
                ParamRequest::column(ParamKey::Column, "Sort by column", columns),
                ParamRequest::flag(ParamKey::Ascending, "Sort ascending?", true),
            ],
            Intent::ShowColumns
            | Intent::ShowStatistics
            | Intent::ShowMissing
            | Intent::ShowTop
            | Intent::ShowBottom
            | Intent::CorrelationHeatmap
            | Intent::Unknown => Vec::new(),
        }
    }

    /// Perform the operation for `intent`
    ///
    /// Never fails: bad or missing input becomes a `Diagnostic` or a
    /// `NeedsInput` outcome, and the table is left untouched.
    pub fn dispatch(&self, intent: Intent, table: &Table, params: &dyn ParamSource) -> Outcome {
        tracing::debug!(%intent, rows = table.row_count(), "dispatching");

        if intent == Intent::PlotHistogram && table.numeric_column_names().is_empty() {
            return Outcome::Diagnostic(Diagnostic::not_applicable(
                "No numeric columns available for a histogram.",
            ));
        }

        let args = match Args::collect(Self::requests_for(intent, table), params) {
            Ok(args) => args,
            Err(pending) => return Outcome::NeedsInput(pending),
        };

        match intent {
            Intent::ShowColumns => Outcome::Columns(table.column_names()),
            Intent::ShowStatistics => Outcome::Statistics(describe(table)),
            Intent::ShowMissing => Outcome::Missing(missing_counts(table)),
            Intent::PlotLine => {
                let (x, y) = (args.get(ParamKey::X), args.get(ParamKey::Y));
                match LineChart::from_columns(table, x, y) {
                    Some(line) => Outcome::Chart(Chart::Line(line)),
                    None => Outcome::Diagnostic(Diagnostic::not_applicable(format!(
                        "Column '{}' has no numeric values to plot.",
                        y
                    ))),
                }
            }
            Intent::PlotHistogram => {
                let column = args.get(ParamKey::Column);
                match Histogram::from_column(table, column, self.histogram_bins) {
                    Some(hist) => Outcome::Chart(Chart::Histogram(hist)),
                    None => Outcome::Diagnostic(Diagnostic::not_applicable(format!(
                        "Column '{}' has no finite values to bin.",
                        column
                    ))),
                }
            }
            Intent::FilterValue => {
                let (column, literal) = (args.get(ParamKey::Column), args.get(ParamKey::Value));
                table
                    .filter_text_eq(column, literal)
                    .map(Outcome::Rows)
                    .unwrap_or_else(|| unknown_column(column))
            }
            Intent::FilterCondition => self.filter_condition(table, &args),
            Intent::SortData => {
                let column = args.get(ParamKey::Column);
                let ascending = args.get(ParamKey::Ascending) == "true";
                table
                    .sorted_by(column, ascending)
                    .map(Outcome::Rows)
                    .unwrap_or_else(|| unknown_column(column))
            }
            Intent::ShowTop => Outcome::Rows(table.head(self.preview_rows)),
            Intent::ShowBottom => Outcome::Rows(table.tail(self.preview_rows)),
            Intent::CorrelationHeatmap => {
                match Heatmap::correlation(table, self.correlation_decimals) {
                    Some(heatmap) => Outcome::Chart(Chart::Heatmap(heatmap)),
                    None => Outcome::Diagnostic(Diagnostic::not_applicable(
                        "No numeric columns to correlate.",
                    )),
                }
            }
            Intent::Unknown => Outcome::Diagnostic(Diagnostic::unrecognized()),
        }
    }

    fn filter_condition(&self, table: &Table, args: &Args) -> Outcome {
        // Parse inputs before touching the table
        let Ok(threshold) = args.get(ParamKey::Value).trim().parse::<f64>() else {
            tracing::debug!(value = args.get(ParamKey::Value), "rejected condition value");
            return Outcome::Diagnostic(Diagnostic::invalid_numeric_value());
        };
        let Ok(op) = args.get(ParamKey::Operator).parse::<Comparison>() else {
            return Outcome::Diagnostic(Diagnostic::invalid_numeric_value());
        };

        table
            .filter_numeric(args.get(ParamKey::Column), op, threshold)
            .map(Outcome::Rows)
            .unwrap_or_else(|| Outcome::Diagnostic(Diagnostic::invalid_numeric_value()))
    }
}

fn unknown_column(column: &str) -> Outcome {
    Outcome::Diagnostic(Diagnostic::not_applicable(format!(
        "Unknown column '{}'.",
        column
    )))
}

/// Validated answers for one dispatch
struct Args {
    values: AHashMap<ParamKey, String>,
}

impl Args {
    /// Ask the source for every request; unanswered flags take their default
    ///
    /// If any required request is unanswered, returns every request that was
    /// not validly answered so the surface can ask for them together.
    fn collect(
        requests: Vec<ParamRequest>,
        source: &dyn ParamSource,
    ) -> std::result::Result<Self, Vec<ParamRequest>> {
        let mut values = AHashMap::new();
        let mut pending = Vec::new();
        let mut missing_required = false;

        for request in requests {
            match source.answer(&request).and_then(|raw| request.accept(&raw)) {
                Some(value) => {
                    values.insert(request.key, value);
                }
                None => {
                    if request.is_required() {
                        missing_required = true;
                    } else if let ParamKind::Flag { default } = request.kind {
                        values.insert(request.key, default.to_string());
                    }
                    pending.push(request);
                }
            }
        }

        if missing_required {
            Err(pending)
        } else {
            Ok(Self { values })
        }
    }

    fn get(&self, key: ParamKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }
}
