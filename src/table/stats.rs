//! Descriptive statistics and missing-value counts

use crate::table::{Column, Table, Value};
use ahash::AHashMap;
use serde::Serialize;

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN below two values
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summary of one text column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; first seen wins ties
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Text(TextStats),
}

/// Result of `describe`: numeric columns when any exist, otherwise text columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub columns: Vec<ColumnStats>,
}

/// Missing cells in one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

pub fn describe(table: &Table) -> StatsSummary {
    let numeric: Vec<&Column> = table.columns().iter().filter(|c| c.dtype.is_numeric()).collect();

    let columns = if numeric.is_empty() {
        table
            .columns()
            .iter()
            .map(|c| ColumnStats::Text(text_stats(c)))
            .collect()
    } else {
        numeric
            .into_iter()
            .map(|c| ColumnStats::Numeric(numeric_stats(c)))
            .collect()
    };

    StatsSummary { columns }
}

pub fn missing_counts(table: &Table) -> Vec<MissingCount> {
    table
        .columns()
        .iter()
        .map(|c| MissingCount {
            column: c.name.clone(),
            missing: c.missing_count(),
        })
        .collect()
}

fn numeric_stats(column: &Column) -> NumericStats {
    let mut values = column.numeric_values();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = if count == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / count as f64
    };
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    NumericStats {
        column: column.name.clone(),
        count,
        mean,
        std,
        min: values.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied().unwrap_or(f64::NAN),
    }
}

fn text_stats(column: &Column) -> TextStats {
    let mut counts: AHashMap<String, usize> = AHashMap::new();
    let mut order: Vec<String> = Vec::new();
    for value in column.values.iter().filter(|v| !v.is_missing()) {
        let text = value.text_form();
        let entry = counts.entry(text.clone()).or_insert(0);
        if *entry == 0 {
            order.push(text);
        }
        *entry += 1;
    }

    let mut top: Option<(&String, usize)> = None;
    for text in &order {
        let n = counts.get(text).copied().unwrap_or(0);
        if top.map_or(true, |(_, best)| n > best) {
            top = Some((text, n));
        }
    }

    TextStats {
        column: column.name.clone(),
        count: column.values.iter().filter(|v| !matches!(v, Value::Missing)).count(),
        unique: order.len(),
        top: top.map(|(t, _)| t.clone()),
        freq: top.map_or(0, |(_, n)| n),
    }
}

/// Quantile of sorted values by linear interpolation between closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
