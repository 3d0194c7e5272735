//! Chart models built from a Table
//!
//! Charts are plain data: the terminal renderer (`ui::render`) and the PNG
//! exporter (`chart::png`) both draw from the same model.

pub mod png;

use crate::table::{correlation_matrix, ColumnType, CorrelationMatrix, Table};
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum Chart {
    Line(LineChart),
    Histogram(Histogram),
    Heatmap(Heatmap),
}

impl Chart {
    /// Short name used for exported file names
    pub fn kind(&self) -> &'static str {
        match self {
            Chart::Line(_) => "line",
            Chart::Histogram(_) => "histogram",
            Chart::Heatmap(_) => "heatmap",
        }
    }
}

/// y plotted against x
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub x_label: String,
    pub y_label: String,
    /// Points sorted by x; one point per distinct x (mean of y)
    pub points: Vec<(f64, f64)>,
    /// Category names when x is not numeric; point x is the category index
    pub categories: Option<Vec<String>>,
}

impl LineChart {
    /// Build a line of `y` against `x`
    ///
    /// Numeric x is sorted and duplicate x values average their y. Text x
    /// becomes categorical positions in first-appearance order. Rows without
    /// a numeric y are skipped; None if no row has one.
    pub fn from_columns(table: &Table, x: &str, y: &str) -> Option<Self> {
        let x_col = table.column(x)?;
        let y_col = table.column(y)?;

        let pairs = x_col
            .values
            .iter()
            .zip(&y_col.values)
            .filter_map(|(xv, yv)| Some((xv, yv.as_f64()?)));

        let (points, categories) = if x_col.dtype == ColumnType::Text {
            let mut index: AHashMap<String, usize> = AHashMap::new();
            let mut names: Vec<String> = Vec::new();
            let mut sums: Vec<(f64, usize)> = Vec::new();
            for (xv, yv) in pairs {
                let key = xv.text_form();
                let slot = *index.entry(key.clone()).or_insert_with(|| {
                    names.push(key);
                    sums.push((0.0, 0));
                    names.len() - 1
                });
                sums[slot].0 += yv;
                sums[slot].1 += 1;
            }
            let points: Vec<(f64, f64)> = sums
                .iter()
                .enumerate()
                .map(|(i, (sum, n))| (i as f64, sum / *n as f64))
                .collect();
            (points, Some(names))
        } else {
            let mut groups: BTreeMap<OrderedFloat<f64>, (f64, usize)> = BTreeMap::new();
            for (xv, yv) in pairs {
                let Some(xf) = xv.as_f64() else { continue };
                let entry = groups.entry(OrderedFloat(xf)).or_insert((0.0, 0));
                entry.0 += yv;
                entry.1 += 1;
            }
            let points: Vec<(f64, f64)> = groups
                .into_iter()
                .map(|(xf, (sum, n))| (xf.0, sum / n as f64))
                .collect();
            (points, None)
        };

        if points.is_empty() {
            return None;
        }
        Some(Self {
            x_label: x.to_string(),
            y_label: y.to_string(),
            points,
            categories,
        })
    }
}

/// Equal-width bins over one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    /// `bins + 1` ascending bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin the finite values of `column`; the last bin is closed on the right
    ///
    /// A constant column spans [v - 0.5, v + 0.5]. Infinite values are not
    /// binned. None if the column has no finite values.
    pub fn from_column(table: &Table, column: &str, bins: usize) -> Option<Self> {
        let values: Vec<f64> = table
            .column(column)?
            .numeric_values()
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0u64; bins];
        for v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self {
            column: column.to_string(),
            edges,
            counts,
        })
    }
}

/// Annotated correlation heatmap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub matrix: CorrelationMatrix,
    /// Decimal places for the cell annotations
    pub decimals: usize,
}

impl Heatmap {
    /// Correlation heatmap over all numeric columns; None without any
    pub fn correlation(table: &Table, decimals: usize) -> Option<Self> {
        let matrix = correlation_matrix(table);
        if matrix.labels.is_empty() {
            return None;
        }
        Some(Self { matrix, decimals })
    }

    /// Annotation for one cell ("nan" where undefined)
    pub fn annotation(&self, row: usize, col: usize) -> String {
        let v = self.matrix.values[row][col];
        if v.is_nan() {
            "nan".to_string()
        } else {
            format!("{:.*}", self.decimals, v)
        }
    }
}

/// Diverging blue-white-red ramp over [-1, 1]; grey for NaN
pub fn coolwarm(value: f64) -> (u8, u8, u8) {
    if value.is_nan() {
        return (128, 128, 128);
    }
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COLD, MID, v + 1.0)
    } else {
        (MID, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::people;

    #[test]
    fn test_line_chart_sorts_numeric_x() {
        let chart = LineChart::from_columns(&people(), "age", "score").unwrap();
        let xs: Vec<f64> = chart.points.iter().map(|p| p.0).collect();
        // Cid (42) has no score
        assert_eq!(xs, vec![28.0, 30.0, 35.0, 51.0]);
        assert!(chart.categories.is_none());
    }

    #[test]
    fn test_line_chart_averages_duplicate_x() {
        let table = Table::from_rows(
            vec!["x".into(), "y".into()],
            vec![
                vec!["1".into(), "2".into()],
                vec!["1".into(), "4".into()],
                vec!["2".into(), "5".into()],
            ],
            &[],
        );
        let chart = LineChart::from_columns(&table, "x", "y").unwrap();
        assert_eq!(chart.points, vec![(1.0, 3.0), (2.0, 5.0)]);
    }

    #[test]
    fn test_line_chart_categorical_x() {
        let chart = LineChart::from_columns(&people(), "city", "age").unwrap();
        assert_eq!(
            chart.categories.as_deref().unwrap(),
            &["Paris", "paris", "Lyon", "Paris "]
        );
        assert_eq!(chart.points[0], (0.0, (28.0 + 51.0) / 2.0));
    }

    #[test]
    fn test_line_chart_needs_numeric_y() {
        assert!(LineChart::from_columns(&people(), "age", "city").is_none());
    }

    #[test]
    fn test_histogram_bins() {
        let hist = Histogram::from_column(&people(), "age", 20).unwrap();
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_eq!(hist.counts.iter().sum::<u64>(), 5);
        assert_eq!(hist.edges[0], 28.0);
        assert_eq!(*hist.counts.last().unwrap(), 1, "max lands in last bin");
    }

    #[test]
    fn test_histogram_ignores_infinite_values() {
        let table = Table::from_rows(
            vec!["y".into()],
            vec![vec!["2".into()], vec!["inf".into()], vec!["4".into()], vec!["-inf".into()]],
            &[],
        );
        let hist = Histogram::from_column(&table, "y", 2).unwrap();
        assert_eq!(hist.edges, vec![2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, vec![1, 1]);

        let only_inf = Table::from_rows(vec!["y".into()], vec![vec!["inf".into()]], &[]);
        assert!(Histogram::from_column(&only_inf, "y", 20).is_none());
    }

    #[test]
    fn test_histogram_constant_column() {
        let table = Table::from_rows(vec!["v".into()], vec![vec!["3".into()], vec!["3".into()]], &[]);
        let hist = Histogram::from_column(&table, "v", 4).unwrap();
        assert_eq!(hist.edges[0], 2.5);
        assert_eq!(hist.edges[4], 3.5);
        assert_eq!(hist.counts, vec![0, 0, 2, 0]);
    }

    #[test]
    fn test_heatmap_annotations() {
        let heatmap = Heatmap::correlation(&people(), 2).unwrap();
        assert_eq!(heatmap.annotation(0, 0), "1.00");
        assert_eq!(heatmap.matrix.labels, vec!["age", "score"]);
    }

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), (59, 76, 192));
        assert_eq!(coolwarm(0.0), (221, 221, 221));
        assert_eq!(coolwarm(1.0), (180, 4, 38));
    }
}
