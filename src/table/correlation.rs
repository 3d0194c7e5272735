//! Pairwise Pearson correlation across numeric columns

use crate::table::Table;
use serde::Serialize;

/// Square correlation matrix; `values[i][j]` pairs `labels[i]` with `labels[j]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == col)?;
        Some(self.values[i][j])
    }
}

/// Correlate every pair of numeric columns
///
/// Each pair uses only rows where both cells are present. Pairs with fewer
/// than two such rows, or with zero variance, are NaN.
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let numeric: Vec<Vec<Option<f64>>> = table
        .columns()
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .map(|c| c.values.iter().map(|v| v.as_f64()).collect())
        .collect();
    let labels = table.numeric_column_names();

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&numeric[i], &numeric[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { labels, values }
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (cov / denom).clamp(-1.0, 1.0)
}
