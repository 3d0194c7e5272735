//! Row selection: head/tail slices, filters and sorting

use crate::table::{Column, ColumnType, Table, Value};
use derive_more::Display;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

/// Numeric comparison operators accepted by condition filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Comparison {
    #[display(fmt = ">")]
    #[serde(rename = ">")]
    Gt,
    #[display(fmt = "<")]
    #[serde(rename = "<")]
    Lt,
    #[display(fmt = ">=")]
    #[serde(rename = ">=")]
    Ge,
    #[display(fmt = "<=")]
    #[serde(rename = "<=")]
    Le,
}

impl Comparison {
    pub const ALL: [Comparison; 4] = [Comparison::Gt, Comparison::Lt, Comparison::Ge, Comparison::Le];

    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Le => lhs <= rhs,
        }
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparison::ALL
            .into_iter()
            .find(|op| op.to_string() == s.trim())
            .ok_or_else(|| format!("unknown operator '{}'", s))
    }
}

impl Table {
    /// First `n` rows (fewer if the table is shorter)
    pub fn head(&self, n: usize) -> Table {
        let rows: Vec<usize> = (0..self.row_count().min(n)).collect();
        self.take_rows(&rows)
    }

    /// Last `n` rows, in original order
    pub fn tail(&self, n: usize) -> Table {
        let start = self.row_count().saturating_sub(n);
        let rows: Vec<usize> = (start..self.row_count()).collect();
        self.take_rows(&rows)
    }

    /// Rows whose textual form in `column` equals `literal` exactly
    ///
    /// Returns None if the column does not exist.
    pub fn filter_text_eq(&self, column: &str, literal: &str) -> Option<Table> {
        let col = self.column(column)?;
        let rows: Vec<usize> = col
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.text_form() == literal)
            .map(|(i, _)| i)
            .collect();
        Some(self.take_rows(&rows))
    }

    /// Rows whose numeric value in `column` satisfies `op threshold`
    ///
    /// Missing cells never satisfy the comparison. Returns None if the column
    /// does not exist or is not numeric.
    pub fn filter_numeric(&self, column: &str, op: Comparison, threshold: f64) -> Option<Table> {
        let col = self.column(column).filter(|c| c.dtype.is_numeric())?;
        let rows: Vec<usize> = col
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_f64().is_some_and(|x| op.holds(x, threshold)))
            .map(|(i, _)| i)
            .collect();
        Some(self.take_rows(&rows))
    }

    /// Stable sort by one column; missing cells go last in both directions
    pub fn sorted_by(&self, column: &str, ascending: bool) -> Option<Table> {
        let col = self.column(column)?;
        let mut rows: Vec<usize> = (0..self.row_count()).collect();
        rows.sort_by(|&a, &b| compare_cells(col, a, b, ascending));
        Some(self.take_rows(&rows))
    }
}

fn compare_cells(col: &Column, a: usize, b: usize, ascending: bool) -> Ordering {
    let (va, vb) = (&col.values[a], &col.values[b]);
    match (va.is_missing(), vb.is_missing()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ord = match col.dtype {
        ColumnType::Integer | ColumnType::Float => {
            let key = |v: &Value| OrderedFloat(v.as_f64().unwrap_or(f64::NAN));
            key(va).cmp(&key(vb))
        }
        ColumnType::Text => va.text_form().cmp(&vb.text_form()),
    };

    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::people;

    fn names(table: &Table) -> Vec<String> {
        table.column("name").unwrap().values.iter().map(Value::text_form).collect()
    }

    #[test]
    fn test_head_and_tail() {
        let table = people();
        assert_eq!(names(&table.head(2)), vec!["Ann", "Bob"]);
        assert_eq!(names(&table.tail(2)), vec!["Dee", "Eve"]);
        assert_eq!(table.head(10).row_count(), 5);
        assert_eq!(table.tail(10).row_count(), 5);
    }

    #[test]
    fn test_filter_text_eq_is_exact() {
        let filtered = people().filter_text_eq("city", "Paris").unwrap();
        assert_eq!(names(&filtered), vec!["Ann", "Eve"]);
    }

    #[test]
    fn test_filter_text_eq_on_numbers_uses_text_form() {
        let table = people();
        assert_eq!(names(&table.filter_text_eq("age", "30").unwrap()), vec!["Dee"]);
        assert_eq!(names(&table.filter_text_eq("score", "64.0").unwrap()), vec!["Bob"]);
        assert_eq!(table.filter_text_eq("score", "64").unwrap().row_count(), 0);
    }

    #[test]
    fn test_filter_text_eq_on_exponent_floats() {
        let table = Table::from_rows(
            vec!["v".into()],
            vec![vec!["1e16".into()], vec!["0.00001".into()], vec!["3".into()]],
            &[],
        );
        assert_eq!(table.filter_text_eq("v", "1e+16").unwrap().row_count(), 1);
        assert_eq!(table.filter_text_eq("v", "1e-05").unwrap().row_count(), 1);
        assert_eq!(table.filter_text_eq("v", "1e16").unwrap().row_count(), 0);
    }

    #[test]
    fn test_filter_numeric() {
        let table = people();
        let older = table.filter_numeric("age", Comparison::Gt, 30.0).unwrap();
        assert_eq!(names(&older), vec!["Bob", "Cid", "Eve"]);
        let at_most = table.filter_numeric("age", Comparison::Le, 30.0).unwrap();
        assert_eq!(names(&at_most), vec!["Ann", "Dee"]);
    }

    #[test]
    fn test_filter_numeric_skips_missing_and_text() {
        let table = people();
        let low = table.filter_numeric("score", Comparison::Lt, 1000.0).unwrap();
        assert_eq!(low.row_count(), 4);
        assert!(table.filter_numeric("city", Comparison::Gt, 1.0).is_none());
    }

    #[test]
    fn test_sort_missing_last_both_ways() {
        let table = people();
        let asc = table.sorted_by("score", true).unwrap();
        assert_eq!(names(&asc), vec!["Bob", "Ann", "Dee", "Eve", "Cid"]);
        let desc = table.sorted_by("score", false).unwrap();
        assert_eq!(names(&desc), vec!["Eve", "Dee", "Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_sort_text_is_stable_on_ties() {
        let table = Table::from_rows(
            vec!["k".into(), "id".into()],
            vec![
                vec!["b".into(), "1".into()],
                vec!["a".into(), "2".into()],
                vec!["b".into(), "3".into()],
                vec!["a".into(), "4".into()],
            ],
            &[],
        );
        let ids = |t: &Table| -> Vec<String> {
            t.column("id").unwrap().values.iter().map(Value::text_form).collect()
        };
        assert_eq!(ids(&table.sorted_by("k", true).unwrap()), vec!["2", "4", "1", "3"]);
        assert_eq!(ids(&table.sorted_by("k", false).unwrap()), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_comparison_parse() {
        assert_eq!(">=".parse::<Comparison>().unwrap(), Comparison::Ge);
        assert_eq!(Comparison::Lt.to_string(), "<");
        assert!("==".parse::<Comparison>().is_err());
    }
}
