//! Cell values and typed columns

use serde::{Serialize, Serializer};

/// A single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell; text and missing cells have none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Textual form used for exact-match filtering and display
    ///
    /// Floats always carry a decimal point ("30.0") or a signed two-digit
    /// exponent ("1e+16", "2.5e-05"); missing cells read "nan".
    pub fn text_form(&self) -> String {
        match self {
            Value::Missing => "nan".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => float_text(*f),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Shortest round-trip form of a float with a signed, zero-padded exponent
fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", f);
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    /// Build a column from raw cells (`None` = missing), inferring its type
    ///
    /// All integers and no missing cells -> Integer; all numeric -> Float
    /// (integers with gaps widen to Float); anything else -> Text.
    pub fn from_raw(name: impl Into<String>, raw: Vec<Option<String>>) -> Self {
        let name = name.into();
        let present: Vec<&str> = raw.iter().flatten().map(|s| s.as_str()).collect();
        let has_missing = present.len() < raw.len();

        let all_int = !present.is_empty() && present.iter().all(|s| s.trim().parse::<i64>().is_ok());
        let all_float = !present.is_empty() && present.iter().all(|s| s.trim().parse::<f64>().is_ok());

        let dtype = if all_int && !has_missing {
            ColumnType::Integer
        } else if all_float {
            ColumnType::Float
        } else {
            ColumnType::Text
        };

        let values = raw
            .into_iter()
            .map(|cell| match cell {
                None => Value::Missing,
                Some(s) => match dtype {
                    ColumnType::Integer => s.trim().parse().map(Value::Int).unwrap_or(Value::Missing),
                    ColumnType::Float => s.trim().parse().map(Value::Float).unwrap_or(Value::Missing),
                    ColumnType::Text => Value::Text(s),
                },
            })
            .collect();

        Self { name, dtype, values }
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing numeric values in row order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Column restricted to the given row indices, in that order
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype,
            values: rows.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(|s| s.to_string())).collect()
    }

    #[test]
    fn test_integer_column() {
        let col = Column::from_raw("age", raw(&[Some("30"), Some(" 41"), Some("-2")]));
        assert_eq!(col.dtype, ColumnType::Integer);
        assert_eq!(col.values[1], Value::Int(41));
    }

    #[test]
    fn test_integers_with_gap_widen_to_float() {
        let col = Column::from_raw("age", raw(&[Some("30"), None]));
        assert_eq!(col.dtype, ColumnType::Float);
        assert_eq!(col.values[0].text_form(), "30.0");
        assert_eq!(col.values[1].text_form(), "nan");
    }

    #[test]
    fn test_mixed_column_is_text() {
        let col = Column::from_raw("city", raw(&[Some("Paris"), Some("12")]));
        assert_eq!(col.dtype, ColumnType::Text);
        assert_eq!(col.values[1], Value::Text("12".into()));
        assert_eq!(col.values[1].as_f64(), None);
    }

    #[test]
    fn test_all_missing_column_is_text() {
        let col = Column::from_raw("empty", raw(&[None, None]));
        assert_eq!(col.dtype, ColumnType::Text);
        assert_eq!(col.missing_count(), 2);
    }

    #[test]
    fn test_float_text_form() {
        assert_eq!(Value::Float(2.5).text_form(), "2.5");
        assert_eq!(Value::Int(7).text_form(), "7");
        assert_eq!(Value::Float(0.0001).text_form(), "0.0001");
        assert_eq!(Value::Float(1e15).text_form(), "1000000000000000.0");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(Value::Float(1e16).text_form(), "1e+16");
        assert_eq!(Value::Float(1e-5).text_form(), "1e-05");
        assert_eq!(Value::Float(-2.5e-7).text_form(), "-2.5e-07");
        assert_eq!(Value::Float(1.5e300).text_form(), "1.5e+300");
        assert_eq!(Value::Float(f64::INFINITY).text_form(), "inf");
    }
}
