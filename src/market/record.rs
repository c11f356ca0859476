//! Normalized market listing.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Column headers, in display and export order.
pub const COLUMNS: [&str; 6] = ["Item", "Category", "Price", "Quantity", "Seller", "Timestamp"];

/// A scalar kept exactly as the API sent it.
///
/// Upstream listings mix numbers and numeric strings, so whether a value
/// "is a number" is decided where it is consumed, not at parse time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldValue(Value);

impl FieldValue {
    /// Wrap a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The wrapped JSON value.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Interpret as a real number.
    ///
    /// Numbers, numeric strings (surrounding whitespace allowed) and
    /// booleans (1/0) convert; everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Interpret as an integer.
    ///
    /// Floats are truncated toward zero. Strings must hold an integer
    /// literal; `"3.5"` is rejected.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Null => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self(Value::from(n))
    }
}

/// One market listing after normalization. Every field is always set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRecord {
    pub item: String,
    pub category: String,
    pub price: FieldValue,
    pub quantity: FieldValue,
    pub seller: String,
    pub timestamp: String,
}

impl MarketRecord {
    /// Display text of each column, in [`COLUMNS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.item.clone(),
            self.category.clone(),
            self.price.to_string(),
            self.quantity.to_string(),
            self.seller.clone(),
            self.timestamp.clone(),
        ]
    }

    /// Case-insensitive substring match against every displayed column.
    ///
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.cells()
            .iter()
            .any(|cell| cell.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> MarketRecord {
        MarketRecord {
            item: "Paladium Sword".to_string(),
            category: "weapons".to_string(),
            price: FieldValue::from("12.5"),
            quantity: FieldValue::from(3),
            seller: "Notch".to_string(),
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_numeric_strings_parse_as_real() {
        assert_eq!(FieldValue::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::new(json!(null)).as_f64(), None);
        assert_eq!(FieldValue::new(json!(true)).as_f64(), Some(1.0));
    }

    #[test]
    fn test_integer_interpretation() {
        assert_eq!(FieldValue::from(7).as_i64(), Some(7));
        assert_eq!(FieldValue::from(7.9).as_i64(), Some(7));
        assert_eq!(FieldValue::from("42").as_i64(), Some(42));
        assert_eq!(FieldValue::from("4.2").as_i64(), None);
        assert_eq!(FieldValue::new(json!([1])).as_i64(), None);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(FieldValue::from("12.5").to_string(), "12.5");
        assert_eq!(FieldValue::from(3).to_string(), "3");
        assert_eq!(FieldValue::from(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::new(json!(false)).to_string(), "False");
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_columns() {
        let r = record();
        assert!(r.matches_search(""));
        assert!(r.matches_search("SWORD"));
        assert!(r.matches_search("notch"));
        assert!(r.matches_search("12.5"));
        assert!(r.matches_search("2024-05"));
        assert!(!r.matches_search("pickaxe"));
    }
}
