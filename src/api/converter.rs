//! Data conversion utilities for API responses.

use super::Payload;
use crate::market::{FieldValue, MarketRecord};
use serde_json::{Map, Value};

const ITEM_FIELDS: &[&str] = &["item", "name"];
const CATEGORY_FIELDS: &[&str] = &["category"];
const PRICE_FIELDS: &[&str] = &["price", "unit_price"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "count"];
const SELLER_FIELDS: &[&str] = &["seller", "owner"];
const TIMESTAMP_FIELDS: &[&str] = &["timestamp", "created_at"];

const DEFAULT_PRICE: i64 = 0;
const DEFAULT_QUANTITY: i64 = 1;

/// Converts API responses to internal types.
pub struct DataConverter;

impl DataConverter {
    /// Normalize one page of market listings.
    ///
    /// Accepts either a bare array or an object wrapping the array in
    /// `data`. Any other shape, including a text body, yields no records.
    pub fn convert_market_page(payload: &Payload) -> Vec<MarketRecord> {
        let Payload::Json(value) = payload else {
            return Vec::new();
        };

        let items = match value {
            Value::Object(map) => map.get("data"),
            other => Some(other),
        };

        match items {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .map(Self::convert_listing)
                .collect(),
            _ => {
                tracing::debug!("market payload has no listing array");
                Vec::new()
            }
        }
    }

    /// Normalize a single upstream listing.
    pub fn convert_listing(raw: &Map<String, Value>) -> MarketRecord {
        MarketRecord {
            item: Self::text(raw, ITEM_FIELDS),
            category: Self::text(raw, CATEGORY_FIELDS),
            price: Self::scalar(raw, PRICE_FIELDS, DEFAULT_PRICE),
            quantity: Self::scalar(raw, QUANTITY_FIELDS, DEFAULT_QUANTITY),
            seller: Self::text(raw, SELLER_FIELDS),
            timestamp: Self::text(raw, TIMESTAMP_FIELDS),
        }
    }

    /// First candidate field holding a meaningful value.
    fn first_present<'a>(raw: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
        candidates
            .iter()
            .filter_map(|key| raw.get(*key))
            .find(|value| is_present(value))
    }

    fn text(raw: &Map<String, Value>, candidates: &[&str]) -> String {
        match Self::first_present(raw, candidates) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => FieldValue::new(other.clone()).to_string(),
            None => String::new(),
        }
    }

    fn scalar(raw: &Map<String, Value>, candidates: &[&str], default: i64) -> FieldValue {
        Self::first_present(raw, candidates)
            .cloned()
            .map(FieldValue::new)
            .unwrap_or_else(|| FieldValue::from(default))
    }
}

/// Whether a value counts as set: not null, false, zero, or empty.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn listing(value: Value) -> MarketRecord {
        DataConverter::convert_listing(value.as_object().unwrap())
    }

    #[test]
    fn test_fallback_fields_and_defaults() {
        let record = listing(json!({"name": "Sword", "unit_price": "12.5", "count": 3}));

        assert_eq!(
            record,
            MarketRecord {
                item: "Sword".to_string(),
                category: String::new(),
                price: FieldValue::from("12.5"),
                quantity: FieldValue::from(3),
                seller: String::new(),
                timestamp: String::new(),
            }
        );
    }

    #[test]
    fn test_primary_fields_win() {
        let record = listing(json!({
            "item": "Axe", "name": "ignored",
            "price": 4, "unit_price": 9,
            "quantity": 2, "count": 8,
            "seller": "alice", "owner": "bob",
            "timestamp": "t1", "created_at": "t2",
            "category": "tools"
        }));

        assert_eq!(record.item, "Axe");
        assert_eq!(record.price, FieldValue::from(4));
        assert_eq!(record.quantity, FieldValue::from(2));
        assert_eq!(record.seller, "alice");
        assert_eq!(record.timestamp, "t1");
        assert_eq!(record.category, "tools");
    }

    #[test]
    fn test_empty_listing_gets_defaults() {
        let record = listing(json!({}));

        assert_eq!(record.item, "");
        assert_eq!(record.price, FieldValue::from(0));
        assert_eq!(record.quantity, FieldValue::from(1));
    }

    #[test]
    fn test_falsy_primary_falls_through() {
        let record = listing(json!({"item": "", "name": "Bow", "quantity": 0, "count": 4, "seller": null, "owner": 17}));

        assert_eq!(record.item, "Bow");
        assert_eq!(record.quantity, FieldValue::from(4));
        assert_eq!(record.seller, "17");

        let record = listing(json!({"quantity": 0}));
        assert_eq!(record.quantity, FieldValue::from(1));
    }

    #[test]
    fn test_page_shapes() {
        let wrapped = Payload::Json(json!({"data": [{"name": "a"}, {"name": "b"}]}));
        assert_eq!(DataConverter::convert_market_page(&wrapped).len(), 2);

        let bare = Payload::Json(json!([{"name": "a"}, "junk", 3]));
        let records = DataConverter::convert_market_page(&bare);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "a");
    }

    #[test]
    fn test_malformed_pages_are_empty() {
        let error = Payload::Json(json!({"error": "bad request"}));
        assert!(DataConverter::convert_market_page(&error).is_empty());

        let not_list = Payload::Json(json!({"data": {"name": "a"}}));
        assert!(DataConverter::convert_market_page(&not_list).is_empty());

        let scalar = Payload::Json(json!(42));
        assert!(DataConverter::convert_market_page(&scalar).is_empty());

        let text = Payload::Text("<html>maintenance</html>".to_string());
        assert!(DataConverter::convert_market_page(&text).is_empty());
    }
}
