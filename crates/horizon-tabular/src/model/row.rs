//! Row access.
//!
//! The engine never assumes anything about a row's shape beyond "read the
//! field named `key`". [`Row`] is that accessor; implement it for your own
//! record types, or use one of the provided implementations.

use std::collections::HashMap;

use super::value::CellValue;

/// A record the engine can read named fields from.
///
/// Missing fields must yield [`CellValue::Null`].
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{CellValue, Row};
///
/// struct Product {
///     sku: String,
///     stock: Option<u32>,
/// }
///
/// impl Row for Product {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "sku" => CellValue::from(&self.sku),
///             "stock" => CellValue::from(self.stock),
///             _ => CellValue::Null,
///         }
///     }
/// }
///
/// let p = Product { sku: "A-1".into(), stock: None };
/// assert_eq!(p.key("sku"), "A-1");
/// assert!(p.field("stock").is_null());
/// ```
pub trait Row {
    /// Read the field named `key`.
    fn field(&self, key: &str) -> CellValue;

    /// The row's identity: the string coercion of its `key_field` value.
    ///
    /// A null key coerces to the empty string.
    fn key(&self, key_field: &str) -> String {
        self.field(key_field).to_text().unwrap_or_default()
    }
}

/// An ordered, string-keyed bag of cell values.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{Record, Row};
///
/// let row = Record::new().with("id", "a").with("stock", 5);
/// assert_eq!(row.field("stock").to_number(), 5.0);
/// assert!(row.field("missing").is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field, replacing any previous value with the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns a reference to a field's value.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

impl Row for Record {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl Row for HashMap<String, CellValue> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map(CellValue::from).unwrap_or_default()
    }
}

impl Row for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        match self {
            serde_json::Value::Object(map) => map.field(key),
            _ => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_set_replaces() {
        let mut record = Record::new().with("id", "a");
        record.set("id", "b");
        assert_eq!(record.len(), 1);
        assert_eq!(record.key("id"), "b");
    }

    #[test]
    fn test_record_from_iter_keeps_order() {
        let record: Record = [("b", 1), ("a", 2)].into_iter().collect();
        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_json_row_access() {
        let row = json!({"id": 7, "name": "Widget", "stock": null});
        assert_eq!(row.key("id"), "7");
        assert_eq!(row.field("name"), CellValue::from("Widget"));
        assert!(row.field("stock").is_null());
        assert!(row.field("missing").is_null());
        assert!(json!([1, 2]).field("0").is_null());
    }

    #[test]
    fn test_hash_map_row() {
        let mut row = HashMap::new();
        row.insert("id".to_string(), CellValue::from(1));
        assert_eq!(row.key("id"), "1");
        assert_eq!(row.key("nope"), "");
    }
}
