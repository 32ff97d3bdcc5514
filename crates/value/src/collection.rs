use serde::Serialize;

use crate::error::{Result, ValueError};
use crate::value::Value;

/// Stable identifier of a record: its position in the collection
pub type RecordId = usize;

/// Ordered, immutable sequence of records.
///
/// Record ids are positions and stay valid for as long as the collection
/// lives. A reload builds a new collection rather than mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Value>,
}

impl Collection {
    #[must_use]
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Build a collection from an already decoded JSON document.
    ///
    /// The document must be an array; its elements become records in order.
    pub fn from_json(document: serde_json::Value) -> Result<Self> {
        match document {
            serde_json::Value::Array(items) => {
                Ok(Self::new(items.into_iter().map(Value::from).collect()))
            }
            other => Err(ValueError::NotAnArray(json_kind(&other).to_string())),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Value> {
        self.records.get(id)
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Records paired with their ids, in collection order
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Value)> {
        self.records.iter().enumerate()
    }

    /// Text of a top-level scalar field, used as a display label
    #[must_use]
    pub fn label(&self, id: RecordId, key: &str) -> Option<String> {
        self.get(id)
            .and_then(|record| record.get(key))
            .and_then(Value::scalar_text)
    }
}

impl From<Vec<Value>> for Collection {
    fn from(records: Vec<Value>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_assigns_ids_in_order() {
        let collection =
            Collection::from_json(json!([{"species": "a"}, {"species": "b"}])).expect("array");
        assert_eq!(collection.len(), 2);
        let ids: Vec<RecordId> = collection.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(collection.label(1, "species").as_deref(), Some("b"));
    }

    #[test]
    fn from_json_rejects_non_array_documents() {
        let err = Collection::from_json(json!({"species": "a"})).unwrap_err();
        assert!(matches!(err, ValueError::NotAnArray(ref kind) if kind == "object"));
    }

    #[test]
    fn label_is_absent_for_missing_or_container_fields() {
        let collection = Collection::from_json(json!([{"names": ["x"]}])).expect("array");
        assert_eq!(collection.label(0, "names"), None);
        assert_eq!(collection.label(0, "species"), None);
        assert_eq!(collection.label(5, "species"), None);
    }
}
