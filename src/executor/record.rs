//! Normalized records and the result collection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of one field in a normalized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Integer)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Text)
    }
}

/// Field name → value for one track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Moves every field of `other` into this record; `other` wins on collision
    pub fn merge(&mut self, other: NormalizedRecord) {
        self.fields.extend(other.fields);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records in source iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCollection {
    records: Vec<NormalizedRecord>,
}

impl ResultCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: NormalizedRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.records
    }

    /// Serializes to a JSON array of record objects
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites() {
        let mut record = NormalizedRecord::new();
        record.insert("title", FieldValue::Text("a".into()));
        record.insert("_uri", FieldValue::Null);

        let mut extra = NormalizedRecord::new();
        extra.insert("_uri", FieldValue::Text("content://x/1".into()));
        record.merge(extra);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("_uri").and_then(FieldValue::as_str), Some("content://x/1"));
    }

    #[test]
    fn test_collection_to_json() {
        let mut record = NormalizedRecord::new();
        record.insert("_id", FieldValue::Integer(7));
        record.insert("is_music", FieldValue::Bool(true));
        record.insert("album", FieldValue::Null);
        let mut collection = ResultCollection::empty();
        collection.push(record);

        assert_eq!(
            collection.to_json().unwrap(),
            json!([{"_id": 7, "is_music": true, "album": null}])
        );
    }

    #[test]
    fn test_empty_collection_is_empty_array() {
        assert_eq!(ResultCollection::empty().to_json().unwrap(), json!([]));
    }
}
