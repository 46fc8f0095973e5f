//! Dataset schema with per-column metadata.
//!
//! Mirrors the usual schema-JSON layout:
//! `{"type":"struct","fields":[{"name":..,"type":..,"nullable":..,"metadata":{..}}]}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Arbitrary JSON-object metadata attached to a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; non-object values yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Nested metadata object under `key`.
    pub fn get_metadata(&self, key: &str) -> Option<Metadata> {
        self.0
            .get(key)
            .and_then(Value::as_object)
            .map(|m| Self(m.clone()))
    }

    /// Array of nested metadata objects under `key`; non-object items are skipped.
    pub fn get_metadata_array(&self, key: &str) -> Option<Vec<Metadata>> {
        self.0.get(key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().map(|m| Self(m.clone())))
                .collect()
        })
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Schema for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    /// Column type as written in the schema JSON (a string or a nested object).
    #[serde(rename = "type", default)]
    pub data_type: Value,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_nullable() -> bool {
    true
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Ordered collection of columns describing a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    #[serde(rename = "type", default = "struct_tag")]
    tag: String,
    pub fields: Vec<StructField>,
}

fn struct_tag() -> String {
    "struct".to_string()
}

impl Default for StructType {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self {
            tag: struct_tag(),
            fields,
        }
    }

    /// Parse a schema from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_from_json() {
        let json = r#"{
            "type": "struct",
            "fields": [
                {"name": "label", "type": "double", "nullable": false, "metadata": {}},
                {"name": "features", "type": {"type": "udt", "class": "VectorUDT"},
                 "nullable": true, "metadata": {"ml_attr": {"num_attrs": 2}}}
            ]
        }"#;
        let schema = StructType::from_json(json).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field_index("features"), Some(1));
        assert_eq!(schema.field_names(), vec!["label", "features"]);
        let features = schema.field("features").unwrap();
        let ml_attr = features.metadata.get_metadata("ml_attr").unwrap();
        assert_eq!(ml_attr.get_long("num_attrs"), Some(2));
        assert!(!schema.field("label").unwrap().nullable);
    }

    #[test]
    fn test_missing_field() {
        let schema = StructType::new(vec![StructField::new("a", "double")]);
        assert_eq!(schema.field_index("b"), None);
        assert!(schema.field("b").is_none());
    }

    #[test]
    fn test_metadata_accessors() {
        let meta = Metadata::from_value(json!({
            "attrs": [{"idx": 0, "name": "age"}, "junk", {"idx": 1}],
            "label": "x",
            "count": 3
        }))
        .unwrap();
        assert!(meta.contains("attrs"));
        assert_eq!(meta.get_string("label"), Some("x"));
        assert_eq!(meta.get_long("count"), Some(3));
        assert_eq!(meta.get_long("label"), None);
        assert!(meta.get_metadata("label").is_none());
        let attrs = meta.get_metadata_array("attrs").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].get_string("name"), Some("age"));
        assert_eq!(attrs[1].get_string("name"), None);
    }

    #[test]
    fn test_non_object_metadata_rejected() {
        assert!(Metadata::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_schema_roundtrip_keeps_type_tag() {
        let schema = StructType::new(vec![StructField::new("f", "string")]);
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "struct");
        assert_eq!(value["fields"][0]["type"], "string");
    }
}
