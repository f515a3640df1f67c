use super::resource::{Resource, ResourceProperties};
use crate::address::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema-less JSON document.
///
/// Caller fields live in `data` and are serialized next to the system properties.
/// Keys starting with `_`, `id` and `altLink` belong to the service and are ignored
/// by [`Document::with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub properties: ResourceProperties,

    #[serde(rename = "_attachments", default, skip_serializing_if = "String::is_empty")]
    pub attachments_link: String,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: ResourceProperties::new(id),
            attachments_link: String::new(),
            data: Map::new(),
        }
    }

    /// Sets a caller field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a caller field. Returns `false` (and stores nothing) for reserved keys.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if is_reserved_key(&key) {
            return false;
        }
        self.data.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Keys the service owns on every resource body.
pub fn is_reserved_key(key: &str) -> bool {
    key == "id" || key == "altLink" || key.starts_with('_')
}

impl Resource for Document {
    const KIND: ResourceKind = ResourceKind::Document;

    fn properties(&self) -> &ResourceProperties {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_fields_flatten_next_to_identity() {
        let document = Document::new("doc-1")
            .with("title", "Notes")
            .with("pages", 3)
            .with("_rid", "ignored");

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value, json!({ "id": "doc-1", "title": "Notes", "pages": 3 }));
    }

    #[test]
    fn test_service_body_splits_into_identity_and_data() {
        let body = json!({
            "id": "doc-1",
            "_rid": "abc",
            "_self": "dbs/a/colls/b/docs/abc/",
            "altLink": "dbs/D1/colls/C1/docs/doc-1",
            "_etag": "\"e\"",
            "_ts": 1700000000,
            "title": "Notes"
        });

        let document: Document = serde_json::from_value(body).unwrap();
        assert!(document.properties.is_populated());
        assert_eq!(document.get("title"), Some(&json!("Notes")));
        assert_eq!(document.data.len(), 1);
        assert_eq!(
            document.address().unwrap().link(),
            "dbs/D1/colls/C1/docs/doc-1"
        );
    }
}
