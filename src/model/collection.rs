use super::resource::{Resource, ResourceProperties};
use crate::address::ResourceKind;
use serde::{Deserialize, Serialize};

/// A collection of documents inside a database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCollection {
    #[serde(flatten)]
    pub properties: ResourceProperties,

    /// Relative link of the documents feed.
    #[serde(rename = "_docs", default, skip_serializing_if = "String::is_empty")]
    pub documents_link: String,
}

impl DocumentCollection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: ResourceProperties::new(id),
            documents_link: String::new(),
        }
    }
}

impl Resource for DocumentCollection {
    const KIND: ResourceKind = ResourceKind::Collection;

    fn properties(&self) -> &ResourceProperties {
        &self.properties
    }
}
