use super::resource::{Resource, ResourceProperties};
use crate::address::ResourceKind;
use serde::{Deserialize, Serialize};

/// A database, the root of a resource tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(flatten)]
    pub properties: ResourceProperties,

    /// Relative link of the collections feed.
    #[serde(rename = "_colls", default, skip_serializing_if = "String::is_empty")]
    pub collections_link: String,

    /// Relative link of the users feed.
    #[serde(rename = "_users", default, skip_serializing_if = "String::is_empty")]
    pub users_link: String,
}

impl Database {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: ResourceProperties::new(id),
            collections_link: String::new(),
            users_link: String::new(),
        }
    }
}

impl Resource for Database {
    const KIND: ResourceKind = ResourceKind::Database;

    fn properties(&self) -> &ResourceProperties {
        &self.properties
    }
}
