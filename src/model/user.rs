use super::resource::{Resource, ResourceProperties};
use crate::address::ResourceKind;
use serde::{Deserialize, Serialize};

/// A database user.
///
/// Users carry nothing beyond their identity; renaming one goes through
/// [`ResourceClient::replace_user`](crate::client::ResourceClient::replace_user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub properties: ResourceProperties,

    /// Relative link of the user's permissions feed.
    #[serde(rename = "_permissions", default, skip_serializing_if = "String::is_empty")]
    pub permissions_link: String,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: ResourceProperties::new(id),
            permissions_link: String::new(),
        }
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::User;

    fn properties(&self) -> &ResourceProperties {
        &self.properties
    }
}
