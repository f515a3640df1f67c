//! The identity every resource carries, and the trait tying a model type to its kind.

use crate::address::{AddressError, ResourceAddress, ResourceKind};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// System properties stamped by the service on every resource.
///
/// Only `id` is supplied by the caller; the rest stay empty until the resource has been
/// created (or read back) and are not serialized while empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperties {
    pub id: String,

    #[serde(rename = "_rid", default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,

    #[serde(rename = "_self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,

    #[serde(rename = "altLink", default, skip_serializing_if = "String::is_empty")]
    pub alt_link: String,

    #[serde(rename = "_etag", default, skip_serializing_if = "String::is_empty")]
    pub etag: String,

    /// Seconds since the Unix epoch of the last write.
    #[serde(rename = "_ts", default, skip_serializing_if = "is_zero")]
    pub timestamp: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl ResourceProperties {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Names of the identity fields that are still unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_empty() {
            missing.push("id");
        }
        if self.resource_id.is_empty() {
            missing.push("_rid");
        }
        if self.self_link.is_empty() {
            missing.push("_self");
        }
        if self.alt_link.is_empty() {
            missing.push("altLink");
        }
        if self.etag.is_empty() {
            missing.push("_etag");
        }
        if self.timestamp == 0 {
            missing.push("_ts");
        }
        missing
    }

    /// True once the service has populated every identity field.
    pub fn is_populated(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp == 0 {
            return None;
        }
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// A model type the client can create, read, list, replace and delete.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn properties(&self) -> &ResourceProperties;

    fn id(&self) -> &str {
        &self.properties().id
    }

    /// Address of this resource, recovered from its alt link.
    ///
    /// Fails for resources that were never returned by the service.
    fn address(&self) -> Result<ResourceAddress, AddressError> {
        let link = &self.properties().alt_link;
        let address = ResourceAddress::parse(link)?;
        if address.kind() != Self::KIND {
            return Err(AddressError::KindMismatch {
                expected: Self::KIND,
                link: link.clone(),
            });
        }
        Ok(address)
    }
}
