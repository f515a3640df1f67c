//! The resource tree owned by the [`DocumentService`](super::DocumentService).
//!
//! Nodes are stored as schema-less JSON objects keyed by identifier. The system
//! properties (`_rid`, `_self`, `_etag`, `_ts` and the kind's feed links) are minted
//! here; anything the caller sends under those names is discarded. `altLink` is never
//! stored: it is rendered from the node's current position on every read.

use super::error::ServiceError;
use crate::address::{ResourceAddress, ResourceKind};
use crate::model::is_reserved_key;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

type Feed = BTreeMap<String, Node>;

#[derive(Debug, Clone, Default)]
struct Node {
    body: Map<String, Value>,
    children: BTreeMap<ResourceKind, Feed>,
}

impl Node {
    fn field(&self, key: &str) -> &str {
        self.body.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Number of nodes in this subtree, including `self`.
    fn size(&self) -> usize {
        1 + self
            .children
            .values()
            .flat_map(|feed| feed.values())
            .map(Node::size)
            .sum::<usize>()
    }

    fn render(&self, address: &ResourceAddress) -> Value {
        let mut body = self.body.clone();
        body.insert("id".into(), Value::String(address.id().to_string()));
        body.insert("altLink".into(), Value::String(address.link()));
        Value::Object(body)
    }
}

/// Databases and everything nested below them.
#[derive(Debug, Default)]
pub struct ResourceTree {
    databases: Feed,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of resources in the tree.
    pub fn len(&self) -> usize {
        self.databases.values().map(Node::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Adds a `kind` resource under `parent` and returns its rendered body.
    pub fn insert(
        &mut self,
        parent: Option<&ResourceAddress>,
        kind: ResourceKind,
        body: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let id = body_id(&body)?;
        let address = ResourceAddress::new(kind, id.as_str(), parent)
            .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

        let parent_self = match parent {
            Some(parent) => self.node(parent)?.field("_self").to_string(),
            None => String::new(),
        };

        let feed = self.feed_mut(parent, kind)?;
        if feed.contains_key(&id) {
            return Err(ServiceError::Conflict {
                id,
                feed: address.feed_link(),
            });
        }

        let resource_id = Uuid::new_v4().simple().to_string();
        let mut stored = caller_fields(body);
        stored.insert("id".into(), Value::String(id.clone()));
        stored.insert("_rid".into(), Value::String(resource_id.clone()));
        stored.insert(
            "_self".into(),
            Value::String(format!("{parent_self}{}/{resource_id}/", kind.segment())),
        );
        for (key, link) in feed_links(kind) {
            stored.insert((*key).into(), Value::String((*link).into()));
        }
        stamp(&mut stored);

        let node = Node {
            body: stored,
            children: BTreeMap::new(),
        };
        let rendered = node.render(&address);
        feed.insert(id, node);
        Ok(rendered)
    }

    pub fn get(&self, address: &ResourceAddress) -> Result<Value, ServiceError> {
        Ok(self.node(address)?.render(address))
    }

    /// Children of `kind` under `parent`, together with the parent's resource id.
    pub fn list(
        &self,
        parent: Option<&ResourceAddress>,
        kind: ResourceKind,
    ) -> Result<(String, Vec<Value>), ServiceError> {
        let (resource_id, feed) = match parent {
            Some(address) => {
                let node = self.node(address)?;
                (node.field("_rid").to_string(), node.children.get(&kind))
            }
            None => (String::new(), Some(&self.databases)),
        };

        let mut items = Vec::new();
        for (id, node) in feed.into_iter().flatten() {
            let address = ResourceAddress::new(kind, id.as_str(), parent)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            items.push(node.render(&address));
        }
        Ok((resource_id, items))
    }

    /// Overwrites the caller fields of a resource, possibly renaming it.
    ///
    /// Resource id, self link and children survive; etag and timestamp are renewed.
    pub fn replace(
        &mut self,
        address: &ResourceAddress,
        body: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let new_id = body_id(&body)?;
        let renamed = address
            .with_id(new_id.as_str())
            .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

        let feed = self.feed_mut(address.parent(), address.kind())?;
        let mut node = feed
            .remove(address.id())
            .ok_or_else(|| ServiceError::NotFound(address.link()))?;
        if new_id != address.id() && feed.contains_key(&new_id) {
            feed.insert(address.id().to_string(), node);
            return Err(ServiceError::Conflict {
                id: new_id,
                feed: address.feed_link(),
            });
        }

        let mut stored = caller_fields(body);
        for (key, value) in node.body.iter().filter(|(key, _)| key.starts_with('_')) {
            stored.insert(key.clone(), value.clone());
        }
        stored.insert("id".into(), Value::String(new_id.clone()));
        stamp(&mut stored);
        node.body = stored;

        let rendered = node.render(&renamed);
        feed.insert(new_id, node);
        Ok(rendered)
    }

    /// Removes a resource and its whole subtree. Returns the number of resources removed.
    pub fn remove(&mut self, address: &ResourceAddress) -> Result<usize, ServiceError> {
        let feed = self.feed_mut(address.parent(), address.kind())?;
        feed.remove(address.id())
            .map(|node| node.size())
            .ok_or_else(|| ServiceError::NotFound(address.link()))
    }

    fn node(&self, address: &ResourceAddress) -> Result<&Node, ServiceError> {
        let missing = || ServiceError::NotFound(address.link());
        let path = address.path();
        let ((_, root), rest) = path.split_first().ok_or_else(missing)?;

        let mut node = self.databases.get(*root).ok_or_else(missing)?;
        for (kind, id) in rest {
            node = node
                .children
                .get(kind)
                .and_then(|feed| feed.get(*id))
                .ok_or_else(missing)?;
        }
        Ok(node)
    }

    fn node_mut(&mut self, address: &ResourceAddress) -> Result<&mut Node, ServiceError> {
        let missing = || ServiceError::NotFound(address.link());
        let path = address.path();
        let ((_, root), rest) = path.split_first().ok_or_else(missing)?;

        let mut node = self.databases.get_mut(*root).ok_or_else(missing)?;
        for (kind, id) in rest {
            node = node
                .children
                .get_mut(kind)
                .and_then(|feed| feed.get_mut(*id))
                .ok_or_else(missing)?;
        }
        Ok(node)
    }

    fn feed_mut(
        &mut self,
        parent: Option<&ResourceAddress>,
        kind: ResourceKind,
    ) -> Result<&mut Feed, ServiceError> {
        match parent {
            Some(parent) => Ok(self.node_mut(parent)?.children.entry(kind).or_default()),
            None => Ok(&mut self.databases),
        }
    }
}

fn body_id(body: &Map<String, Value>) -> Result<String, ServiceError> {
    body.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::BadRequest("body has no string `id`".into()))
}

fn caller_fields(body: Map<String, Value>) -> Map<String, Value> {
    body.into_iter()
        .filter(|(key, _)| !is_reserved_key(key))
        .collect()
}

fn stamp(body: &mut Map<String, Value>) {
    body.insert(
        "_etag".into(),
        Value::String(format!("\"{}\"", Uuid::new_v4())),
    );
    body.insert("_ts".into(), Value::from(Utc::now().timestamp()));
}

fn feed_links(kind: ResourceKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ResourceKind::Database => &[("_colls", "colls/"), ("_users", "users/")],
        ResourceKind::Collection => &[("_docs", "docs/")],
        ResourceKind::Document => &[("_attachments", "attachments/")],
        ResourceKind::User => &[("_permissions", "permissions/")],
    }
}
