//! # Resource Addressing
//!
//! Every resource managed by the service lives in a fixed hierarchy:
//!
//! ```text
//! dbs/{database}
//! ├── colls/{collection}
//! │   └── docs/{document}
//! └── users/{user}
//! ```
//!
//! A [`ResourceAddress`] names one node of that tree by identifiers (its *alt link*),
//! a [`LinkTarget`] additionally covers *feeds*, i.e. all children of one kind under a
//! parent (`dbs/D1/users`). Feeds are the target of `create` and `list` requests.
//!
//! Addresses are validated on construction, so holding a `ResourceAddress` means the
//! ancestor chain is complete and every identifier is usable inside a link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Characters the service refuses inside identifiers.
const RESERVED_CHARACTERS: [char; 4] = ['/', '\\', '?', '#'];

/// The kinds of resources the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Database,
    Collection,
    Document,
    User,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Database,
        ResourceKind::Collection,
        ResourceKind::Document,
        ResourceKind::User,
    ];

    /// Path segment used in links (`dbs`, `colls`, `docs`, `users`).
    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Database => "dbs",
            ResourceKind::Collection => "colls",
            ResourceKind::Document => "docs",
            ResourceKind::User => "users",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }

    /// The kind a resource of this kind must be nested under, if any.
    pub fn parent_kind(self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Database => None,
            ResourceKind::Collection | ResourceKind::User => Some(ResourceKind::Database),
            ResourceKind::Document => Some(ResourceKind::Collection),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Database => "Database",
            ResourceKind::Collection => "Collection",
            ResourceKind::Document => "Document",
            ResourceKind::User => "User",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while building or parsing an address.
///
/// Every variant carries the (possibly malformed) link that was being built, so a
/// rejected request can still be described in its response envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("{kind} identifier is empty in `{link}`")]
    EmptyId { kind: ResourceKind, link: String },

    #[error("{kind} identifier `{id}` contains a reserved character")]
    ReservedCharacter {
        kind: ResourceKind,
        id: String,
        link: String,
    },

    #[error("{kind} requires a {expected} ancestor in `{link}`")]
    MissingAncestor {
        kind: ResourceKind,
        expected: ResourceKind,
        link: String,
    },

    #[error("{kind} cannot be nested in `{link}`")]
    UnexpectedParent { kind: ResourceKind, link: String },

    #[error("Expected a {expected} link, got `{link}`")]
    KindMismatch { expected: ResourceKind, link: String },

    #[error("Unrecognized link `{link}`")]
    UnknownLink { link: String },
}

impl AddressError {
    /// The link the error refers to.
    pub fn link(&self) -> &str {
        match self {
            AddressError::EmptyId { link, .. }
            | AddressError::ReservedCharacter { link, .. }
            | AddressError::MissingAncestor { link, .. }
            | AddressError::UnexpectedParent { link, .. }
            | AddressError::KindMismatch { link, .. }
            | AddressError::UnknownLink { link } => link,
        }
    }

    fn with_link(mut self, full: &str) -> Self {
        match &mut self {
            AddressError::EmptyId { link, .. }
            | AddressError::ReservedCharacter { link, .. }
            | AddressError::MissingAncestor { link, .. }
            | AddressError::UnexpectedParent { link, .. }
            | AddressError::KindMismatch { link, .. }
            | AddressError::UnknownLink { link } => *link = full.to_string(),
        }
        self
    }
}

/// Hierarchical identity of a single resource.
///
/// Cloning is cheap: ancestors are shared behind `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
    kind: ResourceKind,
    id: String,
    parent: Option<Arc<ResourceAddress>>,
}

impl ResourceAddress {
    /// Builds the address of a `kind` resource named `id` under `parent`.
    pub fn new(
        kind: ResourceKind,
        id: impl Into<String>,
        parent: Option<&ResourceAddress>,
    ) -> Result<Self, AddressError> {
        let id = id.into();
        let link = match parent {
            Some(parent) => format!("{}/{}/{}", parent.link(), kind.segment(), id),
            None => format!("{}/{}", kind.segment(), id),
        };

        check_parent(kind, parent.map(|p| p.kind), &link)?;
        check_id(kind, &id, &link)?;

        Ok(Self {
            kind,
            id,
            parent: parent.map(|p| Arc::new(p.clone())),
        })
    }

    /// Builds an address from a root-first path of `(kind, id)` pairs.
    ///
    /// Errors carry the full link of the path, not just the failing prefix.
    pub fn from_path(path: &[(ResourceKind, &str)]) -> Result<Self, AddressError> {
        let link = raw_link(path);
        let mut current: Option<ResourceAddress> = None;
        for (kind, id) in path {
            let next = ResourceAddress::new(*kind, *id, current.as_ref())
                .map_err(|e| e.with_link(&link))?;
            current = Some(next);
        }
        current.ok_or(AddressError::UnknownLink { link })
    }

    pub fn database(database_id: &str) -> Result<Self, AddressError> {
        Self::from_path(&[(ResourceKind::Database, database_id)])
    }

    pub fn collection(database_id: &str, collection_id: &str) -> Result<Self, AddressError> {
        Self::from_path(&[
            (ResourceKind::Database, database_id),
            (ResourceKind::Collection, collection_id),
        ])
    }

    pub fn document(
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Self, AddressError> {
        Self::from_path(&[
            (ResourceKind::Database, database_id),
            (ResourceKind::Collection, collection_id),
            (ResourceKind::Document, document_id),
        ])
    }

    pub fn user(database_id: &str, user_id: &str) -> Result<Self, AddressError> {
        Self::from_path(&[
            (ResourceKind::Database, database_id),
            (ResourceKind::User, user_id),
        ])
    }

    /// Parses an alt link (`dbs/D1/users/U1`) into an address.
    pub fn parse(link: &str) -> Result<Self, AddressError> {
        match LinkTarget::parse(link)? {
            LinkTarget::Resource(address) => Ok(address),
            LinkTarget::Feed { .. } => Err(AddressError::UnknownLink {
                link: link.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<&ResourceAddress> {
        self.parent.as_deref()
    }

    /// Same position in the tree, different identifier.
    pub fn with_id(&self, id: impl Into<String>) -> Result<Self, AddressError> {
        Self::new(self.kind, id, self.parent())
    }

    /// Identifier-based link, e.g. `dbs/D1/colls/C1/docs/X`.
    pub fn link(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{}/{}/{}", parent.link(), self.kind.segment(), self.id),
            None => format!("{}/{}", self.kind.segment(), self.id),
        }
    }

    /// Link of the feed this resource belongs to, e.g. `dbs/D1/users`.
    pub fn feed_link(&self) -> String {
        feed_link(self.parent(), self.kind)
    }

    /// Root-first `(kind, id)` pairs.
    pub fn path(&self) -> Vec<(ResourceKind, &str)> {
        let mut path = Vec::new();
        let mut current = Some(self);
        while let Some(address) = current {
            path.push((address.kind, address.id.as_str()));
            current = address.parent();
        }
        path.reverse();
        path
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.link())
    }
}

/// What a request link points at: one resource, or the feed of a kind under a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Resource(ResourceAddress),
    Feed {
        parent: Option<ResourceAddress>,
        kind: ResourceKind,
    },
}

impl LinkTarget {
    /// Builds a feed target, checking that `parent` is a valid container for `kind`.
    pub fn feed(
        parent: Option<&ResourceAddress>,
        kind: ResourceKind,
    ) -> Result<Self, AddressError> {
        let link = feed_link(parent, kind);
        check_parent(kind, parent.map(|p| p.kind), &link)?;
        Ok(LinkTarget::Feed {
            parent: parent.cloned(),
            kind,
        })
    }

    /// Parses `dbs/D1/users/U1` (resource) or `dbs/D1/users` (feed).
    pub fn parse(link: &str) -> Result<Self, AddressError> {
        let unknown = || AddressError::UnknownLink {
            link: link.to_string(),
        };

        let trimmed = link.trim_matches('/');
        if trimmed.is_empty() {
            return Err(unknown());
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        let mut current: Option<ResourceAddress> = None;
        for pair in segments.chunks(2) {
            let kind = ResourceKind::from_segment(pair[0]).ok_or_else(unknown)?;
            match pair {
                [_, id] => {
                    let next = ResourceAddress::new(kind, *id, current.as_ref())
                        .map_err(|e| e.with_link(link))?;
                    current = Some(next);
                }
                _ => {
                    return LinkTarget::feed(current.as_ref(), kind)
                        .map_err(|e| e.with_link(link));
                }
            }
        }

        current.map(LinkTarget::Resource).ok_or_else(unknown)
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            LinkTarget::Resource(address) => address.kind(),
            LinkTarget::Feed { kind, .. } => *kind,
        }
    }

    pub fn link(&self) -> String {
        match self {
            LinkTarget::Resource(address) => address.link(),
            LinkTarget::Feed { parent, kind } => feed_link(parent.as_ref(), *kind),
        }
    }
}

/// Feed link of `kind` under `parent` (`dbs` for the root feed of databases).
pub fn feed_link(parent: Option<&ResourceAddress>, kind: ResourceKind) -> String {
    match parent {
        Some(parent) => format!("{}/{}", parent.link(), kind.segment()),
        None => kind.segment().to_string(),
    }
}

fn raw_link(path: &[(ResourceKind, &str)]) -> String {
    path.iter()
        .map(|(kind, id)| format!("{}/{}", kind.segment(), id))
        .collect::<Vec<_>>()
        .join("/")
}

fn check_parent(
    kind: ResourceKind,
    parent: Option<ResourceKind>,
    link: &str,
) -> Result<(), AddressError> {
    match (kind.parent_kind(), parent) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(AddressError::UnexpectedParent {
            kind,
            link: link.to_string(),
        }),
        (Some(expected), Some(actual)) if actual == expected => Ok(()),
        (Some(expected), _) => Err(AddressError::MissingAncestor {
            kind,
            expected,
            link: link.to_string(),
        }),
    }
}

fn check_id(kind: ResourceKind, id: &str, link: &str) -> Result<(), AddressError> {
    if id.trim().is_empty() {
        return Err(AddressError::EmptyId {
            kind,
            link: link.to_string(),
        });
    }
    if id.contains(RESERVED_CHARACTERS) {
        return Err(AddressError::ReservedCharacter {
            kind,
            id: id.to_string(),
            link: link.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_address_links() {
        let address = ResourceAddress::document("D1", "C1", "X").unwrap();
        assert_eq!(address.link(), "dbs/D1/colls/C1/docs/X");
        assert_eq!(address.feed_link(), "dbs/D1/colls/C1/docs");
        assert_eq!(address.kind(), ResourceKind::Document);
        assert_eq!(
            address.path(),
            vec![
                (ResourceKind::Database, "D1"),
                (ResourceKind::Collection, "C1"),
                (ResourceKind::Document, "X"),
            ]
        );
    }

    #[test]
    fn test_user_requires_database_parent() {
        let collection = ResourceAddress::collection("D1", "C1").unwrap();
        let err = ResourceAddress::new(ResourceKind::User, "U1", Some(&collection)).unwrap_err();
        assert!(matches!(
            err,
            AddressError::MissingAncestor {
                expected: ResourceKind::Database,
                ..
            }
        ));

        let err = ResourceAddress::new(ResourceKind::Document, "X", None).unwrap_err();
        assert!(matches!(err, AddressError::MissingAncestor { .. }));
    }

    #[test]
    fn test_empty_ancestor_reports_full_link() {
        let err = ResourceAddress::user("", "U1").unwrap_err();
        assert!(matches!(err, AddressError::EmptyId { kind: ResourceKind::Database, .. }));
        assert_eq!(err.link(), "dbs//users/U1");
    }

    #[test]
    fn test_reserved_characters_rejected() {
        let err = ResourceAddress::database("a/b").unwrap_err();
        assert!(matches!(err, AddressError::ReservedCharacter { .. }));
    }

    #[test]
    fn test_parse_resource_and_feed() {
        let target = LinkTarget::parse("dbs/D1/users/U1").unwrap();
        assert_eq!(
            target,
            LinkTarget::Resource(ResourceAddress::user("D1", "U1").unwrap())
        );

        let feed = LinkTarget::parse("/dbs/D1/colls/").unwrap();
        match feed {
            LinkTarget::Feed { parent, kind } => {
                assert_eq!(kind, ResourceKind::Collection);
                assert_eq!(parent.unwrap().link(), "dbs/D1");
            }
            other => panic!("Expected feed, got {other:?}"),
        }

        assert_eq!(LinkTarget::parse("dbs").unwrap().link(), "dbs");
    }

    #[test]
    fn test_parse_rejects_bad_links() {
        assert!(matches!(
            LinkTarget::parse("tables/T1"),
            Err(AddressError::UnknownLink { .. })
        ));
        assert!(matches!(
            LinkTarget::parse("dbs/D1/docs"),
            Err(AddressError::MissingAncestor { .. })
        ));
        assert!(matches!(
            LinkTarget::parse(""),
            Err(AddressError::UnknownLink { .. })
        ));
        assert!(ResourceAddress::parse("dbs/D1/users").is_err());
    }

    #[test]
    fn test_with_id_keeps_position() {
        let user = ResourceAddress::user("D1", "U1").unwrap();
        let renamed = user.with_id("U2").unwrap();
        assert_eq!(renamed.link(), "dbs/D1/users/U2");
        assert_eq!(renamed.parent(), user.parent());
        assert!(user.with_id("").is_err());
    }
}
