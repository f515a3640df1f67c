use serde::{Deserialize, Serialize};

/// One page of a feed, as returned by a list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList<T> {
    /// Resource id of the container the feed belongs to (empty for the database feed).
    #[serde(rename = "_rid", default)]
    pub resource_id: String,

    #[serde(rename = "_count")]
    pub count: usize,

    pub items: Vec<T>,
}

impl<T> ResourceList<T> {
    /// A list is populated when it holds at least one item.
    ///
    /// An empty list is still a valid, successful result.
    pub fn is_populated(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
