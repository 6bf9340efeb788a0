use crate::link::{Dto, Link, Links};
use serde::{Deserialize, Serialize};

/// Relation that points at the following page of a collection
pub const NEXT_REL: &str = "next";

/// One page of a paginated collection
pub trait Page {
    type Item;

    /// Link to the next page, absent on the last page
    fn next_link(&self) -> Option<&Link>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Paging helpers shared by every collection shape
pub trait AbstractCollection: Dto {
    fn has_next(&self) -> bool {
        self.has_link(NEXT_REL)
    }

    fn get_next(&self) -> Option<&Link> {
        self.get_link(NEXT_REL)
    }
}

impl<C: Dto> AbstractCollection for C {}

/// A page of `T` items as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default)]
    links: Links,

    #[serde(default = "Vec::new")]
    pub collection: Vec<T>,

    #[serde(rename = "totalSize", default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
}

impl<T> Collection<T> {
    pub fn new(links: Links, collection: Vec<T>) -> Self {
        Collection {
            links,
            collection,
            total_size: None,
        }
    }
}

impl<T> Dto for Collection<T> {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl<T> Page for Collection<T> {
    type Item = T;

    fn next_link(&self) -> Option<&Link> {
        self.get_next()
    }

    fn into_items(self) -> Vec<T> {
        self.collection
    }
}
