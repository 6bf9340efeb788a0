use serde::{Deserialize, Serialize};

/// A single hypermedia link carried by an API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name ("edit", "next", "virtualmachinetemplates", ...)
    pub rel: String,

    /// Absolute URL of the related resource
    pub href: String,

    /// Media type to send as Accept when following the link
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, media_type: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            href: href.into(),
            media_type: media_type.into(),
            title: None,
        }
    }
}

/// The ordered set of links of a resource.
///
/// Relation names may repeat; lookups return the first match. The set is
/// read-only once decoded so a resource cannot drift from what the server
/// advertised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(Vec<Link>);

impl Links {
    /// First link with the given relation
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|l| l.rel == rel)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Links(links)
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Links(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Any API entity that carries hypermedia links.
pub trait Dto {
    fn links(&self) -> &Links;

    /// Look up a link by relation name
    fn get_link(&self, rel: &str) -> Option<&Link> {
        self.links().get(rel)
    }

    fn has_link(&self, rel: &str) -> bool {
        self.links().contains(rel)
    }
}

impl Dto for Links {
    fn links(&self) -> &Links {
        self
    }
}

/// Implement [`Dto`] for structs that keep their links in a `links` field.
#[macro_export]
macro_rules! impl_dto {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::link::Dto for $ty {
                fn links(&self) -> &$crate::link::Links {
                    &self.links
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Links {
        serde_json::from_str(
            r#"[
                {"rel": "edit", "href": "https://host/x/42", "type": "application/vnd.foo+json"},
                {"rel": "edit", "href": "https://host/x/43", "type": "application/vnd.foo+json"},
                {"rel": "parent", "href": "https://host/x"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let links = sample();
        let edit = links.get("edit").unwrap();
        assert_eq!(edit.href, "https://host/x/42");
        assert_eq!(edit.media_type, "application/vnd.foo+json");
    }

    #[test]
    fn test_missing_relation_is_none() {
        let links = sample();
        assert!(links.get("next").is_none());
        assert!(!links.has_link("next"));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn test_type_defaults_to_empty() {
        let links = sample();
        assert_eq!(links.get("parent").unwrap().media_type, "");
    }

    #[test]
    fn test_link_serializes_type_field() {
        let link = Link::new("edit", "https://host/x/1", "application/vnd.foo+json");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "application/vnd.foo+json");
        assert!(json.get("title").is_none());
    }
}
