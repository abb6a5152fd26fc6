use serde::Deserialize;

/// A single node of the category tree returned by the root menu endpoint.
///
/// The wire format nests children under the key `childs`; an absent or empty
/// list marks a potential leaf. A node is immutable once decoded and owns its
/// children exclusively.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Category identifier, unique within one fetch
    pub id: i64,

    /// Display name
    pub name: String,

    /// Routing key for the filter endpoint
    #[serde(default)]
    pub shard: Option<String>,

    /// Query-string fragment for the filter endpoint
    #[serde(default)]
    pub query: Option<String>,

    /// Storefront URL, carried from the payload but not used by traversal
    #[serde(default)]
    pub url: Option<String>,

    /// Child categories
    #[serde(rename = "childs", default)]
    pub children: Vec<Category>,
}

impl Category {
    /// Returns the filter lookup parameters when both are present.
    ///
    /// Only a leaf carrying both `shard` and `query` is eligible for a
    /// secondary facet fetch; a leaf missing either is a true leaf.
    pub fn lookup_params(&self) -> Option<(&str, &str)> {
        match (self.shard.as_deref(), self.query.as_deref()) {
            (Some(shard), Some(query)) => Some((shard, query)),
            _ => None,
        }
    }
}
