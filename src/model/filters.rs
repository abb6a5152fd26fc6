use serde::Deserialize;

/// Label of the filter group holding sub-category facets.
///
/// The filter endpoint returns several groups (price, brand, and so on);
/// only the group named "Категория" carries category facets.
pub const CATEGORY_GROUP_LABEL: &str = "Категория";

/// Body of the filter endpoint response.
///
/// Every level is optional on the wire; an absent or malformed level
/// collapses to an empty facet list rather than a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterResponse {
    #[serde(default)]
    data: Option<FilterData>,
}

#[derive(Debug, Clone, Deserialize)]
struct FilterData {
    #[serde(default)]
    filters: Option<Vec<FilterGroup>>,
}

#[derive(Debug, Clone, Deserialize)]
struct FilterGroup {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    items: Option<Vec<FilterFacet>>,
}

/// One facet of the category filter group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterFacet {
    #[serde(default)]
    pub id: i64,

    #[serde(default = "default_facet_name")]
    pub name: String,
}

fn default_facet_name() -> String {
    "Unnamed".to_string()
}

impl FilterResponse {
    /// Extracts the facets of the category group, ignoring every other group.
    pub fn category_facets(self) -> Vec<FilterFacet> {
        self.data
            .and_then(|data| data.filters)
            .unwrap_or_default()
            .into_iter()
            .filter(|group| group.name.as_deref() == Some(CATEGORY_GROUP_LABEL))
            .flat_map(|group| group.items.unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_only_category_group() {
        let json = r#"{
            "data": {
                "filters": [
                    {"name": "Бренд", "items": [{"id": 5, "name": "Acme"}]},
                    {"name": "Категория", "items": [
                        {"id": 10, "name": "F1"},
                        {"id": 11, "name": "F2"}
                    ]},
                    {"name": "Цена"}
                ]
            }
        }"#;

        let facets = serde_json::from_str::<FilterResponse>(json)
            .unwrap()
            .category_facets();

        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0].id, 10);
        assert_eq!(facets[1].name, "F2");
    }

    #[test]
    fn test_missing_levels_yield_empty() {
        for json in [
            r#"{}"#,
            r#"{"data": {}}"#,
            r#"{"data": {"filters": []}}"#,
            r#"{"data": {"filters": [{"name": "Категория"}]}}"#,
        ] {
            let facets = serde_json::from_str::<FilterResponse>(json)
                .unwrap()
                .category_facets();
            assert!(facets.is_empty(), "expected no facets for {}", json);
        }
    }

    #[test]
    fn test_facet_defaults() {
        let json = r#"{
            "data": {
                "filters": [
                    {"name": "Категория", "items": [{}, {"id": 7}]}
                ]
            }
        }"#;

        let facets = serde_json::from_str::<FilterResponse>(json)
            .unwrap()
            .category_facets();

        assert_eq!(facets[0].id, 0);
        assert_eq!(facets[0].name, "Unnamed");
        assert_eq!(facets[1].id, 7);
        assert_eq!(facets[1].name, "Unnamed");
    }
}
