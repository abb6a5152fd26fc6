//! Recursive concurrent traversal of the category forest
//!
//! This is the core of the crawler: visit every node exactly once, fan out
//! over children concurrently, join before a subtree is considered done, and
//! fetch facets for parameterized leaves through the shared gate. A failed
//! facet fetch degrades to an empty facet list for that one leaf; it never
//! cancels sibling or ancestor branches.

use crate::crawler::client::CatalogSource;
use crate::crawler::limiter::FetchGate;
use crate::crawler::swallow_errors;
use crate::model::Category;
use futures::future::{join_all, BoxFuture};
use std::sync::Arc;

/// Depth assigned to every facet record, regardless of its owner's depth
pub const FACET_DEPTH: u32 = 99;

/// One flattened output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    /// Name of the top-level ancestor; the output grouping key
    pub sheet_group: String,

    pub id: i64,

    pub name: String,

    /// 1 for root categories, incrementing per level; facets are pinned
    /// to [`FACET_DEPTH`]
    pub depth: u32,

    /// Absent for root categories
    pub parent_id: Option<i64>,
}

/// Recursive concurrent walker over the category forest
pub struct TreeWalker<S> {
    source: Arc<S>,
    gate: FetchGate,
}

impl<S> TreeWalker<S>
where
    S: CatalogSource + Send + Sync,
{
    pub fn new(source: Arc<S>, max_concurrent_fetches: usize) -> Self {
        Self {
            source,
            gate: FetchGate::new(max_concurrent_fetches),
        }
    }

    /// Walks the whole forest and returns the complete record set.
    ///
    /// Each root category seeds its own sheet group at depth 1 with no
    /// parent. The record set is deterministic for deterministic inputs;
    /// only the interleaving of concurrent branches varies.
    pub async fn walk(&self, forest: Vec<Category>) -> Vec<FlatRecord> {
        let branches = forest.into_iter().map(|root| {
            let group = root.name.clone();
            self.walk_node(root, 1, None, group)
        });

        join_all(branches).await.into_iter().flatten().collect()
    }

    /// Visits one node: emits its record, then either fans out over its
    /// children or fetches facets for a leaf carrying lookup parameters.
    ///
    /// Recursion is boxed; the tree's depth is unknown until fetched but
    /// real catalogs stay shallow.
    fn walk_node(
        &self,
        node: Category,
        depth: u32,
        parent_id: Option<i64>,
        sheet_group: String,
    ) -> BoxFuture<'_, Vec<FlatRecord>> {
        Box::pin(async move {
            let mut records = vec![FlatRecord {
                sheet_group: sheet_group.clone(),
                id: node.id,
                name: node.name.clone(),
                depth,
                parent_id,
            }];

            if !node.children.is_empty() {
                let parent = node.id;
                let branches = node.children.into_iter().map(|child| {
                    self.walk_node(child, depth + 1, Some(parent), sheet_group.clone())
                });

                // Join-all: this subtree is done only when every child
                // branch, arbitrarily deep, has completed.
                for branch in join_all(branches).await {
                    records.extend(branch);
                }
            } else if let Some((shard, query)) = node.lookup_params() {
                let facets = {
                    let _permit = self.gate.acquire().await;
                    swallow_errors(
                        &format!("filters for category {} ({})", node.id, node.name),
                        self.source.fetch_filters(shard, query),
                    )
                    .await
                };

                for facet in facets {
                    records.push(FlatRecord {
                        sheet_group: sheet_group.clone(),
                        id: facet.id,
                        name: facet.name,
                        depth: FACET_DEPTH,
                        parent_id: Some(node.id),
                    });
                }
            }

            records
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterFacet;
    use crate::AtlasError;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted catalog source with an in-flight counter for bound checks
    #[derive(Default)]
    struct ScriptedSource {
        facets: HashMap<(String, String), Vec<FilterFacet>>,
        failing: HashSet<(String, String)>,
        fetch_delay: Option<Duration>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedSource {
        fn with_facets(shard: &str, query: &str, facets: Vec<(i64, &str)>) -> Self {
            let mut source = Self::default();
            source.facets.insert(
                (shard.to_string(), query.to_string()),
                facets
                    .into_iter()
                    .map(|(id, name)| FilterFacet {
                        id,
                        name: name.to_string(),
                    })
                    .collect(),
            );
            source
        }

        fn failing_on(mut self, shard: &str, query: &str) -> Self {
            self.failing.insert((shard.to_string(), query.to_string()));
            self
        }

        fn parse_error() -> AtlasError {
            let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
            AtlasError::Parse {
                url: "scripted://filters".to_string(),
                source,
            }
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn fetch_root(&self) -> Result<Vec<Category>, AtlasError> {
            Ok(Vec::new())
        }

        async fn fetch_filters(
            &self,
            shard: &str,
            query: &str,
        ) -> Result<Vec<FilterFacet>, AtlasError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            if let Some(delay) = self.fetch_delay {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let key = (shard.to_string(), query.to_string());
            if self.failing.contains(&key) {
                return Err(Self::parse_error());
            }
            Ok(self.facets.get(&key).cloned().unwrap_or_default())
        }
    }

    fn branch(id: i64, name: &str, children: Vec<Category>) -> Category {
        Category {
            id,
            name: name.to_string(),
            shard: None,
            query: None,
            url: None,
            children,
        }
    }

    fn leaf_with_params(id: i64, name: &str, shard: &str, query: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            shard: Some(shard.to_string()),
            query: Some(query.to_string()),
            url: None,
            children: Vec::new(),
        }
    }

    fn record(
        group: &str,
        id: i64,
        name: &str,
        depth: u32,
        parent_id: Option<i64>,
    ) -> FlatRecord {
        FlatRecord {
            sheet_group: group.to_string(),
            id,
            name: name.to_string(),
            depth,
            parent_id,
        }
    }

    fn sorted(mut records: Vec<FlatRecord>) -> Vec<FlatRecord> {
        records.sort_by(|a, b| {
            (&a.sheet_group, a.depth, a.id).cmp(&(&b.sheet_group, b.depth, b.id))
        });
        records
    }

    #[tokio::test]
    async fn test_walk_emits_one_record_per_node_plus_facets() {
        let forest = vec![
            branch(1, "A", vec![branch(2, "A1", Vec::new())]),
            leaf_with_params(3, "B", "s1", "q1"),
        ];
        let source = Arc::new(ScriptedSource::with_facets("s1", "q1", vec![(10, "F1")]));

        let walker = TreeWalker::new(source, 4);
        let records = walker.walk(forest).await;

        assert_eq!(
            sorted(records),
            sorted(vec![
                record("A", 1, "A", 1, None),
                record("A", 2, "A1", 2, Some(1)),
                record("B", 3, "B", 1, None),
                record("B", 10, "F1", 99, Some(3)),
            ])
        );
    }

    #[tokio::test]
    async fn test_depth_counts_ancestors() {
        let forest = vec![branch(
            1,
            "Root",
            vec![branch(2, "Mid", vec![branch(3, "Deep", Vec::new())])],
        )];

        let walker = TreeWalker::new(Arc::new(ScriptedSource::default()), 4);
        let records = sorted(walker.walk(forest).await);

        assert_eq!(records[0].depth, 1);
        assert_eq!(records[1].depth, 2);
        assert_eq!(records[2].depth, 3);
        assert_eq!(records[2].parent_id, Some(2));
    }

    #[tokio::test]
    async fn test_facet_depth_pinned_under_nested_leaf() {
        let forest = vec![branch(
            1,
            "Root",
            vec![branch(2, "Mid", vec![leaf_with_params(3, "Deep", "s", "q")])],
        )];
        let source = Arc::new(ScriptedSource::with_facets("s", "q", vec![(30, "Facet")]));

        let walker = TreeWalker::new(source, 4);
        let records = walker.walk(forest).await;

        let facet = records.iter().find(|r| r.id == 30).unwrap();
        assert_eq!(facet.depth, FACET_DEPTH);
        assert_eq!(facet.parent_id, Some(3));
        // The group is the top-level ancestor, not the owning leaf
        assert_eq!(facet.sheet_group, "Root");
    }

    #[tokio::test]
    async fn test_internal_node_with_params_does_not_fetch() {
        // Lookup parameters on an internal node are ignored; children win.
        let mut parent = branch(1, "Parent", vec![branch(2, "Child", Vec::new())]);
        parent.shard = Some("s".to_string());
        parent.query = Some("q".to_string());

        let source = Arc::new(ScriptedSource::with_facets("s", "q", vec![(9, "F")]));
        let walker = TreeWalker::new(source.clone(), 4);
        let records = walker.walk(vec![parent]).await;

        assert_eq!(records.len(), 2);
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_filter_failure_stays_local() {
        let forest = vec![
            leaf_with_params(1, "Broken", "bad", "q"),
            leaf_with_params(2, "Fine", "good", "q"),
            branch(3, "Plain", vec![branch(4, "Nested", Vec::new())]),
        ];
        let source =
            Arc::new(ScriptedSource::with_facets("good", "q", vec![(20, "F")]).failing_on("bad", "q"));

        let walker = TreeWalker::new(source, 4);
        let records = sorted(walker.walk(forest).await);

        // Broken still contributes its own record; only its facets are gone.
        assert_eq!(
            records,
            sorted(vec![
                record("Broken", 1, "Broken", 1, None),
                record("Fine", 2, "Fine", 1, None),
                record("Fine", 20, "F", 99, Some(2)),
                record("Plain", 3, "Plain", 1, None),
                record("Plain", 4, "Nested", 2, Some(3)),
            ])
        );
    }

    #[tokio::test]
    async fn test_concurrency_ceiling_holds() {
        let forest: Vec<Category> = (0..40)
            .map(|i| leaf_with_params(i, &format!("Leaf{}", i), "s", &format!("q{}", i)))
            .collect();

        let source = Arc::new(ScriptedSource {
            fetch_delay: Some(Duration::from_millis(5)),
            ..ScriptedSource::default()
        });

        let walker = TreeWalker::new(source.clone(), 3);
        let records = walker.walk(forest).await;

        assert_eq!(records.len(), 40);
        let observed = source.max_in_flight.load(Ordering::SeqCst);
        assert!(
            observed <= 3,
            "expected at most 3 in-flight fetches, observed {}",
            observed
        );
        assert!(observed >= 1);
    }

    #[tokio::test]
    async fn test_empty_forest_yields_no_records() {
        let walker = TreeWalker::new(Arc::new(ScriptedSource::default()), 1);
        assert!(walker.walk(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_preserved() {
        // The same id under two branches is emitted twice; no dedup.
        let forest = vec![
            branch(1, "A", vec![branch(7, "Shared", Vec::new())]),
            branch(2, "B", vec![branch(7, "Shared", Vec::new())]),
        ];

        let walker = TreeWalker::new(Arc::new(ScriptedSource::default()), 4);
        let records = walker.walk(forest).await;

        assert_eq!(records.iter().filter(|r| r.id == 7).count(), 2);
    }
}
