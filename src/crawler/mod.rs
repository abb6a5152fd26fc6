//! Crawler module: the catalog client, concurrency gate, tree walker, and
//! crawl orchestration.

mod client;
mod coordinator;
mod limiter;
mod walker;

pub use client::{build_http_client, CatalogSource, HttpCatalogClient};
pub use coordinator::{run_crawl, Coordinator};
pub use limiter::FetchGate;
pub use walker::{FlatRecord, TreeWalker, FACET_DEPTH};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::Result;
use std::future::Future;

/// Awaits a fallible fetch; on failure, logs one diagnostic and substitutes
/// the empty value.
///
/// Applied at both fetch call sites: a failed root fetch degrades to an
/// empty forest, a failed filter fetch to an empty facet list. The failure
/// never unwinds the walk.
pub async fn swallow_errors<T, F>(context: &str, operation: F) -> T
where
    T: Default,
    F: Future<Output = Result<T>>,
{
    match operation.await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("Failed to fetch {}: {}", context, error);
            T::default()
        }
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the configured transport constants
/// 2. Fetch the root category forest
/// 3. Walk the forest, fetching facets for parameterized leaves
/// 4. Write the flattened records grouped by top-level category
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed; totals for reporting
/// * `Err(AtlasError)` - Client construction or output writing failed
pub async fn crawl(config: Config) -> Result<CrawlSummary> {
    run_crawl(config).await
}
