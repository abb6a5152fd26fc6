//! Crawl orchestration
//!
//! Ties the catalog source, tree walker, and record sink together for one
//! run: fetch the root forest, walk it, drain the complete in-memory record
//! set into the sink, and finalize the sink unconditionally. A root fetch
//! failure produces an empty forest; the run still completes cleanly.

use crate::config::Config;
use crate::crawler::client::{CatalogSource, HttpCatalogClient};
use crate::crawler::swallow_errors;
use crate::crawler::walker::TreeWalker;
use crate::output::{CrawlSummary, CsvWorkbook, RecordSink};
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Coordinates one crawl run over a catalog source
pub struct Coordinator<S> {
    config: Arc<Config>,
    source: Arc<S>,
}

impl<S> Coordinator<S>
where
    S: CatalogSource + Send + Sync,
{
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }

    /// Runs the crawl and drains every record into `sink`.
    ///
    /// The sink is finalized on every path, including an empty walk, so a
    /// failed root fetch still leaves well-formed output behind.
    pub async fn run(&self, sink: &mut dyn RecordSink) -> Result<CrawlSummary> {
        let start = Instant::now();

        let forest = swallow_errors("root catalog", self.source.fetch_root()).await;
        if forest.is_empty() {
            tracing::warn!("Root catalog is empty, nothing to traverse");
        } else {
            tracing::info!("Root catalog has {} top-level categories", forest.len());
        }

        let walker = TreeWalker::new(
            self.source.clone(),
            self.config.crawler.max_concurrent_fetches as usize,
        );
        let records = walker.walk(forest).await;

        for record in &records {
            sink.record(record)?;
        }
        sink.finalize()?;

        let summary = CrawlSummary::from_records(&records, start.elapsed());
        tracing::info!(
            "Crawl completed: {} records in {} groups in {:.2?}",
            summary.total_records,
            summary.groups,
            summary.duration
        );

        Ok(summary)
    }
}

/// Runs the full crawl against the HTTP catalog API with a CSV sink
pub async fn run_crawl(config: Config) -> Result<CrawlSummary> {
    let client = HttpCatalogClient::new(&config)?;
    let mut sink = CsvWorkbook::new(Path::new(&config.output.directory))?;

    let coordinator = Coordinator::new(config, client);
    coordinator.run(&mut sink).await
}
