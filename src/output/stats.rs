//! Crawl summary statistics

use crate::crawler::{FlatRecord, FACET_DEPTH};
use std::collections::BTreeSet;
use std::time::Duration;

/// Totals reported after a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub total_records: u64,
    pub category_records: u64,
    pub facet_records: u64,
    pub groups: u64,
    pub duration: Duration,
}

impl CrawlSummary {
    /// Derives the summary from the complete record set.
    pub fn from_records(records: &[FlatRecord], duration: Duration) -> Self {
        let facet_records = records.iter().filter(|r| r.depth == FACET_DEPTH).count() as u64;
        let groups = records
            .iter()
            .map(|r| r.sheet_group.as_str())
            .collect::<BTreeSet<_>>()
            .len() as u64;

        Self {
            total_records: records.len() as u64,
            category_records: records.len() as u64 - facet_records,
            facet_records,
            groups,
            duration,
        }
    }
}

/// Prints a human-readable summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===");
    println!("  Total records:    {}", summary.total_records);
    println!("  Category records: {}", summary.category_records);
    println!("  Facet records:    {}", summary.facet_records);
    println!("  Sheet groups:     {}", summary.groups);
    println!("  Elapsed:          {:.2?}", summary.duration);
}
