//! Output module: record sinks and crawl summaries

mod csv_sink;
mod stats;
mod traits;

pub use csv_sink::CsvWorkbook;
pub use stats::{print_summary, CrawlSummary};
pub use traits::{RecordSink, SinkError, SinkResult};
