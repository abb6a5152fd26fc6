//! Configuration module for Catalog-Atlas
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a built-in default equal to the reference constants,
//! so the crawler runs without a config file at all.
//!
//! # Example
//!
//! ```no_run
//! use catalog_atlas::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Concurrency ceiling: {}", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, CrawlerConfig, OutputConfig, TransportConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
