//! Remote catalog API client
//!
//! This module owns every outbound HTTP concern: building the client with the
//! fixed transport headers, fetching the root category forest, and fetching
//! per-category filters. Responses are decoded and classified here, at the
//! boundary; nothing deeper in the walk touches raw JSON or status codes.

use crate::config::{Config, TransportConfig};
use crate::model::{Category, FilterFacet, FilterResponse};
use crate::{AtlasError, ConfigError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Capability to fetch the category forest and per-category facets.
///
/// The walker and coordinator are generic over this trait so tests can
/// substitute a scripted source without a network.
#[async_trait]
pub trait CatalogSource {
    /// Fetches the entire top-level category forest in one call.
    ///
    /// Any failure (network, timeout, non-2xx, undecodable body) surfaces as
    /// a single error value; partial forests are never returned.
    async fn fetch_root(&self) -> Result<Vec<Category>, AtlasError>;

    /// Fetches the category facets for one leaf's lookup parameters.
    ///
    /// Absent or malformed group data in an otherwise valid response yields
    /// an empty list, not an error.
    async fn fetch_filters(&self, shard: &str, query: &str)
        -> Result<Vec<FilterFacet>, AtlasError>;
}

/// HTTP implementation of [`CatalogSource`]
pub struct HttpCatalogClient {
    client: Client,
    menu_url: String,
    filter_base_url: String,
}

impl HttpCatalogClient {
    /// Builds a client from the configured endpoints and transport constants.
    pub fn new(config: &Config) -> Result<Self, AtlasError> {
        let client = build_http_client(&config.transport)?;

        Ok(Self {
            client,
            menu_url: config.catalog.menu_url.clone(),
            filter_base_url: config
                .catalog
                .filter_base_url
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Assembles the filter endpoint URL for one category.
    ///
    /// `shard` and `query` are opaque strings sourced from the root response;
    /// the surrounding path and fixed parameters are the endpoint contract.
    fn filter_url(&self, shard: &str, query: &str) -> String {
        format!(
            "{}/{}/v4/filters?appType=1&{}&curr=rub&dest=-59202",
            self.filter_base_url, shard, query
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AtlasError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| AtlasError::Transport {
                url: url.to_string(),
                source,
            })?;

        let body = response
            .bytes()
            .await
            .map_err(|source| AtlasError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| AtlasError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_root(&self) -> Result<Vec<Category>, AtlasError> {
        tracing::debug!("Fetching root catalog from {}", self.menu_url);
        self.get_json(&self.menu_url).await
    }

    async fn fetch_filters(
        &self,
        shard: &str,
        query: &str,
    ) -> Result<Vec<FilterFacet>, AtlasError> {
        let url = self.filter_url(shard, query);
        tracing::debug!("Fetching filters from {}", url);

        let response: FilterResponse = self.get_json(&url).await?;
        Ok(response.category_facets())
    }
}

/// Builds an HTTP client with the fixed transport headers and timeouts
pub fn build_http_client(config: &TransportConfig) -> Result<Client, AtlasError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ORIGIN, header_value("origin", &config.origin)?);
    headers.insert(REFERER, header_value("referer", &config.referer)?);

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue, AtlasError> {
    HeaderValue::from_str(value).map_err(|e| {
        AtlasError::Config(ConfigError::Validation(format!(
            "invalid {} header value: {}",
            field, e
        )))
    })
}
