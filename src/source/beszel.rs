//! Beszel hub client using the PocketBase records API.
//!
//! One authenticated `GET` per call, no retries:
//!
//! ```text
//! GET {beszelURL}/api/collections/systems/records?filter=(name='{serverName}')
//! Authorization: Bearer {apiToken}
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use beszel_glance::{BeszelClient, StatusFetcher, WidgetConfig};
//!
//! # tokio_test::block_on(async {
//! let client = BeszelClient::builder().build()?;
//! let config = WidgetConfig::from_parameter(
//!     r#"{"beszelURL":"http://hub:8090","apiToken":"t0k3n","serverName":"nas"}"#,
//! )?;
//! let status = client.fetch(&config).await?;
//! println!("{} is {} ({})", status.name, status.status, status.uptime);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

use std::time::Duration;

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use tracing::debug;

use super::{FetchError, StatusFetcher, SystemRecordList};
use crate::config::WidgetConfig;
use crate::data::NormalizedStatus;

const DEFAULT_USER_AGENT: &str = concat!("beszel-glance/", env!("CARGO_PKG_VERSION"));

/// Fetches a single system's status from a Beszel hub.
#[derive(Debug, Clone)]
pub struct BeszelClient {
    client: Client,
}

impl BeszelClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> BeszelClientBuilder {
        BeszelClientBuilder::default()
    }

    async fn fetch_records(&self, config: &WidgetConfig) -> Result<SystemRecordList, FetchError> {
        let url = records_url(&config.base_url, &config.server_name);
        debug!(%url, "request built");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.api_token)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), ok = status.is_success(), "response received");

        if !status.is_success() {
            // hyper keeps the phrase only when it differs from the canonical one
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
                .or_else(|| status.canonical_reason())
                .unwrap_or_default()
                .trim()
                .to_string();
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await?;
        let records: SystemRecordList = serde_json::from_str(&body)?;
        debug!(
            total_items = records.total_items,
            page_items = records.items.len(),
            "parsed body"
        );
        Ok(records)
    }
}

#[async_trait]
impl StatusFetcher for BeszelClient {
    async fn fetch(&self, config: &WidgetConfig) -> Result<NormalizedStatus, FetchError> {
        let records = self.fetch_records(config).await?;

        if records.total_items == 0 {
            return Err(FetchError::NotFound {
                server_name: config.server_name.clone(),
            });
        }

        // Names are assumed unique; the first match wins.
        let Some(item) = records.items.first() else {
            return Err(FetchError::Malformed(format!(
                "totalItems is {} but items is empty",
                records.total_items
            )));
        };
        debug!(id = %item.id, name = %item.name, status = %item.status, "selected item");

        Ok(NormalizedStatus::from_record(item))
    }
}

/// Builder for [`BeszelClient`].
#[derive(Debug, Default)]
pub struct BeszelClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl BeszelClientBuilder {
    /// Apply a request timeout (default: none).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<BeszelClient, FetchError> {
        let mut builder = Client::builder().user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(BeszelClient {
            client: builder.build()?,
        })
    }
}

/// Build the records URL for a server name.
///
/// The base URL is used as given and the name is interpolated into the filter
/// without escaping, so a name containing `'` or `)` changes the filter.
pub fn records_url(base_url: &str, server_name: &str) -> String {
    format!(
        "{}/api/collections/systems/records?filter=(name='{}')",
        base_url, server_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_url() {
        assert_eq!(
            records_url("http://hub:8090", "nas"),
            "http://hub:8090/api/collections/systems/records?filter=(name='nas')"
        );
    }

    #[test]
    fn test_records_url_is_verbatim() {
        assert_eq!(
            records_url("https://hub.example/", "a'b"),
            "https://hub.example//api/collections/systems/records?filter=(name='a'b')"
        );
    }

    #[test]
    fn test_builder_defaults() {
        assert!(BeszelClient::builder().build().is_ok());
    }

    #[test]
    fn test_builder_custom() {
        let client = BeszelClient::builder()
            .timeout(Duration::from_secs(5))
            .user_agent("glance-test")
            .build();
        assert!(client.is_ok());
    }
}
