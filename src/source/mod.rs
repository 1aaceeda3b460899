//! Status sources: where a [`NormalizedStatus`] comes from.
//!
//! This module provides a trait-based abstraction over the one fetch the
//! dashboard performs, the Beszel client implementing it, and the raw wire
//! types the client parses.

mod beszel;
mod error;
mod record;

pub use beszel::{records_url, BeszelClient, BeszelClientBuilder};
pub use error::FetchError;
pub use record::{SystemInfo, SystemRecord, SystemRecordList};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::config::WidgetConfig;
use crate::data::NormalizedStatus;

/// Trait for fetching one server's normalized status.
///
/// Implementations perform a single attempt: no retries, no caching. Either
/// a complete [`NormalizedStatus`] or a [`FetchError`] comes back.
///
/// # Example
///
/// ```no_run
/// use beszel_glance::{BeszelClient, StatusFetcher, WidgetConfig};
///
/// async fn show(fetcher: &dyn StatusFetcher, config: &WidgetConfig) {
///     match fetcher.fetch(config).await {
///         Ok(status) => println!("{}: {}", status.name, status.uptime),
///         Err(err) => eprintln!("{}", err),
///     }
/// }
/// ```
#[async_trait]
pub trait StatusFetcher: Send + Sync + Debug {
    /// Fetch and normalize the configured server's status.
    async fn fetch(&self, config: &WidgetConfig) -> Result<NormalizedStatus, FetchError>;
}
