//! Wire types for the Beszel records API.
//!
//! These types match the paginated JSON returned by
//! `GET /api/collections/systems/records`. They are read-only input to the
//! normalizer and are never mutated.

use serde::{Deserialize, Serialize};

/// A page of system records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRecordList {
    /// Records on this page, in API order.
    pub items: Vec<SystemRecord>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    /// Number of records matching the filter across all pages.
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// One monitored host as stored by Beszel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub users: Vec<String>,

    pub name: String,
    /// Agent status as reported by the hub ("up", "down", "paused", ...).
    pub status: String,
    pub info: SystemInfo,
}

/// The metrics block of a system record.
///
/// Beszel uses single-letter keys on the wire; the Rust names spell them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "h", default)]
    pub hostname: String,
    #[serde(rename = "k", default)]
    pub kernel: String,
    #[serde(rename = "c", default)]
    pub cores: u32,
    #[serde(rename = "t", default)]
    pub threads: u32,
    #[serde(rename = "m", default)]
    pub cpu_model: String,
    #[serde(rename = "v", default)]
    pub agent_version: String,
    #[serde(rename = "os", default)]
    pub os: u32,

    /// Uptime in seconds.
    #[serde(rename = "u")]
    pub uptime_secs: f64,
    /// CPU usage percentage.
    pub cpu: f64,
    /// Memory usage percentage.
    #[serde(rename = "mp")]
    pub memory_percent: f64,
    /// Disk usage percentage.
    #[serde(rename = "dp")]
    pub disk_percent: f64,
    /// Cumulative disk read counter, in bytes.
    #[serde(rename = "b")]
    pub read_bytes: f64,
    /// Cumulative disk write counter, in bytes.
    #[serde(rename = "bb")]
    pub write_bytes: f64,
    /// Temperature in degrees Celsius.
    #[serde(rename = "dt")]
    pub temperature: f64,
    /// 1, 5 and 15 minute load averages.
    #[serde(rename = "la")]
    pub load_avg: [f64; 3],
}
