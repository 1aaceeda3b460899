//! # beszel-glance
//!
//! A terminal glance dashboard for one server monitored by a
//! [Beszel](https://beszel.dev) hub.
//!
//! The crate performs a single authenticated request against the hub's
//! records API, normalizes the first matching record into display-ready
//! strings and numbers, and renders it after a fixed delay using whatever
//! state is available at that moment.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ config  │───▶│  source  │───▶│   data   │───▶│   app   │  │
//! │  │         │    │ (fetch)  │    │(normalize)    │(snapshot)  │
//! │  └─────────┘    └──────────┘    └──────────┘    └────┬────┘  │
//! │                                                      ▼       │
//! │                                                 ┌─────────┐  │
//! │                                                 │   ui    │  │
//! │                                                 └─────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Which server to show and how to authenticate
//! - **[`source`]**: The [`StatusFetcher`] trait, the reqwest-backed
//!   [`BeszelClient`] and the raw record types
//! - **[`data`]**: The normalizer producing [`NormalizedStatus`]
//! - **[`app`]**: Widget states, the one-shot fetch and the render snapshot
//! - **[`ui`]**: Terminal rendering using ratatui, gauge and panel views
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Host-style JSON parameter
//! beszel-glance --param '{"beszelURL":"http://hub:8090","apiToken":"…","serverName":"nas"}'
//!
//! # Flags, with the panel layout
//! beszel-glance --url http://hub:8090 --token "$TOKEN" --server nas --view panel
//!
//! # Print the render snapshot as JSON instead of drawing it
//! beszel-glance --config glance.toml --export -
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use beszel_glance::{prepare_snapshot, BeszelClient, WidgetConfig, DEFAULT_RENDER_DELAY};
//!
//! # tokio_test::block_on(async {
//! let config = WidgetConfig::from_parameter(
//!     r#"{"beszelURL":"http://hub:8090","apiToken":"t0k3n","serverName":"nas"}"#,
//! ).ok();
//! let client = Arc::new(BeszelClient::builder().build().unwrap());
//!
//! let snapshot = prepare_snapshot(config.as_ref(), client, DEFAULT_RENDER_DELAY).await;
//! println!("{}", serde_json::to_string(&snapshot).unwrap());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{
    prepare_snapshot, App, PendingStatus, RenderSnapshot, View, WidgetState, DEFAULT_RENDER_DELAY,
};
pub use config::{ConfigError, ConfigOverrides, WidgetConfig};
pub use data::NormalizedStatus;
pub use source::{
    BeszelClient, FetchError, StatusFetcher, SystemInfo, SystemRecord, SystemRecordList,
};
