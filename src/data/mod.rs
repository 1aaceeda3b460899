//! Data models and processing for Beszel records.
//!
//! This module turns a raw [`SystemRecord`](crate::source::SystemRecord) into
//! the display-ready [`NormalizedStatus`].
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of duration strings (e.g., "2s", "500ms")
//! - [`status`]: The normalizer and its formatting rules
//!
//! ## Data Flow
//!
//! ```text
//! SystemRecordList (raw JSON)
//!        │
//!        ▼  first item
//! NormalizedStatus::from_record()
//!        │
//!        └──▶ WidgetState::Ready (see app)
//! ```

pub mod duration;
pub mod status;

pub use status::{
    format_kib, format_load, format_percent, format_uptime, to_fixed, NormalizedStatus,
};
