//! Data models and processing for vitals snapshots.
//!
//! This module turns raw snapshots into status-annotated data suitable for
//! display.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "1s", "500ms")
//! - [`export`]: JSON export of the current state
//! - [`history`]: Rolling heart-rate history for sparklines and trends
//! - [`monitor`]: Core data models ([`VitalsData`], [`ChildData`], [`Alert`])
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (JSON or in-process)
//!        │
//!        ▼
//! VitalsData::from_snapshot()
//!        │
//!        ├──▶ ChildData (heart rate re-evaluated with Thresholds)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod duration;
pub mod export;
pub mod history;
pub mod monitor;

pub use history::History;
pub use monitor::{Alert, AlertKey, ChildData, StatusCounts, Thresholds, VitalsData};
