//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`summary`]: Table of every child with vitals, sparkline and status
//! - [`alerts`]: Out-of-range readings and heart-rate excursions, with read
//!   and dismissed state
//! - [`nutrition`]: Staple-food recommendations for the selected child and
//!   the filterable meal catalog
//! - [`detail`]: Modal overlay with the 24-hour heart-rate chart
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (summary/alerts/nutrition::render)   │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod alerts;
pub mod common;
pub mod detail;
pub mod nutrition;
pub mod summary;
pub mod theme;

pub use alerts::{AlertFilter, AlertSortColumn};
pub use summary::SortColumn;
pub use theme::Theme;
