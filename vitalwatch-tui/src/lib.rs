//! # vitalwatch-tui
//!
//! A terminal dashboard and library for monitoring children's vital signs.
//!
//! The dashboard receives vitals snapshots from a file, a network stream or an
//! in-process simulator, re-evaluates every heart rate against the child's
//! age band and shows the result in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(evaluation)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | StreamSource | ChannelSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and selection
//! - **[`source`]**: The [`DataSource`] trait with file, stream and channel implementations
//! - **[`data`]**: Status evaluation into [`VitalsData`], history for sparklines, export
//! - **[`ui`]**: ratatui rendering of the summary, alerts and nutrition views
//! - **[`config`]**: Layered [`Settings`] from a TOML file and the environment
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Simulate the default roster in-process
//! vitalwatch
//!
//! # Follow a file written by the simulator
//! vitalwatch --file vitals.json
//!
//! # Read newline-delimited snapshots over TCP
//! vitalwatch --connect localhost:9090
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use vitalwatch_tui::{App, FileSource, Thresholds};
//!
//! let source = Box::new(FileSource::new("vitals.json"));
//! let app = App::new(source, Thresholds::default());
//! ```
//!
//! ### As a library with stream source
//!
//! ```no_run
//! use std::io::Cursor;
//! use vitalwatch_tui::{App, StreamSource, Thresholds};
//!
//! # tokio_test::block_on(async {
//! let data = b"{}\n";
//! let stream = Cursor::new(data.to_vec());
//! let source = StreamSource::spawn(stream, "example");
//! let app = App::new(Box::new(source), Thresholds::default());
//! # });
//! ```
//!
//! ### Fed by an in-process simulator
//!
//! ```no_run
//! use vitalwatch_sim::{Output, Simulator};
//! use vitalwatch_tui::{App, ChannelSource, Thresholds};
//!
//! # tokio_test::block_on(async {
//! let (output, rx) = Output::watch();
//! let simulator = Simulator::builder().output(output).build();
//! simulator.register("Fatima", 8.0).unwrap();
//! let emission = simulator.start();
//!
//! let app = App::new(Box::new(ChannelSource::new(rx, "simulator")), Thresholds::default());
//! # emission.stop();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

pub use app::{App, View};
pub use config::{ChildConfig, Settings};
pub use data::{Alert, ChildData, History, StatusCounts, Thresholds, VitalsData};
pub use source::{ChannelSource, DataSource, FileSource, StreamSource};
pub use vitalwatch_types::Snapshot;
