//! # vitalwatch-sim
//!
//! Synthetic vital-sign data for the vitalwatch dashboard.
//!
//! The crate has two layers:
//!
//! - a pure generator ([`generate_series`], [`sample_reading`]) that draws an
//!   hourly heart-rate series or a full reading for a child's age band
//! - a [`Simulator`] that keeps a set of children, samples them periodically
//!   and emits [`Snapshot`]s to files, TCP listeners or in-process channels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vitalwatch_sim::{Output, Simulator};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let simulator = Simulator::builder()
//!         .output(Output::file("vitals.json"))
//!         .interval(Duration::from_secs(1))
//!         .build();
//!
//!     let fatima = simulator.register("Fatima", 8.0).unwrap();
//!     fatima.record_heart_rate(112.0).unwrap();
//!
//!     // Start background emission (non-blocking)
//!     let _emission = simulator.start();
//!
//!     // ... the dashboard reads vitals.json ...
//! }
//! ```
//!
//! ## Generating a series directly
//!
//! ```rust
//! use vitalwatch_sim::generate_series;
//!
//! let series = generate_series(18.0, 24).unwrap();
//! assert_eq!(series.first().unwrap().time_label, "00:00");
//! ```

mod error;
mod generator;
mod handle;
mod output;
mod simulator;
mod state;

pub use error::{Result, SimError};
pub use generator::{generate_series, generate_series_with, sample_reading, DEFAULT_POINTS};
pub use handle::ChildHandle;
pub use output::Output;
pub use simulator::{Simulator, SimulatorBuilder, MIN_INTERVAL};

#[cfg(feature = "tokio")]
pub use simulator::EmissionHandle;

// Re-export types for convenience
pub use vitalwatch_types::{ChildVitals, HealthReading, SeriesPoint, Snapshot};
