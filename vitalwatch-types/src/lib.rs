//! # vitalwatch-types
//!
//! Core types for child vital-sign monitoring. This crate defines the age
//! bands, the status evaluation rules and the snapshot schema shared by the
//! vitalwatch simulator and dashboard.
//!
//! ## Design Goals
//!
//! - **Pure computation**: Classification and evaluation have no I/O and no shared state
//! - **One tolerance policy**: Status thresholds are applied uniformly across callers
//! - **Optional serialization**: Enable `serde` and/or `minicbor` features as needed
//! - **Versioned schema**: Snapshots include version info for forward compatibility
//! - **Ergonomic builders**: Fluent API for constructing snapshots
//!
//! ## Features
//!
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//! - `minicbor`: Compact binary serialization via CBOR
//! - `all`: Enable all serialization formats
//!
//! ## Example
//!
//! ```rust
//! use vitalwatch_types::{classify, evaluate, AgeBandKind, VitalStatus};
//!
//! // A 12 month old is a toddler, normal heart rate 70-110 bpm
//! let band = classify(12.0).unwrap();
//! assert_eq!(band.kind, AgeBandKind::Toddler);
//!
//! // 115 bpm is outside the normal range but inside the tolerance
//! assert_eq!(evaluate(115.0, &band).unwrap(), VitalStatus::Warning);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! snapshots to allow consumers to handle format evolution gracefully.

mod band;
mod error;
mod series;
mod snapshot;
mod version;
mod vital;

pub mod nutrition;

pub use band::*;
pub use error::*;
pub use series::*;
pub use snapshot::*;
pub use version::*;
pub use vital::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;
