//! Error types for the simulator.

use thiserror::Error;
use vitalwatch_types::VitalError;

/// Errors that can occur while simulating or emitting snapshots.
#[derive(Debug, Error)]
pub enum SimError {
    /// An age, heart rate or point count was rejected.
    #[error(transparent)]
    Vital(#[from] VitalError),

    /// Writing a snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a snapshot failed.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Every receiver of an in-process output has been dropped.
    #[error("output channel closed")]
    ChannelClosed,
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
