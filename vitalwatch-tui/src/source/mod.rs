//! Data source abstraction for receiving vitals snapshots.
//!
//! Snapshots can come from a JSON file written by the simulator, a
//! newline-delimited JSON stream, or an in-process watch channel.

mod channel;
mod file;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use stream::StreamSource;

use std::fmt::Debug;

use vitalwatch_types::Snapshot;

/// Trait for receiving vitals snapshots from various sources.
///
/// # Example
///
/// ```
/// use vitalwatch_tui::{DataSource, FileSource};
///
/// let mut source = FileSource::new("vitals.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} children", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Human-readable description of the source, shown in the status bar.
    fn description(&self) -> &str;

    /// The error from the last poll, if any.
    fn error(&self) -> Option<&str>;
}
