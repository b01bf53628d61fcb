//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel, typically fed by an
//! in-process simulator.

use tokio::sync::watch;
use vitalwatch_types::Snapshot;

use super::DataSource;

/// A data source that receives snapshots via a watch channel.
///
/// # Example
///
/// ```
/// use vitalwatch_tui::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("simulator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Snapshot>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where snapshots come from (e.g. "simulator")
    pub fn new(receiver: watch::Receiver<Snapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<Snapshot>, Self) {
        let (tx, rx) = watch::channel(Snapshot::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        // The current value counts as new on the first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        assert!(source.poll().unwrap().is_empty());
        assert!(source.poll().is_none());

        let snapshot = Snapshot::builder()
            .child("Fatima", |c| c.age_months(8.0))
            .build();
        tx.send(snapshot).unwrap();

        assert_eq!(source.poll().unwrap().len(), 1);
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("simulator");
        assert_eq!(source.description(), "channel: simulator");
        assert!(source.error().is_none());
    }

    #[tokio::test]
    async fn test_channel_source_with_simulator() {
        use vitalwatch_sim::{Output, Simulator};

        let (output, rx) = Output::watch();
        let simulator = Simulator::builder().output(output).build();
        simulator.register("Ibrahim", 36.0).unwrap();

        let mut source = ChannelSource::new(rx, "simulator");
        assert!(source.poll().unwrap().is_empty());

        simulator.emit_now().await;
        let snapshot = source.poll().unwrap();
        assert!(snapshot.get("Ibrahim").unwrap().reading.is_some());
    }
}
