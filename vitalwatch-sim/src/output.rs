//! Output backends for emitting snapshots.

use std::path::PathBuf;

use vitalwatch_types::Snapshot;

#[cfg(feature = "tokio")]
use crate::error::{Result, SimError};

/// Output destination for snapshots.
///
/// Configure where the simulator should emit snapshots.
#[derive(Debug)]
pub enum Output {
    /// Write snapshots to a JSON file.
    ///
    /// The file is overwritten with each snapshot.
    File(PathBuf),

    /// Send snapshots to a TCP server.
    ///
    /// Each snapshot is sent as a newline-delimited JSON message.
    Tcp(String),

    /// Send snapshots through a bounded channel.
    ///
    /// Use `Output::channel()` to create this variant and get the receiver.
    #[cfg(feature = "tokio")]
    Channel(tokio::sync::mpsc::Sender<Snapshot>),

    /// Publish the latest snapshot through a watch channel.
    ///
    /// Use `Output::watch()` to create this variant and get the receiver.
    #[cfg(feature = "tokio")]
    Watch(tokio::sync::watch::Sender<Snapshot>),
}

impl Output {
    /// Create a file output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitalwatch_sim::Output;
    ///
    /// let output = Output::file("vitals.json");
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Output::File(path.into())
    }

    /// Create a TCP output.
    pub fn tcp(addr: impl Into<String>) -> Self {
        Output::Tcp(addr.into())
    }

    /// Create a channel output and return both the output and receiver.
    ///
    /// Snapshots are dropped rather than queued when the buffer is full.
    #[cfg(feature = "tokio")]
    pub fn channel(buffer: usize) -> (Self, tokio::sync::mpsc::Receiver<Snapshot>) {
        let (tx, rx) = tokio::sync::mpsc::channel(buffer);
        (Output::Channel(tx), rx)
    }

    /// Create a watch output and return both the output and receiver.
    ///
    /// The receiver always sees the most recent snapshot. It starts with an
    /// empty one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitalwatch_sim::Output;
    ///
    /// let (output, rx) = Output::watch();
    /// assert!(rx.borrow().is_empty());
    /// ```
    #[cfg(feature = "tokio")]
    pub fn watch() -> (Self, tokio::sync::watch::Receiver<Snapshot>) {
        let (tx, rx) = tokio::sync::watch::channel(Snapshot::default());
        (Output::Watch(tx), rx)
    }

    /// Emit a snapshot to this output.
    #[cfg(feature = "tokio")]
    pub(crate) async fn emit(&self, snapshot: &Snapshot) -> Result<()> {
        match self {
            Output::File(path) => {
                let json = serde_json::to_string_pretty(snapshot)?;
                tokio::fs::write(path, json).await?;
            }
            Output::Tcp(addr) => {
                use tokio::io::AsyncWriteExt;
                use tokio::net::TcpStream;

                // Best effort: an absent listener is not an error
                match TcpStream::connect(addr).await {
                    Ok(mut stream) => {
                        let mut json = serde_json::to_vec(snapshot)?;
                        json.push(b'\n');
                        stream.write_all(&json).await?;
                    }
                    Err(e) => tracing::debug!(%addr, error = %e, "tcp output unavailable"),
                }
            }
            Output::Channel(tx) => {
                use tokio::sync::mpsc::error::TrySendError;

                match tx.try_send(snapshot.clone()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::debug!("channel output full, dropping snapshot");
                    }
                    Err(TrySendError::Closed(_)) => return Err(SimError::ChannelClosed),
                }
            }
            Output::Watch(tx) => {
                tx.send(snapshot.clone())
                    .map_err(|_| SimError::ChannelClosed)?;
            }
        }
        Ok(())
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Output::File(_) => "file",
            Output::Tcp(_) => "tcp",
            #[cfg(feature = "tokio")]
            Output::Channel(_) => "channel",
            #[cfg(feature = "tokio")]
            Output::Watch(_) => "watch",
        }
    }
}
