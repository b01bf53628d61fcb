//! Stream-based data source.
//!
//! Receives snapshots as newline-delimited JSON from an async byte stream,
//! such as the simulator's TCP output.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use vitalwatch_types::Snapshot;

use super::DataSource;

/// A data source that receives snapshots from an async stream.
///
/// A background task reads newline-delimited JSON from the reader and makes
/// snapshots available via `poll()`. Lines that fail to parse are skipped
/// and reported through `error()`.
///
/// # Example with a byte stream
///
/// ```
/// use std::io::Cursor;
/// use vitalwatch_tui::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<Snapshot>,
    description: String,
    shared_error: Arc<Mutex<Option<String>>>,
    last_error: Option<String>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Each line is parsed as a complete `Snapshot`.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let shared_error = Arc::new(Mutex::new(None));
        let error_handle = shared_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        *error_handle.lock() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) if line.trim().is_empty() => {}
                    Ok(_) => {
                        if !forward(line.trim().as_bytes(), &tx, &error_handle).await {
                            break;
                        }
                    }
                    Err(e) => {
                        *error_handle.lock() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self::with_receiver(rx, description, shared_error)
    }

    /// Create a StreamSource from a channel of raw JSON payloads.
    ///
    /// Each message must hold one complete snapshot.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, snapshot_rx) = mpsc::channel(16);
        let shared_error = Arc::new(Mutex::new(None));
        let error_handle = shared_error.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                if !forward(&bytes, &tx, &error_handle).await {
                    break;
                }
            }
        });

        Self::with_receiver(snapshot_rx, description, shared_error)
    }

    fn with_receiver(
        receiver: mpsc::Receiver<Snapshot>,
        description: &str,
        shared_error: Arc<Mutex<Option<String>>>,
    ) -> Self {
        Self {
            receiver,
            description: format!("stream: {}", description),
            shared_error,
            last_error: None,
        }
    }
}

/// Parse one payload and pass it on. Returns `false` once the receiver is gone.
async fn forward(
    bytes: &[u8],
    tx: &mpsc::Sender<Snapshot>,
    error: &Mutex<Option<String>>,
) -> bool {
    match serde_json::from_slice::<Snapshot>(bytes) {
        Ok(snapshot) => {
            *error.lock() = None;
            tx.send(snapshot).await.is_ok()
        }
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed snapshot");
            *error.lock() = Some(format!("Parse error: {}", e));
            true
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let result = match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut shared = self.shared_error.lock();
                if shared.is_none() {
                    *shared = Some("Stream disconnected".to_string());
                }
                None
            }
        };

        self.last_error = self.shared_error.lock().clone();
        result
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
