//! The main Simulator type for sampling children and emitting snapshots.

use std::sync::Arc;
use std::time::Duration;

use vitalwatch_types::Snapshot;

use crate::error::Result;
use crate::handle::ChildHandle;
use crate::output::Output;
use crate::state::GlobalState;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest emission interval. Shorter requests, zero included, are raised
/// to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Synthetic vitals for a set of children.
///
/// A Simulator holds the registered children, samples them on every tick and
/// emits snapshots to the configured outputs.
///
/// # Example
///
/// ```rust,no_run
/// use vitalwatch_sim::{Output, Simulator};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let simulator = Simulator::builder()
///         .output(Output::file("vitals.json"))
///         .interval(Duration::from_secs(2))
///         .build();
///
///     simulator.register("Fatima", 8.0).unwrap();
///     simulator.register("Ibrahim", 36.0).unwrap();
///
///     // Start background emission
///     let emission = simulator.start();
///
///     tokio::time::sleep(Duration::from_secs(10)).await;
///     emission.stop();
/// }
/// ```
#[derive(Debug)]
pub struct Simulator {
    state: Arc<GlobalState>,
    outputs: Arc<Vec<Output>>,
    interval: Duration,
}

impl Simulator {
    /// Create a simulator with no outputs and a 1 second interval.
    pub fn new() -> Self {
        Self {
            state: Arc::new(GlobalState::default()),
            outputs: Arc::new(Vec::new()),
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Create a builder for configuring the simulator.
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    /// Register a child and get a handle for feeding its vitals.
    ///
    /// If a child with this name already exists, returns a handle to the
    /// existing child and leaves its age unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if `age_months` is negative or not finite.
    pub fn register(&self, name: &str, age_months: f64) -> Result<ChildHandle> {
        let state = self.state.register_child(name, age_months)?;
        tracing::debug!(child = %name, age_months, "registered child");
        Ok(ChildHandle {
            state,
            name: name.to_string(),
        })
    }

    /// Remove a child from future snapshots.
    ///
    /// Returns `true` if the child was registered. Existing handles keep
    /// working but their samples are no longer emitted.
    pub fn unregister(&self, name: &str) -> bool {
        self.state.unregister_child(name)
    }

    /// Collect a snapshot of all children without sampling.
    pub fn collect(&self) -> Snapshot {
        self.state.collect()
    }

    /// The emission interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start background emission of snapshots.
    ///
    /// This spawns a tokio task that samples every child, then collects and
    /// emits a snapshot to all outputs once per interval. The first tick
    /// fires immediately.
    ///
    /// Returns a handle that stops the emission when dropped or stopped.
    #[cfg(feature = "tokio")]
    pub fn start(&self) -> EmissionHandle {
        use tokio::sync::watch;

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let state = self.state.clone();
        let outputs = self.outputs.clone();
        let interval = self.interval;

        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            outputs = outputs.len(),
            "starting vitals emission"
        );

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        tick(&state, &outputs).await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("vitals emission stopped");
        });

        EmissionHandle { stop_tx }
    }

    /// Sample every child and emit a snapshot to all outputs immediately.
    #[cfg(feature = "tokio")]
    pub async fn emit_now(&self) {
        tick(&self.state, &self.outputs).await;
    }
}

#[cfg(feature = "tokio")]
async fn tick(state: &GlobalState, outputs: &[Output]) {
    state.sample_all();
    let snapshot = state.collect();
    tracing::trace!(children = snapshot.len(), "emitting snapshot");

    for output in outputs {
        if let Err(e) = output.emit(&snapshot).await {
            tracing::warn!(output = output.kind(), error = %e, "failed to emit snapshot");
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a Simulator.
#[derive(Debug, Default)]
pub struct SimulatorBuilder {
    outputs: Vec<Output>,
    interval: Option<Duration>,
}

impl SimulatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an output destination.
    ///
    /// Multiple outputs can be added; snapshots are emitted to all of them.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Set the emission interval. Defaults to 1 second.
    ///
    /// Intervals below [`MIN_INTERVAL`] are raised to it when building.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Build the simulator.
    pub fn build(self) -> Simulator {
        let requested = self.interval.unwrap_or(DEFAULT_INTERVAL);
        if requested < MIN_INTERVAL {
            tracing::warn!(
                requested_ms = requested.as_millis() as u64,
                min_ms = MIN_INTERVAL.as_millis() as u64,
                "emission interval too short, using minimum"
            );
        }

        Simulator {
            state: Arc::new(GlobalState::default()),
            outputs: Arc::new(self.outputs),
            interval: requested.max(MIN_INTERVAL),
        }
    }
}

/// Handle for controlling background emission.
///
/// Drop this handle to stop emission, or call `stop()` explicitly.
#[cfg(feature = "tokio")]
#[derive(Debug)]
pub struct EmissionHandle {
    stop_tx: tokio::sync::watch::Sender<bool>,
}

#[cfg(feature = "tokio")]
impl EmissionHandle {
    /// Stop background emission.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}
