//! Child handle for recording and sampling vitals.

use std::sync::Arc;

use vitalwatch_types::HealthReading;

use crate::error::Result;
use crate::state::ChildState;

/// A handle for feeding vitals for a specific child.
///
/// Obtain a handle by calling `Simulator::register()`.
///
/// # Example
///
/// ```rust
/// use vitalwatch_sim::Simulator;
///
/// let simulator = Simulator::new();
/// let fatima = simulator.register("Fatima", 8.0).unwrap();
///
/// // Record a measured heart rate
/// fatima.record_heart_rate(112.0).unwrap();
///
/// // Or draw a synthetic reading of every vital sign
/// let reading = fatima.sample().unwrap();
/// assert_eq!(reading.heart_rate.unit, "bpm");
/// ```
#[derive(Clone)]
pub struct ChildHandle {
    pub(crate) state: Arc<ChildState>,
    pub(crate) name: String,
}

impl ChildHandle {
    /// Update the child's age. Invalid ages leave the current age unchanged.
    pub fn set_age(&self, age_months: f64) -> Result<()> {
        Ok(self.state.set_age(age_months)?)
    }

    /// Current age in months.
    pub fn age_months(&self) -> f64 {
        *self.state.age_months.read()
    }

    /// Record a measured heart rate into the rolling 24-entry history.
    pub fn record_heart_rate(&self, bpm: f64) -> Result<()> {
        Ok(self.state.record(bpm)?)
    }

    /// Draw a synthetic reading and record its heart rate.
    pub fn sample(&self) -> Result<HealthReading> {
        Ok(self.state.sample()?)
    }

    /// The most recent reading, if any.
    pub fn latest_reading(&self) -> Option<HealthReading> {
        self.state.reading.read().clone()
    }

    /// Get the child's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ChildHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{SimError, Simulator};

    #[test]
    fn set_age_validates() {
        let simulator = Simulator::new();
        let handle = simulator.register("Chioma", 6.0).unwrap();

        handle.set_age(7.5).unwrap();
        assert_eq!(handle.age_months(), 7.5);

        assert!(matches!(handle.set_age(-1.0), Err(SimError::Vital(_))));
        assert_eq!(handle.age_months(), 7.5);
    }

    #[test]
    fn record_heart_rate_shows_in_snapshot() {
        let simulator = Simulator::new();
        let handle = simulator.register("Ruth", 4.0).unwrap();

        handle.record_heart_rate(100.0).unwrap();
        handle.record_heart_rate(104.0).unwrap();

        let snapshot = simulator.collect();
        let series = &snapshot.get("Ruth").unwrap().series;
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].value, 104.0);
    }

    #[test]
    fn sample_updates_latest_reading() {
        let simulator = Simulator::new();
        let handle = simulator.register("Mary", 12.0).unwrap();
        assert!(handle.latest_reading().is_none());

        let reading = handle.sample().unwrap();
        assert_eq!(handle.latest_reading(), Some(reading));
    }

    #[test]
    fn clones_share_state() {
        let simulator = Simulator::new();
        let a = simulator.register("Paul", 18.0).unwrap();
        let b = a.clone();

        a.record_heart_rate(90.0).unwrap();
        b.record_heart_rate(91.0).unwrap();

        assert_eq!(b.name(), "Paul");
        assert_eq!(simulator.collect().get("Paul").unwrap().series.len(), 2);
    }
}
