//! Internal state management for simulated children.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use vitalwatch_types::{
    classify, current_timestamp_ms, ChildVitals, HealthReading, SeriesPoint, Snapshot,
    VitalError,
};

use crate::generator::{clamped_point, generate_series, sample_reading, DEFAULT_POINTS};

/// A manually recorded or sampled heart rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateSample {
    pub bpm: f64,
    pub timestamp_ms: u64,
}

/// Thread-safe state for a single child.
#[derive(Debug)]
pub struct ChildState {
    pub age_months: RwLock<f64>,
    pub samples: RwLock<VecDeque<HeartRateSample>>,
    pub reading: RwLock<Option<HealthReading>>,
}

impl ChildState {
    /// Create state for a child, validating the age.
    pub fn new(age_months: f64) -> Result<Self, VitalError> {
        classify(age_months)?;
        Ok(Self {
            age_months: RwLock::new(age_months),
            samples: RwLock::new(VecDeque::with_capacity(DEFAULT_POINTS)),
            reading: RwLock::new(None),
        })
    }

    /// Replace the age after validating it.
    pub fn set_age(&self, age_months: f64) -> Result<(), VitalError> {
        classify(age_months)?;
        *self.age_months.write() = age_months;
        Ok(())
    }

    /// Push a heart rate into the rolling history, evicting the oldest entry
    /// once a day's worth is held.
    pub fn record(&self, bpm: f64) -> Result<(), VitalError> {
        if !bpm.is_finite() || bpm < 0.0 {
            return Err(VitalError::InvalidArgument {
                name: "bpm",
                value: bpm,
            });
        }

        let mut samples = self.samples.write();
        if samples.len() >= DEFAULT_POINTS {
            samples.pop_front();
        }
        samples.push_back(HeartRateSample {
            bpm,
            timestamp_ms: current_timestamp_ms(),
        });
        Ok(())
    }

    /// Draw a synthetic reading, record its heart rate and keep it as the
    /// latest reading.
    pub fn sample(&self) -> Result<HealthReading, VitalError> {
        let age = *self.age_months.read();
        let reading = sample_reading(age, &mut rand::rng())?;
        self.record(reading.heart_rate.value)?;
        *self.reading.write() = Some(reading.clone());
        Ok(reading)
    }

    /// Collect the current vitals.
    ///
    /// Recorded samples occupy consecutive hourly slots, oldest first. With
    /// nothing recorded a fresh day of synthetic data is generated instead.
    pub fn collect(&self) -> Result<ChildVitals, VitalError> {
        let age_months = *self.age_months.read();
        let band = classify(age_months)?;

        let samples = self.samples.read();
        let series: Vec<SeriesPoint> = if samples.is_empty() {
            generate_series(age_months, DEFAULT_POINTS)?
        } else {
            samples
                .iter()
                .enumerate()
                .map(|(slot, s)| clamped_point(&band, slot, s.bpm, s.timestamp_ms))
                .collect()
        };

        Ok(ChildVitals {
            age_months,
            reading: self.reading.read().clone(),
            series,
        })
    }
}

/// Global state for all children.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub children: RwLock<BTreeMap<String, Arc<ChildState>>>,
}

impl GlobalState {
    /// Register a new child or get the existing one.
    pub fn register_child(
        &self,
        name: &str,
        age_months: f64,
    ) -> Result<Arc<ChildState>, VitalError> {
        // Fast path
        {
            let children = self.children.read();
            if let Some(state) = children.get(name) {
                return Ok(state.clone());
            }
        }

        let state = Arc::new(ChildState::new(age_months)?);

        // Slow path
        let mut children = self.children.write();
        Ok(children.entry(name.to_string()).or_insert(state).clone())
    }

    /// Remove a child. Returns `true` if it was present.
    pub fn unregister_child(&self, name: &str) -> bool {
        self.children.write().remove(name).is_some()
    }

    /// Sample every child once.
    pub fn sample_all(&self) {
        for (name, state) in self.children.read().iter() {
            if let Err(e) = state.sample() {
                tracing::warn!(child = %name, error = %e, "failed to sample vitals");
            }
        }
    }

    /// Collect all children into a Snapshot.
    pub fn collect(&self) -> Snapshot {
        let children = self.children.read();
        let mut snapshot = Snapshot::builder();

        for (name, state) in children.iter() {
            match state.collect() {
                Ok(vitals) => snapshot = snapshot.child_vitals(name.clone(), vitals),
                Err(e) => tracing::warn!(child = %name, error = %e, "skipping child"),
            }
        }

        snapshot.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalwatch_types::RangeDeviation;

    #[test]
    fn child_state_rejects_invalid_age() {
        assert!(ChildState::new(-1.0).is_err());
        let state = ChildState::new(8.0).unwrap();
        assert!(state.set_age(f64::INFINITY).is_err());
        assert_eq!(*state.age_months.read(), 8.0);
    }

    #[test]
    fn record_keeps_rolling_day() {
        let state = ChildState::new(8.0).unwrap();
        for i in 0..30 {
            state.record(90.0 + i as f64).unwrap();
        }
        let samples = state.samples.read();
        assert_eq!(samples.len(), DEFAULT_POINTS);
        assert_eq!(samples.front().unwrap().bpm, 96.0);
        assert_eq!(samples.back().unwrap().bpm, 119.0);
    }

    #[test]
    fn record_rejects_non_finite() {
        let state = ChildState::new(8.0).unwrap();
        assert!(state.record(f64::NAN).is_err());
        assert!(state.record(-5.0).is_err());
        assert!(state.samples.read().is_empty());
    }

    #[test]
    fn collect_without_samples_generates_a_day() {
        let state = ChildState::new(18.0).unwrap();
        let vitals = state.collect().unwrap();
        assert_eq!(vitals.series.len(), DEFAULT_POINTS);
        assert!(vitals.reading.is_none());
    }

    #[test]
    fn collect_uses_recorded_samples() {
        let state = ChildState::new(18.0).unwrap();
        state.record(95.0).unwrap();
        state.record(130.0).unwrap();

        let vitals = state.collect().unwrap();
        assert_eq!(vitals.series.len(), 2);
        assert_eq!(vitals.series[0].time_label, "00:00");
        assert_eq!(vitals.series[1].value, 110.0);
        assert_eq!(vitals.series[1].deviation, RangeDeviation::High);
    }

    #[test]
    fn sample_sets_reading_and_records() {
        let state = ChildState::new(4.0).unwrap();
        let reading = state.sample().unwrap();
        assert_eq!(state.reading.read().as_ref(), Some(&reading));
        assert_eq!(state.samples.read().len(), 1);
        assert_eq!(state.samples.read()[0].bpm, reading.heart_rate.value);
    }

    #[test]
    fn register_child_returns_same_arc_on_second_call() {
        let global = GlobalState::default();
        let a = global.register_child("Fatima", 8.0).unwrap();
        let b = global.register_child("Fatima", 20.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b.age_months.read(), 8.0);
    }

    #[test]
    fn register_child_rejects_invalid_age() {
        let global = GlobalState::default();
        assert!(global.register_child("Nobody", f64::NAN).is_err());
        assert!(global.children.read().is_empty());
    }

    #[test]
    fn global_collect_and_unregister() {
        let global = GlobalState::default();
        global.register_child("Fatima", 8.0).unwrap();
        global.register_child("Ibrahim", 36.0).unwrap();
        global.sample_all();

        let snapshot = global.collect();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get("Fatima").unwrap().reading.is_some());

        assert!(global.unregister_child("Fatima"));
        assert!(!global.unregister_child("Fatima"));
        assert_eq!(global.collect().len(), 1);
    }
}
