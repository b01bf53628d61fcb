//! Rolling heart-rate history for sparklines and trend arrows.

use std::collections::{HashMap, VecDeque};

use vitalwatch_types::Trend;

use super::monitor::VitalsData;

/// Maximum number of snapshots to keep per child.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks each child's heart rate across snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Heart rate per child, oldest first (child name -> bpm).
    pub heart_rates: HashMap<String, VecDeque<f64>>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest heart rate of every child in a snapshot.
    pub fn record(&mut self, data: &VitalsData) {
        for child in &data.children {
            let Some(bpm) = child.heart_rate() else {
                continue;
            };
            let rates = self.heart_rates.entry(child.name.clone()).or_default();
            rates.push_back(bpm);
            if rates.len() > MAX_HISTORY_SIZE {
                rates.pop_front();
            }
        }

        // Children that left the snapshot take their history with them
        self.heart_rates
            .retain(|name, _| data.children.iter().any(|c| &c.name == name));
    }

    /// Number of samples held for a child.
    pub fn len(&self, name: &str) -> usize {
        self.heart_rates.get(name).map_or(0, VecDeque::len)
    }

    /// Sparkline data (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec until at least two samples are held.
    pub fn sparkline(&self, name: &str) -> Vec<u8> {
        let Some(values) = self.heart_rates.get(name) else {
            return Vec::new();
        };
        if values.len() < 2 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(1.0);

        values
            .iter()
            .map(|&v| (((v - min) / range * 7.0).round() as u8).min(7))
            .collect()
    }

    /// Direction of the last change in heart rate.
    pub fn trend(&self, name: &str) -> Trend {
        let Some(values) = self.heart_rates.get(name) else {
            return Trend::Stable;
        };
        let mut recent = values.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(current), Some(previous)) => Trend::from_delta(current - previous),
            _ => Trend::Stable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Thresholds;
    use vitalwatch_types::{HealthReading, Snapshot, VitalMetric};

    fn data(children: &[(&str, f64)]) -> VitalsData {
        let mut builder = Snapshot::builder();
        for (name, bpm) in children {
            let reading = HealthReading {
                heart_rate: VitalMetric::new(*bpm, "bpm"),
                spo2: VitalMetric::new(98.0, "%"),
                sleep_hours: VitalMetric::new(12.0, "hrs"),
                activity_level: VitalMetric::new(70.0, "%"),
            };
            builder = builder.child(*name, |c| c.age_months(36.0).reading(reading));
        }
        VitalsData::from_snapshot(builder.build(), &Thresholds::default())
    }

    #[test]
    fn sparkline_needs_two_samples() {
        let mut history = History::new();
        history.record(&data(&[("Ibrahim", 80.0)]));
        assert!(history.sparkline("Ibrahim").is_empty());
        assert!(history.sparkline("Nobody").is_empty());

        history.record(&data(&[("Ibrahim", 90.0)]));
        assert_eq!(history.sparkline("Ibrahim"), vec![0, 7]);
    }

    #[test]
    fn sparkline_is_normalized() {
        let mut history = History::new();
        for bpm in [70.0, 80.0, 90.0, 84.0] {
            history.record(&data(&[("Ibrahim", bpm)]));
        }
        let spark = history.sparkline("Ibrahim");
        assert_eq!(spark.len(), 4);
        assert_eq!(spark[0], 0);
        assert_eq!(spark[2], 7);
        assert!(spark.iter().all(|&v| v <= 7));
    }

    #[test]
    fn flat_history_stays_low() {
        let mut history = History::new();
        for _ in 0..3 {
            history.record(&data(&[("Ibrahim", 80.0)]));
        }
        assert_eq!(history.sparkline("Ibrahim"), vec![0, 0, 0]);
        assert_eq!(history.trend("Ibrahim"), Trend::Stable);
    }

    #[test]
    fn history_is_capped() {
        let mut history = History::new();
        for i in 0..100 {
            history.record(&data(&[("Ibrahim", 60.0 + (i % 40) as f64)]));
        }
        assert_eq!(history.len("Ibrahim"), MAX_HISTORY_SIZE);
    }

    #[test]
    fn trend_follows_last_change() {
        let mut history = History::new();
        history.record(&data(&[("Ibrahim", 80.0)]));
        assert_eq!(history.trend("Ibrahim"), Trend::Stable);

        history.record(&data(&[("Ibrahim", 85.0)]));
        assert_eq!(history.trend("Ibrahim"), Trend::Up);

        history.record(&data(&[("Ibrahim", 82.0)]));
        assert_eq!(history.trend("Ibrahim"), Trend::Down);
    }

    #[test]
    fn removed_children_are_forgotten() {
        let mut history = History::new();
        history.record(&data(&[("Ibrahim", 80.0), ("John", 90.0)]));
        history.record(&data(&[("Ibrahim", 81.0)]));
        assert_eq!(history.len("John"), 0);
        assert_eq!(history.len("Ibrahim"), 2);
    }
}
