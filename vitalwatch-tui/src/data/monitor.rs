//! Vitals data parsing and status computation.
//!
//! This module transforms raw snapshots into processed data with every
//! heart rate re-evaluated against the child's age band.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use vitalwatch_types::{
    classify, evaluate_with, AgeBand, ChildVitals, HealthReading, HeartRateSeries, SeriesPoint,
    Snapshot, Tolerance, VitalKind, VitalMetric, VitalStatus,
};

/// Thresholds for status computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    /// Distance outside the normal range before a heart rate turns critical.
    pub tolerance: Tolerance,
}

impl Thresholds {
    /// Thresholds with a specific heart-rate tolerance.
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }
}

/// Parsed child data with derived band and status.
#[derive(Debug, Clone)]
pub struct ChildData {
    pub name: String,
    pub age_months: f64,
    pub band: AgeBand,
    pub reading: Option<HealthReading>,
    pub series: HeartRateSeries,
    /// Series points whose raw sample fell outside the normal range.
    pub alert_count: usize,
    /// Worst of the reading's statuses and the series excursions.
    pub status: VitalStatus,
}

impl ChildData {
    /// Latest heart rate, from the reading or else the series.
    pub fn heart_rate(&self) -> Option<f64> {
        self.reading
            .as_ref()
            .map(|r| r.heart_rate.value)
            .or_else(|| self.series.latest().map(|p| p.value))
    }

    /// Get a metric from the latest reading.
    pub fn metric(&self, kind: VitalKind) -> Option<&VitalMetric> {
        self.reading.as_ref().map(|r| r.metric(kind))
    }
}

/// Per-status child counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusCounts {
    /// The worst status present.
    pub fn overall(&self) -> VitalStatus {
        if self.critical > 0 {
            VitalStatus::Critical
        } else if self.warning > 0 {
            VitalStatus::Warning
        } else {
            VitalStatus::Normal
        }
    }
}

/// Complete parsed vitals data ready for display.
#[derive(Debug, Clone)]
pub struct VitalsData {
    pub children: Vec<ChildData>,
    /// Producer timestamp of the snapshot.
    pub timestamp_ms: u64,
    pub last_updated: Instant,
}

impl VitalsData {
    /// Load and parse vitals data from a JSON file.
    pub fn load(path: &Path, thresholds: &Thresholds) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, thresholds)
    }

    /// Parse vitals data from a JSON string.
    pub fn parse(content: &str, thresholds: &Thresholds) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self::from_snapshot(snapshot, thresholds))
    }

    /// Convert a Snapshot into processed VitalsData.
    ///
    /// Children whose age cannot be classified are skipped.
    pub fn from_snapshot(snapshot: Snapshot, thresholds: &Thresholds) -> Self {
        let timestamp_ms = snapshot.timestamp_ms;
        let mut children: Vec<ChildData> = snapshot
            .children
            .into_iter()
            .filter_map(|(name, vitals)| Self::parse_child(name, vitals, thresholds))
            .collect();

        // Worst status first, then by name
        children.sort_by(|a, b| b.status.cmp(&a.status).then_with(|| a.name.cmp(&b.name)));

        Self {
            children,
            timestamp_ms,
            last_updated: Instant::now(),
        }
    }

    fn parse_child(
        name: String,
        vitals: ChildVitals,
        thresholds: &Thresholds,
    ) -> Option<ChildData> {
        let band = match classify(vitals.age_months) {
            Ok(band) => band,
            Err(e) => {
                tracing::warn!(child = %name, error = %e, "skipping child with invalid age");
                return None;
            }
        };

        let reading = vitals.reading.map(|mut reading| {
            let hr = &mut reading.heart_rate;
            match evaluate_with(hr.value, &band, thresholds.tolerance) {
                Ok(status) => hr.status = status,
                Err(e) => tracing::debug!(child = %name, error = %e, "keeping reported status"),
            }
            reading
        });

        let series = HeartRateSeries::new(band, vitals.series);
        let alert_count = series.alert_count();

        let series_status = if alert_count > 0 {
            VitalStatus::Warning
        } else {
            VitalStatus::Normal
        };
        let status = reading
            .as_ref()
            .map(|r| r.worst_status())
            .unwrap_or_default()
            .max(series_status);

        Some(ChildData {
            name,
            age_months: vitals.age_months,
            band,
            reading,
            series,
            alert_count,
            status,
        })
    }

    /// Find a child by name.
    pub fn get(&self, name: &str) -> Option<&ChildData> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Count children by status.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for child in &self.children {
            match child.status {
                VitalStatus::Normal => counts.normal += 1,
                VitalStatus::Warning => counts.warning += 1,
                VitalStatus::Critical => counts.critical += 1,
            }
        }
        counts
    }

    /// Every out-of-range metric and series excursion across all children,
    /// most severe first.
    pub fn alerts(&self) -> Vec<(&ChildData, Alert)> {
        let mut result = Vec::new();

        for child in &self.children {
            if let Some(reading) = &child.reading {
                for (kind, metric) in reading.iter() {
                    if !metric.is_normal() {
                        result.push((
                            child,
                            Alert::Metric {
                                kind,
                                metric: metric.clone(),
                            },
                        ));
                    }
                }
            }
            for point in child.series.points.iter().filter(|p| p.is_excursion()) {
                result.push((child, Alert::Excursion(point.clone())));
            }
        }

        result.sort_by(|a, b| b.1.status().cmp(&a.1.status()));
        result
    }
}

/// Identity of an alert across snapshots, used to remember read and
/// dismissed alerts.
///
/// A metric alert is keyed by child and vital, so it stays the same alert
/// while the vital remains out of range. An excursion is keyed by the time
/// its sample was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlertKey {
    Metric { child: String, kind: VitalKind },
    Excursion { child: String, timestamp_ms: u64 },
}

/// An out-of-range observation for a child.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A metric of the latest reading is not normal.
    Metric { kind: VitalKind, metric: VitalMetric },
    /// A series point whose raw sample left the normal range.
    Excursion(SeriesPoint),
}

impl Alert {
    /// Key of this alert for the given child.
    pub fn key(&self, child: &str) -> AlertKey {
        match self {
            Alert::Metric { kind, .. } => AlertKey::Metric {
                child: child.to_string(),
                kind: *kind,
            },
            Alert::Excursion(point) => AlertKey::Excursion {
                child: child.to_string(),
                timestamp_ms: point.timestamp_ms,
            },
        }
    }

    pub fn status(&self) -> VitalStatus {
        match self {
            Alert::Metric { metric, .. } => metric.status,
            Alert::Excursion(_) => VitalStatus::Warning,
        }
    }

    /// What was measured.
    pub fn label(&self) -> &'static str {
        match self {
            Alert::Metric { kind, .. } => kind.label(),
            Alert::Excursion(_) => "HR history",
        }
    }

    /// Displayed value with unit.
    pub fn value(&self) -> String {
        match self {
            Alert::Metric { metric, .. } => format!("{} {}", metric.value, metric.unit),
            Alert::Excursion(point) => format!("{} bpm", point.value),
        }
    }

    /// When it was observed: "now" for readings, the hour for series points.
    pub fn when(&self) -> &str {
        match self {
            Alert::Metric { .. } => "now",
            Alert::Excursion(point) => &point.time_label,
        }
    }

    /// Short explanation of the excursion.
    pub fn detail(&self) -> String {
        match self {
            Alert::Metric { metric, .. } => {
                format!("{} {}", metric.status.label(), metric.trend.arrow())
            }
            Alert::Excursion(point) => format!("{} (clamped)", point.deviation.label()),
        }
    }
}
