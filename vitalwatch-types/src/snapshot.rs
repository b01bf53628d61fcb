//! Snapshot - a point-in-time view of every monitored child.

use std::collections::BTreeMap;

use crate::{classify, AgeBand, HealthReading, HeartRateSeries, Result, SchemaVersion, SeriesPoint};

/// A point-in-time snapshot of vital signs for all monitored children.
///
/// Snapshots are emitted periodically by the simulator (or any other
/// producer) and consumed by the dashboard.
///
/// # Example
///
/// ```rust
/// use vitalwatch_types::Snapshot;
///
/// let snapshot = Snapshot::builder()
///     .child("Fatima", |c| c.age_months(8.0))
///     .child("Ibrahim", |c| c.age_months(36.0))
///     .build();
///
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct Snapshot {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "minicbor", n(0))]
    pub version: SchemaVersion,

    /// Unix timestamp in milliseconds when this snapshot was taken.
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "minicbor", n(1))]
    pub timestamp_ms: u64,

    /// Vitals for each child, keyed by name.
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "minicbor", n(2))]
    pub children: BTreeMap<String, ChildVitals>,
}

impl Snapshot {
    /// Create a new empty snapshot with the current timestamp.
    pub fn new() -> Self {
        Self::with_timestamp(current_timestamp_ms())
    }

    /// Create a new empty snapshot with a specific timestamp.
    pub fn with_timestamp(timestamp_ms: u64) -> Self {
        Self {
            version: SchemaVersion::current(),
            timestamp_ms,
            children: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Check if the snapshot is empty (no children).
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of children in the snapshot.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Get vitals for a specific child.
    pub fn get(&self, name: &str) -> Option<&ChildVitals> {
        self.children.get(name)
    }

    /// Iterate over all children.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ChildVitals)> {
        self.children.iter()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Vitals for a single child.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct ChildVitals {
    /// Age in months (fractional months allowed).
    #[cfg_attr(feature = "minicbor", n(0))]
    pub age_months: f64,

    /// Latest sample of all vital signs, if one has been taken.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    #[cfg_attr(feature = "minicbor", n(1))]
    pub reading: Option<HealthReading>,

    /// Hourly heart-rate series, oldest first.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty", default))]
    #[cfg_attr(feature = "minicbor", n(2))]
    pub series: Vec<SeriesPoint>,
}

impl ChildVitals {
    /// Create vitals for a child of the given age with no samples.
    pub fn new(age_months: f64) -> Self {
        Self {
            age_months,
            ..Default::default()
        }
    }

    /// Create a builder for child vitals.
    pub fn builder() -> ChildVitalsBuilder {
        ChildVitalsBuilder::new()
    }

    /// Resolve the child's age band.
    pub fn band(&self) -> Result<AgeBand> {
        classify(self.age_months)
    }

    /// The heart-rate series paired with the child's band.
    pub fn heart_rate_series(&self) -> Result<HeartRateSeries> {
        Ok(HeartRateSeries::new(self.band()?, self.series.clone()))
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for `ChildVitals`.
#[derive(Debug, Default)]
pub struct ChildVitalsBuilder {
    age_months: f64,
    reading: Option<HealthReading>,
    series: Vec<SeriesPoint>,
}

impl ChildVitalsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the age in months.
    pub fn age_months(mut self, age_months: f64) -> Self {
        self.age_months = age_months;
        self
    }

    /// Set the latest reading.
    pub fn reading(mut self, reading: HealthReading) -> Self {
        self.reading = Some(reading);
        self
    }

    /// Set the heart-rate series.
    pub fn series(mut self, series: Vec<SeriesPoint>) -> Self {
        self.series = series;
        self
    }

    /// Append one point to the series.
    pub fn point(mut self, point: SeriesPoint) -> Self {
        self.series.push(point);
        self
    }

    /// Build the child vitals.
    pub fn build(self) -> ChildVitals {
        ChildVitals {
            age_months: self.age_months,
            reading: self.reading,
            series: self.series,
        }
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    timestamp_ms: Option<u64>,
    children: BTreeMap<String, ChildVitals>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a specific timestamp (milliseconds since Unix epoch).
    pub fn timestamp_ms(mut self, ts: u64) -> Self {
        self.timestamp_ms = Some(ts);
        self
    }

    /// Add a child with vitals built using a closure.
    pub fn child<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ChildVitalsBuilder) -> ChildVitalsBuilder,
    {
        let vitals = f(ChildVitalsBuilder::new()).build();
        self.children.insert(name.into(), vitals);
        self
    }

    /// Add a child with pre-built vitals.
    pub fn child_vitals(mut self, name: impl Into<String>, vitals: ChildVitals) -> Self {
        self.children.insert(name.into(), vitals);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            version: SchemaVersion::current(),
            timestamp_ms: self.timestamp_ms.unwrap_or_else(current_timestamp_ms),
            children: self.children,
        }
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgeBandKind, RangeDeviation, VitalMetric, VitalStatus};

    fn reading(bpm: f64, status: VitalStatus) -> HealthReading {
        HealthReading {
            heart_rate: VitalMetric::builder().value(bpm).unit("bpm").status(status).build(),
            spo2: VitalMetric::new(98.0, "%"),
            sleep_hours: VitalMetric::new(14.0, "hrs"),
            activity_level: VitalMetric::new(75.0, "%"),
        }
    }

    #[test]
    fn test_snapshot_builder() {
        let snapshot = Snapshot::builder()
            .timestamp_ms(1703160000000)
            .child("Fatima", |c| c.age_months(8.0).reading(reading(100.0, VitalStatus::Normal)))
            .child("Ibrahim", |c| c.age_months(36.0))
            .build();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.timestamp_ms, 1703160000000);
        assert!(snapshot.get("Fatima").unwrap().reading.is_some());
        assert!(snapshot.get("Ibrahim").unwrap().reading.is_none());
    }

    #[test]
    fn test_snapshot_version() {
        let snapshot = Snapshot::builder().build();
        assert!(snapshot.version.is_compatible());
        assert!(snapshot.timestamp_ms > 0);
    }

    #[test]
    fn duplicate_child_overwrites() {
        let snapshot = Snapshot::builder()
            .child("Chioma", |c| c.age_months(6.0))
            .child("Chioma", |c| c.age_months(7.0))
            .build();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("Chioma").unwrap().age_months, 7.0);
    }

    #[test]
    fn child_band_and_series() {
        let vitals = ChildVitals::builder()
            .age_months(18.0)
            .point(SeriesPoint::new(0, 90.0, 0))
            .point(SeriesPoint::new(1, 110.0, 3_600_000).with_deviation(RangeDeviation::High))
            .build();

        assert_eq!(vitals.band().unwrap().kind, AgeBandKind::Toddler);
        let series = vitals.heart_rate_series().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.alert_count(), 1);
    }

    #[test]
    fn invalid_age_has_no_band() {
        let vitals = ChildVitals::new(-3.0);
        assert!(vitals.band().is_err());
        assert!(vitals.heart_rate_series().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let snapshot = Snapshot::builder()
            .timestamp_ms(1703160000000)
            .child("Ruth", |c| {
                c.age_months(4.0)
                    .reading(reading(125.0, VitalStatus::Warning))
                    .point(SeriesPoint::new(0, 111.0, 1703156400000))
            })
            .build();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_minimal_json() {
        let json = r#"{"children":{"Paul":{"age_months":18}}}"#;
        let parsed: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.get("Paul").unwrap().age_months, 18.0);
        assert!(parsed.version.is_compatible());
    }

    #[cfg(feature = "minicbor")]
    #[test]
    fn test_minicbor_roundtrip() {
        let snapshot = Snapshot::builder()
            .timestamp_ms(1703160000000)
            .child("Mary", |c| c.age_months(12.0).reading(reading(95.0, VitalStatus::Normal)))
            .build();

        let bytes = minicbor::to_vec(&snapshot).unwrap();
        let parsed: Snapshot = minicbor::decode(&bytes).unwrap();

        assert_eq!(snapshot, parsed);
    }
}
