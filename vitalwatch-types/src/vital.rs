//! Vital metrics and the status evaluator.

use crate::{AgeBand, Result, VitalError};

/// Status of a vital metric relative to its normal range.
///
/// Ordered by severity so the worst of several statuses is their `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum VitalStatus {
    #[default]
    #[cfg_attr(feature = "minicbor", n(0))]
    Normal,
    #[cfg_attr(feature = "minicbor", n(1))]
    Warning,
    #[cfg_attr(feature = "minicbor", n(2))]
    Critical,
}

impl VitalStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "OK",
            VitalStatus::Warning => "WARN",
            VitalStatus::Critical => "CRIT",
        }
    }

    /// Returns the lowercase name used on badges.
    pub fn label(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "normal",
            VitalStatus::Warning => "warning",
            VitalStatus::Critical => "critical",
        }
    }
}

/// Direction of the most recent change in a metric.
///
/// This is a presentation annotation derived from the sign of a single
/// delta. It says nothing statistical about the underlying signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum Trend {
    #[cfg_attr(feature = "minicbor", n(0))]
    Up,
    #[cfg_attr(feature = "minicbor", n(1))]
    Down,
    #[default]
    #[cfg_attr(feature = "minicbor", n(2))]
    Stable,
}

impl Trend {
    /// Positive delta is `Up`, negative is `Down`, zero or non-finite is `Stable`.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Arrow glyph for display.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

/// Absolute tolerance around the normal range before a value turns critical.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tolerance(f64);

impl Tolerance {
    /// ±10 bpm around the heart-rate normal range.
    pub const HEART_RATE: Tolerance = Tolerance(10.0);

    /// Create a tolerance; must be finite and non-negative.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(VitalError::invalid("tolerance", value));
        }
        Ok(Self(value))
    }

    /// The tolerance in the metric's unit.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::HEART_RATE
    }
}

/// Evaluate a heart rate against a band with [`Tolerance::HEART_RATE`].
///
/// # Example
///
/// ```rust
/// use vitalwatch_types::{evaluate, AgeBandKind, VitalStatus};
///
/// let infant = AgeBandKind::Infant.band(); // 80-120 bpm
/// assert_eq!(evaluate(100.0, &infant).unwrap(), VitalStatus::Normal);
/// assert_eq!(evaluate(125.0, &infant).unwrap(), VitalStatus::Warning);
/// assert_eq!(evaluate(135.0, &infant).unwrap(), VitalStatus::Critical);
/// ```
pub fn evaluate(value: f64, band: &AgeBand) -> Result<VitalStatus> {
    evaluate_with(value, band, Tolerance::HEART_RATE)
}

/// Evaluate a heart rate against a band with an explicit tolerance.
///
/// - `Critical` when strictly outside `[low - tol, high + tol]`
/// - `Warning` when outside `[low, high]` but not critical
/// - `Normal` otherwise
pub fn evaluate_with(value: f64, band: &AgeBand, tolerance: Tolerance) -> Result<VitalStatus> {
    if !value.is_finite() {
        return Err(VitalError::invalid("value", value));
    }

    let (low, high) = (band.normal_low, band.normal_high);
    let tol = tolerance.value();

    let status = if value < low - tol || value > high + tol {
        VitalStatus::Critical
    } else if value < low || value > high {
        VitalStatus::Warning
    } else {
        VitalStatus::Normal
    };
    Ok(status)
}

/// The vital signs shown on a child's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VitalKind {
    HeartRate,
    SpO2,
    Sleep,
    Activity,
}

impl VitalKind {
    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            VitalKind::HeartRate => "bpm",
            VitalKind::SpO2 => "%",
            VitalKind::Sleep => "hrs",
            VitalKind::Activity => "%",
        }
    }

    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            VitalKind::HeartRate => "Heart Rate",
            VitalKind::SpO2 => "SpO₂",
            VitalKind::Sleep => "Sleep",
            VitalKind::Activity => "Activity",
        }
    }
}

/// A single observed (or sampled) value with derived status and trend.
///
/// Created fresh on every sample and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct VitalMetric {
    #[cfg_attr(feature = "minicbor", n(0))]
    pub value: f64,

    #[cfg_attr(feature = "minicbor", n(1))]
    pub unit: String,

    #[cfg_attr(feature = "minicbor", n(2))]
    pub status: VitalStatus,

    #[cfg_attr(feature = "minicbor", n(3))]
    pub trend: Trend,
}

impl VitalMetric {
    /// Create a normal, stable metric.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            status: VitalStatus::Normal,
            trend: Trend::Stable,
        }
    }

    /// Create a builder for a metric.
    pub fn builder() -> VitalMetricBuilder {
        VitalMetricBuilder::new()
    }

    /// Build a heart-rate metric, evaluating status against the band and
    /// deriving the trend from `delta`.
    pub fn heart_rate(
        value: f64,
        band: &AgeBand,
        delta: f64,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let status = evaluate_with(value, band, tolerance)?;
        Ok(Self {
            value,
            unit: VitalKind::HeartRate.unit().to_string(),
            status,
            trend: Trend::from_delta(delta),
        })
    }

    /// Check if this metric is in its normal range.
    pub fn is_normal(&self) -> bool {
        self.status == VitalStatus::Normal
    }
}

/// Builder for `VitalMetric`.
#[derive(Debug, Default)]
pub struct VitalMetricBuilder {
    value: f64,
    unit: String,
    status: VitalStatus,
    trend: Trend,
}

impl VitalMetricBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value.
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the status.
    pub fn status(mut self, status: VitalStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the trend.
    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    /// Build the metric.
    pub fn build(self) -> VitalMetric {
        VitalMetric {
            value: self.value,
            unit: self.unit,
            status: self.status,
            trend: self.trend,
        }
    }
}

/// One sample of all four vital signs for a child.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct HealthReading {
    #[cfg_attr(feature = "minicbor", n(0))]
    pub heart_rate: VitalMetric,

    #[cfg_attr(feature = "minicbor", n(1))]
    pub spo2: VitalMetric,

    #[cfg_attr(feature = "minicbor", n(2))]
    pub sleep_hours: VitalMetric,

    #[cfg_attr(feature = "minicbor", n(3))]
    pub activity_level: VitalMetric,
}

impl HealthReading {
    /// Get the metric for a vital kind.
    pub fn metric(&self, kind: VitalKind) -> &VitalMetric {
        match kind {
            VitalKind::HeartRate => &self.heart_rate,
            VitalKind::SpO2 => &self.spo2,
            VitalKind::Sleep => &self.sleep_hours,
            VitalKind::Activity => &self.activity_level,
        }
    }

    /// Iterate over every metric with its kind.
    pub fn iter(&self) -> impl Iterator<Item = (VitalKind, &VitalMetric)> {
        [
            VitalKind::HeartRate,
            VitalKind::SpO2,
            VitalKind::Sleep,
            VitalKind::Activity,
        ]
        .into_iter()
        .map(move |kind| (kind, self.metric(kind)))
    }

    /// The most severe status across all metrics.
    pub fn worst_status(&self) -> VitalStatus {
        self.iter().map(|(_, m)| m.status).max().unwrap_or_default()
    }
}
