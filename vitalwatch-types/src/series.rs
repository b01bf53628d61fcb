//! Hourly heart-rate series points.

use crate::AgeBand;

/// Hours in a series day.
pub const HOURS_PER_DAY: usize = 24;

/// Where a sample fell relative to the band's normal range before it was
/// clamped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum RangeDeviation {
    #[cfg_attr(feature = "minicbor", n(0))]
    Low,
    #[default]
    #[cfg_attr(feature = "minicbor", n(1))]
    Within,
    #[cfg_attr(feature = "minicbor", n(2))]
    High,
}

impl RangeDeviation {
    /// Compare a raw sample against a band's normal range.
    pub fn of(value: f64, band: &AgeBand) -> Self {
        if value > band.normal_high {
            RangeDeviation::High
        } else if value < band.normal_low {
            RangeDeviation::Low
        } else {
            RangeDeviation::Within
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            RangeDeviation::Low => "Low",
            RangeDeviation::Within => "Normal",
            RangeDeviation::High => "High",
        }
    }
}

/// A single point of an hourly series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct SeriesPoint {
    /// Hour label, zero padded ("00:00" .. "23:00").
    #[cfg_attr(feature = "minicbor", n(0))]
    pub time_label: String,

    /// Displayed value, clamped into the band's normal range.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub value: f64,

    /// Unix timestamp in milliseconds of the hour this point represents.
    #[cfg_attr(feature = "minicbor", n(2))]
    pub timestamp_ms: u64,

    /// Position of the unclamped sample relative to the normal range.
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "minicbor", n(3))]
    pub deviation: RangeDeviation,
}

impl SeriesPoint {
    /// Create a point for the given hour.
    pub fn new(hour: usize, value: f64, timestamp_ms: u64) -> Self {
        Self {
            time_label: hour_label(hour),
            value,
            timestamp_ms,
            deviation: RangeDeviation::Within,
        }
    }

    /// Set the deviation of the unclamped sample.
    pub fn with_deviation(mut self, deviation: RangeDeviation) -> Self {
        self.deviation = deviation;
        self
    }

    /// True if the unclamped sample was outside the normal range.
    pub fn is_excursion(&self) -> bool {
        self.deviation != RangeDeviation::Within
    }
}

/// Format an hour of the day as "HH:00".
pub fn hour_label(hour: usize) -> String {
    format!("{:02}:00", hour % HOURS_PER_DAY)
}

/// A day of heart-rate points together with the band they were drawn for.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartRateSeries {
    pub band: AgeBand,
    pub points: Vec<SeriesPoint>,
}

impl HeartRateSeries {
    /// Wrap points for a band.
    pub fn new(band: AgeBand, points: Vec<SeriesPoint>) -> Self {
        Self { band, points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent point.
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Points whose unclamped sample fell outside the normal range.
    pub fn alert_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_excursion()).count()
    }

    /// The last `n` points, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().rev().take(n)
    }

    /// Lowest displayed value.
    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    /// Highest displayed value.
    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Mean displayed value.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.value).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Check that labels are strictly ascending.
    pub fn is_ordered(&self) -> bool {
        self.points.windows(2).all(|w| w[0].time_label < w[1].time_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgeBandKind;

    fn series(values: &[(f64, RangeDeviation)]) -> HeartRateSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(hour, &(v, d))| {
                SeriesPoint::new(hour, v, hour as u64 * 3_600_000).with_deviation(d)
            })
            .collect();
        HeartRateSeries::new(AgeBandKind::Toddler.band(), points)
    }

    #[test]
    fn hour_labels_are_zero_padded() {
        assert_eq!(hour_label(0), "00:00");
        assert_eq!(hour_label(9), "09:00");
        assert_eq!(hour_label(23), "23:00");
        assert_eq!(hour_label(24), "00:00");
    }

    #[test]
    fn deviation_of_value() {
        let band = AgeBandKind::Toddler.band();
        assert_eq!(RangeDeviation::of(69.0, &band), RangeDeviation::Low);
        assert_eq!(RangeDeviation::of(70.0, &band), RangeDeviation::Within);
        assert_eq!(RangeDeviation::of(110.0, &band), RangeDeviation::Within);
        assert_eq!(RangeDeviation::of(111.0, &band), RangeDeviation::High);
    }

    #[test]
    fn alert_count_counts_excursions() {
        let s = series(&[
            (90.0, RangeDeviation::Within),
            (110.0, RangeDeviation::High),
            (70.0, RangeDeviation::Low),
            (95.0, RangeDeviation::Within),
        ]);
        assert_eq!(s.alert_count(), 2);
    }

    #[test]
    fn recent_is_newest_first() {
        let s = series(&[
            (90.0, RangeDeviation::Within),
            (91.0, RangeDeviation::Within),
            (92.0, RangeDeviation::Within),
        ]);
        let recent: Vec<f64> = s.recent(2).map(|p| p.value).collect();
        assert_eq!(recent, vec![92.0, 91.0]);
        assert_eq!(s.latest().unwrap().time_label, "02:00");
    }

    #[test]
    fn stats() {
        let s = series(&[
            (80.0, RangeDeviation::Within),
            (100.0, RangeDeviation::Within),
            (90.0, RangeDeviation::Within),
        ]);
        assert_eq!(s.min(), Some(80.0));
        assert_eq!(s.max(), Some(100.0));
        assert_eq!(s.mean(), Some(90.0));
        assert!(s.is_ordered());
    }

    #[test]
    fn empty_series() {
        let s = series(&[]);
        assert!(s.is_empty());
        assert!(s.latest().is_none());
        assert!(s.mean().is_none());
        assert_eq!(s.alert_count(), 0);
    }
}
