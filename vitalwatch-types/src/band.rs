//! Age bands and the age-bucket classifier.

use crate::{Result, VitalError};

/// The five pediatric age bands, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum AgeBandKind {
    /// 0 to 3 months.
    #[cfg_attr(feature = "minicbor", n(0))]
    Neonate,
    /// 3 to 6 months.
    #[cfg_attr(feature = "minicbor", n(1))]
    EarlyInfant,
    /// 6 to 12 months.
    #[cfg_attr(feature = "minicbor", n(2))]
    Infant,
    /// 12 to 24 months.
    #[cfg_attr(feature = "minicbor", n(3))]
    Toddler,
    /// 24 months and older.
    #[cfg_attr(feature = "minicbor", n(4))]
    YoungChild,
}

impl AgeBandKind {
    /// Human readable name of the band.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBandKind::Neonate => "Neonate",
            AgeBandKind::EarlyInfant => "Early infant",
            AgeBandKind::Infant => "Infant",
            AgeBandKind::Toddler => "Toddler",
            AgeBandKind::YoungChild => "Young child",
        }
    }

    /// The statically defined band for this kind.
    pub fn band(&self) -> AgeBand {
        AGE_BANDS[*self as usize]
    }
}

/// An age range with its clinically normal heart-rate range.
///
/// Lower bounds are inclusive and upper bounds exclusive, so a child who is
/// exactly 3 months old belongs to [`AgeBandKind::EarlyInfant`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct AgeBand {
    #[cfg_attr(feature = "minicbor", n(0))]
    pub kind: AgeBandKind,

    /// Inclusive lower bound in months.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub lower_months: f64,

    /// Exclusive upper bound in months; `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    #[cfg_attr(feature = "minicbor", n(2))]
    pub upper_months: Option<f64>,

    /// Lowest normal heart rate in bpm.
    #[cfg_attr(feature = "minicbor", n(3))]
    pub normal_low: f64,

    /// Highest normal heart rate in bpm.
    #[cfg_attr(feature = "minicbor", n(4))]
    pub normal_high: f64,
}

/// Every age band, ascending and contiguous from 0 months.
pub const AGE_BANDS: [AgeBand; 5] = [
    AgeBand::new(AgeBandKind::Neonate, 0.0, Some(3.0), 100.0, 150.0),
    AgeBand::new(AgeBandKind::EarlyInfant, 3.0, Some(6.0), 90.0, 120.0),
    AgeBand::new(AgeBandKind::Infant, 6.0, Some(12.0), 80.0, 120.0),
    AgeBand::new(AgeBandKind::Toddler, 12.0, Some(24.0), 70.0, 110.0),
    AgeBand::new(AgeBandKind::YoungChild, 24.0, None, 60.0, 100.0),
];

/// Where in the band range the resting heart rate sits for synthetic data.
const BASE_RATE_FRACTION: f64 = 0.7;

impl AgeBand {
    const fn new(
        kind: AgeBandKind,
        lower_months: f64,
        upper_months: Option<f64>,
        normal_low: f64,
        normal_high: f64,
    ) -> Self {
        Self {
            kind,
            lower_months,
            upper_months,
            normal_low,
            normal_high,
        }
    }

    /// All bands, youngest first.
    pub fn all() -> &'static [AgeBand] {
        &AGE_BANDS
    }

    /// Classify an age in months. See [`classify`].
    pub fn classify(age_months: f64) -> Result<AgeBand> {
        classify(age_months)
    }

    /// Human readable band name.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Exclusive upper bound, with `f64::INFINITY` for the open-ended band.
    pub fn upper_bound(&self) -> f64 {
        self.upper_months.unwrap_or(f64::INFINITY)
    }

    /// Check whether an age falls in `[lower, upper)`.
    pub fn contains(&self, age_months: f64) -> bool {
        age_months >= self.lower_months && age_months < self.upper_bound()
    }

    /// Check whether a heart rate is inside the normal range (inclusive).
    pub fn is_normal(&self, bpm: f64) -> bool {
        bpm >= self.normal_low && bpm <= self.normal_high
    }

    /// Typical resting heart rate used to center synthetic samples.
    ///
    /// Sits at 70% of the normal range, so younger bands get higher rates.
    pub fn base_rate(&self) -> f64 {
        self.normal_low + (self.normal_high - self.normal_low) * BASE_RATE_FRACTION
    }

    /// Age range for display (e.g. "6-12 months", "2+ years").
    pub fn range_label(&self) -> &'static str {
        match self.kind {
            AgeBandKind::Neonate => "0-3 months",
            AgeBandKind::EarlyInfant => "3-6 months",
            AgeBandKind::Infant => "6-12 months",
            AgeBandKind::Toddler => "1-2 years",
            AgeBandKind::YoungChild => "2+ years",
        }
    }

    /// Normal heart-rate range for display (e.g. "80-120 bpm").
    pub fn normal_range_label(&self) -> String {
        format!("{}-{} bpm", self.normal_low, self.normal_high)
    }
}

/// Map an age in months to its age band.
///
/// Fractional months are allowed. Boundaries belong to the higher band.
/// Negative and non-finite ages are rejected rather than clamped.
///
/// # Example
///
/// ```rust
/// use vitalwatch_types::{classify, AgeBandKind};
///
/// assert_eq!(classify(2.999).unwrap().kind, AgeBandKind::Neonate);
/// assert_eq!(classify(3.0).unwrap().kind, AgeBandKind::EarlyInfant);
/// assert!(classify(-1.0).is_err());
/// ```
pub fn classify(age_months: f64) -> Result<AgeBand> {
    if !age_months.is_finite() || age_months < 0.0 {
        return Err(VitalError::invalid("age_months", age_months));
    }

    AGE_BANDS
        .iter()
        .find(|band| band.contains(age_months))
        .copied()
        .ok_or(VitalError::invalid("age_months", age_months))
}

/// Format an age for compact display: "8mo" under a year, "3yr" otherwise.
pub fn format_age(age_months: f64) -> String {
    if age_months < 12.0 {
        format!("{}mo", age_months.floor() as u64)
    } else {
        format!("{}yr", (age_months / 12.0).floor() as u64)
    }
}
