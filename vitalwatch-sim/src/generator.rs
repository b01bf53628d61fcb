//! Synthetic heart-rate series and vital-sign readings.

use rand::Rng;
use vitalwatch_types::{
    classify, current_timestamp_ms, evaluate, AgeBand, HealthReading, RangeDeviation,
    SeriesPoint, Trend, VitalError, VitalKind, VitalMetric, HOURS_PER_DAY,
};

/// Points in a default series: one per hour of a day.
pub const DEFAULT_POINTS: usize = HOURS_PER_DAY;

/// Maximum deviation from the base rate, in bpm.
const HEART_RATE_JITTER: f64 = 10.0;

const HOUR_MS: u64 = 60 * 60 * 1000;

/// Generate an hourly heart-rate series for a child of the given age.
///
/// Values are drawn around the band's base rate and clamped into its normal
/// range. Labels run "00:00" upwards. The last point is stamped with the
/// current time and earlier points one hour apart.
///
/// # Errors
///
/// Returns `InvalidArgument` for an age that cannot be classified or for
/// more than [`DEFAULT_POINTS`] points.
///
/// # Example
///
/// ```rust
/// use vitalwatch_sim::{generate_series, DEFAULT_POINTS};
///
/// let series = generate_series(8.0, DEFAULT_POINTS).unwrap();
/// assert_eq!(series.len(), 24);
/// assert!(series.iter().all(|p| (80.0..=120.0).contains(&p.value)));
/// ```
pub fn generate_series(age_months: f64, points: usize) -> Result<Vec<SeriesPoint>, VitalError> {
    generate_series_with(&mut rand::rng(), age_months, points)
}

/// Same as [`generate_series`], drawing from the caller's RNG.
pub fn generate_series_with<R: Rng>(
    rng: &mut R,
    age_months: f64,
    points: usize,
) -> Result<Vec<SeriesPoint>, VitalError> {
    let band = classify(age_months)?;
    if points > DEFAULT_POINTS {
        return Err(VitalError::InvalidArgument {
            name: "points",
            value: points as f64,
        });
    }

    let now = current_timestamp_ms();
    let series = (0..points)
        .map(|hour| {
            let raw = (band.base_rate() + jitter(rng)).round();
            let hours_ago = (points - 1 - hour) as u64;
            let timestamp_ms = now.saturating_sub(hours_ago * HOUR_MS);
            clamped_point(&band, hour, raw, timestamp_ms)
        })
        .collect();
    Ok(series)
}

/// Build a series point from a raw sample, clamping it into the normal range
/// and remembering where it fell.
pub(crate) fn clamped_point(
    band: &AgeBand,
    hour: usize,
    raw: f64,
    timestamp_ms: u64,
) -> SeriesPoint {
    let value = raw.clamp(band.normal_low, band.normal_high);
    SeriesPoint::new(hour, value, timestamp_ms).with_deviation(RangeDeviation::of(raw, band))
}

/// Draw one synthetic reading of all four vital signs.
///
/// - heart rate: 130, 115 or 105 bpm (under 1 year, under 2 years, older)
///   ± 10, status evaluated against the band. These centers sit near or
///   above the top of most normal ranges, so readings regularly warn.
/// - SpO2: 96-99 %
/// - sleep: 16, 14 or 12 hours (under 1 year, under 2 years, older) ± 1
/// - activity: 60-100 %, trending up or down at random
pub fn sample_reading<R: Rng>(
    age_months: f64,
    rng: &mut R,
) -> Result<HealthReading, VitalError> {
    let band = classify(age_months)?;

    let variation = jitter(rng);
    let bpm = (reading_center(age_months) + variation).round();
    let heart_rate = VitalMetric::builder()
        .value(bpm)
        .unit(VitalKind::HeartRate.unit())
        .status(evaluate(bpm, &band)?)
        .trend(Trend::from_delta(variation))
        .build();

    let spo2 = VitalMetric::new(
        (96.0 + rng.random_range(0.0..3.0_f64)).round(),
        VitalKind::SpO2.unit(),
    );

    let base_sleep = if age_months < 12.0 {
        16.0
    } else if age_months < 24.0 {
        14.0
    } else {
        12.0
    };
    let sleep_hours = VitalMetric::new(
        (base_sleep + rng.random_range(-1.0..1.0_f64)).round(),
        VitalKind::Sleep.unit(),
    );

    let activity_trend = if rng.random_bool(0.5) {
        Trend::Up
    } else {
        Trend::Down
    };
    let activity_level = VitalMetric::builder()
        .value((60.0 + rng.random_range(0.0..40.0_f64)).round())
        .unit(VitalKind::Activity.unit())
        .trend(activity_trend)
        .build();

    Ok(HealthReading {
        heart_rate,
        spo2,
        sleep_hours,
        activity_level,
    })
}

/// Heart rate a sampled reading is drawn around.
fn reading_center(age_months: f64) -> f64 {
    if age_months < 12.0 {
        130.0
    } else if age_months < 24.0 {
        115.0
    } else {
        105.0
    }
}

fn jitter<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(-HEART_RATE_JITTER..=HEART_RATE_JITTER)
}
