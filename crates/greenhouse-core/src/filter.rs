//! Range filtering of readings.

use greenhouse_types::{FilterSettings, Metric, Reading};

/// Whether every metric of `reading` lies within its range in `settings`.
///
/// Bounds are inclusive on both ends. A crossed range (`min > max`) matches
/// nothing.
///
/// ```
/// use greenhouse_core::filter::matches;
/// use greenhouse_types::{FilterSettings, Reading};
///
/// let edge = Reading::new("Sensor-1", "2024-05-01T12:00:00Z", 10.0, 90.0, 200.0);
/// assert!(matches(&edge, &FilterSettings::default()));
/// ```
#[must_use]
pub fn matches(reading: &Reading, settings: &FilterSettings) -> bool {
    Metric::ALL
        .iter()
        .all(|&metric| settings.range(metric).contains(reading.value(metric)))
}

/// Readings that match `settings`, preserving input order.
pub fn filter_readings(readings: &[Reading], settings: &FilterSettings) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| matches(r, settings))
        .cloned()
        .collect()
}
