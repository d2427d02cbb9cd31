//! Summary statistics over a set of readings.

use serde::{Deserialize, Serialize};

use greenhouse_types::Reading;

/// Mean of each metric across a reading set.
///
/// An empty set summarizes to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Mean temperature in °C.
    pub avg_temp: f64,
    /// Mean relative humidity in %.
    pub avg_humidity: f64,
    /// Mean air quality index.
    pub avg_aqi: f64,
}

/// Compute the arithmetic mean of each metric.
///
/// ```
/// use greenhouse_core::summary::{summarize, Summary};
///
/// assert_eq!(summarize(&[]), Summary::default());
/// ```
#[must_use]
pub fn summarize(readings: &[Reading]) -> Summary {
    if readings.is_empty() {
        return Summary::default();
    }

    let (temp, humidity, aqi) = readings.iter().fold((0.0, 0.0, 0.0), |acc, r| {
        (acc.0 + r.temperature, acc.1 + r.humidity, acc.2 + r.air_quality)
    });
    let n = readings.len() as f64;

    Summary {
        avg_temp: temp / n,
        avg_humidity: humidity / n,
        avg_aqi: aqi / n,
    }
}
