//! Metric levels for colour-coding readings.
//!
//! Each metric value is placed in one of four bands. Temperature and
//! humidity have a comfortable "good" window with a wider "warning" window
//! around it; air quality index grows worse monotonically.
//!
//! # Example
//!
//! ```
//! use greenhouse_core::levels::{LevelThresholds, MetricLevel};
//! use greenhouse_types::Metric;
//!
//! let thresholds = LevelThresholds::default();
//! assert_eq!(thresholds.evaluate(Metric::Temperature, 22.0), MetricLevel::Good);
//! assert_eq!(thresholds.evaluate(Metric::AirQuality, 175.0), MetricLevel::Critical);
//! ```

use serde::{Deserialize, Serialize};

use greenhouse_types::{Metric, Range, Reading};

/// Severity band for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricLevel {
    /// Within the comfortable band.
    Good,
    /// Outside the comfortable band but tolerable.
    Warning,
    /// Noticeably off.
    Moderate,
    /// Unhealthy (air quality only).
    Critical,
}

/// Comfort window for a two-sided metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortBands {
    /// Values inside are [`MetricLevel::Good`].
    pub good: Range,
    /// Values inside (but outside `good`) are [`MetricLevel::Warning`].
    pub warning: Range,
}

/// Upper bounds for the air quality bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiBands {
    /// Upper bound for Good.
    pub good_max: f64,
    /// Upper bound for Warning.
    pub warning_max: f64,
    /// Upper bound for Moderate. Above is Critical.
    pub moderate_max: f64,
}

/// Configuration for metric bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Temperature bands in °C.
    pub temperature: ComfortBands,
    /// Humidity bands in %.
    pub humidity: ComfortBands,
    /// Air quality bands.
    pub air_quality: AqiBands,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            temperature: ComfortBands {
                good: Range::new(20.0, 26.0),
                warning: Range::new(18.0, 30.0),
            },
            humidity: ComfortBands {
                good: Range::new(50.0, 70.0),
                warning: Range::new(40.0, 80.0),
            },
            air_quality: AqiBands {
                good_max: 50.0,
                warning_max: 100.0,
                moderate_max: 150.0,
            },
        }
    }
}

/// Level evaluator for readings.
#[derive(Debug, Clone, Default)]
pub struct LevelThresholds {
    config: LevelConfig,
}

impl LevelThresholds {
    /// Create an evaluator with the given configuration.
    pub fn new(config: LevelConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Level of a single metric value.
    pub fn evaluate(&self, metric: Metric, value: f64) -> MetricLevel {
        match metric {
            Metric::Temperature => Self::evaluate_comfort(&self.config.temperature, value),
            Metric::Humidity => Self::evaluate_comfort(&self.config.humidity, value),
            Metric::AirQuality => {
                let bands = &self.config.air_quality;
                if value <= bands.good_max {
                    MetricLevel::Good
                } else if value <= bands.warning_max {
                    MetricLevel::Warning
                } else if value <= bands.moderate_max {
                    MetricLevel::Moderate
                } else {
                    MetricLevel::Critical
                }
            }
        }
    }

    /// Worst level across all metrics of a reading.
    pub fn evaluate_reading(&self, reading: &Reading) -> MetricLevel {
        Metric::ALL
            .iter()
            .map(|&m| self.evaluate(m, reading.value(m)))
            .max()
            .unwrap_or(MetricLevel::Good)
    }

    fn evaluate_comfort(bands: &ComfortBands, value: f64) -> MetricLevel {
        if bands.good.contains(value) {
            MetricLevel::Good
        } else if bands.warning.contains(value) {
            MetricLevel::Warning
        } else {
            MetricLevel::Moderate
        }
    }
}
