//! Editable domain of each filter control.
//!
//! Filter edits arrive from presentation as raw numbers. Each metric has a
//! fixed domain and step; [`MetricDomain::clamp`] pulls a value into the
//! domain and snaps it to the step grid before it becomes part of a
//! [`FilterSettings`].

use greenhouse_types::{FilterSettings, Metric, Range};

/// Domain of one metric's range control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDomain {
    /// Smallest selectable value.
    pub min: f64,
    /// Largest selectable value.
    pub max: f64,
    /// Step between selectable values, counted from `min`.
    pub step: f64,
    /// Unit suffix for display.
    pub unit: &'static str,
}

impl MetricDomain {
    /// Temperature: 10–40 °C in 0.5 steps.
    pub const TEMPERATURE: MetricDomain = MetricDomain {
        min: 10.0,
        max: 40.0,
        step: 0.5,
        unit: "°C",
    };

    /// Humidity: 30–90 % in 1 steps.
    pub const HUMIDITY: MetricDomain = MetricDomain {
        min: 30.0,
        max: 90.0,
        step: 1.0,
        unit: "%",
    };

    /// Air quality: 0–200 in steps of 5.
    pub const AIR_QUALITY: MetricDomain = MetricDomain {
        min: 0.0,
        max: 200.0,
        step: 5.0,
        unit: " AQI",
    };

    /// Domain for the given metric.
    #[must_use]
    pub fn of(metric: Metric) -> MetricDomain {
        match metric {
            Metric::Temperature => Self::TEMPERATURE,
            Metric::Humidity => Self::HUMIDITY,
            Metric::AirQuality => Self::AIR_QUALITY,
        }
    }

    /// The full domain as a range.
    #[must_use]
    pub fn full_range(&self) -> Range {
        Range::new(self.min, self.max)
    }

    /// Clamp `value` into the domain and snap it to the nearest step.
    ///
    /// Non-finite input is treated as the domain minimum.
    ///
    /// ```
    /// use greenhouse_core::domains::MetricDomain;
    ///
    /// assert_eq!(MetricDomain::TEMPERATURE.clamp(22.3), 22.5);
    /// assert_eq!(MetricDomain::AIR_QUALITY.clamp(512.0), 200.0);
    /// ```
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let bounded = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return bounded;
        }
        let steps = ((bounded - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Clamp both ends of a range. Crossed ranges stay crossed.
    #[must_use]
    pub fn clamp_range(&self, range: Range) -> Range {
        Range::new(self.clamp(range.min), self.clamp(range.max))
    }

    /// Format a value with one decimal and the unit, as shown on the control.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{:.1}{}", value, self.unit)
    }
}

/// Clamp every range of `settings` into its metric's domain.
#[must_use]
pub fn clamp_settings(settings: FilterSettings) -> FilterSettings {
    Metric::ALL.iter().fold(settings, |acc, &metric| {
        let range = MetricDomain::of(metric).clamp_range(acc.range(metric));
        acc.with_range(metric, range)
    })
}
