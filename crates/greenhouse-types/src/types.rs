//! Core types for greenhouse sensor data.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{ParseError, ParseResult};

/// One of the three measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Metric {
    /// Air temperature in °C.
    Temperature,
    /// Relative humidity in %.
    Humidity,
    /// Air quality index (unitless).
    AirQuality,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::AirQuality];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::AirQuality => "Air Quality",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped measurement from one sensor.
///
/// Readings are immutable once produced by the feed. The timestamp is kept
/// as the original ISO-8601 string so that unparseable stamps survive
/// ingestion and can be ordered last by the sorter instead of being dropped.
///
/// # Example
///
/// ```
/// use greenhouse_types::Reading;
///
/// let reading = Reading::new("Sensor-1", "2024-05-01T12:00:00.000Z", 22.5, 55.0, 42.0);
/// assert!(reading.parsed_timestamp().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Reading {
    /// Sensor identifier, e.g. `Sensor-7`.
    pub sensor_id: String,
    /// ISO-8601 timestamp as produced by the source.
    pub timestamp: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Air quality index.
    pub air_quality: f64,
}

impl Reading {
    /// Create a reading from its parts.
    pub fn new(
        sensor_id: impl Into<String>,
        timestamp: impl Into<String>,
        temperature: f64,
        humidity: f64,
        air_quality: f64,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            timestamp: timestamp.into(),
            temperature,
            humidity,
            air_quality,
        }
    }

    /// Value of the given metric.
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::AirQuality => self.air_quality,
        }
    }

    /// Parse the timestamp into an instant.
    pub fn parsed_timestamp(&self) -> ParseResult<OffsetDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Check that the reading can be stored and aggregated.
    ///
    /// The sensor id must be non-empty and every metric must be finite.
    /// The timestamp is deliberately not checked here.
    pub fn validate(&self) -> ParseResult<()> {
        if self.sensor_id.trim().is_empty() {
            return Err(ParseError::InvalidData("empty sensor id".to_string()));
        }
        for metric in Metric::ALL {
            let value = self.value(metric);
            if !value.is_finite() {
                return Err(ParseError::InvalidData(format!(
                    "{} of {} is not finite ({})",
                    metric, self.sensor_id, value
                )));
            }
        }
        Ok(())
    }
}

/// Parse an RFC 3339 / ISO-8601 timestamp.
///
/// Besides full RFC 3339 this accepts the reduced ISO-8601 forms, such as
/// `2024-05-01T12:00Z`. A value without an offset is taken as UTC, and a
/// bare date as UTC midnight.
///
/// ```
/// use greenhouse_types::parse_timestamp;
///
/// assert!(parse_timestamp("2024-05-01T12:00:00.250Z").is_ok());
/// assert!(parse_timestamp("2024-05-01T12:00Z").is_ok());
/// assert!(parse_timestamp("2024-04-30").is_ok());
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> ParseResult<OffsetDateTime> {
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(instant);
    }
    if let Ok(instant) = OffsetDateTime::parse(value, &Iso8601::DEFAULT) {
        return Ok(instant);
    }
    if let Ok(local) = PrimitiveDateTime::parse(value, &Iso8601::DEFAULT) {
        return Ok(local.assume_utc());
    }
    Date::parse(value, &Iso8601::DEFAULT)
        .map(|date| date.midnight().assume_utc())
        .map_err(|e| ParseError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Format an instant as a UTC ISO-8601 string with millisecond precision,
/// e.g. `2024-05-01T12:00:00.000Z`. Sub-millisecond digits are truncated.
pub fn format_timestamp(instant: OffsetDateTime) -> ParseResult<String> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .map_err(|e| ParseError::InvalidData(e.to_string()))
}

/// Inclusive `[min, max]` bound on one metric.
///
/// A crossed range (`min > max`) is accepted and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl Range {
    /// Create a new range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the bounds, inclusive on both ends.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether the bounds are crossed.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        self.min > self.max
    }
}

/// Per-metric range constraints applied to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FilterSettings {
    /// Temperature bounds in °C.
    pub temperature: Range,
    /// Humidity bounds in %.
    pub humidity: Range,
    /// Air quality bounds.
    pub air_quality: Range,
}

impl FilterSettings {
    /// The initial filter set: temperature 10–40, humidity 30–90, air quality 0–200.
    pub const DEFAULT: FilterSettings = FilterSettings {
        temperature: Range::new(10.0, 40.0),
        humidity: Range::new(30.0, 90.0),
        air_quality: Range::new(0.0, 200.0),
    };

    /// Range for the given metric.
    #[must_use]
    pub fn range(&self, metric: Metric) -> Range {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::AirQuality => self.air_quality,
        }
    }

    /// Return a copy with one metric's range replaced.
    #[must_use]
    pub fn with_range(mut self, metric: Metric, range: Range) -> Self {
        match metric {
            Metric::Temperature => self.temperature = range,
            Metric::Humidity => self.humidity = range,
            Metric::AirQuality => self.air_quality = range,
        }
        self
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Timestamp sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Label shown on the sort control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Oldest First",
            SortOrder::Descending => "Newest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
