//! Platform-agnostic types for simulated greenhouse sensor readings.
//!
//! This crate provides the shared data model used by the pipeline in
//! `greenhouse-core` and by presentation front-ends.
//!
//! # Features
//!
//! - [`Reading`]: one timestamped measurement (temperature, humidity, air quality)
//! - [`Range`] and [`FilterSettings`]: inclusive per-metric bounds
//! - [`SortOrder`]: timestamp sort direction
//! - Timestamp parsing and formatting helpers
//!
//! # Example
//!
//! ```
//! use greenhouse_types::{FilterSettings, Metric, Range, Reading};
//!
//! let filters = FilterSettings::default().with_range(Metric::Humidity, Range::new(40.0, 60.0));
//! let reading = Reading::new("Sensor-3", "2024-05-01T12:00:00.000Z", 21.0, 45.0, 30.0);
//! assert!(filters.range(Metric::Humidity).contains(reading.humidity));
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    FilterSettings, Metric, Range, Reading, SortOrder, format_timestamp, parse_timestamp,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> Reading {
        Reading::new("Sensor-1", "2024-05-01T12:00:00.000Z", 22.5, 55.0, 42.0)
    }

    // --- Reading tests ---

    #[test]
    fn test_reading_value_by_metric() {
        let r = reading();
        assert!((r.value(Metric::Temperature) - 22.5).abs() < f64::EPSILON);
        assert!((r.value(Metric::Humidity) - 55.0).abs() < f64::EPSILON);
        assert!((r.value(Metric::AirQuality) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reading_parsed_timestamp() {
        let ts = reading().parsed_timestamp().unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn test_reading_invalid_timestamp() {
        let r = Reading::new("Sensor-1", "not a date", 20.0, 50.0, 10.0);
        let err = r.parsed_timestamp().unwrap_err();
        assert!(matches!(err, ParseError::InvalidTimestamp { .. }));
        assert!(err.to_string().contains("not a date"));
    }

    #[test]
    fn test_parse_timestamp_reduced_forms() {
        let no_seconds = parse_timestamp("2024-05-01T12:00Z").unwrap();
        assert_eq!((no_seconds.hour(), no_seconds.minute(), no_seconds.second()), (12, 0, 0));

        let local = parse_timestamp("2024-05-01T08:15:30").unwrap();
        assert_eq!(local.offset(), time::UtcOffset::UTC);
        assert_eq!(local.hour(), 8);

        let date_only = parse_timestamp("2024-04-30").unwrap();
        assert_eq!(date_only.day(), 30);
        assert_eq!(date_only.hour(), 0);
        assert_eq!(date_only.offset(), time::UtcOffset::UTC);

        assert!(parse_timestamp("Invalid Date").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_reading_validate_ok() {
        assert!(reading().validate().is_ok());
    }

    #[test]
    fn test_reading_validate_empty_sensor_id() {
        let r = Reading::new("  ", "2024-05-01T12:00:00.000Z", 20.0, 50.0, 10.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_reading_validate_non_finite() {
        let r = Reading::new("Sensor-1", "2024-05-01T12:00:00.000Z", f64::NAN, 50.0, 10.0);
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("Temperature"));

        let r = Reading::new("Sensor-1", "x", 20.0, 50.0, f64::INFINITY);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_reading_validate_ignores_timestamp() {
        let r = Reading::new("Sensor-1", "garbage", 20.0, 50.0, 10.0);
        assert!(r.validate().is_ok());
    }

    // --- Timestamp helpers ---

    #[test]
    fn test_format_timestamp_millisecond_precision() {
        let instant = time::macros::datetime!(2024-05-01 12:00:00.123456789 UTC);
        let text = format_timestamp(instant).unwrap();
        assert_eq!(text, "2024-05-01T12:00:00.123Z");
    }

    #[test]
    fn test_format_timestamp_converts_to_utc() {
        let instant = time::macros::datetime!(2024-05-01 14:00:00 +02:00);
        let text = format_timestamp(instant).unwrap();
        assert_eq!(text, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_format_then_parse_preserves_instant() {
        let instant = time::macros::datetime!(2024-05-01 12:00:00.250 UTC);
        let parsed = parse_timestamp(&format_timestamp(instant).unwrap()).unwrap();
        assert_eq!(parsed, instant);
    }

    // --- Range tests ---

    #[test]
    fn test_range_inclusive_bounds() {
        let range = Range::new(10.0, 40.0);
        assert!(range.contains(10.0));
        assert!(range.contains(40.0));
        assert!(range.contains(25.0));
        assert!(!range.contains(9.99));
        assert!(!range.contains(40.01));
    }

    #[test]
    fn test_range_crossed_matches_nothing() {
        let range = Range::new(50.0, 20.0);
        assert!(range.is_crossed());
        assert!(!range.contains(20.0));
        assert!(!range.contains(35.0));
        assert!(!range.contains(50.0));
    }

    #[test]
    fn test_range_nan_never_contained() {
        assert!(!Range::new(0.0, 100.0).contains(f64::NAN));
    }

    // --- FilterSettings tests ---

    #[test]
    fn test_filter_settings_defaults() {
        let f = FilterSettings::default();
        assert_eq!(f.temperature, Range::new(10.0, 40.0));
        assert_eq!(f.humidity, Range::new(30.0, 90.0));
        assert_eq!(f.air_quality, Range::new(0.0, 200.0));
    }

    #[test]
    fn test_filter_settings_with_range_replaces_one_metric() {
        let f = FilterSettings::default().with_range(Metric::AirQuality, Range::new(0.0, 50.0));
        assert_eq!(f.air_quality, Range::new(0.0, 50.0));
        assert_eq!(f.temperature, FilterSettings::DEFAULT.temperature);
        assert_eq!(f.humidity, FilterSettings::DEFAULT.humidity);
    }

    // --- SortOrder tests ---

    #[test]
    fn test_sort_order_default_is_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }

    #[test]
    fn test_sort_order_labels() {
        assert_eq!(SortOrder::Descending.to_string(), "Newest First");
        assert_eq!(SortOrder::Ascending.to_string(), "Oldest First");
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::AirQuality.to_string(), "Air Quality");
        assert_eq!(Metric::ALL.len(), 3);
    }

    // --- Serialization tests ---

    #[cfg(feature = "serde")]
    #[test]
    fn test_reading_serialization_uses_camel_case() {
        let json = serde_json::to_string(&reading()).unwrap();
        assert!(json.contains("\"sensorId\":\"Sensor-1\""));
        assert!(json.contains("\"airQuality\":42.0"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_reading_deserialization() {
        let json = r#"{"sensorId":"Sensor-9","timestamp":"2024-05-01T12:00:00.000Z","temperature":21.5,"humidity":60.25,"airQuality":120}"#;
        let r: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(r.sensor_id, "Sensor-9");
        assert!((r.air_quality - 120.0).abs() < f64::EPSILON);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sort_order_serialization() {
        assert_eq!(serde_json::to_string(&SortOrder::Ascending).unwrap(), "\"ascending\"");
        assert_eq!(serde_json::to_string(&SortOrder::Descending).unwrap(), "\"descending\"");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_filter_settings_serialization() {
        let json = serde_json::to_string(&FilterSettings::default()).unwrap();
        assert!(json.contains("\"airQuality\":{\"min\":0.0,\"max\":200.0}"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_filter_settings_missing_fields_use_defaults() {
        let settings: FilterSettings =
            serde_json::from_str(r#"{"humidity":{"min":40.0,"max":60.0}}"#).unwrap();
        assert_eq!(settings.humidity, Range::new(40.0, 60.0));
        assert_eq!(settings.temperature, FilterSettings::DEFAULT.temperature);
        assert_eq!(settings.air_quality, FilterSettings::DEFAULT.air_quality);
    }
}
