//! Integration tests for greenhouse-core.
//!
//! These drive the public API the way a dashboard front-end does: a feed
//! produces batches, the controller ingests them and the view is read back.

use std::time::Duration;

use futures::StreamExt;
use greenhouse_core::{
    AppendOutcome, ControllerOptions, FeedOptions, FilterSettings, LevelThresholds, Metric,
    MetricDomain, MetricLevel, Range, Reading, SensorFeed, SortOrder, ViewController,
    clamp_settings, matches,
};
use proptest::prelude::*;

fn at_second(id: &str, second: u32) -> Reading {
    Reading::new(
        id,
        format!("2024-05-01T12:{:02}:{:02}.000Z", second / 60, second % 60),
        24.0,
        60.0,
        35.0,
    )
}

fn ids(readings: &[Reading]) -> Vec<&str> {
    readings.iter().map(|r| r.sensor_id.as_str()).collect()
}

#[test]
fn test_twenty_readings_ascending_two_pages() {
    let mut controller = ViewController::default();
    let batch: Vec<Reading> = (1..=20).map(|i| at_second(&format!("t{}", i), i)).collect();
    assert!(controller.ingest(batch).is_applied());

    controller.toggle_sort();
    let first = controller.view();
    assert_eq!(first.sort_order, SortOrder::Ascending);
    assert_eq!(first.page_count, 2);
    assert_eq!(ids(&first.page), ["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8", "t9",
        "t10", "t11", "t12", "t13", "t14", "t15"]);

    assert!(controller.set_page(2));
    assert_eq!(ids(&controller.view().page), ["t16", "t17", "t18", "t19", "t20"]);

    assert!(!controller.set_page(3));
    assert_eq!(controller.current_page(), 2);
}

#[test]
fn test_newer_batches_shown_first_by_default() {
    let mut controller = ViewController::default();
    controller.ingest(vec![at_second("old", 1)]);
    controller.ingest(vec![at_second("new", 2)]);

    let view = controller.view();
    assert_eq!(ids(&view.page), ["new", "old"]);
    assert_eq!(SortOrder::default(), SortOrder::Descending);
}

#[test]
fn test_invalid_timestamps_sort_last_through_controller() {
    let mut controller = ViewController::default();
    controller.ingest(vec![
        Reading::new("broken", "Invalid Date", 24.0, 60.0, 35.0),
        at_second("a", 2),
        at_second("b", 1),
    ]);

    assert_eq!(ids(&controller.view().page), ["a", "b", "broken"]);
    controller.toggle_sort();
    assert_eq!(ids(&controller.view().page), ["b", "a", "broken"]);
}

#[test]
fn test_malformed_batch_leaves_view_untouched() {
    let mut controller = ViewController::default();
    controller.ingest(vec![at_second("ok", 1)]);
    let before = controller.view();

    let outcome = controller.ingest(vec![
        at_second("fine", 2),
        Reading::new("", "2024-05-01T12:00:03Z", 24.0, 60.0, 35.0),
    ]);
    assert!(matches!(outcome, AppendOutcome::Malformed(_)));
    assert_eq!(controller.ingest(Vec::new()), AppendOutcome::Empty);
    assert_eq!(controller.view(), before);
}

#[test]
fn test_clamped_filter_edit_applies_to_view() {
    let mut controller = ViewController::default();
    controller.ingest(vec![
        Reading::new("cool", "2024-05-01T12:00:01Z", 15.0, 60.0, 35.0),
        Reading::new("warm", "2024-05-01T12:00:02Z", 27.0, 60.0, 35.0),
    ]);

    // A raw control value far outside the domain is pulled back in.
    let raw = FilterSettings::DEFAULT.with_range(Metric::Temperature, Range::new(25.2, 99.0));
    controller.set_filters(clamp_settings(raw));

    let view = controller.view();
    assert_eq!(view.filters.temperature, Range::new(25.0, 40.0));
    assert_eq!(ids(&view.page), ["warm"]);
    assert_eq!(MetricDomain::TEMPERATURE.format(view.filters.temperature.min), "25.0°C");
}

#[test]
fn test_levels_for_rendered_page() {
    let thresholds = LevelThresholds::default();
    let reading = Reading::new("Sensor-1", "2024-05-01T12:00:00Z", 22.0, 85.0, 120.0);
    assert_eq!(thresholds.evaluate(Metric::Temperature, reading.temperature), MetricLevel::Good);
    assert_eq!(thresholds.evaluate(Metric::Humidity, reading.humidity), MetricLevel::Moderate);
    assert_eq!(thresholds.evaluate(Metric::AirQuality, reading.air_quality), MetricLevel::Moderate);
}

#[tokio::test(start_paused = true)]
async fn test_feed_into_controller() {
    let options = FeedOptions::builder()
        .sensor_count(10)
        .interval(Duration::from_millis(2000))
        .seed(5)
        .build();
    let (handle, mut batches) = SensorFeed::channel(options).unwrap();
    let mut controller = ViewController::new(ControllerOptions::default().capacity(25)).unwrap();

    for _ in 0..3 {
        let batch = batches.next().await.unwrap();
        assert_eq!(batch.len(), 10);
        assert!(controller.ingest(batch).is_applied());
    }
    handle.cancel();

    let view = controller.view();
    assert_eq!(view.total_records, 25);
    // Generated values always fall inside the default filter ranges.
    assert_eq!(view.filtered_records, 25);
    assert_eq!(view.page_count, 2);
    assert!(view.summary.avg_temp >= 10.0 && view.summary.avg_temp <= 40.0);
    assert!(batches.next().await.is_none());
}

proptest! {
    /// A reading matches iff each metric lies inside its (inclusive) range.
    #[test]
    fn matches_is_conjunction_of_ranges(
        t in 0.0f64..50.0, h in 20.0f64..100.0, aq in 0.0f64..250.0,
        t_lo in 0.0f64..50.0, t_hi in 0.0f64..50.0,
        h_lo in 20.0f64..100.0, h_hi in 20.0f64..100.0,
        aq_lo in 0.0f64..250.0, aq_hi in 0.0f64..250.0,
    ) {
        let settings = FilterSettings {
            temperature: Range::new(t_lo, t_hi),
            humidity: Range::new(h_lo, h_hi),
            air_quality: Range::new(aq_lo, aq_hi),
        };
        let reading = Reading::new("Sensor-1", "2024-05-01T12:00:00Z", t, h, aq);
        let expected = t_lo <= t && t <= t_hi && h_lo <= h && h <= h_hi && aq_lo <= aq && aq <= aq_hi;
        prop_assert_eq!(matches(&reading, &settings), expected);
    }

    /// Boundary values always match.
    #[test]
    fn bounds_match(lo in 10.0f64..25.0, hi in 25.0f64..40.0) {
        let settings = FilterSettings::DEFAULT.with_range(Metric::Temperature, Range::new(lo, hi));
        for t in [lo, hi] {
            let reading = Reading::new("Sensor-1", "2024-05-01T12:00:00Z", t, 50.0, 10.0);
            prop_assert!(matches(&reading, &settings));
        }
    }
}
