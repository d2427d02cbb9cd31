//! Timestamp ordering of readings.
//!
//! Timestamps are parsed once per reading before sorting. A reading whose
//! timestamp does not parse sorts after every valid reading in both
//! directions. Among equal timestamps the order is unspecified.

use std::cmp::Ordering;

use time::OffsetDateTime;

use greenhouse_types::{Reading, SortOrder};

/// Compare two parsed timestamps for the given direction.
///
/// `None` (unparseable) is greater than any valid instant regardless of
/// `order`, so invalid entries always end up last.
pub fn compare_timestamps(
    a: Option<OffsetDateTime>,
    b: Option<OffsetDateTime>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
    }
}

/// Return a new sequence ordered by timestamp. The input is not modified.
///
/// ```
/// use greenhouse_core::sort::sort_by_timestamp;
/// use greenhouse_types::{Reading, SortOrder};
///
/// let readings = vec![
///     Reading::new("a", "2024-05-01T12:00:02Z", 20.0, 50.0, 10.0),
///     Reading::new("b", "2024-05-01T12:00:01Z", 20.0, 50.0, 10.0),
///     Reading::new("c", "not-a-time", 20.0, 50.0, 10.0),
/// ];
/// let sorted = sort_by_timestamp(&readings, SortOrder::Ascending);
/// let ids: Vec<_> = sorted.iter().map(|r| r.sensor_id.as_str()).collect();
/// assert_eq!(ids, ["b", "a", "c"]);
/// ```
pub fn sort_by_timestamp(readings: &[Reading], order: SortOrder) -> Vec<Reading> {
    let mut keyed: Vec<(Option<OffsetDateTime>, &Reading)> = readings
        .iter()
        .map(|r| (r.parsed_timestamp().ok(), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_timestamps(*a, *b, order));

    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}
