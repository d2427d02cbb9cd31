//! Bounded in-memory store of sensor readings.
//!
//! The store keeps readings newest-first and never grows beyond its capacity.
//! Each accepted batch is placed at the front and the oldest readings fall
//! off the tail, so after every append the contents equal
//! `(batch ++ previous)[..capacity]`.
//!
//! Bad input never interrupts the live-update loop: empty and malformed
//! batches are logged at `warn` level and discarded as a whole.
//!
//! # Example
//!
//! ```
//! use greenhouse_core::store::{AppendOutcome, DataStore};
//! use greenhouse_types::Reading;
//!
//! let mut store = DataStore::new(2);
//! store.append(vec![Reading::new("Sensor-1", "2024-05-01T12:00:00Z", 20.0, 50.0, 10.0)]);
//! let outcome = store.append(vec![
//!     Reading::new("Sensor-1", "2024-05-01T12:00:02Z", 21.0, 51.0, 11.0),
//!     Reading::new("Sensor-2", "2024-05-01T12:00:02Z", 22.0, 52.0, 12.0),
//! ]);
//!
//! assert_eq!(outcome, AppendOutcome::Appended { added: 2, evicted: 1 });
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.readings()[0].temperature, 21.0);
//! ```

use tracing::{debug, warn};

use greenhouse_types::Reading;

use crate::error::Result;

/// Default maximum number of readings kept in memory.
pub const MAX_DATA_POINTS: usize = 5000;

/// What happened to a batch handed to [`DataStore::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The batch was stored.
    Appended {
        /// Number of readings in the batch.
        added: usize,
        /// Number of readings dropped to respect the capacity.
        evicted: usize,
    },
    /// The batch was empty and was ignored.
    Empty,
    /// The batch was rejected without touching the store.
    Malformed(String),
}

impl AppendOutcome {
    /// Whether the store changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, AppendOutcome::Appended { .. })
    }
}

/// Decode a raw JSON batch.
///
/// The text must be a JSON array of readings using the camelCase wire names
/// (`sensorId`, `timestamp`, `temperature`, `humidity`, `airQuality`).
pub fn decode_batch(text: &str) -> Result<Vec<Reading>> {
    Ok(serde_json::from_str(text)?)
}

/// Capped newest-first sequence of readings.
#[derive(Debug, Clone)]
pub struct DataStore {
    readings: Vec<Reading>,
    capacity: usize,
    generation: u64,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new(MAX_DATA_POINTS)
    }
}

impl DataStore {
    /// Create an empty store holding at most `capacity` readings.
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: Vec::with_capacity(capacity.min(MAX_DATA_POINTS)),
            capacity,
            generation: 0,
        }
    }

    /// Prepend a batch, evicting the oldest readings beyond capacity.
    ///
    /// Empty batches and batches containing an invalid reading (empty sensor
    /// id or non-finite metric) are discarded with a warning.
    pub fn append(&mut self, batch: Vec<Reading>) -> AppendOutcome {
        if batch.is_empty() {
            warn!("Received invalid or empty update from feed, ignoring");
            return AppendOutcome::Empty;
        }

        if let Some(err) = batch.iter().find_map(|r| r.validate().err()) {
            warn!("Discarding malformed batch of {} readings: {}", batch.len(), err);
            return AppendOutcome::Malformed(err.to_string());
        }

        let added = batch.len();
        let previous = self.readings.len();

        self.readings.splice(0..0, batch);
        self.readings.truncate(self.capacity);
        self.generation += 1;

        let evicted = previous + added - self.readings.len();
        debug!(
            added,
            evicted,
            len = self.readings.len(),
            generation = self.generation,
            "Appended batch to store"
        );

        AppendOutcome::Appended { added, evicted }
    }

    /// Decode a raw JSON batch and append it.
    ///
    /// Text that is not a JSON array of readings is logged and discarded.
    pub fn append_json(&mut self, text: &str) -> AppendOutcome {
        match decode_batch(text) {
            Ok(batch) => self.append(batch),
            Err(err) => {
                warn!("Discarding undecodable batch: {}", err);
                AppendOutcome::Malformed(err.to_string())
            }
        }
    }

    /// Stored readings, newest first.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the store holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Maximum number of readings kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counter bumped on every applied append.
    ///
    /// Derived views compare generations to decide whether a cached result
    /// is still current.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
