//! Simulated sensor feed.
//!
//! The feed emits one batch of readings per interval, one reading per
//! sensor. It runs as a background tokio task and can be consumed either
//! through a callback ([`SensorFeed::spawn`]) or as an async stream
//! ([`SensorFeed::channel`]).
//!
//! The task stops when [`FeedHandle::cancel`] is called, when the handle is
//! dropped, or when the receiving side of a channel feed goes away.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use futures::StreamExt;
//! use greenhouse_core::feed::{FeedOptions, SensorFeed};
//!
//! # async fn run() -> greenhouse_core::Result<()> {
//! let options = FeedOptions::builder()
//!     .sensor_count(5)
//!     .interval(Duration::from_millis(500))
//!     .build();
//!
//! let (handle, mut batches) = SensorFeed::channel(options)?;
//! while let Some(batch) = batches.next().await {
//!     println!("{} readings", batch.len());
//! }
//! handle.cancel();
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use greenhouse_types::{ParseResult, Reading, format_timestamp};

use crate::error::{Error, Result};

/// Default number of simulated sensors.
pub const DEFAULT_SENSOR_COUNT: usize = 50;

/// Default time between batches.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Longest accepted time between batches.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Options for a [`SensorFeed`].
///
/// ```
/// use std::time::Duration;
/// use greenhouse_core::feed::FeedOptions;
///
/// let options = FeedOptions::builder()
///     .sensor_count(3)
///     .interval(Duration::from_secs(1))
///     .seed(7)
///     .build();
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOptions {
    /// Readings per batch. Default: 50.
    pub sensor_count: usize,
    /// Time between batches. Default: 2 seconds.
    pub interval: Duration,
    /// Capacity of the channel used by [`SensorFeed::channel`].
    /// Default: 16 batches.
    pub buffer_size: usize,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            sensor_count: DEFAULT_SENSOR_COUNT,
            interval: DEFAULT_INTERVAL,
            buffer_size: 16,
            seed: None,
        }
    }
}

impl FeedOptions {
    /// Create a new builder for FeedOptions.
    pub fn builder() -> FeedOptionsBuilder {
        FeedOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    ///
    /// Checks that:
    /// - `sensor_count` is > 0
    /// - `interval` is > 0 and at most [`MAX_INTERVAL`]
    /// - `buffer_size` is > 0
    pub fn validate(&self) -> Result<()> {
        if self.sensor_count == 0 {
            return Err(Error::InvalidConfig("sensor_count must be > 0".to_string()));
        }
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig("interval must be > 0".to_string()));
        }
        if self.interval > MAX_INTERVAL {
            return Err(Error::InvalidConfig(format!(
                "interval must be at most {}ms",
                MAX_INTERVAL.as_millis()
            )));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig("buffer_size must be > 0".to_string()));
        }
        Ok(())
    }

    /// Generator configured by these options.
    pub fn generator(&self) -> ReadingGenerator {
        match self.seed {
            Some(seed) => ReadingGenerator::seeded(self.sensor_count, seed),
            None => ReadingGenerator::new(self.sensor_count),
        }
    }
}

/// Builder for FeedOptions.
#[derive(Debug, Clone, Default)]
pub struct FeedOptionsBuilder {
    options: FeedOptions,
}

impl FeedOptionsBuilder {
    /// Set the number of sensors.
    #[must_use]
    pub fn sensor_count(mut self, count: usize) -> Self {
        self.options.sensor_count = count;
        self
    }

    /// Set the interval between batches.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.options.interval = interval;
        self
    }

    /// Set the channel buffer size.
    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.options.buffer_size = size;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Build the FeedOptions.
    #[must_use]
    pub fn build(self) -> FeedOptions {
        self.options
    }
}

/// Produces batches of random readings for `Sensor-1..=Sensor-N`.
#[derive(Debug, Clone)]
pub struct ReadingGenerator {
    rng: StdRng,
    sensor_count: usize,
}

impl ReadingGenerator {
    /// Generator seeded from the operating system.
    pub fn new(sensor_count: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            sensor_count,
        }
    }

    /// Deterministic generator.
    pub fn seeded(sensor_count: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sensor_count,
        }
    }

    /// Number of readings per batch.
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// A batch stamped with the current UTC time.
    pub fn batch(&mut self) -> ParseResult<Vec<Reading>> {
        self.batch_at(OffsetDateTime::now_utc())
    }

    /// A batch with every reading stamped `at`.
    ///
    /// Temperature is drawn from `[10, 40)`, humidity from `[30, 90)` and
    /// air quality from `[0, 200)`, each rounded to two decimals.
    pub fn batch_at(&mut self, at: OffsetDateTime) -> ParseResult<Vec<Reading>> {
        let timestamp = format_timestamp(at)?;
        let batch = (1..=self.sensor_count)
            .map(|i| {
                Reading::new(
                    format!("Sensor-{}", i),
                    timestamp.clone(),
                    round2(self.rng.random_range(10.0..40.0)),
                    round2(self.rng.random_range(30.0..90.0)),
                    round2(self.rng.random_range(0.0..200.0)),
                )
            })
            .collect();
        Ok(batch)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Where the feed task delivers batches.
enum Sink {
    Callback(Box<dyn FnMut(Vec<Reading>) + Send>),
    Channel(mpsc::Sender<Vec<Reading>>),
}

impl Sink {
    /// Deliver one batch. Returns `false` once nobody is listening or the
    /// feed is cancelled while waiting for channel capacity.
    async fn deliver(&mut self, batch: Vec<Reading>, cancel: &CancellationToken) -> bool {
        match self {
            Sink::Callback(on_update) => {
                on_update(batch);
                true
            }
            Sink::Channel(tx) => tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                sent = tx.send(batch) => sent.is_ok(),
            },
        }
    }
}

/// Entry points for starting a simulated feed.
pub struct SensorFeed;

impl SensorFeed {
    /// Start a feed that calls `on_update` with every batch.
    ///
    /// The first batch is delivered one full interval after the call.
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(options: FeedOptions, on_update: F) -> Result<FeedHandle>
    where
        F: FnMut(Vec<Reading>) + Send + 'static,
    {
        options.validate()?;
        Ok(Self::start(options, Sink::Callback(Box::new(on_update))))
    }

    /// Start a feed whose batches are read from a [`FeedStream`].
    ///
    /// At most `buffer_size` batches are queued. When the stream is dropped
    /// the task stops on its next delivery.
    pub fn channel(options: FeedOptions) -> Result<(FeedHandle, FeedStream)> {
        options.validate()?;
        let (tx, rx) = mpsc::channel(options.buffer_size);
        let handle = Self::start(options, Sink::Channel(tx));
        Ok((handle, FeedStream { receiver: rx }))
    }

    fn start(options: FeedOptions, mut sink: Sink) -> FeedHandle {
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();
        let mut generator = options.generator();
        let period = options.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(
                sensors = generator.sensor_count(),
                interval_ms = period.as_millis() as u64,
                "Feed started"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => {
                        debug!("Feed cancelled, stopping gracefully");
                        break;
                    }
                    _ = ticker.tick() => {
                        let batch = match generator.batch() {
                            Ok(batch) => batch,
                            Err(e) => {
                                warn!("Skipping feed tick: {}", e);
                                continue;
                            }
                        };
                        if !sink.deliver(batch, &task_token).await {
                            debug!("Feed receiver gone or cancelled, stopping");
                            break;
                        }
                    }
                }
            }
        });

        FeedHandle {
            handle,
            cancel_token,
        }
    }
}

/// Handle to a running feed.
///
/// Dropping the handle cancels the feed.
pub struct FeedHandle {
    handle: tokio::task::JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl FeedHandle {
    /// Stop all future ticks. Calling this more than once has no effect.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Get a cancellation token that can be used to cancel the feed externally.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Check if the feed task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Check if the feed has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Batches from a channel feed.
pub struct FeedStream {
    receiver: mpsc::Receiver<Vec<Reading>>,
}

impl FeedStream {
    /// Wait for the next batch.
    ///
    /// Returns [`Error::Cancelled`] once the feed has stopped and every
    /// queued batch has been taken.
    pub async fn next_batch(&mut self) -> Result<Vec<Reading>> {
        self.receiver.recv().await.ok_or(Error::Cancelled)
    }
}

impl Stream for FeedStream {
    type Item = Vec<Reading>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
