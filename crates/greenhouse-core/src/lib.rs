//! Data pipeline for a live greenhouse sensor dashboard.
//!
//! This crate turns a stream of simulated sensor batches into the view a
//! dashboard renders: a bounded store of recent readings, range filtering,
//! averages, timestamp sorting and pagination, all owned by a
//! [`ViewController`].
//!
//! # Features
//!
//! - **Bounded store**: newest-first, capped at 5000 readings by default
//! - **Filtering**: inclusive min/max ranges for temperature, humidity and air quality
//! - **Summary**: mean of each metric over the filtered readings
//! - **Sorting**: by timestamp, unparseable timestamps always last
//! - **Pagination**: 15 readings per page by default
//! - **Memoization**: derived stages recompute only when their inputs change
//! - **Simulated feed**: interval-driven tokio task with cancellation
//! - **Levels and domains**: colour bands and filter control domains per metric
//!
//! # Quick Start
//!
//! ```no_run
//! use greenhouse_core::{FeedOptions, SensorFeed, ViewController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut controller = ViewController::default();
//!     let (_feed, mut batches) = SensorFeed::channel(FeedOptions::default())?;
//!
//!     while let Ok(batch) = batches.next_batch().await {
//!         controller.ingest(batch);
//!         let view = controller.view();
//!         println!(
//!             "{} records, avg {:.1}°C, page {} of {}",
//!             view.total_records, view.summary.avg_temp, view.current_page, view.page_count
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod domains;
pub mod error;
pub mod feed;
pub mod filter;
pub mod levels;
pub mod pagination;
pub mod sort;
pub mod store;
pub mod summary;

// Re-export the data model
pub use greenhouse_types::{
    FilterSettings, Metric, ParseError, Range, Reading, SortOrder, parse_timestamp,
};

pub use controller::{ControllerOptions, DashboardView, PipelineStats, ViewController};
pub use domains::{MetricDomain, clamp_settings};
pub use error::{Error, Result};
pub use feed::{
    FeedHandle, FeedOptions, FeedOptionsBuilder, FeedStream, MAX_INTERVAL, ReadingGenerator,
    SensorFeed,
};
pub use filter::{filter_readings, matches};
pub use levels::{LevelConfig, LevelThresholds, MetricLevel};
pub use pagination::{ITEMS_PER_PAGE, page, page_count};
pub use sort::sort_by_timestamp;
pub use store::{AppendOutcome, DataStore, MAX_DATA_POINTS};
pub use summary::{Summary, summarize};
