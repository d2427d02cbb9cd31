//! View controller owning the dashboard state and its derived views.
//!
//! The controller holds the [`DataStore`], the current [`FilterSettings`],
//! the [`SortOrder`] and the current page. Presentation talks to it through
//! four operations (filter replacement, sort toggle, reset, page change)
//! and reads a [`DashboardView`] snapshot back.
//!
//! Derived data is memoized per stage:
//!
//! | Stage | Contents | Recomputed when |
//! |-------|----------|-----------------|
//! | filter | matching readings + [`Summary`] | store generation or filters change |
//! | sort | filtered readings in display order | filter stage or sort order changes |
//! | page | slice of the sorted stage | every call (slicing is free) |
//!
//! # Example
//!
//! ```
//! use greenhouse_core::controller::ViewController;
//! use greenhouse_types::Reading;
//!
//! let mut controller = ViewController::default();
//! controller.ingest(vec![Reading::new("Sensor-1", "2024-05-01T12:00:00Z", 22.0, 55.0, 40.0)]);
//!
//! let view = controller.view();
//! assert_eq!(view.total_records, 1);
//! assert_eq!(view.page_count, 1);
//! assert_eq!(view.page.len(), 1);
//! ```

use serde::Serialize;
use tracing::debug;

use greenhouse_types::{FilterSettings, Metric, Range, Reading, SortOrder};

use crate::error::{Error, Result};
use crate::filter::filter_readings;
use crate::pagination::{ITEMS_PER_PAGE, page, page_count};
use crate::sort::sort_by_timestamp;
use crate::store::{AppendOutcome, DataStore, MAX_DATA_POINTS};
use crate::summary::{Summary, summarize};

/// Options for a [`ViewController`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Store capacity. Default: 5000.
    pub capacity: usize,
    /// Readings per page. Default: 15.
    pub page_size: usize,
    /// Filters in effect at start. Reset always restores
    /// [`FilterSettings::DEFAULT`], not these.
    pub initial_filters: FilterSettings,
    /// Sort order at start. Default: newest first.
    pub initial_order: SortOrder,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            capacity: MAX_DATA_POINTS,
            page_size: ITEMS_PER_PAGE,
            initial_filters: FilterSettings::DEFAULT,
            initial_order: SortOrder::Descending,
        }
    }
}

impl ControllerOptions {
    /// Set the store capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the initial filters.
    #[must_use]
    pub fn initial_filters(mut self, filters: FilterSettings) -> Self {
        self.initial_filters = filters;
        self
    }

    /// Set the initial sort order.
    #[must_use]
    pub fn initial_order(mut self, order: SortOrder) -> Self {
        self.initial_order = order;
        self
    }

    /// Validate the options.
    ///
    /// Checks that:
    /// - `capacity` is > 0
    /// - `page_size` is > 0
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be > 0".to_string()));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("page_size must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Everything presentation needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Number of readings in the store (before filtering).
    pub total_records: usize,
    /// Number of readings matching the filters.
    pub filtered_records: usize,
    /// Current filter settings.
    pub filters: FilterSettings,
    /// Current sort order.
    pub sort_order: SortOrder,
    /// Averages over the filtered readings.
    pub summary: Summary,
    /// Readings on the current page, in display order.
    pub page: Vec<Reading>,
    /// Current page number (1-based).
    pub current_page: usize,
    /// Total number of pages (at least 1).
    pub page_count: usize,
}

impl DashboardView {
    /// Whether no reading matches the current filters.
    pub fn is_empty(&self) -> bool {
        self.filtered_records == 0
    }

    /// Whether page navigation should be shown.
    pub fn has_multiple_pages(&self) -> bool {
        self.page_count > 1
    }
}

/// How many times each memoized stage has been recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Filter + summary passes.
    pub filter_passes: u64,
    /// Sort passes.
    pub sort_passes: u64,
}

#[derive(Debug, Clone)]
struct FilterStage {
    generation: u64,
    filters: FilterSettings,
    readings: Vec<Reading>,
    summary: Summary,
}

#[derive(Debug, Clone)]
struct SortStage {
    generation: u64,
    filters: FilterSettings,
    order: SortOrder,
    readings: Vec<Reading>,
}

impl FilterStage {
    fn build(store: &DataStore, filters: FilterSettings) -> Self {
        let readings = filter_readings(store.readings(), &filters);
        let summary = summarize(&readings);
        debug!(
            generation = store.generation(),
            matched = readings.len(),
            total = store.len(),
            "Recomputed filter stage"
        );
        Self {
            generation: store.generation(),
            filters,
            readings,
            summary,
        }
    }
}

impl SortStage {
    fn build(filtered: &FilterStage, order: SortOrder) -> Self {
        let readings = sort_by_timestamp(&filtered.readings, order);
        debug!(
            generation = filtered.generation,
            ?order,
            len = readings.len(),
            "Recomputed sort stage"
        );
        Self {
            generation: filtered.generation,
            filters: filtered.filters,
            order,
            readings,
        }
    }
}

/// Owner of dashboard state and the derived pipeline.
#[derive(Debug, Clone)]
pub struct ViewController {
    store: DataStore,
    filters: FilterSettings,
    sort_order: SortOrder,
    current_page: usize,
    page_size: usize,
    filter_stage: Option<FilterStage>,
    sort_stage: Option<SortStage>,
    stats: PipelineStats,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::from_valid_options(ControllerOptions::default())
    }
}

impl ViewController {
    /// Create a controller with an empty store.
    pub fn new(options: ControllerOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: ControllerOptions) -> Self {
        Self {
            store: DataStore::new(options.capacity),
            filters: options.initial_filters,
            sort_order: options.initial_order,
            current_page: 1,
            page_size: options.page_size,
            filter_stage: None,
            sort_stage: None,
            stats: PipelineStats::default(),
        }
    }

    // --- Store ---

    /// Append a batch from the feed.
    pub fn ingest(&mut self, batch: Vec<Reading>) -> AppendOutcome {
        self.store.append(batch)
    }

    /// Decode and append a raw JSON batch.
    pub fn ingest_json(&mut self, text: &str) -> AppendOutcome {
        self.store.append_json(text)
    }

    /// The underlying store.
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Number of readings in the store.
    pub fn total_records(&self) -> usize {
        self.store.len()
    }

    // --- State ---

    /// Current filter settings.
    pub fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    /// Current sort order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Current page number (1-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Readings per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Stage recomputation counters.
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    // --- Operations ---

    /// Replace the filter settings and return to page 1.
    pub fn set_filters(&mut self, filters: FilterSettings) {
        debug!(?filters, "Filters replaced");
        self.filters = filters;
        self.current_page = 1;
    }

    /// Replace one metric's range and return to page 1.
    pub fn set_filter(&mut self, metric: Metric, range: Range) {
        self.set_filters(self.filters.with_range(metric, range));
    }

    /// Flip the sort order and return to page 1.
    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.current_page = 1;
        debug!(order = ?self.sort_order, "Sort order toggled");
    }

    /// Restore the default filters and return to page 1.
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterSettings::DEFAULT);
    }

    /// Move to page `n` if `1 <= n <= page_count`.
    ///
    /// Out-of-range requests are ignored and `false` is returned.
    pub fn set_page(&mut self, n: usize) -> bool {
        let count = self.page_count();
        if n >= 1 && n <= count {
            self.current_page = n;
            true
        } else {
            debug!(requested = n, page_count = count, "Ignoring out-of-range page");
            false
        }
    }

    /// Move one page forward if possible.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page.saturating_add(1))
    }

    /// Move one page back if possible.
    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.current_page.saturating_sub(1))
    }

    // --- Derived views ---

    /// Averages over the readings that match the filters.
    pub fn summary(&mut self) -> Summary {
        self.filter_stage().summary
    }

    /// Number of readings that match the filters.
    pub fn filtered_len(&mut self) -> usize {
        self.filter_stage().readings.len()
    }

    /// Number of pages for the filtered readings.
    pub fn page_count(&mut self) -> usize {
        let page_size = self.page_size;
        page_count(self.filtered_len(), page_size)
    }

    /// Filtered readings in display order.
    pub fn sorted(&mut self) -> &[Reading] {
        &self.sort_stage().readings
    }

    /// Readings on the current page.
    pub fn page_readings(&mut self) -> &[Reading] {
        let (current, size) = (self.current_page, self.page_size);
        page(&self.sort_stage().readings, current, size)
    }

    /// Snapshot for presentation.
    pub fn view(&mut self) -> DashboardView {
        let summary = self.summary();
        let filtered_records = self.filtered_len();
        let page_count = self.page_count();
        let page = self.page_readings().to_vec();

        DashboardView {
            total_records: self.store.len(),
            filtered_records,
            filters: self.filters,
            sort_order: self.sort_order,
            summary,
            page,
            current_page: self.current_page,
            page_count,
        }
    }

    fn filter_stage(&mut self) -> &FilterStage {
        let generation = self.store.generation();
        let filters = self.filters;

        let stage = match self.filter_stage.take() {
            Some(stage) if stage.generation == generation && stage.filters == filters => stage,
            _ => {
                self.stats.filter_passes += 1;
                FilterStage::build(&self.store, filters)
            }
        };
        self.filter_stage.insert(stage)
    }

    fn sort_stage(&mut self) -> &SortStage {
        let generation = self.store.generation();
        let (filters, order) = (self.filters, self.sort_order);

        let stage = match self.sort_stage.take() {
            Some(stage)
                if stage.generation == generation
                    && stage.filters == filters
                    && stage.order == order =>
            {
                stage
            }
            _ => {
                self.stats.sort_passes += 1;
                SortStage::build(self.filter_stage(), order)
            }
        };
        self.sort_stage.insert(stage)
    }
}
