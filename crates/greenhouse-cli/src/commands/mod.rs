//! Command implementations for the CLI.

mod config;
mod snapshot;
mod watch;

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::Result;

use greenhouse_core::{
    ControllerOptions, FeedOptions, FilterSettings, LevelThresholds, Metric, Range, SortOrder,
    ViewController, clamp_settings,
};

use crate::cli::{FeedArgs, OutputFormat, ViewArgs};
use crate::config::Config;
use crate::format::{FormatOptions, format_dashboard_json, format_dashboard_text};

pub use config::cmd_config;
pub use snapshot::cmd_snapshot;
pub use watch::cmd_watch;

/// Settings for `watch` and `snapshot` after merging flags with the config file.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub feed: FeedOptions,
    pub controller: ControllerOptions,
    pub page: usize,
    pub format: OutputFormat,
    pub opts: FormatOptions,
    pub levels: LevelThresholds,
    pub quiet: bool,
}

impl DashboardContext {
    /// Merge CLI flags over config values. Flags win when given.
    pub fn resolve(
        feed: &FeedArgs,
        view: &ViewArgs,
        config: &Config,
        no_color: bool,
        quiet: bool,
    ) -> Self {
        Self {
            feed: feed_options(feed, config),
            controller: controller_options(view, config),
            page: view.page,
            format: view.format,
            opts: FormatOptions::new(no_color).with_compact(view.compact),
            levels: LevelThresholds::new(config.levels),
            quiet,
        }
    }

    /// Build a controller from the resolved options.
    pub fn controller(&self) -> Result<ViewController> {
        Ok(ViewController::new(self.controller.clone())?)
    }

    /// Render the controller's current view in the selected format.
    pub fn render(&self, controller: &mut ViewController) -> Result<String> {
        let view = controller.view();
        match self.format {
            OutputFormat::Json => format_dashboard_json(&view, &self.opts),
            OutputFormat::Text => Ok(format_dashboard_text(&view, &self.levels, &self.opts)),
        }
    }
}

fn feed_options(args: &FeedArgs, config: &Config) -> FeedOptions {
    let mut options = FeedOptions::builder()
        .sensor_count(args.sensors.unwrap_or(config.feed.sensor_count))
        .interval(Duration::from_millis(
            args.interval_ms.unwrap_or(config.feed.interval_ms),
        ));
    if let Some(seed) = args.seed.or(config.feed.seed) {
        options = options.seed(seed);
    }
    options.build()
}

fn controller_options(args: &ViewArgs, config: &Config) -> ControllerOptions {
    let order = if args.ascending || config.dashboard.ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    ControllerOptions::default()
        .capacity(args.capacity.unwrap_or(config.dashboard.capacity))
        .page_size(args.page_size.unwrap_or(config.dashboard.page_size))
        .initial_filters(resolve_filters(args, config.filters))
        .initial_order(order)
}

/// Apply per-metric flag overrides to `base`, then clamp into the control domains.
pub fn resolve_filters(args: &ViewArgs, base: FilterSettings) -> FilterSettings {
    let overrides = [
        (Metric::Temperature, args.temp_min, args.temp_max),
        (Metric::Humidity, args.humidity_min, args.humidity_max),
        (Metric::AirQuality, args.aqi_min, args.aqi_max),
    ];
    let merged = overrides
        .into_iter()
        .fold(base, |acc, (metric, min, max)| {
            let current = acc.range(metric);
            let range = Range::new(min.unwrap_or(current.min), max.unwrap_or(current.max));
            acc.with_range(metric, range)
        });
    clamp_settings(merged)
}

/// Write one frame to stdout, clearing the terminal first when asked.
fn write_frame(frame: &str, clear: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if clear && io::stdout().is_terminal() {
        out.write_all(b"\x1B[2J\x1B[H")?;
    }
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}
