//! Output formatting for dashboard frames (text and JSON).

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use time::macros::format_description;

use greenhouse_core::{
    DashboardView, LevelThresholds, Metric, MetricDomain, MetricLevel, Reading, parse_timestamp,
};

/// Shown in place of a timestamp that does not parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            compact: false,
        }
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

/// Time of day of an ISO-8601 timestamp as `h:mm:ss AM/PM` (UTC).
///
/// Unparseable input yields [`INVALID_DATE`].
#[must_use]
pub fn format_time_of_day(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .ok()
        .and_then(|instant| {
            instant
                .to_offset(time::UtcOffset::UTC)
                .format(format_description!(
                    "[hour repr:12 padding:none]:[minute]:[second] [period]"
                ))
                .ok()
        })
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Colour `text` according to `level`.
#[must_use]
pub fn colorize(text: &str, level: MetricLevel, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    match level {
        MetricLevel::Good => text.green().to_string(),
        MetricLevel::Warning => text.yellow().to_string(),
        MetricLevel::Moderate => text.truecolor(253, 186, 116).to_string(),
        MetricLevel::Critical => text.red().to_string(),
    }
}

fn format_range_line(view: &DashboardView, metric: Metric) -> String {
    let domain = MetricDomain::of(metric);
    let range = view.filters.range(metric);
    format!(
        "{} Range: {} - {}",
        metric.label(),
        domain.format(range.min),
        domain.format(range.max)
    )
}

fn format_table(page: &[Reading], levels: &LevelThresholds, opts: &FormatOptions) -> String {
    use tabled::builder::Builder;
    use tabled::settings::Style;

    let mut builder = Builder::default();
    builder.push_record(["Timestamp", "Sensor ID", "Temperature", "Humidity", "Air Quality"]);

    for reading in page {
        let cell = |metric: Metric, text: String| {
            let level = levels.evaluate(metric, reading.value(metric));
            colorize(&text, level, opts.no_color)
        };
        builder.push_record([
            format_time_of_day(&reading.timestamp),
            reading.sensor_id.clone(),
            cell(Metric::Temperature, format!("{:.2} °C", reading.temperature)),
            cell(Metric::Humidity, format!("{:.2} %", reading.humidity)),
            cell(Metric::AirQuality, format!("{:.0}", reading.air_quality)),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Render one dashboard frame as text.
#[must_use]
pub fn format_dashboard_text(
    view: &DashboardView,
    levels: &LevelThresholds,
    opts: &FormatOptions,
) -> String {
    let title = "Greenhouse Dashboard";
    let records = format!("{} records", view.total_records);
    let mut output = if opts.no_color {
        format!("{}  {}\n", title, records)
    } else {
        format!("{}  {}\n", title.bold(), records.green())
    };
    output.push_str("Real-time sensor data\n\n");

    for metric in Metric::ALL {
        output.push_str(&format_range_line(view, metric));
        output.push('\n');
    }
    output.push_str(&format!("Sort: {}\n\n", view.sort_order.label()));

    let summary = &view.summary;
    output.push_str(&format!(
        "Avg. Temp: {:.1}°C   Avg. Humidity: {:.1}%   Avg. AQI: {:.0}\n\n",
        summary.avg_temp, summary.avg_humidity, summary.avg_aqi
    ));

    if view.page.is_empty() {
        output.push_str("No data matches the current filters.\n");
        output.push_str("Try adjusting the filter ranges.\n");
    } else {
        output.push_str(&format_table(&view.page, levels, opts));
        output.push('\n');
    }

    if view.has_multiple_pages() {
        output.push_str(&format!(
            "\nPage {} of {}\n",
            view.current_page, view.page_count
        ));
    }

    output
}

/// Render one dashboard frame as JSON.
pub fn format_dashboard_json(view: &DashboardView, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct Frame<'a> {
        #[serde(flatten)]
        view: &'a DashboardView,
        is_empty: bool,
    }

    opts.as_json(&Frame {
        view,
        is_empty: view.is_empty(),
    })
}
