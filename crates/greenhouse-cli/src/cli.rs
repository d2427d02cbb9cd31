//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for dashboard frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "greenhouse")]
#[command(author, version, about = "Live dashboard for simulated greenhouse sensors", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the simulated feed and redraw the dashboard on every batch
    Watch {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Stop after this many batches (0 = until Ctrl+C)
        #[arg(short = 'n', long, default_value = "0")]
        ticks: u32,
    },

    /// Generate batches without waiting and print a single frame
    Snapshot {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Number of batches to generate
        #[arg(short = 'n', long, default_value = "1")]
        ticks: u32,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Feed arguments shared by `watch` and `snapshot`.
#[derive(Debug, Clone, Default, Args)]
pub struct FeedArgs {
    /// Number of simulated sensors
    #[arg(long)]
    pub sensors: Option<usize>,

    /// Milliseconds between batches
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Seed for reproducible readings
    #[arg(long)]
    pub seed: Option<u64>,
}

/// View arguments shared by `watch` and `snapshot`.
///
/// Unset values fall back to the config file, then to the built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Maximum number of readings kept in memory
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Readings per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Page to show once enough data has arrived
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Show oldest readings first
    #[arg(long)]
    pub ascending: bool,

    /// Minimum temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temp_min: Option<f64>,

    /// Maximum temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temp_max: Option<f64>,

    /// Minimum humidity (%)
    #[arg(long)]
    pub humidity_min: Option<f64>,

    /// Maximum humidity (%)
    #[arg(long)]
    pub humidity_max: Option<f64>,

    /// Minimum air quality index
    #[arg(long)]
    pub aqi_min: Option<f64>,

    /// Maximum air quality index
    #[arg(long)]
    pub aqi_max: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output compact JSON (one frame per line)
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,

    /// Show the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
