#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and tests/)
pub use analysis::{ZigzagEngine, fold_level, fold_levels};
pub use config::{ZIGZAG, ZigzagConfig};
pub use data::{BarSeries, load_bars, save_bars};
pub use domain::{Bar, ChannelValue};
pub use models::{Pivot, PivotDir, PivotHistory, ZigzagFlags, ZigzagState};

// CLI argument parsing
use {
    clap::Parser,
    models::{KeyOrder, PivotField},
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bar series JSON (see make_demo_bars)
    #[arg(long)]
    pub input: PathBuf,

    /// Window length in bars
    #[arg(long, default_value_t = ZIGZAG.length)]
    pub length: usize,

    /// Pivots retained per level
    #[arg(long, default_value_t = ZIGZAG.number_of_pivots)]
    pub pivots: usize,

    /// Bars of delay before the window is evaluated
    #[arg(long, default_value_t = ZIGZAG.offset)]
    pub offset: usize,

    /// Higher levels to fold above the base level
    #[arg(long, default_value_t = 1)]
    pub levels: usize,

    /// Print the keyed JSON view instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Fields to keep in the JSON view, e.g. price,dir,ratio (all when omitted)
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<PivotField>,

    /// Sort JSON keys by name
    #[arg(long, value_enum)]
    pub order: Option<KeyOrder>,

    /// Write the engine snapshot here after replaying
    #[arg(long)]
    pub save_state: Option<PathBuf>,

    /// Resume from this snapshot if it exists, replaying only newer bars
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

/// Main application entry point - runs the zigzag report
/// This is the public API for the binary to call
pub use app::run_app;
