//! Command-line parsing for the silver dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the view computations.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ExportFormat, PriceBand, WeightUnit};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "silver", version, about = "Silver price dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (the default).
    Tui(DataArgs),
    /// Price a quantity of silver in INR and USD.
    Calc(CalcArgs),
    /// Print historical prices within a price band.
    History(HistoryArgs),
    /// Print states ranked by silver purchased.
    Regions(RegionsArgs),
    /// Print the top purchasers and the monthly sales table.
    Insights(InsightsArgs),
}

/// Where to find the source tables. Unset flags fall back to the environment.
#[derive(Debug, Args, Clone, Default)]
pub struct DataArgs {
    /// Directory containing the CSV files.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Historical price CSV (Year, Month, Price per kg).
    #[arg(long, value_name = "CSV")]
    pub prices: Option<PathBuf>,

    /// State purchase CSV (State, Silver_Purchased_kg).
    #[arg(long, value_name = "CSV")]
    pub purchases: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Weight to price.
    #[arg(short, long, default_value_t = 10.0)]
    pub weight: f64,

    /// Unit of `--weight`.
    #[arg(short, long, value_enum, default_value_t = WeightUnit::Grams)]
    pub unit: WeightUnit,

    /// Current silver price per gram (INR, minimum 1).
    #[arg(short, long, default_value_t = 75.0)]
    pub price: f64,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Price band: low (≤ 20000), mid (20000 – 30000), high (≥ 30000).
    #[arg(short, long, value_enum, default_value_t = PriceBand::Low)]
    pub band: PriceBand,

    /// Skip the ASCII plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Bar width (columns) of the largest purchase.
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Write the monthly table to this file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Export format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Skip the ASCII charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}
