//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and merges them over the environment config
//! - installs logging
//! - loads the source tables
//! - dispatches the selected view and prints it (or launches the TUI)

use clap::Parser;

use crate::cli::{CalcArgs, Command, DataArgs, HistoryArgs, InsightsArgs, RegionsArgs};
use crate::config::DashboardConfig;
use crate::domain::Dataset;
use crate::error::AppError;
use crate::logging::LogTarget;
use crate::views::{CalculatorInput, DashboardContext, ViewOutput, ViewRequest};

/// Entry point for the `silver` binary.
pub fn run() -> Result<(), AppError> {
    // `silver` and `silver --data-dir x` behave like `silver tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let env_config = DashboardConfig::from_env()?;

    match cli.command {
        Command::Tui(args) => handle_tui(config_from_args(&env_config, &args)),
        Command::Calc(args) => {
            init_logging(&env_config)?;
            handle_calc(args)
        }
        Command::History(args) => {
            let config = config_from_args(&env_config, &args.data);
            init_logging(&config)?;
            handle_history(&config, args)
        }
        Command::Regions(args) => {
            let config = config_from_args(&env_config, &args.data);
            init_logging(&config)?;
            handle_regions(&config, args)
        }
        Command::Insights(args) => {
            let config = config_from_args(&env_config, &args.data);
            init_logging(&config)?;
            handle_insights(&config, args)
        }
    }
}

fn init_logging(config: &DashboardConfig) -> Result<(), AppError> {
    crate::logging::init(config, LogTarget::Stderr)
}

fn handle_tui(config: DashboardConfig) -> Result<(), AppError> {
    crate::logging::init(&config, LogTarget::FileOnly)?;
    let data = crate::io::load_dataset(&config)?;
    crate::tui::run(&data, &config)
}

fn handle_calc(args: CalcArgs) -> Result<(), AppError> {
    let input = CalculatorInput {
        weight: args.weight,
        unit: args.unit,
        price_per_gram: args.price,
    }
    .clamped();

    // The calculator never reads the tables.
    let data = Dataset::default();
    let request = ViewRequest::Calculator(input);
    let output = crate::views::render(&request, &DashboardContext::new(&data));
    println!("{}", crate::report::format_view(&request, &output));
    Ok(())
}

fn handle_history(config: &DashboardConfig, args: HistoryArgs) -> Result<(), AppError> {
    let data = crate::io::load_dataset(config)?;
    let request = ViewRequest::Historical(args.band);
    let output = crate::views::render(&request, &DashboardContext::new(&data));

    println!("{}", crate::report::format_view(&request, &output));
    if let (ViewOutput::Historical(view), false) = (&output, args.no_plot) {
        println!("{}", crate::plot::render_historical_plot(view, args.width, args.height));
    }
    Ok(())
}

fn handle_regions(config: &DashboardConfig, args: RegionsArgs) -> Result<(), AppError> {
    let data = crate::io::load_dataset(config)?;
    let request = ViewRequest::Regional;
    let output = crate::views::render(&request, &DashboardContext::new(&data));

    println!("{}", crate::report::format_view(&request, &output));
    if let ViewOutput::Regional(view) = &output {
        println!("{}", crate::plot::render_bar_chart(&view.ranked, args.width));
    }
    Ok(())
}

fn handle_insights(config: &DashboardConfig, args: InsightsArgs) -> Result<(), AppError> {
    let data = crate::io::load_dataset(config)?;
    let request = ViewRequest::Insights;
    let output = crate::views::render(&request, &DashboardContext::new(&data));

    println!("{}", crate::report::format_view(&request, &output));
    let ViewOutput::Insights(view) = &output else {
        return Ok(());
    };

    if !args.no_plot {
        println!("Top {} states with highest silver purchases:", view.top.len());
        println!("{}", crate::plot::render_bar_chart(&view.top, args.width));
        println!("January silver sales across states:");
        println!("{}", crate::plot::render_monthly_plot(&view.monthly, args.width, args.height));
    }

    // Optional export.
    if let Some(path) = &args.export {
        crate::io::export::write_monthly(path, &view.monthly, args.format)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Apply CLI data flags over the environment config.
pub fn config_from_args(base: &DashboardConfig, args: &DataArgs) -> DashboardConfig {
    let mut config = base.clone();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(prices) = &args.prices {
        config.prices_file = prices.clone();
    }
    if let Some(purchases) = &args.purchases {
        config.purchases_file = purchases.clone();
    }
    config
}

/// Rewrite argv so `silver` defaults to `silver tui`.
///
/// Rules:
/// - `silver`                      -> `silver tui`
/// - `silver --data-dir d ...`     -> `silver tui --data-dir d ...`
/// - `silver --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "calc" | "history" | "regions" | "insights"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
