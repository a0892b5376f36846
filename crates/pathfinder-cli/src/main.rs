mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::business_case::BusinessCaseArgs;
use commands::catalog::CatalogArgs;
use commands::growth::GrowthArgs;
use commands::roi::RiskRoiArgs;
use commands::tco::TcoArgs;
use commands::timeline::TimelineArgs;

/// Value quantification for sales conversations
#[derive(Parser)]
#[command(
    name = "pathfinder",
    version,
    about = "Value quantification for sales conversations",
    long_about = "A CLI for quantifying the value of an IT-services offering against \
                  competitors with decimal precision. Supports TCO comparison, value \
                  realization timelines, risk-adjusted ROI, growth what-ifs and \
                  itemised business cases."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare multi-year total cost of ownership against a competitor
    Tco(TcoArgs),
    /// Cumulative cost curves and breakeven periods for two offerings
    Timeline(TimelineArgs),
    /// Confidence-weighted, risk-adjusted ROI
    RiskRoi(RiskRoiArgs),
    /// Project revenue and market share under a growth scenario
    Growth(GrowthArgs),
    /// Evaluate an itemised business case
    BusinessCase(BusinessCaseArgs),
    /// Print the reference data (cost structures, scenarios, risk profiles)
    Catalog(CatalogArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tco(args) => commands::tco::run_tco(args),
        Commands::Timeline(args) => commands::timeline::run_timeline(args),
        Commands::RiskRoi(args) => commands::roi::run_risk_roi(args),
        Commands::Growth(args) => commands::growth::run_growth(args),
        Commands::BusinessCase(args) => commands::business_case::run_business_case(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("pathfinder {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
