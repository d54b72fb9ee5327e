//! Top-level argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands;

#[derive(Parser, Debug)]
#[command(
    name = "finca",
    version,
    about = "Field telemetry toolkit for agricultural sensor fleets"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug)]
pub struct GlobalOpts {
    /// Project directory (default: discover from the current directory)
    #[arg(long, global = true, env = "FINCA_PROJECT", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,
}

/// Output formats supported across commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick a sensible format for the command
    Auto,
    /// Human-readable table
    Table,
    Json,
    Yaml,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new finca project
    Init(commands::init::InitArgs),

    /// Manage field robots
    #[command(subcommand)]
    Robot(commands::robot::RobotCommands),

    /// Record and list sensor readings
    #[command(subcommand)]
    Reading(commands::reading::ReadingCommands),

    /// Analyze a robot's latest reading against its recent history
    Analyze(commands::analyze::AnalyzeArgs),

    /// Windowed statistics and anomaly detection for a robot
    Stats(commands::stats::StatsArgs),

    /// Full advisory report for a robot's current conditions
    Advise(commands::advise::AdviseArgs),

    /// Market price board
    #[command(subcommand)]
    Market(commands::market::MarketCommands),

    /// Run a weather scenario and estimate yield impact
    Sim(commands::sim::SimArgs),

    /// Seed the market board with synthetic price history
    Seed(commands::seed::SeedArgs),

    /// Export a robot's history window as CSV
    Export(commands::export::ExportArgs),
}
