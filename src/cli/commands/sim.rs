//! `finca sim` command - weather scenario simulation

use chrono::{NaiveDate, Utc};
use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::sim::{Crop, Region, Scenario, Simulation, YieldClass};

/// Crop argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CropArg {
    Coffee,
    Maize,
    Rice,
    Banana,
    Potato,
    Tomato,
    Cacao,
    Other,
}

impl From<CropArg> for Crop {
    fn from(arg: CropArg) -> Self {
        match arg {
            CropArg::Coffee => Crop::Coffee,
            CropArg::Maize => Crop::Maize,
            CropArg::Rice => Crop::Rice,
            CropArg::Banana => Crop::Banana,
            CropArg::Potato => Crop::Potato,
            CropArg::Tomato => Crop::Tomato,
            CropArg::Cacao => Crop::Cacao,
            CropArg::Other => Crop::Other,
        }
    }
}

/// Region argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionArg {
    North,
    Central,
    South,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::North => Region::North,
            RegionArg::Central => Region::Central,
            RegionArg::South => Region::South,
        }
    }
}

/// Scenario argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    Normal,
    Drought,
    Rainy,
    HeatWave,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Normal => Scenario::Normal,
            ScenarioArg::Drought => Scenario::Drought,
            ScenarioArg::Rainy => Scenario::Rainy,
            ScenarioArg::HeatWave => Scenario::HeatWave,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct SimArgs {
    /// Crop to simulate
    #[arg(long, short = 'c', default_value = "coffee")]
    pub crop: CropArg,

    /// Growing region
    #[arg(long, short = 'r', default_value = "central")]
    pub region: RegionArg,

    /// Climate scenario
    #[arg(long, short = 's', default_value = "normal")]
    pub scenario: ScenarioArg,

    /// Days to simulate
    #[arg(long, short = 'd', default_value_t = 7, value_parser = clap::value_parser!(u32).range(7..=30))]
    pub days: u32,

    /// Start date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Temperature adjustment in °C
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub temp_adjust: f64,

    /// Precipitation adjustment in mm
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub precip_adjust: f64,
}

pub fn run(args: SimArgs, global: &GlobalOpts) -> Result<()> {
    let simulation = Simulation {
        region: args.region.into(),
        crop: args.crop.into(),
        scenario: args.scenario.into(),
        start_date: args.start_date.unwrap_or_else(|| Utc::now().date_naive()),
        days: args.days,
        temp_adjust: args.temp_adjust,
        precip_adjust: args.precip_adjust,
    };

    let result = simulation.run();

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&result).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Csv => {
            println!("date,temperature,precipitation,yield_pct");
            for day in &result.days {
                println!(
                    "{},{:.1},{:.1},{:.1}",
                    day.date, day.temperature, day.precipitation, day.yield_pct
                );
            }
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {} in the {} region, {} scenario, {} day(s)",
        style("Simulating").bold(),
        style(simulation.crop).cyan(),
        simulation.region,
        simulation.scenario,
        simulation.days
    );
    println!("{}", style("─".repeat(52)).dim());
    println!(
        "{:<12} {:>8} {:>8} {:>8}",
        style("DATE").bold(),
        style("TEMP").bold(),
        style("PRECIP").bold(),
        style("YIELD").bold()
    );

    for day in &result.days {
        println!(
            "{:<12} {:>7.1}° {:>6.1}mm {:>7.1}%",
            day.date.format("%Y-%m-%d"),
            day.temperature,
            day.precipitation,
            day.yield_pct
        );
    }

    println!("{}", style("─".repeat(52)).dim());
    let classified = match result.classification {
        YieldClass::Optimal => style(result.classification).green(),
        YieldClass::Moderate => style(result.classification).yellow(),
        YieldClass::Low => style(result.classification).red(),
    };
    println!(
        "{}: {:.1}% ({})",
        style("Expected yield").bold(),
        result.average_yield,
        classified
    );

    if !result.recommendations.is_empty() {
        println!();
        for rec in &result.recommendations {
            println!("  {} {}", style("•").cyan(), rec);
        }
    }

    Ok(())
}
