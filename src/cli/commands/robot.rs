//! `finca robot` command - fleet management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::robot::{Robot, RobotStatus};

#[derive(Subcommand, Debug)]
pub enum RobotCommands {
    /// Register a new robot
    New(NewArgs),

    /// List robots with activity aggregates
    List(ListArgs),

    /// Show a robot's details and latest reading
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Robot name (must be unique)
    pub name: String,

    /// Named location (plot, greenhouse, ...)
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Initial latitude
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Initial longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Initial status (active/inactive/maintenance)
    #[arg(long, short = 's', default_value = "active")]
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show count only, not the robots
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Robot name, id, or id prefix
    pub robot: String,
}

pub fn run(cmd: RobotCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RobotCommands::New(args) => run_new(args, global),
        RobotCommands::List(args) => run_list(args, global),
        RobotCommands::Show(args) => run_show(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;

    let status: RobotStatus = args
        .status
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;

    if store
        .find_robot(&args.name)
        .map_err(|e| miette::miette!("{}", e))?
        .is_some()
    {
        return Err(miette::miette!(
            "A robot named '{}' already exists",
            args.name
        ));
    }

    let mut robot = Robot::new(args.name.clone());
    robot.status = status;
    if let Some(location) = args.location {
        robot = robot.with_location(location);
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        robot = robot.with_position(lat, lon);
    }

    store
        .insert_robot(&robot)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Registered robot {} ({})",
        style("✓").green(),
        style(&robot.name).cyan(),
        style(format_short_id(&robot.id)).dim()
    );

    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let summaries = store
        .robot_summaries()
        .map_err(|e| miette::miette!("{}", e))?;

    if args.count {
        println!("{}", summaries.len());
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No robots registered.");
        println!();
        println!("Register one with: {}", style("finca robot new").yellow());
        return Ok(());
    }

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&summaries).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&summaries).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("name,id,status,location,readings,today,avg_temp,avg_humidity");
            for s in &summaries {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    escape_csv(&s.name),
                    s.id,
                    s.status,
                    escape_csv(s.location.as_deref().unwrap_or("")),
                    s.total_readings,
                    s.readings_today,
                    s.avg_temperature.map(|v| format!("{:.1}", v)).unwrap_or_default(),
                    s.avg_humidity.map(|v| format!("{:.1}", v)).unwrap_or_default(),
                );
            }
        }
        _ => {
            println!(
                "{:<18} {:<16} {:<12} {:<20} {:>8} {:>6} {:>9} {:>8}",
                style("NAME").bold(),
                style("ID").bold(),
                style("STATUS").bold(),
                style("LOCATION").bold(),
                style("READINGS").bold(),
                style("TODAY").bold(),
                style("AVG TEMP").bold(),
                style("AVG HUM").bold()
            );
            println!("{}", "-".repeat(104));

            for s in &summaries {
                println!(
                    "{:<18} {:<16} {:<12} {:<20} {:>8} {:>6} {:>9} {:>8}",
                    truncate_str(&s.name, 16),
                    format_short_id(&s.id),
                    s.status,
                    truncate_str(s.location.as_deref().unwrap_or("-"), 18),
                    s.total_readings,
                    s.readings_today,
                    s.avg_temperature
                        .map(|v| format!("{:.1}°C", v))
                        .unwrap_or_else(|| "-".to_string()),
                    s.avg_humidity
                        .map(|v| format!("{:.1}%", v))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }

            println!();
            println!("{} robot(s)", style(summaries.len()).cyan());
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let robot = resolve_robot(&store, &args.robot)?;

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&robot).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&robot).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(&robot.id).cyan());
    println!("{}: {}", style("Name").bold(), style(&robot.name).yellow());
    println!("{}: {}", style("Status").bold(), robot.status);
    if let Some(ref location) = robot.location {
        println!("{}: {}", style("Location").bold(), location);
    }
    if let (Some(lat), Some(lon)) = (robot.latitude, robot.longitude) {
        println!("{}: {:.5}, {:.5}", style("Position").bold(), lat, lon);
    }
    println!("{}", style("─".repeat(60)).dim());

    match store.latest_reading(&robot.id) {
        Ok(Some(reading)) => {
            println!(
                "{} {}",
                style("Last reading:").bold(),
                reading.timestamp.format("%Y-%m-%d %H:%M UTC")
            );
            if let Some(temp) = reading.temperature() {
                println!("  Temperature: {:.1}°C", temp);
            }
            if let Some(humidity) = reading.air.and_then(|a| a.humidity_pct) {
                println!("  Humidity: {:.1}%", humidity);
            }
            if let Some(pressure) = reading.atmosphere.and_then(|a| a.pressure_hpa) {
                println!("  Pressure: {:.1} hPa", pressure);
            }
            if let Some(co2) = reading.air.and_then(|a| a.co2_ppm) {
                println!("  CO2: {:.0} ppm", co2);
            }
            if let Some(lux) = reading.light.and_then(|l| l.lux) {
                println!("  Light: {:.0} lux", lux);
            }
            if let Some(moisture) = reading.soil.and_then(|s| s.moisture_raw) {
                println!("  Soil moisture: {:.0}", moisture);
            }
        }
        Ok(None) => println!("No readings recorded yet."),
        Err(e) => return Err(miette::miette!("{}", e)),
    }

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {} | {}: {}",
        style("Created").dim(),
        robot.created.format("%Y-%m-%d %H:%M"),
        style("Updated").dim(),
        robot.updated.format("%Y-%m-%d %H:%M"),
    );

    Ok(())
}
