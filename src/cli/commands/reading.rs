//! `finca reading` command - logging and listing sensor readings

use chrono::{DateTime, Utc};
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::reading::{
    valid_co2, valid_humidity, valid_lux, valid_pressure, valid_soil_moisture,
    valid_soil_temperature, valid_temperature, valid_uv, AirSample, AtmosphereSample, LightSample,
    Reading, SoilSample,
};

#[derive(Subcommand, Debug)]
pub enum ReadingCommands {
    /// Log a new reading for a robot
    Log(LogArgs),

    /// List a robot's readings over a time window
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Robot name, id, or id prefix
    pub robot: String,

    /// Air temperature in °C (barometric sensor)
    #[arg(long, short = 't', allow_hyphen_values = true)]
    pub temperature: Option<f64>,

    /// Barometric pressure in hPa
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: Option<f64>,

    /// CO2 concentration in ppm
    #[arg(long)]
    pub co2: Option<f64>,

    /// Air quality sensor temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub air_temperature: Option<f64>,

    /// Illuminance in lux
    #[arg(long)]
    pub lux: Option<f64>,

    /// UV index
    #[arg(long)]
    pub uv: Option<f64>,

    /// Raw soil moisture (0-1000)
    #[arg(long)]
    pub soil_moisture: Option<f64>,

    /// Soil temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub soil_temperature: Option<f64>,

    /// Reported latitude
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Reported longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Reading timestamp, RFC 3339 (defaults to now)
    #[arg(long)]
    pub timestamp: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Robot name, id, or id prefix
    pub robot: String,

    /// Window size in hours
    #[arg(long, default_value_t = 24)]
    pub hours: i64,
}

pub fn run(cmd: ReadingCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReadingCommands::Log(args) => run_log(args, global),
        ReadingCommands::List(args) => run_list(args, global),
    }
}

fn run_log(args: LogArgs, global: &GlobalOpts) -> Result<()> {
    let (_, mut store) = open_store(global)?;
    let robot = resolve_robot(&store, &args.robot)?;

    let timestamp = match &args.timestamp {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| miette::miette!("Invalid timestamp '{}': {}", raw, e))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    warn_out_of_range("temperature", args.temperature, valid_temperature);
    warn_out_of_range("pressure", args.pressure, valid_pressure);
    warn_out_of_range("humidity", args.humidity, valid_humidity);
    warn_out_of_range("co2", args.co2, valid_co2);
    warn_out_of_range("air-temperature", args.air_temperature, valid_temperature);
    warn_out_of_range("lux", args.lux, valid_lux);
    warn_out_of_range("uv", args.uv, valid_uv);
    warn_out_of_range("soil-moisture", args.soil_moisture, valid_soil_moisture);
    warn_out_of_range(
        "soil-temperature",
        args.soil_temperature,
        valid_soil_temperature,
    );

    let mut reading = Reading::new(robot.id.clone(), timestamp);
    reading.latitude = args.lat;
    reading.longitude = args.lon;

    if args.temperature.is_some() || args.pressure.is_some() {
        reading.atmosphere = Some(AtmosphereSample {
            temperature_c: args.temperature,
            pressure_hpa: args.pressure,
        });
    }
    if args.humidity.is_some() || args.co2.is_some() || args.air_temperature.is_some() {
        reading.air = Some(AirSample {
            humidity_pct: args.humidity,
            co2_ppm: args.co2,
            temperature_c: args.air_temperature,
        });
    }
    if args.lux.is_some() || args.uv.is_some() {
        reading.light = Some(LightSample {
            lux: args.lux,
            uv_index: args.uv,
        });
    }
    if args.soil_moisture.is_some() || args.soil_temperature.is_some() {
        reading.soil = Some(SoilSample {
            moisture_raw: args.soil_moisture,
            temperature_c: args.soil_temperature,
        });
    }

    let reading = reading.validated();
    store
        .insert_reading(&reading)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Logged reading for {} at {}",
        style("✓").green(),
        style(&robot.name).cyan(),
        reading.timestamp.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

fn warn_out_of_range(name: &str, value: Option<f64>, valid: impl Fn(f64) -> bool) {
    if let Some(v) = value {
        if !valid(v) {
            eprintln!(
                "{} {} value {} is outside the plausible range, discarding",
                style("!").yellow(),
                name,
                v
            );
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let robot = resolve_robot(&store, &args.robot)?;

    let points = store
        .history(&robot.id, args.hours)
        .map_err(|e| miette::miette!("{}", e))?;

    if points.is_empty() {
        println!(
            "No readings for {} in the last {} hour(s).",
            style(&robot.name).cyan(),
            args.hours
        );
        return Ok(());
    }

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&points).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&points).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("timestamp,temperature,humidity,lux,soil_moisture,co2,pressure,uv,soil_temperature");
            for p in &points {
                println!(
                    "{},{},{},{},{},{},{},{},{}",
                    p.timestamp.to_rfc3339(),
                    p.temperature_c,
                    p.humidity_pct,
                    p.lux,
                    p.soil_moisture,
                    p.co2_ppm,
                    p.pressure_hpa,
                    p.uv_index,
                    p.soil_temperature_c,
                );
            }
        }
        _ => {
            println!(
                "{:<18} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9} {:>5} {:>9}",
                style("TIMESTAMP").bold(),
                style("TEMP").bold(),
                style("HUM").bold(),
                style("LUX").bold(),
                style("SOIL").bold(),
                style("CO2").bold(),
                style("PRESS").bold(),
                style("UV").bold(),
                style("SOIL TMP").bold()
            );
            println!("{}", "-".repeat(84));

            for p in &points {
                println!(
                    "{:<18} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9} {:>5} {:>9}",
                    p.timestamp.format("%m-%d %H:%M"),
                    cell(p.temperature_c, 1),
                    cell(p.humidity_pct, 1),
                    cell(p.lux, 0),
                    cell(p.soil_moisture, 0),
                    cell(p.co2_ppm, 0),
                    cell(p.pressure_hpa, 1),
                    cell(p.uv_index, 1),
                    cell(p.soil_temperature_c, 1),
                );
            }

            println!();
            println!("{} reading(s)", style(points.len()).cyan());
        }
    }

    Ok(())
}

/// Format a window cell; 0 is the missing-sensor sentinel
fn cell(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}
