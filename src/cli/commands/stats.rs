//! `finca stats` command - windowed statistics and anomalies

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analytics::{window_stats, Range, Trend};
use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Robot name, id, or id prefix
    pub robot: String,

    /// Window size in hours
    #[arg(long, default_value_t = 24)]
    pub hours: i64,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
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

    let stats = window_stats(&points);

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&stats).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {} (last {}h, {} readings)",
        style("Statistics for").bold(),
        style(&robot.name).cyan(),
        args.hours,
        points.len()
    );
    println!("{}", style("─".repeat(60)).dim());

    println!(
        "{:<14} {:>10} {:>10} {:>10} {:>10}",
        style("METRIC").bold(),
        style("AVG").bold(),
        style("MIN").bold(),
        style("MAX").bold(),
        style("TREND").bold()
    );
    metric_row(
        "temperature",
        stats.averages.temperature,
        stats.temperature_range,
        stats.trends.temperature,
    );
    metric_row(
        "humidity",
        stats.averages.humidity,
        stats.humidity_range,
        stats.trends.humidity,
    );
    metric_row(
        "pressure",
        stats.averages.pressure,
        stats.pressure_range,
        stats.trends.pressure,
    );
    if stats.averages.co2 > 0.0 {
        println!(
            "{:<14} {:>10.1} {:>10} {:>10} {:>10}",
            "co2", stats.averages.co2, "-", "-", "-"
        );
    }
    if stats.averages.light > 0.0 {
        println!(
            "{:<14} {:>10.1} {:>10} {:>10} {:>10}",
            "light", stats.averages.light, "-", "-", "-"
        );
    }

    println!();
    if stats.anomalies.is_empty() {
        println!("{}: none", style("Anomalies").bold());
    } else {
        println!(
            "{} ({}):",
            style("Anomalies").bold(),
            style(stats.anomalies.len()).yellow()
        );
        for anomaly in &stats.anomalies {
            println!(
                "  {} {} {} at {} ({:.0}% off the window mean {:.1})",
                style("!").yellow(),
                anomaly.metric,
                anomaly.value,
                anomaly.timestamp.format("%m-%d %H:%M"),
                anomaly.deviation_pct,
                anomaly.expected,
            );
        }
    }

    Ok(())
}

fn metric_row(name: &str, avg: f64, range: Range, trend: Trend) {
    if avg == 0.0 {
        return;
    }
    println!(
        "{:<14} {:>10.1} {:>10.1} {:>10.1} {:>10}",
        name,
        avg,
        range.min,
        range.max,
        trend.to_string()
    );
}
