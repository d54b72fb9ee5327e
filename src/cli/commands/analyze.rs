//! `finca analyze` command - health score, alerts, and trends

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analytics::{analyze, Trend};
use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Robot name, id, or id prefix
    pub robot: String,

    /// History window in hours
    #[arg(long, default_value_t = 6)]
    pub hours: i64,
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let robot = resolve_robot(&store, &args.robot)?;

    let reading = store
        .latest_reading(&robot.id)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| {
            miette::miette!(
                "No readings recorded for '{}'. Log one with: finca reading log",
                robot.name
            )
        })?;
    let history = store
        .history(&robot.id, args.hours)
        .map_err(|e| miette::miette!("{}", e))?;

    let analysis = analyze(&reading, &history);

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&analysis).into_diagnostic()?
            );
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&analysis).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {} ({})",
        style("Analysis for").bold(),
        style(&robot.name).cyan(),
        reading.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    println!("{}", style("─".repeat(60)).dim());

    // Rounded mean over the factor buckets, so 25 is the ceiling
    let score = analysis.health_score;
    let score_styled = if score >= 20 {
        style(score).green()
    } else if score >= 12 {
        style(score).yellow()
    } else {
        style(score).red()
    };
    println!("{}: {}/25", style("Health score").bold(), score_styled);

    println!(
        "{}: temperature {} | humidity {} | pressure {}",
        style("Trends").bold(),
        trend_arrow(analysis.trends.temperature),
        trend_arrow(analysis.trends.humidity),
        trend_arrow(analysis.trends.pressure),
    );

    if analysis.alerts.is_empty() {
        println!("{}: none", style("Alerts").bold());
    } else {
        println!("{}:", style("Alerts").bold());
        for alert in &analysis.alerts {
            println!("  {} {}", style("▲").red(), alert);
        }
    }

    if !analysis.recommendations.is_empty() {
        println!("{}:", style("Recommendations").bold());
        for rec in &analysis.recommendations {
            println!("  {} {}", style("•").cyan(), rec);
        }
    }

    Ok(())
}

fn trend_arrow(trend: Trend) -> String {
    match trend {
        Trend::Rising => format!("{}", style("rising ↑").yellow()),
        Trend::Falling => format!("{}", style("falling ↓").blue()),
        Trend::Stable => format!("{}", style("stable →").dim()),
    }
}
