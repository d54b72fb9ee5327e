//! `finca advise` command - rule-based field report

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analytics::advise;
use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct AdviseArgs {
    /// Robot name, id, or id prefix
    pub robot: String,
}

pub fn run(args: AdviseArgs, global: &GlobalOpts) -> Result<()> {
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

    let report = advise(&reading);

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&report).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {} ({})",
        style("Field report for").bold(),
        style(&robot.name).cyan(),
        reading.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    println!("{}", style("─".repeat(60)).dim());

    if !report.alerts.is_empty() {
        println!("{}:", style("Alerts").bold().red());
        for alert in &report.alerts {
            println!("  {} {}", style("▲").red(), alert);
        }
        println!();
    }

    println!("{}:", style("Observations").bold());
    for observation in &report.observations {
        println!("  {} {}", style("·").dim(), observation);
    }

    if !report.actions.is_empty() {
        println!();
        println!("{}:", style("Actions").bold());
        for (i, action) in report.actions.iter().enumerate() {
            println!("  {}. {}", style(i + 1).cyan(), action);
        }
    }

    if !report.monitoring.is_empty() {
        println!();
        println!("{}:", style("Monitoring").bold());
        for step in &report.monitoring {
            println!("  {} {}", style("•").dim(), step);
        }
    }

    if !report.follow_ups.is_empty() {
        println!();
        println!("{}:", style("Follow-ups").bold());
        for question in &report.follow_ups {
            println!("  {} {}", style("?").yellow(), question);
        }
    }

    Ok(())
}
