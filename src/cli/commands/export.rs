//! `finca export` command - CSV export of a robot's history window

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, resolve_robot};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Robot name, id, or id prefix
    pub robot: String,

    /// Window size in hours
    #[arg(long, default_value_t = 168)]
    pub hours: i64,

    /// Output file (defaults to stdout)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let robot = resolve_robot(&store, &args.robot)?;

    let points = store
        .history(&robot.id, args.hours)
        .map_err(|e| miette::miette!("{}", e))?;

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path).into_diagnostic()?;
            for point in &points {
                writer.serialize(point).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
            println!(
                "{} Exported {} reading(s) for {} to {}",
                style("✓").green(),
                style(points.len()).cyan(),
                style(&robot.name).cyan(),
                path.display()
            );
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for point in &points {
                writer.serialize(point).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
