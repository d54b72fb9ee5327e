//! `finca init` command - project initialization

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::project::Project;
use crate::core::store::TelemetryStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Project (farm) name; defaults to the directory name
    pub name: Option<String>,

    /// Directory to initialize (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Author recorded in the project config
    #[arg(long, env = "FINCA_AUTHOR")]
    pub author: Option<String>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir().into_diagnostic()?,
    };
    std::fs::create_dir_all(&root).into_diagnostic()?;

    let name = args.name.unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "finca".to_string())
    });
    let author = args
        .author
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "unknown".to_string());

    let config = Config::new(name.clone(), author);
    let project = Project::init(&root, config).map_err(|e| miette::miette!("{}", e))?;

    // Create the database up front so the first command doesn't have to
    TelemetryStore::open(&project).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized finca project {}",
        style("✓").green(),
        style(&name).cyan()
    );
    println!("   {}", style(project.db_path().display()).dim());
    println!();
    println!("Register a robot with: {}", style("finca robot new").yellow());

    Ok(())
}
