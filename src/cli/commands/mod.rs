//! CLI command implementations

pub mod advise;
pub mod analyze;
pub mod export;
pub mod init;
pub mod market;
pub mod reading;
pub mod robot;
pub mod seed;
pub mod sim;
pub mod stats;

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::store::TelemetryStore;
use crate::entities::robot::Robot;

/// Locate the enclosing project, honoring --project / FINCA_PROJECT
pub(crate) fn open_project(global: &GlobalOpts) -> Result<Project> {
    let project = match &global.project {
        Some(dir) => Project::discover_from(dir),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}

/// Open the telemetry store for the discovered project
pub(crate) fn open_store(global: &GlobalOpts) -> Result<(Project, TelemetryStore)> {
    let project = open_project(global)?;
    let store = TelemetryStore::open(&project).map_err(|e| miette::miette!("{}", e))?;
    Ok((project, store))
}

/// Resolve a robot by name, id, or unique id prefix
pub(crate) fn resolve_robot(store: &TelemetryStore, reference: &str) -> Result<Robot> {
    match store.find_robot(reference) {
        Ok(Some(robot)) => Ok(robot),
        Ok(None) => Err(miette::miette!(
            "No robot found matching '{}'. List robots with: finca robot list",
            reference
        )),
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
