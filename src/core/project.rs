//! Project discovery and layout
//!
//! A finca project is a directory containing `finca.yaml`. Discovery walks up
//! from the current directory so commands work from any subdirectory. The
//! telemetry database lives under `.finca/`.

use std::path::{Path, PathBuf};

use crate::core::config::Config;

/// Project configuration file name
pub const CONFIG_FILE: &str = "finca.yaml";

/// Data directory within a project
pub const DATA_DIR: &str = ".finca";

/// Default database file name within the data directory
pub const DB_FILE: &str = "telemetry.db";

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Not inside a finca project (no {CONFIG_FILE} found in this or any parent directory)")]
    NotFound,

    #[error("A finca project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to read project config: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A discovered finca project
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Discover the enclosing project by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Discover the enclosing project by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = start;
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Config::load(&candidate)?;
                return Ok(Project {
                    root: dir.to_path_buf(),
                    config,
                });
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Err(ProjectError::NotFound),
            }
        }
    }

    /// Initialize a new project at the given directory
    pub fn init(root: &Path, config: Config) -> Result<Self, ProjectError> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }
        std::fs::create_dir_all(root.join(DATA_DIR))?;
        config.save(&config_path)?;
        Ok(Project {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path to the telemetry database
    pub fn db_path(&self) -> PathBuf {
        match &self.config.database {
            Some(path) => self.root.join(path),
            None => self.root.join(DATA_DIR).join(DB_FILE),
        }
    }
}
