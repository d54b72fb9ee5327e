//! Project configuration (`finca.yaml`)

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yml::Error),
}

/// Project-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project (farm) name
    pub name: String,

    /// Default author recorded on new entities
    pub author: String,

    /// Database path relative to the project root; defaults to `.finca/telemetry.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl Config {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Config {
            name: name.into(),
            author: author.into(),
            database: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let display = path.display().to_string();
        let content = serde_yml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("finca.yaml");

        let config = Config::new("la esperanza", "maria");
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.name, "la esperanza");
        assert_eq!(loaded.author, "maria");
        assert!(loaded.database.is_none());
    }

    #[test]
    fn test_config_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("finca.yaml");
        std::fs::write(&path, "{not yaml").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
