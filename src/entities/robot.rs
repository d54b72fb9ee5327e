//! Field robot entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Operational status of a robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum RobotStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RobotStatus::Active => write!(f, "active"),
            RobotStatus::Inactive => write!(f, "inactive"),
            RobotStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl std::str::FromStr for RobotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(RobotStatus::Active),
            "inactive" => Ok(RobotStatus::Inactive),
            "maintenance" => Ok(RobotStatus::Maintenance),
            _ => Err(format!("Unknown robot status: {}", s)),
        }
    }
}

/// A field robot carrying the sensor package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Robot {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Named location (plot, greenhouse, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Last reported latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Last reported longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Operational status
    #[serde(default)]
    pub status: RobotStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last update timestamp
    pub updated: DateTime<Utc>,
}

impl Robot {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Robot {
            id: EntityId::new(EntityPrefix::Robot),
            name,
            location: None,
            latitude: None,
            longitude: None,
            status: RobotStatus::default(),
            created: now,
            updated: now,
        }
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }
}

/// Fleet-level aggregate for one robot, as shown on the dashboard listing
#[derive(Debug, Clone, Serialize)]
pub struct RobotSummary {
    pub id: EntityId,
    pub name: String,
    pub location: Option<String>,
    pub status: RobotStatus,
    pub last_activity: DateTime<Utc>,
    /// Total readings recorded
    pub total_readings: u64,
    /// Readings recorded today (UTC)
    pub readings_today: u64,
    /// Mean air temperature across all readings, if any
    pub avg_temperature: Option<f64>,
    /// Mean relative humidity across all readings, if any
    pub avg_humidity: Option<f64>,
}
