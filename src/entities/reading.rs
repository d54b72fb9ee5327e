//! Sensor reading entity
//!
//! A reading groups the samples taken by one robot at one instant. Each sensor
//! is optional: robots carry different packages and individual sensors drop
//! out in the field. Values outside the plausible physical range are discarded
//! at ingest and stored as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::EntityId;

/// Barometric sensor sample (temperature + pressure)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AtmosphereSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<f64>,
}

/// Air quality sample (humidity + CO2 + temperature)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AirSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_ppm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

/// Light sensor sample
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LightSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lux: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
}

/// Soil probe sample
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SoilSample {
    /// Raw capacitive moisture value (0-1000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_raw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

/// Satellite-derived climate sample attached to a reading
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClimateSample {
    pub temperature_2m: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub temperature_range: f64,
    pub dew_point: f64,
    pub wet_bulb: f64,
    pub surface_temperature: f64,
    pub precipitation_mm: f64,
    pub relative_humidity: f64,
    pub specific_humidity: f64,
    pub wind_speed: f64,
    pub wind_speed_max: f64,
    pub wind_speed_min: f64,
    pub longwave_radiation: f64,
    pub shortwave_radiation: f64,
    pub clear_sky_radiation: f64,
    pub clarity_index: f64,
    pub evaporation: f64,
    pub surface_pressure: f64,
}

/// One sensor reading from one robot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<AtmosphereSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<AirSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<ClimateSample>,
}

impl Reading {
    pub fn new(robot_id: EntityId, timestamp: DateTime<Utc>) -> Self {
        Reading {
            id: EntityId::new(crate::core::EntityPrefix::Reading),
            robot_id,
            timestamp,
            latitude: None,
            longitude: None,
            atmosphere: None,
            air: None,
            light: None,
            soil: None,
            climate: None,
        }
    }

    /// Discard any sample values outside the plausible physical ranges
    pub fn validated(mut self) -> Self {
        if let Some(a) = &mut self.atmosphere {
            a.temperature_c = a.temperature_c.filter(|v| valid_temperature(*v));
            a.pressure_hpa = a.pressure_hpa.filter(|v| valid_pressure(*v));
        }
        if let Some(a) = &mut self.air {
            a.humidity_pct = a.humidity_pct.filter(|v| valid_humidity(*v));
            a.co2_ppm = a.co2_ppm.filter(|v| valid_co2(*v));
            a.temperature_c = a.temperature_c.filter(|v| valid_temperature(*v));
        }
        if let Some(l) = &mut self.light {
            l.lux = l.lux.filter(|v| valid_lux(*v));
            l.uv_index = l.uv_index.filter(|v| valid_uv(*v));
        }
        if let Some(s) = &mut self.soil {
            s.moisture_raw = s.moisture_raw.filter(|v| valid_soil_moisture(*v));
            s.temperature_c = s.temperature_c.filter(|v| valid_soil_temperature(*v));
        }
        self
    }

    /// Ambient temperature, preferring the barometric sensor
    pub fn temperature(&self) -> Option<f64> {
        self.atmosphere
            .and_then(|a| a.temperature_c)
            .or_else(|| self.air.and_then(|a| a.temperature_c))
    }
}

// Plausible physical ranges; values outside are sensor faults, not data.
pub fn valid_temperature(v: f64) -> bool {
    (-50.0..=80.0).contains(&v)
}

pub fn valid_humidity(v: f64) -> bool {
    (0.0..=100.0).contains(&v)
}

pub fn valid_pressure(v: f64) -> bool {
    (800.0..=1200.0).contains(&v)
}

pub fn valid_co2(v: f64) -> bool {
    (200.0..=2000.0).contains(&v)
}

pub fn valid_lux(v: f64) -> bool {
    (0.0..=100_000.0).contains(&v)
}

pub fn valid_uv(v: f64) -> bool {
    (0.0..=15.0).contains(&v)
}

pub fn valid_soil_moisture(v: f64) -> bool {
    (0.0..=1000.0).contains(&v)
}

pub fn valid_soil_temperature(v: f64) -> bool {
    (-20.0..=60.0).contains(&v)
}

/// One flattened row of the historical window used by trend and stats queries
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub lux: f64,
    pub soil_moisture: f64,
    pub co2_ppm: f64,
    pub pressure_hpa: f64,
    pub uv_index: f64,
    pub soil_temperature_c: f64,
}
