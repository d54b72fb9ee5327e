//! Weather scenario simulator with linear yield-impact scoring
//!
//! The simulator is fully deterministic: daily variation comes from a
//! sinusoidal pseudo-random source seeded by the start date, so the same
//! parameters always produce the same forecast. Yield impact is a linear
//! penalty on the distance from each crop's optimal temperature and
//! precipitation.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Yield penalty per °C away from the crop's optimal temperature
pub const TEMPERATURE_SENSITIVITY: f64 = 5.0;

/// Yield penalty per mm away from the crop's optimal precipitation
pub const PRECIPITATION_SENSITIVITY: f64 = 3.0;

/// Crop being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Coffee,
    Maize,
    Rice,
    Banana,
    Potato,
    Tomato,
    Cacao,
    Other,
}

impl Crop {
    /// Optimal (temperature °C, precipitation mm/day) for the crop
    pub fn optimal_conditions(&self) -> (f64, f64) {
        match self {
            Crop::Coffee => (22.0, 8.0),
            Crop::Maize => (24.0, 10.0),
            Crop::Rice => (26.0, 15.0),
            Crop::Banana => (27.0, 12.0),
            Crop::Potato => (18.0, 7.0),
            Crop::Tomato => (24.0, 6.0),
            Crop::Cacao => (25.0, 14.0),
            Crop::Other => (24.0, 10.0),
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Crop::Coffee => "coffee",
            Crop::Maize => "maize",
            Crop::Rice => "rice",
            Crop::Banana => "banana",
            Crop::Potato => "potato",
            Crop::Tomato => "tomato",
            Crop::Cacao => "cacao",
            Crop::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Growing region; sets the baseline temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    Central,
    South,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Region::North => "north",
            Region::Central => "central",
            Region::South => "south",
        };
        write!(f, "{}", s)
    }
}

impl Region {
    pub fn base_temperature(&self) -> f64 {
        match self {
            Region::North => 28.0,
            Region::South => 18.0,
            Region::Central => 23.0,
        }
    }
}

/// Climate scenario applied on top of the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Scenario {
    #[default]
    Normal,
    Drought,
    Rainy,
    HeatWave,
}

impl Scenario {
    /// (temperature offset °C, precipitation offset mm, variance multiplier)
    pub fn modifiers(&self) -> (f64, f64, f64) {
        match self {
            Scenario::Normal => (0.0, 0.0, 1.0),
            Scenario::Drought => (3.0, -8.0, 0.5),
            Scenario::Rainy => (-2.0, 12.0, 1.5),
            Scenario::HeatWave => (5.0, -3.0, 1.2),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scenario::Normal => "normal",
            Scenario::Drought => "drought",
            Scenario::Rainy => "rainy",
            Scenario::HeatWave => "heat-wave",
        };
        write!(f, "{}", s)
    }
}

/// Deterministic pseudo-random number in [0, 1) from a seed and index
pub fn seeded_random(seed: f64, index: u32) -> f64 {
    let x = (seed + index as f64 * 2.5).sin() * 10000.0;
    x - x.floor()
}

/// Expected yield (0-100) for the given conditions and crop.
///
/// Linear penalty on the distance from the crop's optimal temperature and
/// precipitation, averaged over both factors.
pub fn yield_impact(temperature: f64, precipitation: f64, crop: Crop) -> f64 {
    let (optimal_temp, optimal_precip) = crop.optimal_conditions();

    let temp_diff = (temperature - optimal_temp).abs();
    let temp_impact = (100.0 - temp_diff * TEMPERATURE_SENSITIVITY).max(0.0);

    let precip_diff = (precipitation - optimal_precip).abs();
    let precip_impact = (100.0 - precip_diff * PRECIPITATION_SENSITIVITY).max(0.0);

    (temp_impact + precip_impact) / 2.0
}

/// Classification of the average simulated yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldClass {
    Optimal,
    Moderate,
    Low,
}

impl YieldClass {
    pub fn from_average(avg: f64) -> Self {
        if avg > 80.0 {
            YieldClass::Optimal
        } else if avg > 60.0 {
            YieldClass::Moderate
        } else {
            YieldClass::Low
        }
    }
}

impl std::fmt::Display for YieldClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YieldClass::Optimal => write!(f, "optimal"),
            YieldClass::Moderate => write!(f, "moderate"),
            YieldClass::Low => write!(f, "low"),
        }
    }
}

/// One simulated day
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimulatedDay {
    pub date: NaiveDate,
    pub temperature: f64,
    pub precipitation: f64,
    pub yield_pct: f64,
}

/// Simulation parameters
#[derive(Debug, Clone, Copy)]
pub struct Simulation {
    pub region: Region,
    pub crop: Crop,
    pub scenario: Scenario,
    pub start_date: NaiveDate,
    /// Days to simulate (7-30 on the CLI)
    pub days: u32,
    /// User temperature adjustment in °C
    pub temp_adjust: f64,
    /// User precipitation adjustment in mm
    pub precip_adjust: f64,
}

/// Simulation output
#[derive(Debug, Serialize)]
pub struct SimulationResult {
    pub days: Vec<SimulatedDay>,
    pub average_yield: f64,
    pub classification: YieldClass,
    pub recommendations: Vec<String>,
}

impl Simulation {
    pub fn run(&self) -> SimulationResult {
        let base_temp = self.region.base_temperature();
        let (scenario_temp, scenario_precip, variance) = self.scenario.modifiers();

        // Seed from the start date so reruns are reproducible
        let seed = (self.start_date.day() + self.start_date.month0() * 31) as f64;

        let mut days = Vec::with_capacity(self.days as usize);
        for i in 0..self.days {
            let date = self.start_date + Duration::days(i as i64);

            let temp_variation = (i as f64 / 3.0).sin() * 2.0 * variance;
            let precip_variation = seeded_random(seed, i) * 10.0 * variance;

            let temperature = base_temp + self.temp_adjust + scenario_temp + temp_variation;
            let precipitation =
                (5.0 + self.precip_adjust + scenario_precip + precip_variation).max(0.0);

            days.push(SimulatedDay {
                date,
                temperature,
                precipitation,
                yield_pct: yield_impact(temperature, precipitation, self.crop),
            });
        }

        let average_yield = if days.is_empty() {
            0.0
        } else {
            days.iter().map(|d| d.yield_pct).sum::<f64>() / days.len() as f64
        };
        let classification = YieldClass::from_average(average_yield);

        SimulationResult {
            recommendations: self.recommendations(average_yield),
            days,
            average_yield,
            classification,
        }
    }

    fn recommendations(&self, average_yield: f64) -> Vec<String> {
        let mut recs = Vec::new();
        if average_yield < 60.0 {
            recs.push(
                "Expected yield is low. Consider shifting planting dates or installing irrigation."
                    .to_string(),
            );
        }
        match self.scenario {
            Scenario::Drought => recs.push(
                "Under drought conditions, efficient irrigation and mulching are critical to conserve moisture."
                    .to_string(),
            ),
            Scenario::Rainy => recs.push(
                "High precipitation can cause fungal disease. Ensure good drainage and monitor for pests."
                    .to_string(),
            ),
            _ => {}
        }
        if average_yield >= 80.0 {
            recs.push(
                "Conditions are optimal for the crop. Maintain current management practices."
                    .to_string(),
            );
        }
        recs
    }
}
