//! Sensor-data analytics: trends, health scoring, alerts, and anomaly detection

pub mod advisory;
pub mod health;
pub mod stats;
pub mod trend;

pub use advisory::{advise, alerts, recommendations, AdvisoryReport};
pub use health::health_score;
pub use stats::{window_stats, Anomaly, Averages, Range, WindowStats, WindowTrends};
pub use trend::{trend_of, Trend};

use serde::Serialize;

use crate::entities::{HistoricalPoint, Reading};

/// Per-metric trends attached to a reading's analysis
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ReadingTrends {
    pub temperature: Trend,
    pub humidity: Trend,
    pub pressure: Trend,
}

/// Computed analysis of the latest reading plus its recent history
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub health_score: u32,
    pub optimality_score: u32,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub trends: ReadingTrends,
}

/// Analyze the current reading against its trailing history window.
///
/// The window is the flattened rows of the last few hours; zero values are
/// the store's NULL sentinel and are dropped before trend classification.
pub fn analyze(reading: &Reading, history: &[HistoricalPoint]) -> Analysis {
    let temperatures: Vec<f64> = history
        .iter()
        .map(|p| p.temperature_c)
        .filter(|v| *v > 0.0)
        .collect();
    let humidities: Vec<f64> = history
        .iter()
        .map(|p| p.humidity_pct)
        .filter(|v| *v > 0.0)
        .collect();
    let pressures: Vec<f64> = history
        .iter()
        .map(|p| p.pressure_hpa)
        .filter(|v| *v > 0.0)
        .collect();

    let score = health_score(reading);
    Analysis {
        health_score: score,
        // Same computation for now; kept as a separate field so the scores
        // can diverge without changing consumers.
        optimality_score: score,
        alerts: alerts(reading),
        recommendations: recommendations(reading),
        trends: ReadingTrends {
            temperature: trend_of(&temperatures),
            humidity: trend_of(&humidities),
            pressure: trend_of(&pressures),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use crate::entities::AtmosphereSample;
    use chrono::Utc;

    fn history_point(temperature: f64) -> HistoricalPoint {
        HistoricalPoint {
            timestamp: Utc::now(),
            temperature_c: temperature,
            humidity_pct: 0.0,
            lux: 0.0,
            soil_moisture: 0.0,
            co2_ppm: 0.0,
            pressure_hpa: 0.0,
            uv_index: 0.0,
            soil_temperature_c: 0.0,
        }
    }

    #[test]
    fn test_analyze_combines_score_alerts_and_trends() {
        let mut reading = Reading::new(EntityId::new(EntityPrefix::Robot), Utc::now());
        reading.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(36.0),
            pressure_hpa: Some(1010.0),
        });

        let history: Vec<_> = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0]
            .iter()
            .map(|t| history_point(*t))
            .collect();

        let analysis = analyze(&reading, &history);
        assert_eq!(analysis.health_score, analysis.optimality_score);
        assert!(analysis.alerts.iter().any(|a| a.contains("heat stress")));
        assert_eq!(analysis.trends.temperature, Trend::Rising);
        assert_eq!(analysis.trends.humidity, Trend::Stable);
    }

    #[test]
    fn test_analyze_with_empty_history() {
        let reading = Reading::new(EntityId::new(EntityPrefix::Robot), Utc::now());
        let analysis = analyze(&reading, &[]);
        assert_eq!(analysis.health_score, 0);
        assert_eq!(analysis.trends.pressure, Trend::Stable);
    }
}
