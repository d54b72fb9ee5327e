//! Weighted crop-environment health score
//!
//! Each available factor contributes 25 points inside its optimal band, 15 in
//! the tolerable band and 5 outside; the score is the rounded mean over the
//! factors actually present. No factors at all scores 0.

use crate::entities::Reading;

fn bucket(value: f64, optimal: (f64, f64), tolerable: (f64, f64)) -> u32 {
    if value >= optimal.0 && value <= optimal.1 {
        25
    } else if value >= tolerable.0 && value <= tolerable.1 {
        15
    } else {
        5
    }
}

/// Score a reading's growing conditions on a 0-25 scale
pub fn health_score(reading: &Reading) -> u32 {
    let mut score = 0u32;
    let mut factors = 0u32;

    // Temperature: 20-30°C optimal, 15-35°C tolerable
    if let Some(temp) = reading.atmosphere.and_then(|a| a.temperature_c) {
        score += bucket(temp, (20.0, 30.0), (15.0, 35.0));
        factors += 1;
    }

    // Humidity: 40-70% optimal, 30-80% tolerable
    if let Some(humidity) = reading.air.and_then(|a| a.humidity_pct) {
        score += bucket(humidity, (40.0, 70.0), (30.0, 80.0));
        factors += 1;
    }

    // CO2: 400-600 ppm optimal, 300-800 tolerable
    if let Some(co2) = reading.air.and_then(|a| a.co2_ppm) {
        score += bucket(co2, (400.0, 600.0), (300.0, 800.0));
        factors += 1;
    }

    // Light: 500-1000 lux optimal, 200-1500 tolerable
    if let Some(lux) = reading.light.and_then(|l| l.lux) {
        score += bucket(lux, (500.0, 1000.0), (200.0, 1500.0));
        factors += 1;
    }

    if factors > 0 {
        (score as f64 / factors as f64).round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use crate::entities::{AirSample, AtmosphereSample, LightSample};
    use chrono::Utc;

    fn reading() -> Reading {
        Reading::new(EntityId::new(EntityPrefix::Robot), Utc::now())
    }

    #[test]
    fn test_all_optimal_scores_25() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(25.0),
            pressure_hpa: None,
        });
        r.air = Some(AirSample {
            humidity_pct: Some(55.0),
            co2_ppm: Some(500.0),
            temperature_c: None,
        });
        r.light = Some(LightSample {
            lux: Some(750.0),
            uv_index: None,
        });
        assert_eq!(health_score(&r), 25);
    }

    #[test]
    fn test_no_factors_scores_zero() {
        assert_eq!(health_score(&reading()), 0);
    }

    #[test]
    fn test_mixed_bands_average() {
        let mut r = reading();
        // Optimal temperature (25) + out-of-band humidity (5) -> (25+5)/2 = 15
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(25.0),
            pressure_hpa: None,
        });
        r.air = Some(AirSample {
            humidity_pct: Some(95.0),
            co2_ppm: None,
            temperature_c: None,
        });
        assert_eq!(health_score(&r), 15);
    }

    #[test]
    fn test_tolerable_band_scores_15() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(17.0),
            pressure_hpa: None,
        });
        assert_eq!(health_score(&r), 15);
    }

    #[test]
    fn test_rounding() {
        let mut r = reading();
        // temp optimal (25), humidity tolerable (15), co2 out (5) -> 45/3 = 15
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(22.0),
            pressure_hpa: None,
        });
        r.air = Some(AirSample {
            humidity_pct: Some(35.0),
            co2_ppm: Some(1500.0),
            temperature_c: None,
        });
        assert_eq!(health_score(&r), 15);
    }
}
