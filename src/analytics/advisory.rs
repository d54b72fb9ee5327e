//! Threshold-driven alerts, recommendations, and the advisory report
//!
//! Two layers share the same sensor thresholds. `alerts` and `recommendations`
//! produce the short strings attached to a reading's analysis. `advise` builds
//! the full field report shown by `finca advise`: per-metric observations,
//! prioritized actions, alerts, monitoring steps, and follow-up questions
//! when sensor coverage is incomplete.

use serde::Serialize;

use crate::entities::Reading;

/// Condition alerts for a single reading
pub fn alerts(reading: &Reading) -> Vec<String> {
    let mut alerts = Vec::new();

    if let Some(temp) = reading.atmosphere.and_then(|a| a.temperature_c) {
        if temp < 10.0 {
            alerts.push("Temperature very low - frost risk".to_string());
        }
        if temp > 35.0 {
            alerts.push("Temperature very high - heat stress".to_string());
        }
    }

    if let Some(humidity) = reading.air.and_then(|a| a.humidity_pct) {
        if humidity < 30.0 {
            alerts.push("Humidity very low - dehydration risk".to_string());
        }
        if humidity > 85.0 {
            alerts.push("Humidity very high - disease risk".to_string());
        }
    }

    if let Some(co2) = reading.air.and_then(|a| a.co2_ppm) {
        if co2 > 1000.0 {
            alerts.push("Elevated CO2 - insufficient ventilation".to_string());
        }
    }

    if let Some(lux) = reading.light.and_then(|l| l.lux) {
        if lux < 200.0 {
            alerts.push("Insufficient light - slow growth".to_string());
        }
        if lux > 2000.0 {
            alerts.push("Excessive light - scorch risk".to_string());
        }
    }

    alerts
}

/// Actionable recommendations for a single reading
pub fn recommendations(reading: &Reading) -> Vec<String> {
    let mut recs = Vec::new();

    if let Some(temp) = reading.atmosphere.and_then(|a| a.temperature_c) {
        if temp < 20.0 {
            recs.push("Consider raising the greenhouse temperature".to_string());
        }
        if temp > 30.0 {
            recs.push("Consider ventilating or cooling the environment".to_string());
        }
    }

    if let Some(humidity) = reading.air.and_then(|a| a.humidity_pct) {
        if humidity < 40.0 {
            recs.push("Raise humidity with irrigation or misting".to_string());
        }
        if humidity > 70.0 {
            recs.push("Improve ventilation to reduce humidity".to_string());
        }
    }

    if let Some(lux) = reading.light.and_then(|l| l.lux) {
        if lux < 500.0 {
            recs.push("Consider supplemental artificial lighting".to_string());
        }
        if lux > 1500.0 {
            recs.push("Consider shading to protect the plants".to_string());
        }
    }

    recs
}

/// Full rule-based field report
#[derive(Debug, Default, Serialize)]
pub struct AdvisoryReport {
    /// Per-metric interpretation of the current values
    pub observations: Vec<String>,
    /// Prioritized actions
    pub actions: Vec<String>,
    /// Critical conditions
    pub alerts: Vec<String>,
    /// Monitoring steps to schedule
    pub monitoring: Vec<String>,
    /// Questions to resolve missing context
    pub follow_ups: Vec<String>,
}

/// Build the advisory report for the latest reading
pub fn advise(reading: &Reading) -> AdvisoryReport {
    let mut report = AdvisoryReport::default();

    if let (Some(lat), Some(lon)) = (reading.latitude, reading.longitude) {
        report
            .observations
            .push(format!("Reported position: {:.5}, {:.5}", lat, lon));
    }

    advise_temperature(reading, &mut report);
    advise_humidity(reading, &mut report);
    advise_light(reading, &mut report);
    advise_co2(reading, &mut report);
    advise_soil(reading, &mut report);

    if reading.soil.and_then(|s| s.moisture_raw).is_none() {
        report.follow_ups.push(
            "Share recent observations of soil moisture or substrate texture".to_string(),
        );
    }
    if reading.light.and_then(|l| l.lux).is_none() {
        report.follow_ups.push(
            "Confirm whether the crop receives partial shade or light shifts during the day"
                .to_string(),
        );
    }

    if report.monitoring.is_empty() {
        report.monitoring.push(
            "Keep monitoring the sensors every 4-6 hours and record field observations"
                .to_string(),
        );
    }

    report
}

fn advise_temperature(reading: &Reading, report: &mut AdvisoryReport) {
    let Some(temp) = reading.temperature() else {
        return;
    };
    if temp > 35.0 {
        report.observations.push(format!(
            "Critical high temperature: {:.1}°C is above the optimal range for most crops",
            temp
        ));
        report.actions.push(
            "Set up temporary shade, increase irrigation frequency, consider misting systems"
                .to_string(),
        );
        report
            .alerts
            .push("Risk of heat stress and plant wilting".to_string());
        report
            .monitoring
            .push("Inspect the plants every 2-3 hours for stress signs".to_string());
    } else if temp > 30.0 {
        report.observations.push(format!(
            "High temperature: {:.1}°C suits tropical crops but needs attention for others",
            temp
        ));
        report
            .actions
            .push("Provide partial shade during the hottest hours (11:00-15:00)".to_string());
    } else if temp < 10.0 {
        report.observations.push(format!(
            "Critical low temperature: {:.1}°C can cause frost damage in sensitive crops",
            temp
        ));
        report
            .actions
            .push("Cover plants with frost cloth or heat the greenhouse".to_string());
        report.alerts.push("Risk of frost damage".to_string());
        report
            .monitoring
            .push("Check the temperature every hour overnight".to_string());
    } else if temp < 15.0 {
        report.observations.push(format!(
            "Low temperature: {:.1}°C slows growth but cold-season crops tolerate it",
            temp
        ));
        report
            .actions
            .push("Consider winter crops or additional protection".to_string());
    } else {
        report.observations.push(format!(
            "Optimal temperature: {:.1}°C is in the ideal range for most crops",
            temp
        ));
    }
}

fn advise_humidity(reading: &Reading, report: &mut AdvisoryReport) {
    let Some(humidity) = reading.air.and_then(|a| a.humidity_pct) else {
        return;
    };
    if humidity > 85.0 {
        report.observations.push(format!(
            "Critical high humidity: {:.0}% favors fungal and bacterial disease",
            humidity
        ));
        report.actions.push(
            "Improve ventilation, reduce irrigation, consider preventive fungicides".to_string(),
        );
        report
            .alerts
            .push("High risk of fungal disease (mildew, botrytis)".to_string());
        report
            .monitoring
            .push("Inspect leaves for spots, mold, or discoloration".to_string());
    } else if humidity > 70.0 {
        report.observations.push(format!(
            "High humidity: {:.0}% requires monitoring to prevent disease",
            humidity
        ));
        report
            .actions
            .push("Increase ventilation and avoid sprinkler irrigation".to_string());
    } else if humidity < 30.0 {
        report.observations.push(format!(
            "Critical low humidity: {:.0}% causes severe water stress",
            humidity
        ));
        report
            .actions
            .push("Increase irrigation, deploy misting, consider shade".to_string());
        report
            .alerts
            .push("Risk of wilting and reduced yield".to_string());
        report
            .monitoring
            .push("Check leaf and soil condition every 4 hours".to_string());
    } else if humidity < 50.0 {
        report.observations.push(format!(
            "Low humidity: {:.0}% may cause moderate water stress",
            humidity
        ));
        report
            .actions
            .push("Increase irrigation frequency or consider drought-tolerant crops".to_string());
    } else {
        report.observations.push(format!(
            "Optimal humidity: {:.0}% is ideal for most crops",
            humidity
        ));
    }
}

fn advise_light(reading: &Reading, report: &mut AdvisoryReport) {
    let Some(lux) = reading.light.and_then(|l| l.lux) else {
        return;
    };
    if lux < 50.0 {
        report.observations.push(format!(
            "Insufficient light: {:.0} lux is critical for photosynthesis",
            lux
        ));
        report
            .actions
            .push("Install supplemental LED lighting or switch to shade crops".to_string());
        report
            .alerts
            .push("Plants cannot photosynthesize adequately".to_string());
    } else if lux < 200.0 {
        report.observations.push(format!(
            "Low light: {:.0} lux limits growth of light-demanding crops",
            lux
        ));
        report
            .actions
            .push("Consider shade crops or supplemental lighting".to_string());
    } else if lux > 50_000.0 {
        report.observations.push(format!(
            "Intense light: {:.0} lux is excellent for high-light crops",
            lux
        ));
        report
            .actions
            .push("Favor sun crops such as tomatoes and peppers".to_string());
    } else if lux > 10_000.0 {
        report.observations.push(format!(
            "Abundant light: {:.0} lux is ideal for most crops",
            lux
        ));
    } else {
        report.observations.push(format!(
            "Adequate light: {:.0} lux is sufficient for normal growth",
            lux
        ));
    }
}

fn advise_co2(reading: &Reading, report: &mut AdvisoryReport) {
    let Some(co2) = reading.air.and_then(|a| a.co2_ppm) else {
        return;
    };
    if co2 < 200.0 {
        report.observations.push(format!(
            "Critical low CO2: {:.0} ppm severely limits photosynthesis",
            co2
        ));
        report
            .actions
            .push("Improve airflow or consider CO2 enrichment".to_string());
        report
            .alerts
            .push("Plants cannot grow adequately at this CO2 level".to_string());
    } else if co2 < 300.0 {
        report.observations.push(format!(
            "Low CO2: {:.0} ppm may limit growth",
            co2
        ));
        report
            .actions
            .push("Improve ventilation of the growing area".to_string());
    } else if co2 > 2000.0 {
        report.observations.push(format!(
            "Critical high CO2: {:.0} ppm can be toxic to plants and people",
            co2
        ));
        report
            .actions
            .push("Ventilate the area immediately".to_string());
        report.alerts.push("Risk of CO2 toxicity".to_string());
    } else if co2 > 1000.0 {
        report.observations.push(format!(
            "High CO2: {:.0} ppm may stress the plants",
            co2
        ));
        report
            .actions
            .push("Improve ventilation of the growing area".to_string());
        report
            .alerts
            .push("Elevated CO2, check the ventilation".to_string());
    } else {
        report.observations.push(format!(
            "Optimal CO2: {:.0} ppm is ideal for photosynthesis",
            co2
        ));
    }
}

fn advise_soil(reading: &Reading, report: &mut AdvisoryReport) {
    if let Some(soil_temp) = reading.soil.and_then(|s| s.temperature_c) {
        if soil_temp > 35.0 {
            report.observations.push(format!(
                "High soil temperature: {:.1}°C can damage roots",
                soil_temp
            ));
            report
                .actions
                .push("Apply mulch to cool the soil and increase irrigation".to_string());
        } else if soil_temp < 10.0 {
            report.observations.push(format!(
                "Low soil temperature: {:.1}°C slows nutrient uptake",
                soil_temp
            ));
            report
                .actions
                .push("Consider soil warming or cold-season crops".to_string());
        } else {
            report.observations.push(format!(
                "Optimal soil temperature: {:.1}°C favors root growth",
                soil_temp
            ));
        }
    }

    if let Some(moisture) = reading.soil.and_then(|s| s.moisture_raw) {
        if moisture < 200.0 {
            report.observations.push(format!(
                "Dry soil: moisture reading {:.0} indicates water-stress risk",
                moisture
            ));
            report
                .actions
                .push("Irrigate now and consider more frequent watering cycles".to_string());
            report
                .alerts
                .push("Risk of wilting from lack of water".to_string());
        } else if moisture > 600.0 {
            report.observations.push(format!(
                "Saturated soil: moisture reading {:.0} indicates waterlogging risk",
                moisture
            ));
            report
                .actions
                .push("Reduce irrigation and improve soil drainage".to_string());
            report.alerts.push("Risk of root rot".to_string());
        } else {
            report.observations.push(format!(
                "Adequate soil moisture: reading {:.0} is in the optimal range",
                moisture
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use crate::entities::{AirSample, AtmosphereSample, LightSample, SoilSample};
    use chrono::Utc;

    fn reading() -> Reading {
        Reading::new(EntityId::new(EntityPrefix::Robot), Utc::now())
    }

    #[test]
    fn test_heat_alert_at_36c() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(36.0),
            pressure_hpa: None,
        });
        let alerts = alerts(&r);
        assert!(alerts.iter().any(|a| a.contains("heat stress")));
    }

    #[test]
    fn test_frost_alert_below_10c() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(4.0),
            pressure_hpa: None,
        });
        assert!(alerts(&r).iter().any(|a| a.contains("frost")));
    }

    #[test]
    fn test_no_alerts_in_optimal_conditions() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(25.0),
            pressure_hpa: Some(1010.0),
        });
        r.air = Some(AirSample {
            humidity_pct: Some(55.0),
            co2_ppm: Some(500.0),
            temperature_c: None,
        });
        r.light = Some(LightSample {
            lux: Some(800.0),
            uv_index: None,
        });
        assert!(alerts(&r).is_empty());
        assert!(recommendations(&r).is_empty());
    }

    #[test]
    fn test_recommendations_for_cold_dry_conditions() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(16.0),
            pressure_hpa: None,
        });
        r.air = Some(AirSample {
            humidity_pct: Some(35.0),
            co2_ppm: None,
            temperature_c: None,
        });
        let recs = recommendations(&r);
        assert!(recs.iter().any(|s| s.contains("raising the greenhouse")));
        assert!(recs.iter().any(|s| s.contains("irrigation or misting")));
    }

    #[test]
    fn test_advise_reports_critical_heat() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(38.0),
            pressure_hpa: None,
        });
        let report = advise(&r);
        assert!(report
            .observations
            .iter()
            .any(|o| o.contains("Critical high temperature")));
        assert!(report.alerts.iter().any(|a| a.contains("heat stress")));
        assert!(!report.monitoring.is_empty());
    }

    #[test]
    fn test_advise_follow_ups_for_missing_sensors() {
        let report = advise(&reading());
        assert_eq!(report.follow_ups.len(), 2);
    }

    #[test]
    fn test_advise_no_follow_ups_with_full_coverage() {
        let mut r = reading();
        r.soil = Some(SoilSample {
            moisture_raw: Some(400.0),
            temperature_c: Some(22.0),
        });
        r.light = Some(LightSample {
            lux: Some(900.0),
            uv_index: Some(5.0),
        });
        let report = advise(&r);
        assert!(report.follow_ups.is_empty());
    }

    #[test]
    fn test_advise_default_monitoring_step() {
        let mut r = reading();
        r.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(25.0),
            pressure_hpa: None,
        });
        let report = advise(&r);
        assert_eq!(report.monitoring.len(), 1);
        assert!(report.monitoring[0].contains("every 4-6 hours"));
    }
}
