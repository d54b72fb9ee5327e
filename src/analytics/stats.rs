//! Windowed statistics and anomaly detection
//!
//! Operates on the flattened historical window. Zero values are the NULL
//! sentinel from the store's outer joins and are dropped before analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::trend::{trend_of, Trend};
use crate::entities::HistoricalPoint;

/// Deviation-from-mean threshold for anomaly flagging (20%)
const ANOMALY_THRESHOLD: f64 = 0.2;

/// Mean values over the window
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Averages {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub co2: f64,
    pub light: f64,
}

/// Min/max range of one metric
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Per-metric trends over the window
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WindowTrends {
    pub temperature: Trend,
    pub humidity: Trend,
    pub pressure: Trend,
}

/// A sample deviating more than 20% from the window mean
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub timestamp: DateTime<Utc>,
    pub metric: &'static str,
    pub value: f64,
    /// The window mean the value was compared against
    pub expected: f64,
    /// Deviation from the mean in percent
    pub deviation_pct: f64,
}

/// Windowed statistics for one robot
#[derive(Debug, Serialize)]
pub struct WindowStats {
    pub averages: Averages,
    pub temperature_range: Range,
    pub humidity_range: Range,
    pub pressure_range: Range,
    pub trends: WindowTrends,
    pub anomalies: Vec<Anomaly>,
}

fn positives(points: &[HistoricalPoint], metric: impl Fn(&HistoricalPoint) -> f64) -> Vec<f64> {
    points.iter().map(&metric).filter(|v| *v > 0.0).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn range(values: &[f64]) -> Range {
    if values.is_empty() {
        return Range::default();
    }
    Range {
        min: values.iter().cloned().fold(f64::INFINITY, f64::min),
        max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    }
}

fn flag_anomalies(
    points: &[HistoricalPoint],
    metric_name: &'static str,
    metric: impl Fn(&HistoricalPoint) -> f64,
    expected: f64,
    out: &mut Vec<Anomaly>,
) {
    if expected == 0.0 {
        return;
    }
    for point in points {
        let value = metric(point);
        if value <= 0.0 {
            continue;
        }
        let deviation = (value - expected).abs() / expected;
        if deviation > ANOMALY_THRESHOLD {
            out.push(Anomaly {
                timestamp: point.timestamp,
                metric: metric_name,
                value,
                expected,
                deviation_pct: deviation * 100.0,
            });
        }
    }
}

/// Compute averages, ranges, trends, and anomalies over a history window
pub fn window_stats(points: &[HistoricalPoint]) -> WindowStats {
    let temperatures = positives(points, |p| p.temperature_c);
    let humidities = positives(points, |p| p.humidity_pct);
    let pressures = positives(points, |p| p.pressure_hpa);
    let co2s = positives(points, |p| p.co2_ppm);
    let lights = positives(points, |p| p.lux);

    let averages = Averages {
        temperature: mean(&temperatures),
        humidity: mean(&humidities),
        pressure: mean(&pressures),
        co2: mean(&co2s),
        light: mean(&lights),
    };

    let mut anomalies = Vec::new();
    flag_anomalies(
        points,
        "temperature",
        |p| p.temperature_c,
        averages.temperature,
        &mut anomalies,
    );
    flag_anomalies(
        points,
        "humidity",
        |p| p.humidity_pct,
        averages.humidity,
        &mut anomalies,
    );
    flag_anomalies(
        points,
        "pressure",
        |p| p.pressure_hpa,
        averages.pressure,
        &mut anomalies,
    );

    WindowStats {
        averages,
        temperature_range: range(&temperatures),
        humidity_range: range(&humidities),
        pressure_range: range(&pressures),
        trends: WindowTrends {
            temperature: trend_of(&temperatures),
            humidity: trend_of(&humidities),
            pressure: trend_of(&pressures),
        },
        anomalies,
    }
}
