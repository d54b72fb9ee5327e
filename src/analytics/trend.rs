//! Split-half trend classification

use serde::{Deserialize, Serialize};

/// Direction of a metric over a time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Falling => write!(f, "falling"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

impl std::str::FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rising" => Ok(Trend::Rising),
            "falling" => Ok(Trend::Falling),
            "stable" => Ok(Trend::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// Classify the direction of an ordered series of samples.
///
/// The series is split in half and the mean of the second half is compared to
/// the mean of the first; a change beyond ±5% classifies as rising or falling.
/// Fewer than two samples classify as stable.
pub fn trend_of(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }

    let mid = values.len() / 2;
    let first_avg = values[..mid].iter().sum::<f64>() / mid as f64;
    let second_avg = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;

    if first_avg == 0.0 {
        return Trend::Stable;
    }

    let change = (second_avg - first_avg) / first_avg * 100.0;
    if change > 5.0 {
        Trend::Rising
    } else if change < -5.0 {
        Trend::Falling
    } else {
        Trend::Stable
    }
}
