//! Agricultural market price entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a price movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

impl PriceTrend {
    /// Classify a percent change; movements within ±0.5% count as stable
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct > 0.5 {
            PriceTrend::Up
        } else if change_pct < -0.5 {
            PriceTrend::Down
        } else {
            PriceTrend::Stable
        }
    }
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTrend::Up => write!(f, "up"),
            PriceTrend::Down => write!(f, "down"),
            PriceTrend::Stable => write!(f, "stable"),
        }
    }
}

impl std::str::FromStr for PriceTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(PriceTrend::Up),
            "down" => Ok(PriceTrend::Down),
            "stable" => Ok(PriceTrend::Stable),
            _ => Err(format!("Unknown price trend: {}", s)),
        }
    }
}

/// A tracked product with its seeding baseline
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub name: &'static str,
    /// Baseline price in colones, used when seeding history
    pub base_price: f64,
    pub unit: &'static str,
}

/// Staple products tracked on the market board
pub const PRODUCTS: &[Product] = &[
    Product { name: "Coffee", base_price: 850.0, unit: "kg" },
    Product { name: "Rice", base_price: 650.0, unit: "kg" },
    Product { name: "Maize", base_price: 320.0, unit: "kg" },
    Product { name: "Beans", base_price: 780.0, unit: "kg" },
    Product { name: "Tomato", base_price: 920.0, unit: "kg" },
    Product { name: "Potato", base_price: 450.0, unit: "kg" },
    Product { name: "Sugarcane", base_price: 28000.0, unit: "tonne" },
];

/// Market regions prices are quoted for
pub const REGIONS: &[&str] = &[
    "National",
    "Central Valley",
    "North Pacific",
    "Northern Plains",
    "Central Pacific",
    "Brunca",
    "Caribbean",
];

/// A quoted price for one product in one region on one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrice {
    pub product: String,
    pub region: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<PriceTrend>,
    pub date: DateTime<Utc>,
}

/// A significant price movement (|change| >= 5% within the last week)
#[derive(Debug, Clone, Serialize)]
pub struct PriceAlert {
    pub product: String,
    pub region: String,
    pub trend: PriceTrend,
    /// Absolute percent change
    pub change_pct: f64,
    pub previous_price: f64,
    pub price: f64,
    pub date: DateTime<Utc>,
}

/// One point in a product's price history
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

/// Price history for one product/region pair
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub product: String,
    pub region: String,
    pub points: Vec<PricePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_change() {
        assert_eq!(PriceTrend::from_change(2.3), PriceTrend::Up);
        assert_eq!(PriceTrend::from_change(-0.8), PriceTrend::Down);
        assert_eq!(PriceTrend::from_change(0.4), PriceTrend::Stable);
        assert_eq!(PriceTrend::from_change(-0.5), PriceTrend::Stable);
    }

    #[test]
    fn test_trend_display_and_parse() {
        assert_eq!(PriceTrend::Up.to_string(), "up");
        assert_eq!("Down".parse::<PriceTrend>().unwrap(), PriceTrend::Down);
        assert!("sideways".parse::<PriceTrend>().is_err());
    }

    #[test]
    fn test_product_table_is_complete() {
        assert_eq!(PRODUCTS.len(), 7);
        assert!(PRODUCTS.iter().any(|p| p.name == "Coffee"));
        assert_eq!(REGIONS.len(), 7);
    }
}
