//! Entity types stored in the telemetry database

pub mod market;
pub mod reading;
pub mod robot;

pub use market::{MarketPrice, PriceAlert, PriceHistory, PricePoint, PriceTrend, Product};
pub use reading::{
    AirSample, AtmosphereSample, ClimateSample, HistoricalPoint, LightSample, Reading, SoilSample,
};
pub use robot::{Robot, RobotStatus, RobotSummary};
