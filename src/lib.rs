//! Finca: Field Telemetry Toolkit
//!
//! A CLI for monitoring agricultural field robots: sensor telemetry analytics,
//! market price tracking, and deterministic weather-yield simulation over a
//! local SQLite store.

pub mod analytics;
pub mod cli;
pub mod core;
pub mod entities;
pub mod sim;
