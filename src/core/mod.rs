//! Core module - project layout, configuration, identity, and the telemetry store

pub mod config;
pub mod identity;
pub mod project;
pub mod store;

pub use config::Config;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use project::{Project, ProjectError};
pub use store::{StoreError, TelemetryStore};
