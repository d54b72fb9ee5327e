//! Deterministic weather and yield simulation

pub mod weather;

pub use weather::{
    seeded_random, yield_impact, Crop, Region, Scenario, SimulatedDay, Simulation,
    SimulationResult, YieldClass,
};
