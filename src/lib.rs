//! Deterministic tick-driven simulation of pollution spreading through a
//! 2-D water grid: land/water classification from a map image, pollutant
//! diffusion with long-term residue, stimulus producers (outfalls, runoff,
//! filters), a fish population and an ecosystem-health state machine.

pub mod engine;
pub mod fish;
pub mod grid;
pub mod health;
pub mod pollution;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod sources;
pub mod systems;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, System, SystemContext};
pub use grid::{GridError, WaterCell, WaterGrid};
pub use health::{EcosystemHealth, EcosystemState, HealthInputs};
pub use pollution::{PollutionField, PollutionSettings, PollutionStats};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::{World, WorldSnapshot};
