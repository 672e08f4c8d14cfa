//! Flock Simulation Engine Library
//!
//! Public API for the boids simulation: agents steering by alignment,
//! cohesion, separation and containment over periodically refreshed neighbor
//! caches.

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, FlockConfig};
pub use error::SimError;
pub use simulation::{Simulation, StepReport};

// Re-export setup functions explicitly to avoid module name conflicts
pub use setup::{get_spawn_summary, spawn_population, SpawnSummary};
