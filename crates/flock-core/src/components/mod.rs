//! Simulation Components
//!
//! Agents, their neighbor caches, and the world population that owns them.

pub mod agent;
pub mod neighbors;
pub mod world;

pub use agent::*;
pub use neighbors::*;
pub use world::*;
