//! Shared snapshot types and serialization for the flock simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the simulation core and for anything that reads
//! its output.

pub mod snapshot;
pub mod timestamp;

pub use timestamp::SimTimestamp;

pub use snapshot::{generate_snapshot_id, AgentSnapshot, FlockMetrics, WorldSnapshot};
