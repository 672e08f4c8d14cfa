//! Snapshot Types
//!
//! Serialization structs for world snapshots and state output.
//!
//! Snapshots capture every agent's transform at a point in time, used for
//! analysis, offline visualization, and debugging. Vectors are plain arrays so
//! readers do not need a math library.

use serde::{Deserialize, Serialize};

use crate::SimTimestamp;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Transform and cache state of a single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: usize,
    pub position: [f32; 3],
    /// Heading as stored on the agent; may be off unit length after containment
    pub direction: [f32; 3],
    /// Orientation quaternion as `[x, y, z, w]`
    pub orientation: [f32; 4],
    pub neighbor_count: usize,
    pub outside_containment: bool,
}

/// Aggregate flock measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlockMetrics {
    /// Length of the mean unit heading: 1.0 when every agent faces the same way
    pub polarization: f32,
    pub mean_neighbor_count: f32,
    pub centroid: [f32; 3],
    pub centroid_distance: f32,
    /// Fraction of agents beyond the containment radius
    pub outside_fraction: f32,
}

/// Complete world snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub snapshot_id: String,
    pub timestamp: SimTimestamp,
    pub triggered_by: String,
    pub containment_radius: f32,
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
    #[serde(default)]
    pub metrics: FlockMetrics,
}

impl WorldSnapshot {
    /// Creates an empty snapshot for the given timestamp.
    pub fn new(
        snapshot_id: impl Into<String>,
        timestamp: SimTimestamp,
        containment_radius: f32,
        triggered_by: impl Into<String>,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            timestamp,
            triggered_by: triggered_by.into(),
            containment_radius,
            agents: Vec::new(),
            metrics: FlockMetrics::default(),
        }
    }

    /// Number of agents captured.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Finds an agent by its id.
    pub fn agent(&self, agent_id: usize) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }
}
