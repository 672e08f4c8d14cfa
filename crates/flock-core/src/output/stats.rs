//! Flock Statistics
//!
//! Aggregate measurements of how ordered the flock is.

use flock_events::FlockMetrics;
use glam::Vec3;

use crate::components::world::World;

/// Compute the aggregate metrics for the current population
pub fn compute_metrics(world: &World) -> FlockMetrics {
    let agents = world.agents();
    if agents.is_empty() {
        return FlockMetrics::default();
    }
    let n = agents.len() as f32;

    let heading_sum: Vec3 = agents.iter().map(|a| a.heading()).sum();
    let centroid: Vec3 = agents.iter().map(|a| a.position()).sum::<Vec3>() / n;
    let neighbor_sum: usize = agents.iter().map(|a| a.neighbors().len()).sum();

    FlockMetrics {
        polarization: (heading_sum / n).length(),
        mean_neighbor_count: neighbor_sum as f32 / n,
        centroid: centroid.to_array(),
        centroid_distance: centroid.length(),
        outside_fraction: world.outside_count() as f32 / n,
    }
}
