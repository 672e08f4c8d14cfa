//! Population Spawning
//!
//! Places agents uniformly inside the containment sphere with uniformly random
//! orientations. The orientation also fixes each agent's starting direction.

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;
use std::fmt;

use crate::components::agent::{Agent, AgentId};
use crate::components::neighbors::NeighborCache;
use crate::components::world::World;
use crate::config::AgentConfig;

/// Uniform random point inside a sphere of `radius` centred at the origin
pub fn random_point_in_sphere(rng: &mut SmallRng, radius: f32) -> Vec3 {
    // Rejection sampling from the enclosing cube
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if p.length_squared() <= 1.0 {
            return p * radius;
        }
    }
}

/// Uniformly distributed rotation (Shoemake's method)
pub fn random_rotation(rng: &mut SmallRng) -> Quat {
    let u1: f32 = rng.gen();
    let u2: f32 = rng.gen::<f32>() * std::f32::consts::TAU;
    let u3: f32 = rng.gen::<f32>() * std::f32::consts::TAU;

    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos()).normalize()
}

/// Spawn `count` agents into `world`.
///
/// Until the first scheduled refresh each agent's cache holds the whole rest
/// of the population; the per-tick distance check filters it.
pub fn spawn_population(
    world: &mut World,
    count: usize,
    config: &AgentConfig,
    rng: &mut SmallRng,
) -> SpawnSummary {
    let radius = world.containment_radius();
    let gains = config.gains();
    let first = world.len();

    for _ in 0..count {
        let position = random_point_in_sphere(rng, radius);
        let orientation = random_rotation(rng);
        world.spawn_with(|id| {
            Agent::new(
                id,
                position,
                orientation,
                config.speed,
                config.perception_radius,
                gains,
            )
        });
    }

    let all: Vec<AgentId> = world.ids().collect();
    for agent in world.agents_mut().iter_mut().skip(first) {
        let own = agent.id();
        let others = all.iter().copied().filter(|&id| id != own).collect();
        *agent.neighbors_mut() = NeighborCache::seeded(others);
    }

    let summary = get_spawn_summary(world);
    tracing::info!(
        total = summary.total_agents,
        mean_distance = summary.mean_distance,
        max_distance = summary.max_distance,
        "Spawned population"
    );
    summary
}

/// Summarize the spawned population
pub fn get_spawn_summary(world: &World) -> SpawnSummary {
    let distances: Vec<f32> = world.agents().iter().map(|a| a.position().length()).collect();
    let total_agents = distances.len();
    let mean_distance = if total_agents == 0 {
        0.0
    } else {
        distances.iter().sum::<f32>() / total_agents as f32
    };
    let max_distance = distances.iter().copied().fold(0.0f32, f32::max);

    SpawnSummary {
        total_agents,
        containment_radius: world.containment_radius(),
        mean_distance,
        max_distance,
    }
}

/// Summary of spawned agents
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSummary {
    pub total_agents: usize,
    pub containment_radius: f32,
    pub mean_distance: f32,
    pub max_distance: f32,
}

impl fmt::Display for SpawnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total agents: {}", self.total_agents)?;
        writeln!(f, "Containment radius: {:.2}", self.containment_radius)?;
        writeln!(f, "Mean distance from origin: {:.2}", self.mean_distance)?;
        write!(f, "Max distance from origin: {:.2}", self.max_distance)
    }
}
