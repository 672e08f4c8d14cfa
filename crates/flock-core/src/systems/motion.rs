//! Motion System
//!
//! Runs the per-frame motion tick for the whole population.

use crate::components::world::World;

/// Counts from one motion tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionStats {
    pub agents: usize,
    /// Agents that had at least one qualifying neighbor this tick
    pub steering: usize,
}

/// Tick every agent once.
///
/// Peers are read from a copy taken before anyone moves, so each agent only
/// writes its own state and the result does not depend on iteration order.
pub fn tick_all(world: &mut World, delta_time: f32) -> MotionStats {
    let peers = world.peer_states();
    let containment_radius = world.containment_radius();
    let mut stats = MotionStats::default();

    for agent in world.agents_mut() {
        let desired = agent.tick(delta_time, &peers, containment_radius);
        stats.agents += 1;
        if desired.has_peers() {
            stats.steering += 1;
        }
    }

    stats
}
