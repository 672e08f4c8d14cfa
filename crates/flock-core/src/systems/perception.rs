//! Perception System
//!
//! Refreshes each agent's neighbor cache with a brute-force scan of the whole
//! population. This is the expensive step, so it runs on the slow refresh
//! timer rather than every motion tick.

use glam::Vec3;

use crate::components::agent::AgentId;
use crate::components::world::World;

/// Totals from one population-wide refresh
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RefreshStats {
    pub agents: usize,
    pub total_neighbors: usize,
}

impl RefreshStats {
    pub fn mean_neighbors(&self) -> f32 {
        if self.agents == 0 {
            0.0
        } else {
            self.total_neighbors as f32 / self.agents as f32
        }
    }
}

/// Every other agent strictly closer than `radius`, in population order
pub fn scan_neighbors(
    self_id: AgentId,
    position: Vec3,
    radius: f32,
    positions: &[Vec3],
) -> Vec<AgentId> {
    positions
        .iter()
        .enumerate()
        .filter(|(index, other)| *index != self_id.index() && position.distance(**other) < radius)
        .map(|(index, _)| AgentId(index))
        .collect()
}

/// Refresh a single agent's cache against the current population.
///
/// Returns the new neighbor count, or `None` for an unknown id.
pub fn refresh_agent(world: &mut World, id: AgentId) -> Option<usize> {
    let positions = world.positions();
    let agent = world.get_mut(id)?;
    let ids = scan_neighbors(id, agent.position(), agent.perception_radius(), &positions);
    let count = ids.len();
    agent.neighbors_mut().replace(ids);
    Some(count)
}

/// Refresh every agent's cache.
///
/// All scans read the same position snapshot, so refresh order does not
/// matter.
pub fn refresh_all(world: &mut World) -> RefreshStats {
    let positions = world.positions();
    let mut stats = RefreshStats::default();

    for agent in world.agents_mut() {
        let ids = scan_neighbors(agent.id(), agent.position(), agent.perception_radius(), &positions);
        stats.agents += 1;
        stats.total_neighbors += ids.len();
        agent.neighbors_mut().replace(ids);
    }

    tracing::debug!(
        agents = stats.agents,
        mean_neighbors = stats.mean_neighbors(),
        "Refreshed neighbor caches"
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{Agent, SteeringGains};
    use glam::Quat;

    fn world_with(positions: &[Vec3], radius: f32) -> World {
        let mut world = World::new(100.0).unwrap();
        for &position in positions {
            world.spawn_with(|id| {
                Agent::new(id, position, Quat::IDENTITY, 1.0, radius, SteeringGains::default())
            });
        }
        world
    }

    #[test]
    fn test_scan_excludes_self_and_far_agents() {
        let positions = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
        let ids = scan_neighbors(AgentId(0), positions[0], 2.0, &positions);
        assert_eq!(ids, vec![AgentId(1)]);
    }

    #[test]
    fn test_scan_radius_is_strict() {
        let positions = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)];
        assert!(scan_neighbors(AgentId(0), positions[0], 2.0, &positions).is_empty());
    }

    #[test]
    fn test_refresh_all_is_symmetric() {
        let mut world = world_with(
            &[Vec3::ZERO, Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, 9.0)],
            2.0,
        );

        let stats = refresh_all(&mut world);

        assert_eq!(stats.agents, 3);
        assert_eq!(stats.total_neighbors, 2);
        let a = world.get(AgentId(0)).unwrap().neighbors();
        let b = world.get(AgentId(1)).unwrap().neighbors();
        let c = world.get(AgentId(2)).unwrap().neighbors();
        assert!(a.contains(AgentId(1)));
        assert!(b.contains(AgentId(0)));
        assert!(c.is_empty());
    }

    #[test]
    fn test_second_refresh_replaces_first() {
        let mut world = world_with(&[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)], 2.0);
        refresh_all(&mut world);
        assert_eq!(world.get(AgentId(0)).unwrap().neighbors().ids(), &[AgentId(1)]);

        // Agent 1 flies away between refreshes
        world.get_mut(AgentId(1)).unwrap().advance(10.0);

        refresh_all(&mut world);

        let cache = world.get(AgentId(0)).unwrap().neighbors();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_refresh_single_agent() {
        let mut world = world_with(&[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)], 1.0);
        assert_eq!(refresh_agent(&mut world, AgentId(1)), Some(1));
        assert!(world.get(AgentId(0)).unwrap().neighbors().is_empty());
        assert_eq!(refresh_agent(&mut world, AgentId(5)), None);
    }

    #[test]
    fn test_mean_neighbors_empty() {
        assert_eq!(RefreshStats::default().mean_neighbors(), 0.0);
    }
}
