//! Neighbor Cache
//!
//! Each agent's periodically refreshed, possibly stale list of nearby peers.

use crate::components::agent::AgentId;

/// Ids of the peers an agent considers when steering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborCache {
    /// Peer ids in population order
    ids: Vec<AgentId>,
    /// Number of times the cache has been replaced
    generation: u64,
}

impl NeighborCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache holding the given ids, without counting as a refresh
    pub fn seeded(ids: Vec<AgentId>) -> Self {
        Self { ids, generation: 0 }
    }

    /// Swap in a new neighbor set, discarding the old one entirely
    pub fn replace(&mut self, ids: Vec<AgentId>) {
        self.ids = ids;
        self.generation += 1;
    }

    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    /// Check if a specific agent is cached
    pub fn contains(&self, id: AgentId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
