//! World Components
//!
//! The population of agents and the containment sphere they fly in.

use glam::Vec3;

use crate::components::agent::{Agent, AgentId};
use crate::config::ConfigError;
use crate::systems::steering::PeerState;

/// Owner of every agent and of the containment boundary
#[derive(Debug, Clone)]
pub struct World {
    containment_radius: f32,
    /// Creation order; an agent's id is its index here
    agents: Vec<Agent>,
}

impl World {
    /// Create an empty world. The radius must be positive and finite.
    pub fn new(containment_radius: f32) -> Result<Self, ConfigError> {
        if !containment_radius.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "world.containment_radius",
            });
        }
        if containment_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "world.containment_radius",
                value: f64::from(containment_radius),
            });
        }

        Ok(Self {
            containment_radius,
            agents: Vec::new(),
        })
    }

    pub fn with_capacity(containment_radius: f32, capacity: usize) -> Result<Self, ConfigError> {
        let mut world = Self::new(containment_radius)?;
        world.agents.reserve(capacity);
        Ok(world)
    }

    /// Id the next spawned agent will receive
    pub fn next_id(&self) -> AgentId {
        AgentId(self.agents.len())
    }

    /// Add an agent built for the next free id
    pub fn spawn_with(&mut self, build: impl FnOnce(AgentId) -> Agent) -> AgentId {
        let id = self.next_id();
        let agent = build(id);
        debug_assert_eq!(agent.id(), id, "agent built with a foreign id");
        self.agents.push(agent);
        id
    }

    pub fn containment_radius(&self) -> f32 {
        self.containment_radius
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|a| a.id())
    }

    /// Positions of every agent, indexed by id
    pub fn positions(&self) -> Vec<Vec3> {
        self.agents.iter().map(|a| a.position()).collect()
    }

    /// Position and direction of every agent, indexed by id
    pub fn peer_states(&self) -> Vec<PeerState> {
        self.agents.iter().map(|a| a.peer_state()).collect()
    }

    /// Number of agents currently beyond the containment radius
    pub fn outside_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.is_outside(self.containment_radius))
            .count()
    }
}
