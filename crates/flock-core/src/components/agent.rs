//! Agent Components
//!
//! A single boid: kinematic state, steering gains and the per-tick motion
//! update.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::neighbors::NeighborCache;
use crate::systems::steering::{
    self, alignment_steer, cohesion_steer, compute_desired, containment_force, Desired, PeerState,
    FORWARD, UP,
};

/// Handle for an agent: its index in the world population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boid_{:04}", self.0)
    }
}

/// Strength of each steering behaviour. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringGains {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub containment: f32,
}

impl Default for SteeringGains {
    fn default() -> Self {
        Self {
            alignment: 5.0,
            cohesion: 1.0,
            separation: 1.25,
            containment: 5.0,
        }
    }
}

/// One flocking agent
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    position: Vec3,
    /// Renormalized every move; containment may leave it off unit length
    direction: Vec3,
    /// Last unit direction, used when `direction` degenerates
    heading: Vec3,
    orientation: Quat,
    speed: f32,
    perception_radius: f32,
    gains: SteeringGains,
    neighbors: NeighborCache,
}

impl Agent {
    /// Creates an agent facing along `orientation`'s forward axis.
    ///
    /// The starting direction is the rotated forward vector scaled by `speed`.
    pub fn new(
        id: AgentId,
        position: Vec3,
        orientation: Quat,
        speed: f32,
        perception_radius: f32,
        gains: SteeringGains,
    ) -> Self {
        let forward = steering::normalize_or_fallback(orientation * FORWARD, FORWARD);
        Self {
            id,
            position,
            direction: forward * speed,
            heading: forward,
            orientation,
            speed,
            perception_radius,
            gains,
            neighbors: NeighborCache::new(),
        }
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self.heading = steering::normalize_or_fallback(direction, self.heading);
        self
    }

    pub fn with_neighbors(mut self, neighbors: NeighborCache) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Unit heading from the most recent move
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn perception_radius(&self) -> f32 {
        self.perception_radius
    }

    pub fn neighbors(&self) -> &NeighborCache {
        &self.neighbors
    }

    pub fn neighbors_mut(&mut self) -> &mut NeighborCache {
        &mut self.neighbors
    }

    /// Copy of the state peers read during a motion step
    pub fn peer_state(&self) -> PeerState {
        PeerState {
            position: self.position,
            direction: self.direction,
        }
    }

    /// Desired direction from the cached neighbors at their current positions
    pub fn compute_desired(&self, peers: &[PeerState]) -> Desired {
        compute_desired(
            self.id,
            self.position,
            self.perception_radius,
            self.neighbors.ids(),
            peers,
        )
    }

    /// Runs one motion tick.
    ///
    /// Order: accumulate, alignment, cohesion, separation, move, containment.
    /// Containment runs after the move so it bends the next tick's heading.
    pub fn tick(&mut self, delta_time: f32, peers: &[PeerState], containment_radius: f32) -> Desired {
        let desired = self.compute_desired(peers);

        if desired.has_peers() {
            self.align(desired.vector, delta_time);
            self.cohere(desired.vector);
            self.separate(desired.vector);
        }

        self.advance(delta_time);
        self.contain(containment_radius, delta_time);

        desired
    }

    fn align(&mut self, desired: Vec3, delta_time: f32) {
        let steer = alignment_steer(self.direction, desired, delta_time);
        self.direction += steer * self.gains.alignment;
    }

    fn cohere(&mut self, desired: Vec3) {
        let steer = cohesion_steer(desired, self.perception_radius);
        self.direction += steer * self.gains.cohesion;
    }

    fn separate(&mut self, desired: Vec3) {
        let steer = cohesion_steer(desired, self.perception_radius);
        self.direction -= steer * self.gains.separation;
    }

    /// Normalize the direction and move along it.
    pub fn advance(&mut self, delta_time: f32) {
        if steering::is_degenerate(self.direction) {
            tracing::trace!(agent = %self.id, "degenerate direction, keeping last heading");
        }
        let unit = steering::normalize_or_fallback(self.direction, self.heading);

        self.direction = unit;
        self.heading = unit;
        self.position += unit * self.speed * delta_time;
        self.orientation = steering::look_rotation(unit, UP);
    }

    /// Bend the direction back toward the origin when outside the boundary.
    pub fn contain(&mut self, containment_radius: f32, delta_time: f32) {
        self.direction += containment_force(
            self.position,
            containment_radius,
            self.gains.containment,
            delta_time,
        );
    }

    pub fn is_outside(&self, containment_radius: f32) -> bool {
        self.position.length() > containment_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn agent_at(id: usize, position: Vec3) -> Agent {
        Agent::new(AgentId(id), position, Quat::IDENTITY, 5.0, 2.5, SteeringGains::default())
    }

    #[test]
    fn test_initial_direction_follows_orientation() {
        let orientation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let agent = Agent::new(AgentId(0), Vec3::ZERO, orientation, 5.0, 2.5, SteeringGains::default());

        assert!(agent.direction().abs_diff_eq(Vec3::X * 5.0, 1e-4));
        assert!(agent.heading().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_tick_without_neighbors_moves_straight() {
        let mut agent = agent_at(0, Vec3::ZERO);
        let peers = [agent.peer_state()];

        let desired = agent.tick(0.1, &peers, 10.0);

        assert_eq!(desired, Desired::NONE);
        assert!(agent.position().abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPS));
        assert!((agent.direction().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_heading_is_unit_after_tick() {
        let mut a = agent_at(0, Vec3::ZERO).with_direction(Vec3::new(3.0, -2.0, 7.0));
        let b = agent_at(1, Vec3::new(0.5, 0.2, 0.1)).with_direction(Vec3::X);
        a.neighbors_mut().replace(vec![AgentId(1)]);
        let peers = [a.peer_state(), b.peer_state()];

        a.tick(0.016, &peers, 10.0);

        assert!((a.heading().length() - 1.0).abs() < EPS);
        assert!((a.direction().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_direction_falls_back_to_heading() {
        let mut agent = agent_at(0, Vec3::ZERO).with_direction(Vec3::X);
        agent.direction = Vec3::ZERO;

        agent.advance(1.0);

        assert_eq!(agent.heading(), Vec3::X);
        assert!(agent.position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPS));
        assert!(agent.position().is_finite());
    }

    #[test]
    fn test_nan_direction_falls_back_to_heading() {
        let mut agent = agent_at(0, Vec3::ZERO);
        agent.direction = Vec3::new(f32::NAN, 0.0, 1.0);

        agent.advance(0.5);

        assert_eq!(agent.heading(), FORWARD);
        assert!(agent.position().is_finite());
    }

    #[test]
    fn test_containment_applied_after_move() {
        let mut agent = agent_at(0, Vec3::new(0.0, 0.0, 14.5));
        let peers = [agent.peer_state()];

        agent.tick(0.1, &peers, 10.0);

        // Moved to z = 15 first, then pulled back by (10 - 15) * 5 * 0.1
        assert!(agent.position().abs_diff_eq(Vec3::new(0.0, 0.0, 15.0), EPS));
        assert!(agent.direction().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0 - 2.5), EPS));
        assert!(agent.is_outside(10.0));
    }

    #[test]
    fn test_orientation_faces_heading() {
        let mut agent = agent_at(0, Vec3::ZERO).with_direction(Vec3::new(1.0, 0.0, 1.0));
        agent.advance(0.1);
        assert!((agent.orientation() * FORWARD).abs_diff_eq(agent.heading(), 1e-4));
    }

    #[test]
    fn test_agent_id_display() {
        assert_eq!(AgentId(7).to_string(), "boid_0007");
    }
}
