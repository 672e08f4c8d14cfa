//! Steering Math
//!
//! Pure vector functions behind each agent's motion tick: desired-direction
//! accumulation over cached peers, the three flocking blends, containment,
//! and guarded normalization.

use glam::{Mat3, Quat, Vec3};

use crate::components::agent::AgentId;

/// Forward axis of an unrotated agent.
pub const FORWARD: Vec3 = Vec3::Z;

/// Up axis used when building an agent's orientation.
pub const UP: Vec3 = Vec3::Y;

/// Squared lengths at or below this are treated as a zero vector.
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Position and heading of one agent, copied at the start of a motion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerState {
    pub position: Vec3,
    pub direction: Vec3,
}

/// Result of scanning the neighbor cache
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Desired {
    /// Mean of the summed alignment, cohesion and separation contributions
    pub vector: Vec3,
    /// Number of cached peers that passed the distance check
    pub count: usize,
}

impl Desired {
    pub const NONE: Desired = Desired {
        vector: Vec3::ZERO,
        count: 0,
    };

    /// True when at least one peer qualified and steering should be applied
    pub fn has_peers(&self) -> bool {
        self.count > 0
    }
}

/// Vector pushing `position` away from `peer`, with magnitude `1 / distance`.
///
/// Coincident positions yield zero since the push has no direction.
pub fn separation_contribution(position: Vec3, peer: Vec3) -> Vec3 {
    let away = position - peer;
    let distance_sq = away.length_squared();
    if distance_sq <= 0.0 {
        return Vec3::ZERO;
    }
    away / distance_sq
}

/// Accumulate the desired direction over the cached peers.
///
/// Every cached id is re-checked against the current peer positions because
/// the cache may be stale since its last refresh. Ids that are out of range of
/// `peers` are ignored.
pub fn compute_desired(
    self_id: AgentId,
    position: Vec3,
    perception_radius: f32,
    cached: &[AgentId],
    peers: &[PeerState],
) -> Desired {
    let mut vector = Vec3::ZERO;
    let mut count = 0usize;

    for &id in cached {
        if id == self_id {
            continue;
        }
        let Some(peer) = peers.get(id.index()) else {
            continue;
        };

        let offset = peer.position - position;
        if offset.length() < perception_radius {
            vector += peer.direction;
            vector += offset;
            vector += separation_contribution(position, peer.position);
            count += 1;
        }
    }

    if count > 0 {
        vector /= count as f32;
    }

    Desired { vector, count }
}

/// Steering toward the neighbors' heading.
///
/// `delta_time` is used directly as the blend factor; values above 1
/// extrapolate past `desired`.
pub fn alignment_steer(direction: Vec3, desired: Vec3, delta_time: f32) -> Vec3 {
    direction.lerp(desired, delta_time).normalize_or_zero()
}

/// Steering toward the neighbors' centre; separation subtracts the same vector.
///
/// The blend factor `|desired| / perception_radius` is not clamped.
pub fn cohesion_steer(desired: Vec3, perception_radius: f32) -> Vec3 {
    let t = desired.length() / perception_radius;
    Vec3::ZERO.lerp(desired, t).normalize_or_zero()
}

/// Restoring force for an agent outside the containment sphere.
///
/// Zero inside the sphere; otherwise points at the origin with magnitude
/// `(|position| - radius) * strength * delta_time`.
pub fn containment_force(position: Vec3, radius: f32, strength: f32, delta_time: f32) -> Vec3 {
    let distance = position.length();
    if distance <= radius {
        return Vec3::ZERO;
    }
    position.normalize_or_zero() * (radius - distance) * strength * delta_time
}

/// True when `v` cannot be normalized: zero length or not finite.
pub fn is_degenerate(v: Vec3) -> bool {
    !v.is_finite() || v.length_squared() <= DEGENERATE_LENGTH_SQ
}

/// Normalize `v`, or return `fallback` when `v` is degenerate.
pub fn normalize_or_fallback(v: Vec3, fallback: Vec3) -> Vec3 {
    if is_degenerate(v) {
        fallback
    } else {
        v.normalize()
    }
}

/// Rotation whose forward axis faces `forward`, keeping `up` as close to
/// vertical as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let x = up.cross(z);
    if x.length_squared() <= DEGENERATE_LENGTH_SQ {
        // Facing straight along the up axis
        return Quat::from_rotation_arc(FORWARD, z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
