//! Simulation Systems
//!
//! Steering math, neighbor perception, motion, and refresh timing.

pub mod motion;
pub mod perception;
pub mod schedule;
pub mod steering;

// Re-export commonly used systems
pub use motion::{tick_all, MotionStats};
pub use perception::{refresh_agent, refresh_all, scan_neighbors, RefreshStats};
pub use schedule::{RefreshSchedule, SimClock};
pub use steering::{
    alignment_steer, cohesion_steer, compute_desired, containment_force, look_rotation,
    normalize_or_fallback, separation_contribution, Desired, PeerState,
};
