//! Simulation Timestamp Types
//!
//! A timestamp pairs the discrete motion tick counter with the continuous
//! simulation time that the refresh timer runs on.
//!
//! # Example
//!
//! ```
//! use flock_events::SimTimestamp;
//!
//! let ts = SimTimestamp::new(120, 2.0);
//! assert_eq!(ts.tick, 120);
//! assert_eq!(ts.to_string(), "tick_120@2.000s");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SimTimestamp {
    /// Number of motion ticks executed so far.
    pub tick: u64,
    /// Simulation seconds elapsed since start.
    pub elapsed: f64,
}

impl SimTimestamp {
    /// Creates a new timestamp.
    pub fn new(tick: u64, elapsed: f64) -> Self {
        Self { tick, elapsed }
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick_{}@{:.3}s", self.tick, self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_start() {
        let ts = SimTimestamp::default();
        assert_eq!(ts.tick, 0);
        assert_eq!(ts.elapsed, 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(SimTimestamp::new(7, 0.125).to_string(), "tick_7@0.125s");
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_string(&SimTimestamp::new(3, 0.5)).unwrap();
        assert_eq!(json, r#"{"tick":3,"elapsed":0.5}"#);
    }
}
