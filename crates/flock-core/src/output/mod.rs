//! Output Systems
//!
//! World snapshots and flock statistics.

pub mod snapshot;
pub mod stats;

pub use snapshot::*;
pub use stats::*;
