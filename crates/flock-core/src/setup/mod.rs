//! World Setup
//!
//! Population spawning inside the containment sphere.

pub mod population;

pub use population::*;
