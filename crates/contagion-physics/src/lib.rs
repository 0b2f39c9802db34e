//! # Contagion Physics
//!
//! Particle state and the geometric/physical primitives of the contagion model:
//! circle overlap, elastic two-body collisions and wall reflection in the unit square.

pub mod collision;
pub mod constants;
pub mod particle;

pub use collision::*;
pub use constants::*;
pub use particle::*;
