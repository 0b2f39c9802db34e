//! # Contagion Simulation Engine
//!
//! CPU simulation of disease spread among colliding particles: placement,
//! O(n²) collision resolution with debounced transmission, infection timers and
//! time-varying mobility policies.

pub mod census;
pub mod collision;
pub mod epidemic;
pub mod error;
pub mod history;
pub mod mobility;
pub mod params;
pub mod placement;
pub mod simulation;

pub use census::*;
pub use collision::*;
pub use epidemic::*;
pub use error::{Error, Result};
pub use history::*;
pub use mobility::*;
pub use params::*;
pub use simulation::*;
