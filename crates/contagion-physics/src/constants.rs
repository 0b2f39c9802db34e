//! Domain and kinematic constants for the contagion model
//!
//! The simulation lives in the unit square; all lengths and speeds are in
//! units of the domain edge.

/// Lower edge of the domain on both axes
pub const DOMAIN_MIN: f64 = 0.0;

/// Upper edge of the domain on both axes
pub const DOMAIN_MAX: f64 = 1.0;

/// Scale of the speed distribution: speed = SPEED_SCALE * sqrt(U) + SPEED_FLOOR
pub const SPEED_SCALE: f64 = 0.1;

/// Minimum initial speed of a placed particle
pub const SPEED_FLOOR: f64 = 0.05;

/// Dead particles are parked uniformly in [GRAVEYARD_MIN, GRAVEYARD_MIN + GRAVEYARD_SPAN]²,
/// far outside the visible domain
pub const GRAVEYARD_MIN: f64 = 10.0;

/// Width of the off-domain parking area
pub const GRAVEYARD_SPAN: f64 = 10.0;
