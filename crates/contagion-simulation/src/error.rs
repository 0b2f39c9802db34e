use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or initializing a simulation.
///
/// Stepping a valid simulation cannot fail; everything here is detected before the first step.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range. Values are never clamped.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The mobility schedule name is not one of the known schedules.
    #[error("unknown mobility schedule: {0:?}")]
    UnknownSchedule(String),

    /// Rejection sampling could not find a free spot for a particle.
    #[error(
        "failed to place particle {index} without overlap after {attempts} attempts; \
         try fewer particles or a smaller radius"
    )]
    PlacementFailed { index: usize, attempts: usize },
}
