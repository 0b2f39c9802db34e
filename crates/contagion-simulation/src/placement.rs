//! Initial particle placement by rejection sampling

use crate::error::{Error, Result};
use crate::params::SimulationConfig;
use contagion_physics::{HealthState, Particle, SPEED_FLOOR, SPEED_SCALE};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Draw a candidate particle: uniform position with the circle inside the
/// domain, speed biased towards the upper end of [SPEED_FLOOR, SPEED_FLOOR + SPEED_SCALE).
pub fn random_particle<R: Rng>(rng: &mut R, radius: f64, health: HealthState) -> Particle {
    let span = 1.0 - 2.0 * radius;
    let position = DVec2::new(
        radius + span * rng.random::<f64>(),
        radius + span * rng.random::<f64>(),
    );

    let speed = SPEED_SCALE * rng.random::<f64>().sqrt() + SPEED_FLOOR;
    let heading = TAU * rng.random::<f64>();
    let velocity = DVec2::from_angle(heading) * speed;

    Particle::new(position, velocity, radius, health)
}

/// Place one particle so that it overlaps none of `existing`.
///
/// Retries with fresh draws up to `max_attempts` times; `index` only labels the error.
pub fn place<R: Rng>(
    rng: &mut R,
    index: usize,
    radius: f64,
    health: HealthState,
    existing: &[Particle],
    max_attempts: usize,
) -> Result<Particle> {
    place_counted(rng, index, radius, health, existing, max_attempts).map(|(p, _)| p)
}

/// [`place`], also returning how many draws it took.
fn place_counted<R: Rng>(
    rng: &mut R,
    index: usize,
    radius: f64,
    health: HealthState,
    existing: &[Particle],
    max_attempts: usize,
) -> Result<(Particle, usize)> {
    for attempt in 1..=max_attempts {
        let candidate = random_particle(rng, radius, health);
        if !existing.iter().any(|p| p.overlaps(&candidate)) {
            return Ok((candidate, attempt));
        }
    }
    Err(Error::PlacementFailed {
        index,
        attempts: max_attempts,
    })
}

/// More than half the attempt budget spent on one particle
fn under_pressure(attempts: usize, max_attempts: usize) -> bool {
    attempts > max_attempts / 2
}

/// Build the initial population described by `config`.
///
/// The first `initial_infected` particles start infected, the rest in `initial_health`.
pub fn populate<R: Rng>(rng: &mut R, config: &SimulationConfig) -> Result<Vec<Particle>> {
    config.validate()?;

    let mut particles = Vec::with_capacity(config.particle_count);
    for index in 0..config.particle_count {
        let health = if index < config.initial_infected {
            HealthState::Infected
        } else {
            config.initial_health
        };
        let radius = config.radius.radius_of(index);
        let (particle, attempts) = place_counted(
            rng,
            index,
            radius,
            health,
            &particles,
            config.max_placement_attempts,
        )?;
        if under_pressure(attempts, config.max_placement_attempts) {
            log::warn!(
                "particle {} needed {}/{} placement attempts; the domain is close to full",
                index,
                attempts,
                config.max_placement_attempts
            );
        }
        particles.push(particle);
    }
    Ok(particles)
}
