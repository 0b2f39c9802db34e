//! Simulation parameters
//!
//! Defaults describe the baseline outbreak: 180 particles, three of them
//! initially infected, a two-minute (at 60 steps/s) disease and a 20% death rate.

use crate::error::{Error, Result};
use crate::mobility::MobilitySchedule;
use contagion_physics::HealthState;
use serde::{Deserialize, Serialize};

/// Particle radii: one value shared by all particles, or one per particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RadiusSpec {
    Uniform(f64),
    PerParticle(Vec<f64>),
}

impl RadiusSpec {
    /// Radius of particle `index`; callers validate the list length first
    pub fn radius_of(&self, index: usize) -> f64 {
        match self {
            RadiusSpec::Uniform(r) => *r,
            RadiusSpec::PerParticle(radii) => radii[index],
        }
    }

    fn validate(&self, particle_count: usize) -> Result<()> {
        let radii: &[f64] = match self {
            RadiusSpec::Uniform(r) => std::slice::from_ref(r),
            RadiusSpec::PerParticle(radii) => {
                if radii.len() != particle_count {
                    return Err(Error::InvalidParam(format!(
                        "radius list has {} entries but particle_count is {}",
                        radii.len(),
                        particle_count
                    )));
                }
                radii
            }
        };
        radii.iter().try_for_each(|&r| validate_radius(r))
    }
}

/// A single particle radius must be finite, positive and small enough to fit the domain.
pub fn validate_radius(r: f64) -> Result<()> {
    if !r.is_finite() || r <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "radius must be finite and > 0, got {r}"
        )));
    }
    // A circle of diameter >= 1 cannot fit strictly inside the unit square
    if r >= 0.5 {
        return Err(Error::InvalidParam(format!(
            "radius must be < 0.5 to fit in the unit square, got {r}"
        )));
    }
    Ok(())
}

impl Default for RadiusSpec {
    fn default() -> Self {
        RadiusSpec::Uniform(0.012)
    }
}

/// Everything needed to initialize a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of particles (>= 1)
    pub particle_count: usize,
    /// Particle radii
    pub radius: RadiusSpec,
    /// State of the particles not seeded as infected
    pub initial_health: HealthState,
    /// How many of the first particles start infected (1..=particle_count)
    pub initial_infected: usize,
    /// Probability that a new contact infects the healthy member, in [0, 1]
    pub transmission_rate: f64,
    /// Steps an infection lasts before resolving (> 0)
    pub disease_duration: u32,
    /// Probability that a resolving infection ends in death, in [0, 1]
    pub death_rate: f64,
    /// Base integration time step (> 0)
    pub dt: f64,
    /// Mobility policy applied on top of `dt`
    pub schedule: MobilitySchedule,
    /// Also apply the new-contact rule to velocity updates
    pub debounce_physics: bool,
    /// Rejection-sampling budget per particle (> 0)
    pub max_placement_attempts: usize,
    /// RNG seed; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 180,
            radius: RadiusSpec::default(),
            initial_health: HealthState::Healthy,
            initial_infected: 3,
            transmission_rate: 0.8,
            disease_duration: 120,
            death_rate: 0.2,
            dt: 0.015,
            schedule: MobilitySchedule::None,
            debounce_physics: false,
            max_placement_attempts: 10_000,
            seed: None,
        }
    }
}

fn validate_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParam(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl SimulationConfig {
    /// Check every parameter; nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(Error::InvalidParam("particle_count must be > 0".into()));
        }
        self.radius.validate(self.particle_count)?;
        if self.initial_infected == 0 || self.initial_infected > self.particle_count {
            return Err(Error::InvalidParam(format!(
                "initial_infected must be within 1..={}, got {}",
                self.particle_count, self.initial_infected
            )));
        }
        // Dead particles must start off-domain and at rest, which placement never produces
        if self.initial_health == HealthState::Dead {
            return Err(Error::InvalidParam("initial_health cannot be dead".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        self.validate_dynamics()
    }

    /// Check the parameters used while stepping: rates, disease duration and time step.
    pub fn validate_dynamics(&self) -> Result<()> {
        validate_probability("transmission_rate", self.transmission_rate)?;
        validate_probability("death_rate", self.death_rate)?;
        if self.disease_duration == 0 {
            return Err(Error::InvalidParam("disease_duration must be > 0".into()));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejects(config: SimulationConfig, needle: &str) {
        let err = config.validate().unwrap_err();
        assert!(
            err.to_string().contains(needle),
            "expected {needle:?} in {err}"
        );
    }

    #[test]
    fn defaults_are_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_empty_population() {
        rejects(
            SimulationConfig {
                particle_count: 0,
                ..Default::default()
            },
            "particle_count",
        );
    }

    #[test]
    fn rejects_bad_radii() {
        for r in [0.0, -0.01, f64::NAN, 0.5] {
            rejects(
                SimulationConfig {
                    radius: RadiusSpec::Uniform(r),
                    ..Default::default()
                },
                "radius",
            );
        }
        rejects(
            SimulationConfig {
                particle_count: 3,
                initial_infected: 1,
                radius: RadiusSpec::PerParticle(vec![0.01, 0.02]),
                ..Default::default()
            },
            "radius list",
        );
    }

    #[test]
    fn rejects_dead_initial_health() {
        rejects(
            SimulationConfig {
                initial_health: HealthState::Dead,
                ..Default::default()
            },
            "initial_health",
        );
        // Any live state is a valid default
        for health in [
            HealthState::Healthy,
            HealthState::Infected,
            HealthState::Recovered,
        ] {
            SimulationConfig {
                initial_health: health,
                ..Default::default()
            }
            .validate()
            .unwrap();
        }
    }

    #[test]
    fn radius_check_accepts_only_fitting_circles() {
        assert!(validate_radius(0.012).is_ok());
        assert!(validate_radius(0.499).is_ok());
        for r in [0.0, -1.0, 0.5, f64::INFINITY] {
            assert!(matches!(validate_radius(r), Err(Error::InvalidParam(_))));
        }
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        rejects(
            SimulationConfig {
                transmission_rate: 1.01,
                ..Default::default()
            },
            "transmission_rate",
        );
        rejects(
            SimulationConfig {
                death_rate: -0.1,
                ..Default::default()
            },
            "death_rate",
        );
    }

    #[test]
    fn rejects_bad_seeding_and_timing() {
        rejects(
            SimulationConfig {
                initial_infected: 0,
                ..Default::default()
            },
            "initial_infected",
        );
        rejects(
            SimulationConfig {
                particle_count: 2,
                initial_infected: 3,
                ..Default::default()
            },
            "initial_infected",
        );
        rejects(
            SimulationConfig {
                disease_duration: 0,
                ..Default::default()
            },
            "disease_duration",
        );
        rejects(
            SimulationConfig {
                dt: 0.0,
                ..Default::default()
            },
            "dt",
        );
        rejects(
            SimulationConfig {
                max_placement_attempts: 0,
                ..Default::default()
            },
            "max_placement_attempts",
        );
    }

    #[test]
    fn deserializes_partial_yaml() {
        let yaml = "
particle_count: 50
radius: [0.01, 0.02]
transmission_rate: 0.5
schedule: lightswitch
seed: 7
";
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.radius, RadiusSpec::PerParticle(vec![0.01, 0.02]));
        assert_eq!(config.transmission_rate, 0.5);
        assert_eq!(config.schedule, MobilitySchedule::Lightswitch);
        assert_eq!(config.seed, Some(7));
        // Untouched fields keep their defaults
        assert_eq!(config.disease_duration, 120);
        assert_eq!(config.initial_health, HealthState::Healthy);
    }

    #[test]
    fn unknown_schedule_fails_to_deserialize() {
        let err = serde_yaml::from_str::<SimulationConfig>("schedule: curfew").unwrap_err();
        assert!(err.to_string().contains("curfew"));
    }
}
