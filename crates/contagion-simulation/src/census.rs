//! Aggregate health counts

use contagion_physics::{HealthState, Particle};
use std::fmt;

/// Number of particles in each health state at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub healthy: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl Census {
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut census = Self::default();
        for p in particles {
            *census.count_mut(p.health) += 1;
        }
        census
    }

    pub fn count(&self, state: HealthState) -> usize {
        match state {
            HealthState::Healthy => self.healthy,
            HealthState::Infected => self.infected,
            HealthState::Recovered => self.recovered,
            HealthState::Dead => self.dead,
        }
    }

    fn count_mut(&mut self, state: HealthState) -> &mut usize {
        match state {
            HealthState::Healthy => &mut self.healthy,
            HealthState::Infected => &mut self.infected,
            HealthState::Recovered => &mut self.recovered,
            HealthState::Dead => &mut self.dead,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.recovered + self.dead
    }

    /// Share of the population in `state`
    pub fn fraction(&self, state: HealthState) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(state) as f64 / total as f64,
        }
    }

    /// Healthy, infected, recovered and dead fractions, in that order
    pub fn fractions(&self) -> [f64; 4] {
        HealthState::ALL.map(|state| self.fraction(state))
    }
}

/// Step index and census of the highest infected count; ties go to the earliest step.
pub fn peak_infected(series: &[Census]) -> Option<(usize, Census)> {
    series
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (step, census)| match best {
            Some((_, peak)) if census.infected <= peak.infected => best,
            _ => Some((step, census)),
        })
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "healthy={} infected={} recovered={} dead={}",
            self.healthy, self.infected, self.recovered, self.dead
        )
    }
}
