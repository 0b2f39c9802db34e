//! Infection timers and the Infected → {Recovered, Dead} transition

use contagion_physics::{HealthState, Particle, GRAVEYARD_MIN, GRAVEYARD_SPAN};
use glam::DVec2;
use rand::Rng;

/// Transitions applied during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockReport {
    pub recovered: Vec<usize>,
    pub died: Vec<usize>,
}

/// Advances infection timers and resolves infections that have run their course
#[derive(Debug, Clone, Copy)]
pub struct EpidemicClock {
    disease_duration: u32,
    death_rate: f64,
}

impl EpidemicClock {
    /// `death_rate` must already be validated to lie in [0, 1].
    pub fn new(disease_duration: u32, death_rate: f64) -> Self {
        Self {
            disease_duration,
            death_rate,
        }
    }

    /// Increment every infected timer, then resolve those past the disease duration.
    pub fn tick<R: Rng>(&self, particles: &mut [Particle], rng: &mut R) -> ClockReport {
        let mut report = ClockReport::default();

        for (index, p) in particles.iter_mut().enumerate() {
            if p.health != HealthState::Infected {
                continue;
            }
            p.infection_timer += 1;
            if p.infection_timer <= self.disease_duration {
                continue;
            }

            if rng.random_bool(self.death_rate) {
                p.kill(graveyard_position(rng));
                report.died.push(index);
            } else {
                p.recover();
                report.recovered.push(index);
            }
        }

        report
    }
}

/// Random parking spot well outside the unit square
fn graveyard_position<R: Rng>(rng: &mut R) -> DVec2 {
    DVec2::new(
        GRAVEYARD_MIN + GRAVEYARD_SPAN * rng.random::<f64>(),
        GRAVEYARD_MIN + GRAVEYARD_SPAN * rng.random::<f64>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn infected() -> Particle {
        Particle::new(
            DVec2::new(0.5, 0.5),
            DVec2::new(0.1, 0.1),
            0.01,
            HealthState::Infected,
        )
    }

    #[test]
    fn recovers_after_duration_plus_one_ticks() {
        let mut rng = StdRng::seed_from_u64(9);
        let clock = EpidemicClock::new(5, 0.0);
        let mut particles = vec![infected()];

        for step in 1..=5 {
            let report = clock.tick(&mut particles, &mut rng);
            assert!(report.recovered.is_empty());
            assert_eq!(particles[0].health, HealthState::Infected);
            assert_eq!(particles[0].infection_timer, step);
        }

        let report = clock.tick(&mut particles, &mut rng);
        assert_eq!(report.recovered, vec![0]);
        assert_eq!(particles[0].health, HealthState::Recovered);
    }

    #[test]
    fn certain_death_parks_particle_off_domain() {
        let mut rng = StdRng::seed_from_u64(9);
        let clock = EpidemicClock::new(1, 1.0);
        let mut particles = vec![infected()];

        clock.tick(&mut particles, &mut rng);
        let report = clock.tick(&mut particles, &mut rng);
        assert_eq!(report.died, vec![0]);

        let p = particles[0];
        assert_eq!(p.health, HealthState::Dead);
        assert_eq!(p.velocity, DVec2::ZERO);
        assert!(p.position.min_element() >= GRAVEYARD_MIN);
        assert!(p.position.max_element() <= GRAVEYARD_MIN + GRAVEYARD_SPAN);
    }

    #[test]
    fn other_states_are_left_alone() {
        let mut rng = StdRng::seed_from_u64(9);
        let clock = EpidemicClock::new(1, 1.0);
        let mut particles: Vec<_> = [
            HealthState::Healthy,
            HealthState::Recovered,
            HealthState::Dead,
        ]
        .into_iter()
        .map(|health| Particle::new(DVec2::new(0.5, 0.5), DVec2::ZERO, 0.01, health))
        .collect();
        let before = particles.clone();

        for _ in 0..10 {
            assert_eq!(clock.tick(&mut particles, &mut rng), ClockReport::default());
        }
        assert_eq!(particles, before);
    }
}
