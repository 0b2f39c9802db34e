//! Pairwise collision detection, resolution and transmission
//!
//! Every step all pairs of live particles are tested for overlap (O(n²)).
//! Overlapping pairs bounce elastically; a pair that was not overlapping in
//! either of the two previous steps is a *new contact* and gets one
//! transmission trial. Pairs that stay stuck together therefore roll the dice
//! once per contact, not once per step.

use crate::history::{CollisionHistory, PairKey};
use contagion_physics::{elastic_collision, HealthState, Particle};
use rand::Rng;
use std::collections::HashSet;

/// What happened during one call to [`CollisionEngine::resolve`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Pairs overlapping at this step
    pub overlapping: usize,
    /// Overlapping pairs absent from the remembered steps
    pub new_contacts: usize,
    /// Pairs whose velocities were actually updated
    pub bounces: usize,
    /// Bernoulli trials run on a healthy particle touching an infected one
    pub transmission_trials: usize,
    /// Indices of particles infected at this step
    pub infected: Vec<usize>,
}

/// Mutable access to two distinct elements, `i < j`
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Detects and resolves overlaps; owns the short history used for debouncing
#[derive(Debug, Clone)]
pub struct CollisionEngine {
    transmission_rate: f64,
    debounce_physics: bool,
    history: CollisionHistory,
}

impl CollisionEngine {
    /// `transmission_rate` must already be validated to lie in [0, 1].
    pub fn new(transmission_rate: f64, debounce_physics: bool) -> Self {
        Self {
            transmission_rate,
            debounce_physics,
            history: CollisionHistory::new(),
        }
    }

    pub fn history(&self) -> &CollisionHistory {
        &self.history
    }

    /// Resolve every overlapping pair of live particles, then remember this
    /// step's overlaps for the next two steps.
    pub fn resolve<R: Rng>(&mut self, particles: &mut [Particle], rng: &mut R) -> CollisionReport {
        let mut report = CollisionReport::default();
        let mut current = HashSet::new();

        for i in 0..particles.len() {
            if !particles[i].is_alive() {
                continue;
            }
            for j in (i + 1)..particles.len() {
                if !particles[j].is_alive() || !particles[i].overlaps(&particles[j]) {
                    continue;
                }

                let key = PairKey::new(i, j);
                current.insert(key);
                report.overlapping += 1;

                let new_contact = !self.history.contains(key);
                if new_contact {
                    report.new_contacts += 1;
                }

                let (a, b) = pair_mut(particles, i, j);
                if (new_contact || !self.debounce_physics) && elastic_collision(a, b) {
                    report.bounces += 1;
                }

                if new_contact {
                    if let Some(index) = self.transmit(a, b, i, j, rng, &mut report) {
                        report.infected.push(index);
                    }
                }
            }
        }

        self.history.push(current);
        report
    }

    /// Run the transmission trial for a new contact. Returns the index of the
    /// newly infected particle, if any.
    fn transmit<R: Rng>(
        &self,
        a: &mut Particle,
        b: &mut Particle,
        i: usize,
        j: usize,
        rng: &mut R,
        report: &mut CollisionReport,
    ) -> Option<usize> {
        let (target, index) = match (a.health, b.health) {
            (HealthState::Infected, HealthState::Healthy) => (b, j),
            (HealthState::Healthy, HealthState::Infected) => (a, i),
            _ => return None,
        };

        report.transmission_trials += 1;
        if rng.random_bool(self.transmission_rate) {
            target.infect();
            Some(index)
        } else {
            None
        }
    }
}
