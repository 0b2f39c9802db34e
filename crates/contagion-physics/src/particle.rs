//! Particle kinematic and epidemic state

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Epidemic state of a particle
///
/// `Healthy → Infected → {Recovered, Dead}`. `Recovered` and `Dead` are terminal.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Healthy = 0,
    Infected = 1,
    Recovered = 2,
    Dead = 3,
}

impl HealthState {
    /// All states, in reporting order
    pub const ALL: [HealthState; 4] = [
        HealthState::Healthy,
        HealthState::Infected,
        HealthState::Recovered,
        HealthState::Dead,
    ];

    /// Stable lowercase label used by the presentation layer
    pub fn label(self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Infected => "infected",
            HealthState::Recovered => "recovered",
            HealthState::Dead => "dead",
        }
    }

    /// No further transitions leave this state
    pub fn is_terminal(self) -> bool {
        matches!(self, HealthState::Recovered | HealthState::Dead)
    }

    /// Whether the particle still takes part in motion and collisions
    pub fn is_alive(self) -> bool {
        self != HealthState::Dead
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A circular particle moving in the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Centre of the circle
    pub position: DVec2,
    /// Velocity vector
    pub velocity: DVec2,
    /// Radius, fixed for the particle's lifetime
    pub radius: f64,
    /// Current epidemic state
    pub health: HealthState,
    /// Steps spent in `Infected`
    pub infection_timer: u32,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, health: HealthState) -> Self {
        Self {
            position,
            velocity,
            radius,
            health,
            infection_timer: 0,
        }
    }

    /// Area-based mass proxy
    #[inline]
    pub fn mass(&self) -> f64 {
        self.radius * self.radius
    }

    /// 1/2 m |v|²
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass() * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.mass() * self.velocity
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Does the circle of this particle overlap that of `other`?
    #[inline]
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Move the particle forward in time by `dt`
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Enter `Infected` with a fresh timer
    pub fn infect(&mut self) {
        self.health = HealthState::Infected;
        self.infection_timer = 0;
    }

    pub fn recover(&mut self) {
        self.health = HealthState::Recovered;
    }

    /// Enter `Dead`: stop the particle and park it at `graveyard`, outside the domain
    pub fn kill(&mut self, graveyard: DVec2) {
        self.health = HealthState::Dead;
        self.velocity = DVec2::ZERO;
        self.position = graveyard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f64, y: f64, radius: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::ZERO, radius, HealthState::Healthy)
    }

    #[test]
    fn mass_is_radius_squared() {
        let p = particle_at(0.5, 0.5, 0.02);
        assert!((p.mass() - 0.0004).abs() < 1e-15);
    }

    #[test]
    fn overlap_is_symmetric_and_strict() {
        let a = particle_at(0.3, 0.5, 0.1);
        let b = particle_at(0.45, 0.5, 0.1);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Touching exactly is not an overlap
        let c = particle_at(0.5, 0.5, 0.1);
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn infect_resets_timer() {
        let mut p = particle_at(0.5, 0.5, 0.01);
        p.infection_timer = 42;
        p.infect();
        assert_eq!(p.health, HealthState::Infected);
        assert_eq!(p.infection_timer, 0);
    }

    #[test]
    fn kill_stops_and_parks() {
        let mut p = Particle::new(
            DVec2::new(0.5, 0.5),
            DVec2::new(0.1, -0.2),
            0.01,
            HealthState::Infected,
        );
        p.kill(DVec2::new(12.0, 17.0));
        assert_eq!(p.health, HealthState::Dead);
        assert_eq!(p.velocity, DVec2::ZERO);
        assert_eq!(p.position, DVec2::new(12.0, 17.0));
        assert!(!p.is_alive());
    }

    #[test]
    fn terminal_states() {
        assert!(!HealthState::Healthy.is_terminal());
        assert!(!HealthState::Infected.is_terminal());
        assert!(HealthState::Recovered.is_terminal());
        assert!(HealthState::Dead.is_terminal());
    }

    #[test]
    fn labels_are_lowercase_names() {
        let labels: Vec<_> = HealthState::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["healthy", "infected", "recovered", "dead"]);
        assert_eq!(HealthState::Dead.to_string(), "dead");
    }
}
