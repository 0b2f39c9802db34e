//! Step-driven simulation loop
//!
//! One call to [`Simulation::step`] performs, in order:
//! 1. look up `dt` from the mobility schedule,
//! 2. integrate every live particle and reflect it off the walls,
//! 3. resolve pairwise collisions and transmissions,
//! 4. advance infection timers and resolve finished infections,
//! 5. record the census for the step.
//!
//! The particle vector is owned here and only mutated through the components
//! above, so a step is atomic from the caller's point of view.

use crate::census::Census;
use crate::collision::{CollisionEngine, CollisionReport};
use crate::epidemic::{ClockReport, EpidemicClock};
use crate::error::{Error, Result};
use crate::params::{validate_radius, SimulationConfig};
use crate::placement::populate;
use contagion_physics::{reflect_walls, HealthState, Particle};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the presentation layer needs to draw one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: DVec2,
    pub health: HealthState,
}

/// Result of one step, borrowed from the simulation
#[derive(Debug)]
pub struct StepSnapshot<'a> {
    /// Index of the step that was just performed (0-based)
    pub step: u64,
    /// Time step used for integration
    pub dt: f64,
    pub census: Census,
    pub collisions: CollisionReport,
    pub transitions: ClockReport,
    particles: &'a [Particle],
}

impl StepSnapshot<'_> {
    pub fn particles(&self) -> &[Particle] {
        self.particles
    }

    /// Position and health label of every particle, in index order
    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().map(|p| ParticleView {
            position: p.position,
            health: p.health,
        })
    }

    /// Healthy, infected, recovered and dead fractions
    pub fn fractions(&self) -> [f64; 4] {
        self.census.fractions()
    }
}

/// Particle epidemic simulation in the unit square
pub struct Simulation {
    config: SimulationConfig,
    particles: Vec<Particle>,
    engine: CollisionEngine,
    clock: EpidemicClock,
    rng: StdRng,
    step: u64,
    census: Vec<Census>,
}

impl Simulation {
    /// Validate `config` and place the initial population.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);

        log::info!(
            "Placing {} particles ({} infected)...",
            config.particle_count,
            config.initial_infected
        );
        let particles = populate(&mut rng, &config)?;

        Ok(Self::assemble(config, particles, rng))
    }

    /// Start from an explicit population instead of random placement.
    ///
    /// Only the dynamic parameters of `config` are used; `particle_count` is
    /// overwritten with the length of `particles`.
    pub fn from_particles(mut config: SimulationConfig, particles: Vec<Particle>) -> Result<Self> {
        config.validate_dynamics()?;
        if particles.is_empty() {
            return Err(Error::InvalidParam("particle_count must be > 0".into()));
        }
        particles.iter().try_for_each(|p| validate_radius(p.radius))?;
        config.particle_count = particles.len();

        let rng = seeded_rng(config.seed);
        Ok(Self::assemble(config, particles, rng))
    }

    fn assemble(config: SimulationConfig, particles: Vec<Particle>, rng: StdRng) -> Self {
        let engine = CollisionEngine::new(config.transmission_rate, config.debounce_physics);
        let clock = EpidemicClock::new(config.disease_duration, config.death_rate);
        let initial = Census::from_particles(&particles);

        log::info!("✓ Simulation initialized: {}", initial);
        log::info!(
            "  transmission_rate={:.2}, disease_duration={}, death_rate={:.2}, dt={}, schedule={}",
            config.transmission_rate,
            config.disease_duration,
            config.death_rate,
            config.dt,
            config.schedule
        );

        Self {
            config,
            particles,
            engine,
            clock,
            rng,
            step: 0,
            census: vec![initial],
        }
    }

    /// Advance the simulation by one step.
    pub fn step(&mut self) -> StepSnapshot<'_> {
        let step = self.step;
        let dt = self.config.schedule.dt_at(step, self.config.dt);

        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.advance(dt);
            reflect_walls(p);
        }

        let collisions = self.engine.resolve(&mut self.particles, &mut self.rng);
        let transitions = self.clock.tick(&mut self.particles, &mut self.rng);

        let census = Census::from_particles(&self.particles);
        self.census.push(census);
        self.step += 1;

        if !collisions.infected.is_empty()
            || !transitions.recovered.is_empty()
            || !transitions.died.is_empty()
        {
            log::debug!(
                "step {step}: dt={dt}, contacts={}/{}, infected={:?}, recovered={:?}, died={:?}",
                collisions.new_contacts,
                collisions.overlapping,
                collisions.infected,
                transitions.recovered,
                transitions.died
            );
        }

        StepSnapshot {
            step,
            dt,
            census,
            collisions,
            transitions,
            particles: &self.particles,
        }
    }

    /// Perform `steps` steps and return the full census series.
    pub fn run(&mut self, steps: u64) -> &[Census] {
        for _ in 0..steps {
            self.step();
        }
        log::info!(
            "✓ Ran {} steps (total {}): {}",
            steps,
            self.step,
            self.latest_census()
        );
        &self.census
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of steps performed so far
    pub fn current_step(&self) -> u64 {
        self.step
    }

    /// Census at initialization followed by one entry per step
    pub fn census_history(&self) -> &[Census] {
        &self.census
    }

    pub fn latest_census(&self) -> Census {
        // The series always holds the initial census
        self.census.last().copied().unwrap_or_default()
    }

    pub fn collision_engine(&self) -> &CollisionEngine {
        &self.engine
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("RNG seed: {seed}");
    StdRng::seed_from_u64(seed)
}
