//! Simulation Loop
//!
//! The host loop: owns the world, the clock and the refresh timer, and drives
//! the two cadences. Every step first performs a neighbor refresh if the
//! timer is due, then a motion tick for every agent. The two never overlap.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::components::world::World;
use crate::config::{ConfigError, FlockConfig};
use crate::setup::{spawn_population, SpawnSummary};
use crate::systems::{refresh_all, tick_all, RefreshSchedule, SimClock};

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub tick: u64,
    pub delta_time: f32,
    /// Whether neighbor caches were refreshed before moving
    pub refreshed: bool,
    /// Agents with at least one qualifying neighbor
    pub steering: usize,
}

/// A running flock
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    clock: SimClock,
    schedule: RefreshSchedule,
    config: FlockConfig,
    rng: SmallRng,
    refresh_count: u64,
}

impl Simulation {
    /// Validate `config`, then build and populate a world from it.
    pub fn new(config: FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let count = config.population()?;

        let mut rng = SmallRng::seed_from_u64(config.world.seed);
        let mut world = World::with_capacity(config.world.containment_radius, count)?;
        spawn_population(&mut world, count, &config.agent, &mut rng);

        Ok(Self::from_world(world, config, rng))
    }

    /// Wrap an already populated world.
    ///
    /// `config` supplies the refresh timing and frame time; its world and
    /// agent sections are not applied.
    pub fn with_world(world: World, config: FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = SmallRng::seed_from_u64(config.world.seed);
        Ok(Self::from_world(world, config, rng))
    }

    fn from_world(world: World, config: FlockConfig, rng: SmallRng) -> Self {
        Self {
            world,
            clock: SimClock::new(),
            schedule: RefreshSchedule::from_config(&config.refresh),
            config,
            rng,
            refresh_count: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn schedule(&self) -> &RefreshSchedule {
        &self.schedule
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Number of population-wide refreshes performed so far
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn spawn_summary(&self) -> SpawnSummary {
        crate::setup::get_spawn_summary(&self.world)
    }

    /// Advance the simulation by `delta_time` seconds.
    pub fn step(&mut self, delta_time: f32) -> StepReport {
        self.clock.advance(delta_time);
        let now = self.clock.elapsed();

        let refreshed = self.schedule.is_due(now);
        if refreshed {
            refresh_all(&mut self.world);
            let skipped = self.schedule.advance(now);
            if skipped > 0 {
                tracing::debug!(skipped, "Frame crossed several refresh periods");
            }
            self.refresh_count += 1;
        }

        let motion = tick_all(&mut self.world, delta_time);

        StepReport {
            tick: self.clock.tick(),
            delta_time: self.clock.delta_time(),
            refreshed,
            steering: motion.steering,
        }
    }

    /// Frame time for the next step, jittered around the configured value
    pub fn next_delta_time(&mut self) -> f32 {
        let base = self.config.simulation.delta_time;
        let jitter = self.config.simulation.delta_time_jitter;
        if jitter > 0.0 {
            base * (1.0 + self.rng.gen_range(-jitter..=jitter))
        } else {
            base
        }
    }

    /// Step with the configured frame time.
    pub fn step_frame(&mut self) -> StepReport {
        let delta_time = self.next_delta_time();
        self.step(delta_time)
    }

    /// Run `ticks` frames, returning the last report.
    pub fn run(&mut self, ticks: u64) -> Option<StepReport> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.step_frame());
        }
        last
    }
}
