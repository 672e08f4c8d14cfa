//! Configuration System
//!
//! Loads tuning parameters from a TOML file so flocks can be adjusted without
//! recompiling. Every section and field is optional and falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::components::agent::SteeringGains;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Shortest accepted neighbor refresh period, in seconds
pub const MIN_REFRESH_PERIOD: f64 = 1e-3;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("world.number_to_spawn must not be negative (got {0})")]
    NegativePopulation(i64),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("refresh.period must be at least {MIN_REFRESH_PERIOD}s (got {0})")]
    PeriodTooShort(f64),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("simulation.delta_time_jitter must be below 1.0 (got {0})")]
    JitterTooLarge(f32),
    #[error("simulation.snapshot_interval must be at least 1")]
    ZeroSnapshotInterval,
}

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FlockConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Population and boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Signed so a negative count is reported instead of failing to parse
    pub number_to_spawn: i64,
    pub containment_radius: f32,
    /// Seed for spawning and frame-time jitter
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            number_to_spawn: 50,
            containment_radius: 10.0,
            seed: 42,
        }
    }
}

/// Per-agent motion and steering parameters, shared by every spawned agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub speed: f32,
    pub perception_radius: f32,
    pub alignment_strength: f32,
    pub cohesion_strength: f32,
    pub separation_strength: f32,
    pub containment_strength: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let gains = SteeringGains::default();
        Self {
            speed: 5.0,
            perception_radius: 2.5,
            alignment_strength: gains.alignment,
            cohesion_strength: gains.cohesion,
            separation_strength: gains.separation,
            containment_strength: gains.containment,
        }
    }
}

impl AgentConfig {
    pub fn gains(&self) -> SteeringGains {
        SteeringGains {
            alignment: self.alignment_strength,
            cohesion: self.cohesion_strength,
            separation: self.separation_strength,
            containment: self.containment_strength,
        }
    }
}

/// Neighbor cache refresh timing, in simulation seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub period: f64,
    pub initial_delay: f64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            period: 1.0,
            initial_delay: 0.5,
        }
    }
}

/// Host loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ticks: u64,
    /// Nominal frame time in seconds
    pub delta_time: f32,
    /// Each frame time is drawn from `delta_time * (1 ± jitter)`
    pub delta_time_jitter: f32,
    /// Ticks between snapshots written by the CLI
    pub snapshot_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 1000,
            delta_time: 1.0 / 60.0,
            delta_time_jitter: 0.0,
            snapshot_interval: 100,
        }
    }
}

impl FlockConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading tuning from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::info!("No tuning file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Population size after validation
    pub fn population(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.world.number_to_spawn)
            .map_err(|_| ConfigError::NegativePopulation(self.world.number_to_spawn))
    }

    /// Check every value before a simulation is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.population()?;
        positive("world.containment_radius", self.world.containment_radius)?;

        positive("agent.speed", self.agent.speed)?;
        positive("agent.perception_radius", self.agent.perception_radius)?;
        non_negative("agent.alignment_strength", self.agent.alignment_strength)?;
        non_negative("agent.cohesion_strength", self.agent.cohesion_strength)?;
        non_negative("agent.separation_strength", self.agent.separation_strength)?;
        non_negative("agent.containment_strength", self.agent.containment_strength)?;

        positive("refresh.period", self.refresh.period)?;
        if self.refresh.period < MIN_REFRESH_PERIOD {
            return Err(ConfigError::PeriodTooShort(self.refresh.period));
        }
        non_negative("refresh.initial_delay", self.refresh.initial_delay)?;

        positive("simulation.delta_time", self.simulation.delta_time)?;
        non_negative("simulation.delta_time_jitter", self.simulation.delta_time_jitter)?;
        if self.simulation.delta_time_jitter >= 1.0 {
            return Err(ConfigError::JitterTooLarge(self.simulation.delta_time_jitter));
        }
        if self.simulation.snapshot_interval == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
