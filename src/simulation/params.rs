use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::mutation::{MutationPolicy, Noise};
use super::scheduler::{ScheduleMode, SpeedMode};

/// Number of network outputs; the agent jumps when the second beats the first.
pub const OUTPUT_SIZE: usize = 2;

/// Errors raised while loading or validating [`Params`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`Params`].
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A value violates a constraint of the simulation.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Simulation parameters that control a training run.
///
/// Fixed for the lifetime of a [`GenerationController`](super::controller::GenerationController);
/// changing speed or scheduling means starting a new run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Agents spawned per generation.
    pub population: usize,
    /// Canvas width.
    pub canvas_width: f32,
    /// Canvas height.
    pub canvas_height: f32,
    /// Width of every obstacle.
    pub obstacle_width: f32,
    /// Minimum height of either half of an obstacle pair.
    pub min_obstacle_height: f32,
    /// Vertical opening between the two halves of a pair.
    pub gap_size: f32,
    /// A new obstacle pair is spawned every this many frames.
    pub obstacle_interval: u64,
    /// Horizontal position of every agent.
    pub agent_x: f32,
    /// Vertical position agents start from.
    pub agent_start_y: f32,
    /// Downward acceleration added to the velocity each tick.
    pub gravity: f32,
    /// Maximum downward velocity.
    pub terminal_velocity: f32,
    /// Velocity set by a jump (negative is upwards).
    pub jump_velocity: f32,
    /// Divisor normalising the velocity input.
    pub velocity_scale: f32,
    /// Also feed the horizontal distance to the next obstacle to the network.
    pub sense_obstacle_distance: bool,
    /// Hidden layer size.
    pub hidden_size: usize,
    /// How bred agents perturb their inherited weights.
    pub mutation: MutationPolicy,
    /// Scheduler firings per second in [`SpeedMode::Standard`].
    pub tick_rate: f64,
    /// Scheduler firings per second in [`SpeedMode::Accelerated`].
    pub accelerated_tick_rate: f64,
    /// Which tick rate preset is active.
    pub speed_mode: SpeedMode,
    /// Real-time or batch scheduling.
    pub schedule: ScheduleMode,
    /// Upper bound on scheduler firings executed by a single pump.
    pub max_catch_up: usize,
    /// Seed for obstacle heights, mutation and selection; random when absent.
    /// First-generation weights are always drawn from the thread RNG.
    pub seed: Option<u64>,
    /// Number of finished generations kept in the history.
    pub history_len: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population: 250,
            canvas_width: 500.0,
            canvas_height: 250.0,
            obstacle_width: 40.0,
            min_obstacle_height: 20.0,
            gap_size: 80.0,
            obstacle_interval: 300,
            agent_x: 150.0,
            agent_start_y: 150.0,
            gravity: 0.1,
            terminal_velocity: 4.0,
            jump_velocity: -3.0,
            velocity_scale: 3.0,
            sense_obstacle_distance: false,
            hidden_size: 5,
            mutation: MutationPolicy {
                probability: 0.1,
                noise: Noise::Gaussian { scale: 0.3 },
            },
            tick_rate: 120.0,
            accelerated_tick_rate: 480.0,
            speed_mode: SpeedMode::Standard,
            schedule: ScheduleMode::RealTime,
            max_catch_up: 8,
            seed: None,
            history_len: 500,
        }
    }
}

impl Params {
    /// Number of network inputs implied by the sensor layout.
    pub fn input_size(&self) -> usize {
        if self.sense_obstacle_distance { 5 } else { 4 }
    }

    /// Scheduler firings per second for the active speed mode.
    pub fn active_tick_rate(&self) -> f64 {
        match self.speed_mode {
            SpeedMode::Standard => self.tick_rate,
            SpeedMode::Accelerated => self.accelerated_tick_rate,
        }
    }

    /// Checks every constraint the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::Invalid("population must be positive"));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::Invalid("canvas dimensions must be positive"));
        }
        if self.obstacle_width <= 0.0 {
            return Err(ConfigError::Invalid("obstacle_width must be positive"));
        }
        if self.min_obstacle_height < 0.0 {
            return Err(ConfigError::Invalid("min_obstacle_height must not be negative"));
        }
        if self.gap_size <= 0.0 {
            return Err(ConfigError::Invalid("gap_size must be positive"));
        }
        if self.gap_size + 2.0 * self.min_obstacle_height >= self.canvas_height {
            return Err(ConfigError::Invalid(
                "gap_size plus two minimum obstacle heights must fit inside the canvas",
            ));
        }
        if self.obstacle_interval == 0 {
            return Err(ConfigError::Invalid("obstacle_interval must be positive"));
        }
        if self.velocity_scale <= 0.0 {
            return Err(ConfigError::Invalid("velocity_scale must be positive"));
        }
        if self.hidden_size == 0 {
            return Err(ConfigError::Invalid("hidden_size must be positive"));
        }
        self.mutation.validate()?;
        if !(self.tick_rate > 0.0 && self.accelerated_tick_rate > 0.0) {
            return Err(ConfigError::Invalid("tick rates must be positive"));
        }
        if let ScheduleMode::Batch { ticks_per_fire: 0 } = self.schedule {
            return Err(ConfigError::Invalid("batch ticks_per_fire must be positive"));
        }
        if self.max_catch_up == 0 {
            return Err(ConfigError::Invalid("max_catch_up must be positive"));
        }
        Ok(())
    }

    /// Parses and validates parameters from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
