//! Tunables for a play session.
//!
//! Defaults give a 14x14 maze of 20-unit city blocks, slow shambling zombies
//! and a fog that thickens as they close in.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeParams {
    pub width: usize,
    pub height: usize,
    /// Chance of carving into an already visited neighbour. Zero yields a
    /// perfect maze; anything higher adds loops.
    pub braid_probability: f64,
    /// Generation gives up after `attempts_per_cell * width * height` iterations.
    pub attempts_per_cell: usize,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            width: 14,
            height: 14,
            braid_probability: 0.02,
            attempts_per_cell: 2_000,
        }
    }
}

impl MazeParams {
    pub fn max_attempts(&self) -> usize {
        self.attempts_per_cell
            .saturating_mul(self.width.saturating_mul(self.height))
            .max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitParams {
    /// World units per second.
    pub player_speed: f32,
    pub zombie_speed: f32,
    pub capture_distance: f32,
    /// Speed multiplier is `clamp(speedup_numerator / distance, 1, max_speedup)`.
    pub speedup_numerator: f32,
    pub max_speedup: f32,
}

impl Default for PursuitParams {
    fn default() -> Self {
        Self {
            player_speed: 3.5,
            zombie_speed: 2.0,
            capture_distance: 1.0,
            speedup_numerator: 20.0,
            max_speedup: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogParams {
    pub base_density: f32,
    pub max_base_density: f32,
    /// Base density grows by `delta / creep_divisor` each tick.
    pub creep_divisor: f32,
    pub proximity_scale: f32,
    pub proximity_floor: f32,
    pub caught_density: f32,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            base_density: 0.005,
            max_base_density: 0.05,
            creep_divisor: 4_000.0,
            proximity_scale: 1.5,
            proximity_floor: 4.0,
            caught_density: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    pub initial_wave: usize,
    pub wave_size: usize,
    /// Seconds between the first and second wave.
    pub first_interval: f32,
    /// Each interval is this many times longer than the one before.
    pub interval_growth: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            initial_wave: 6,
            wave_size: 2,
            first_interval: 5.0,
            interval_growth: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub maze: MazeParams,
    /// World units per occupancy grid cell.
    pub block_size: f32,
    /// Upper bound on a single simulation step, in seconds.
    pub max_delta: f32,
    pub pursuit: PursuitParams,
    pub fog: FogParams,
    pub spawn: SpawnParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            maze: MazeParams::default(),
            block_size: 20.0,
            max_delta: 0.2,
            pursuit: PursuitParams::default(),
            fog: FogParams::default(),
            spawn: SpawnParams::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maze.width == 0 || self.maze.height == 0 {
            return Err(ConfigError::MazeTooSmall {
                width: self.maze.width,
                height: self.maze.height,
            });
        }
        if !(0.0..=1.0).contains(&self.maze.braid_probability) {
            return Err(ConfigError::NotAProbability {
                field: "maze.braid_probability",
                value: self.maze.braid_probability,
            });
        }

        let positive = [
            ("block_size", self.block_size),
            ("max_delta", self.max_delta),
            ("pursuit.player_speed", self.pursuit.player_speed),
            ("pursuit.zombie_speed", self.pursuit.zombie_speed),
            ("pursuit.capture_distance", self.pursuit.capture_distance),
            ("pursuit.speedup_numerator", self.pursuit.speedup_numerator),
            ("pursuit.max_speedup", self.pursuit.max_speedup),
            ("fog.base_density", self.fog.base_density),
            ("fog.max_base_density", self.fog.max_base_density),
            ("fog.creep_divisor", self.fog.creep_divisor),
            ("fog.proximity_scale", self.fog.proximity_scale),
            ("fog.proximity_floor", self.fog.proximity_floor),
            ("spawn.first_interval", self.spawn.first_interval),
            ("spawn.interval_growth", self.spawn.interval_growth),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.pursuit.max_speedup < 1.0 {
            return Err(ConfigError::BelowOne {
                field: "pursuit.max_speedup",
                value: self.pursuit.max_speedup as f64,
            });
        }
        Ok(())
    }
}
