use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::grid::Grid;

/// A configuration value the engine cannot run with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell_size must be positive")]
    ZeroCellSize,
    #[error("board_size ({board}) must be at least one cell ({cell})")]
    BoardTooSmall { board: u32, cell: u32 },
    #[error("min_tick_ms must be positive")]
    ZeroMinTick,
    #[error("initial_tick_ms ({initial}) must not be below min_tick_ms ({min})")]
    InitialBelowFloor { initial: u64, min: u64 },
    #[error("speed_milestone must be positive")]
    ZeroSpeedMilestone,
    #[error("food_attempts must be positive")]
    ZeroFoodAttempts,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of one cell in board units
    pub cell_size: u32,
    /// Size of the square board in board units
    pub board_size: u32,

    /// Tick period at the start of a round, in milliseconds
    pub initial_tick_ms: u64,
    /// The tick period never drops below this
    pub min_tick_ms: u64,
    /// How much each speed-up shortens the tick period
    pub tick_step_ms: u64,

    /// Points for eating one food
    pub food_reward: u32,
    /// Single-player score multiple that triggers a speed-up
    pub speed_milestone: u32,
    /// Rejection-sampling cap for food placement
    pub food_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            board_size: 400,
            initial_tick_ms: 150,
            min_tick_ms: 80,
            tick_step_ms: 5,
            food_reward: 10,
            speed_milestone: 50,
            food_attempts: 100,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a custom board
    pub fn new(board_size: u32, cell_size: u32) -> Self {
        Self {
            board_size,
            cell_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(200, 20)
    }

    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Grid dimensions derived from board and cell size
    pub fn grid(&self) -> Grid {
        let cells = (self.board_size / self.cell_size.max(1)) as i32;
        Grid::new(cells, cells)
    }

    pub fn initial_tick(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    /// Check that all parameters are in valid ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.board_size < self.cell_size {
            return Err(ConfigError::BoardTooSmall {
                board: self.board_size,
                cell: self.cell_size,
            });
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinTick);
        }
        if self.initial_tick_ms < self.min_tick_ms {
            return Err(ConfigError::InitialBelowFloor {
                initial: self.initial_tick_ms,
                min: self.min_tick_ms,
            });
        }
        if self.speed_milestone == 0 {
            return Err(ConfigError::ZeroSpeedMilestone);
        }
        if self.food_attempts == 0 {
            return Err(ConfigError::ZeroFoodAttempts);
        }
        Ok(())
    }
}
