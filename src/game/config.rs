use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Reasons a [`GameConfig`] can be rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid dimension {0} does not fit in a signed 32-bit coordinate")]
    GridTooLarge(usize),
    #[error("start position ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("initial snake length must be between 1 and {max}, got {got}")]
    InvalidSnakeLength { got: usize, max: usize },
    #[error("min_speed_ms must be positive")]
    ZeroMinSpeed,
    #[error("initial_speed_ms ({initial}) cannot be below min_speed_ms ({min})")]
    InitialBelowMin { initial: u64, min: u64 },
    #[error("max_placement_attempts must be at least 1")]
    ZeroPlacementAttempts,
}

/// Configuration for the game
///
/// Missing fields fall back to [`GameConfig::default`] when deserializing, so
/// a JSON file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Cell the snake's head occupies after a restart
    pub start_position: (i32, i32),
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Obstacles requested per game; fewer may be placed on a crowded board
    pub obstacle_count: usize,
    /// Tick interval at game start, in milliseconds
    pub initial_speed_ms: u64,
    /// Tick interval reduction per food item, in milliseconds
    pub speed_decrement_ms: u64,
    /// Floor for the tick interval, in milliseconds
    pub min_speed_ms: u64,
    /// Random samples tried per obstacle before giving up on it
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start_position: (8, 10),
            initial_snake_length: 1,
            obstacle_count: 6,
            initial_speed_ms: 120,
            speed_decrement_ms: 3,
            min_speed_ms: 50,
            max_placement_attempts: 500,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    ///
    /// The start position is moved to the centre so it stays on the board.
    pub fn small() -> Self {
        Self {
            start_position: (5, 5),
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a JSON file, filling gaps with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn initial_speed(&self) -> Duration {
        Duration::from_millis(self.initial_speed_ms)
    }

    pub fn speed_decrement(&self) -> Duration {
        Duration::from_millis(self.speed_decrement_ms)
    }

    pub fn min_speed(&self) -> Duration {
        Duration::from_millis(self.min_speed_ms)
    }

    /// Check that every parameter describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for dim in [self.grid_width, self.grid_height] {
            if i32::try_from(dim).is_err() {
                return Err(ConfigError::GridTooLarge(dim));
            }
        }

        let (x, y) = self.start_position;
        if x < 0 || y < 0 || x as usize >= self.grid_width || y as usize >= self.grid_height {
            return Err(ConfigError::StartOutOfBounds {
                x,
                y,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        // The initial body trails left of the head and must not wrap onto itself
        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_width {
            return Err(ConfigError::InvalidSnakeLength {
                got: self.initial_snake_length,
                max: self.grid_width,
            });
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }

        if self.initial_speed_ms < self.min_speed_ms {
            return Err(ConfigError::InitialBelowMin {
                initial: self.initial_speed_ms,
                min: self.min_speed_ms,
            });
        }

        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }

        Ok(())
    }
}
