//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board wraps at every edge; the only hazards are the snake itself and obstacles.

pub mod action;
pub mod config;
pub mod engine;
pub mod placement;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{EndReason, GameEngine, TickResult};
pub use placement::Placer;
pub use state::{CollisionType, GameState, Phase, Position, Snake, Snapshot};
