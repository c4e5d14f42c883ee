//! Wrap Snake - a terminal snake game on a wrapping grid
//!
//! This library provides:
//! - Core game logic: movement, wrapping, collisions, food and obstacle placement (game module)
//! - The session controller that owns game state between ticks (session module)
//! - A reschedulable tick timer (scheduler module)
//! - High score persistence (persistence module)
//! - TUI rendering and key mapping (render, input modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod scheduler;
pub mod session;
