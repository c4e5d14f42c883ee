//! Session controller: the single owner of game state
//!
//! Ticks and player commands both go through [`Session`], which tells the
//! caller how the tick timer must change afterwards.

use std::time::Duration;

use crate::game::{Direction, GameConfig, GameEngine, GameState, Phase, Snapshot, TickResult};
use crate::persistence::HighScoreStore;

/// A player request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
}

/// What the tick timer should do after a session update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    Unchanged,
    /// Cancel and restart the timer at this interval
    Reschedule(Duration),
    /// Stop ticking
    Halt,
}

pub struct Session {
    engine: GameEngine,
    state: GameState,
    high_score: HighScoreStore,
}

impl Session {
    pub fn new(config: GameConfig, high_score: HighScoreStore) -> Self {
        Self::with_engine(GameEngine::new(config), high_score)
    }

    pub fn with_engine(mut engine: GameEngine, high_score: HighScoreStore) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            high_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios in tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot(self.high_score.best())
    }

    /// Run one game tick
    pub fn tick(&mut self) -> (TickResult, TimerDirective) {
        let result = self.engine.tick(&mut self.state);

        if result.ate_food {
            self.record_score();
        }

        let directive = if result.terminated() {
            TimerDirective::Halt
        } else if result.ate_food {
            TimerDirective::Reschedule(self.state.speed)
        } else {
            TimerDirective::Unchanged
        };

        (result, directive)
    }

    /// Apply a player command between ticks
    pub fn apply(&mut self, command: Command) -> TimerDirective {
        match command {
            Command::Steer(direction) => {
                if self.state.is_running() && !self.state.snake.steer(direction) {
                    log::trace!("ignored reversal to {:?}", direction);
                }
                TimerDirective::Unchanged
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
        }
    }

    fn toggle_pause(&mut self) -> TimerDirective {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                log::debug!("paused");
                TimerDirective::Halt
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                log::debug!("resumed at {:?}", self.state.speed);
                TimerDirective::Reschedule(self.state.speed)
            }
            Phase::GameOver => TimerDirective::Unchanged,
        }
    }

    fn restart(&mut self) -> TimerDirective {
        self.state = self.engine.reset();
        if self.state.is_game_over() {
            return TimerDirective::Halt;
        }
        TimerDirective::Reschedule(self.state.speed)
    }

    fn record_score(&mut self) {
        match self.high_score.record(self.state.score) {
            Ok(true) => log::info!("new high score: {}", self.state.score),
            Ok(false) => {}
            Err(e) => log::error!("Error saving high score: {:#}", e),
        }
    }
}
