use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::Phase;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{RenderSurface, TerminalSurface};
use crate::scheduler::TickScheduler;
use crate::session::{Command, Session, TimerDirective};

pub struct HumanMode {
    session: Session,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let mut surface = TerminalSurface::new(CrosstermBackend::new(stderr))?;
        let terminal = surface.terminal_mut();
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut surface).await;

        // Cleanup terminal
        cleanup_terminal(&mut surface)?;

        result
    }

    async fn run_game_loop<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut scheduler = TickScheduler::new(self.session.state().speed);
        if !self.session.state().is_running() {
            scheduler.cancel();
        }

        // Redraw at ~30 FPS so the food pulse animates between ticks
        let mut animation_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    let directive = self.handle_stream_item(maybe_event);
                    apply_directive(&mut scheduler, directive);
                    surface.present(&self.session.snapshot(), &self.metrics)?;
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    let directive = self.update_game();
                    apply_directive(&mut scheduler, directive);
                    surface.present(&self.session.snapshot(), &self.metrics)?;
                }

                // Animation frame
                _ = animation_timer.tick() => {
                    self.metrics.update();
                    surface.present(&self.session.snapshot(), &self.metrics)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_stream_item(&mut self, item: Option<std::io::Result<Event>>) -> TimerDirective {
        match item {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => {
                log::warn!("failed to read terminal event: {}", err);
                TimerDirective::Unchanged
            }
            // The terminal went away; nothing more can be read
            None => {
                self.should_quit = true;
                TimerDirective::Unchanged
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> TimerDirective {
        let Event::Key(key) = event else {
            return TimerDirective::Unchanged;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return TimerDirective::Unchanged;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(command) => self.apply_command(command),
            KeyAction::Quit => {
                self.should_quit = true;
                TimerDirective::Unchanged
            }
            KeyAction::None => TimerDirective::Unchanged,
        }
    }

    fn apply_command(&mut self, command: Command) -> TimerDirective {
        let directive = self.session.apply(command);

        match command {
            Command::TogglePause => match self.session.state().phase {
                Phase::Paused => self.metrics.on_pause(),
                Phase::Running => self.metrics.on_resume(),
                Phase::GameOver => {}
            },
            Command::Restart => self.metrics.on_game_start(),
            Command::Steer(_) => {}
        }

        directive
    }

    fn update_game(&mut self) -> TimerDirective {
        let (result, directive) = self.session.tick();

        if result.terminated() {
            self.metrics.on_game_over();
        }

        directive
    }
}

fn apply_directive(scheduler: &mut TickScheduler, directive: TimerDirective) {
    match directive {
        TimerDirective::Unchanged => {}
        TimerDirective::Reschedule(period) => scheduler.reschedule(period),
        TimerDirective::Halt => scheduler.cancel(),
    }
}

fn cleanup_terminal(surface: &mut TerminalSurface<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    let terminal = surface.terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
