use anyhow::{Context, Result};
use ratatui::{Terminal, backend::Backend};

use super::renderer::Renderer;
use crate::game::Snapshot;
use crate::metrics::GameMetrics;

/// Anything that can show a frame of the game
///
/// Surfaces only read the snapshot; they never feed back into game logic.
pub trait RenderSurface {
    fn present(&mut self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Result<()>;
}

/// A ratatui terminal drawing with [`Renderer`]
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            renderer: Renderer::new(),
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn present(&mut self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, snapshot, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}
