//! Terminal presentation of the game

pub mod renderer;
pub mod surface;
pub mod theme;

pub use renderer::Renderer;
pub use surface::{RenderSurface, TerminalSurface};
pub use theme::Theme;
