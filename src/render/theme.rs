use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Visual constants for the board
///
/// Every glyph is `cell_width` columns wide so the grid stays square-ish in a
/// terminal where cells are taller than they are wide.
#[derive(Debug, Clone)]
pub struct Theme {
    pub cell_width: u16,
    pub head_glyph: &'static str,
    pub body_glyph: &'static str,
    pub food_glyph: &'static str,
    /// Food glyph for the shrunken half of the pulse
    pub food_glyph_small: &'static str,
    pub obstacle_glyph: &'static str,
    pub empty_glyph: &'static str,
    pub head: Style,
    pub body: Style,
    pub food: Style,
    pub obstacle: Style,
    pub empty: Style,
    pub border: Style,
    pub label: Style,
    pub value: Style,
}

impl Theme {
    pub const DEFAULT: Theme = Theme {
        cell_width: 2,
        head_glyph: "■ ",
        body_glyph: "□ ",
        food_glyph: "● ",
        food_glyph_small: "• ",
        obstacle_glyph: "██",
        empty_glyph: ". ",
        head: Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
        body: Style::new().fg(Color::Green),
        food: Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        obstacle: Style::new().fg(Color::Gray),
        empty: Style::new().fg(Color::DarkGray),
        border: Style::new().fg(Color::White),
        label: Style::new().fg(Color::Yellow),
        value: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    };

    /// Pick the food glyph for a point on the animation clock
    pub fn food_glyph_at(&self, animation_time: Duration) -> &'static str {
        if food_pulse(animation_time) >= 1.0 {
            self.food_glyph
        } else {
            self.food_glyph_small
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scale factor of the food marker: a 12% swing on a 400ms time base
pub fn food_pulse(animation_time: Duration) -> f64 {
    let t = animation_time.as_secs_f64() * 1000.0 / 400.0;
    1.0 + 0.12 * t.sin()
}
