use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

use super::theme::Theme;
use crate::game::{Phase, Position, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer {
    theme: Theme,
    /// Decorative clock for the food pulse; unrelated to game ticks
    animation_start: Instant,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            animation_start: Instant::now(),
        }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot<'_>, metrics: &GameMetrics) {
        self.render_at(frame, snapshot, metrics, self.animation_start.elapsed());
    }

    /// Draw one frame with the animation clock at `animation_time`
    pub fn render_at(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot<'_>,
        metrics: &GameMetrics,
        animation_time: Duration,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid_width =
            cells_to_columns(snapshot.grid_width, self.theme.cell_width).saturating_add(2);
        let grid_height = cells_to_columns(snapshot.grid_height, 1).saturating_add(2);
        let game_area = centered(chunks[1], grid_width, grid_height);

        if snapshot.is_game_over() {
            let area = centered(chunks[1], grid_width.max(36), grid_height.max(10));
            frame.render_widget(self.render_game_over(snapshot), area);
        } else {
            let grid = self.render_grid(snapshot, animation_time);
            frame.render_widget(grid, game_area);

            if snapshot.phase == Phase::Paused {
                let popup = centered(game_area, 20, 3);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_paused(), popup);
            }
        }

        let controls = self.render_controls(snapshot.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>, animation_time: Duration) -> Paragraph<'_> {
        let theme = &self.theme;
        let head = snapshot.head();
        let food_glyph = theme.food_glyph_at(animation_time);
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(theme.head_glyph, theme.head)
                } else if snapshot.snake.contains(&pos) {
                    Span::styled(theme.body_glyph, theme.body)
                } else if snapshot.food == Some(pos) {
                    Span::styled(food_glyph, theme.food)
                } else if snapshot.obstacles.contains(&pos) {
                    Span::styled(theme.obstacle_glyph, theme.obstacle)
                } else {
                    Span::styled(theme.empty_glyph, theme.empty)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(theme.border)
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'_> {
        let theme = &self.theme;
        let text = vec![Line::from(vec![
            Span::styled("Score: ", theme.label),
            Span::styled(snapshot.score.to_string(), theme.value),
            Span::raw("    "),
            Span::styled("High: ", theme.label),
            Span::styled(snapshot.high_score.to_string(), theme.value),
            Span::raw("    "),
            Span::styled("Speed: ", theme.label),
            Span::styled(
                format!("{}ms", snapshot.speed.as_millis()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", theme.label),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let theme = &self.theme;
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", theme.label),
                Span::styled(snapshot.score.to_string(), theme.value),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", theme.label),
                Span::styled(snapshot.high_score.to_string(), theme.value),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let pause_hint = if phase == Phase::Paused {
            " to resume | "
        } else {
            " to pause | "
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cells_to_columns(cells: usize, cell_width: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_width)
}

/// A `width` x `height` rect centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
