use std::time::SystemTime;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Food, GameSession, Position, Rgb, Skin, LEVELS};
use crate::metrics::GameMetrics;

const OBSTACLE_COLOR: Color = Color::Rgb(128, 0, 128);
const SPECIAL_BLINK_ON: Color = Color::Rgb(255, 255, 0);
const SPECIAL_BLINK_OFF: Color = Color::Rgb(255, 165, 0);

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Header / centered content / footer split shared by all screens
    fn frame_chunks(&self, frame: &Frame) -> (Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        (chunks[0], content, chunks[2])
    }

    pub fn render_menu(&self, frame: &mut Frame, skin_index: usize, level_index: usize) {
        let (header, content, footer) = self.frame_chunks(frame);

        let title = Paragraph::new(Line::from(Span::styled(
            "SNAKE",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, header);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select Skin (Up/Down):",
                Style::default().fg(Color::White),
            )),
            Line::from(""),
        ];

        for (i, skin) in Skin::ALL.iter().enumerate() {
            let style = if i == skin_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(skin.name(), style)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Select Level (Left/Right):",
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));

        for (i, level) in LEVELS.iter().enumerate() {
            let style = if i == level_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("Level {}: {}", i + 1, level.description),
                style,
            )));
        }

        let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Menu "),
        );
        frame.render_widget(menu, content);

        let controls = Paragraph::new(Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to start | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(controls, footer);
    }

    pub fn render_session(
        &self,
        frame: &mut Frame,
        session: &GameSession,
        metrics: &GameMetrics,
        wall_clock: SystemTime,
    ) {
        let (header, content, footer) = self.frame_chunks(frame);

        frame.render_widget(self.session_stats(session, metrics), header);
        frame.render_widget(self.session_grid(session, wall_clock), content);

        let controls = Paragraph::new(Line::from(vec![
            Span::styled("Arrows/WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(controls, footer);
    }

    fn session_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                (session.level() + 1).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn session_grid(&self, session: &GameSession, wall_clock: SystemTime) -> Paragraph<'_> {
        let grid = session.grid();
        let food = &session.food;
        let snake = &session.snake;

        let food_cell = if food.special {
            let color = if Food::blink_on(wall_clock) {
                SPECIAL_BLINK_ON
            } else {
                SPECIAL_BLINK_OFF
            };
            Span::styled("◆ ", Style::default().fg(color).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };

        let mut lines = Vec::with_capacity(grid.height);
        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some(index) = snake.segments.iter().position(|&p| p == pos) {
                    let color = to_color(snake.skin.color_for_segment(index));
                    if index == 0 {
                        Span::styled("■ ", Style::default().fg(color).add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled("□ ", Style::default().fg(color))
                    }
                } else if pos == food.position {
                    food_cell.clone()
                } else if session.obstacles.contains(&pos) {
                    Span::styled("▒ ", Style::default().fg(OBSTACLE_COLOR))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    pub fn render_game_over(&self, frame: &mut Frame, final_score: u32, metrics: &GameMetrics) {
        let (_, content, footer) = self.frame_chunks(frame);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("   "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        let panel = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(panel, content);

        let controls = Paragraph::new(Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(controls, footer);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
