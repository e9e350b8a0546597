use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Mode, Phase, PlayerId, PlayerTag, Position, RoundOutcome, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
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

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match snapshot.phase {
            Phase::RoundOver(outcome) => {
                let panel = self.render_round_over(snapshot, outcome, metrics);
                frame.render_widget(panel, game_area);
            }
            Phase::Idle | Phase::Running => {
                let grid = self.render_grid(snapshot);
                frame.render_widget(grid, game_area);
            }
        }

        let controls = self.render_controls(snapshot);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..snapshot.grid.height {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid.width {
                let pos = Position::new(x, y);

                let cell = if let Some((tag, is_head)) = snapshot.snake_at(pos) {
                    let style = Style::default().fg(snake_color(tag));
                    if is_head {
                        Span::styled("■ ", style.add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled("□ ", style)
                    }
                } else if snapshot.food == Some(pos) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.is_wall(pos) {
                    Span::styled("█ ", Style::default().fg(Color::Gray))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        // Solid double border means the edges kill
        let border_type = if snapshot.wrap {
            BorderType::Plain
        } else {
            BorderType::Double
        };
        let title = format!(" {} - {} ", snapshot.level_id, snapshot.level_name);

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = match snapshot.mode {
            Mode::Single => vec![
                Span::styled("Score: ", label),
                Span::styled(
                    snapshot.scores[0].to_string(),
                    value.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("High: ", label),
                Span::styled(snapshot.high_score.to_string(), value),
            ],
            Mode::Versus => vec![
                Span::styled("P1: ", Style::default().fg(snake_color(PlayerTag::One))),
                Span::styled(
                    snapshot.scores[PlayerId::One.index()].to_string(),
                    value.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("P2: ", Style::default().fg(snake_color(PlayerTag::Two))),
                Span::styled(
                    snapshot.scores[PlayerId::Two.index()].to_string(),
                    value.add_modifier(Modifier::BOLD),
                ),
            ],
        };
        spans.extend([
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed.as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_round_over(
        &self,
        snapshot: &Snapshot,
        outcome: RoundOutcome,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let (headline, color) = match outcome {
            RoundOutcome::GameOver { .. } => ("GAME OVER".to_string(), Color::Red),
            RoundOutcome::Winner(player) => {
                (format!("{} WINS", player).to_uppercase(), Color::Green)
            }
            RoundOutcome::Draw => ("DRAW".to_string(), Color::Yellow),
        };

        let detail = match outcome {
            RoundOutcome::GameOver { score, .. } => Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(score.to_string(), bold(Color::White)),
                Span::raw("    "),
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.high_score.to_string(), bold(Color::White)),
            ]),
            RoundOutcome::Winner(_) | RoundOutcome::Draw => Line::from(vec![
                Span::styled("Wins ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "P1 {} - {} P2",
                        metrics.wins(PlayerId::One),
                        metrics.wins(PlayerId::Two)
                    ),
                    bold(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Draws ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.draws.to_string(), bold(Color::White)),
            ]),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(headline, bold(color))]),
            Line::from(""),
            detail,
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let line = match (snapshot.phase, snapshot.mode) {
            (Phase::Running, Mode::Single) => Line::from(vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            (Phase::Running, Mode::Versus) => Line::from(vec![
                Span::styled("WASD", Style::default().fg(snake_color(PlayerTag::One))),
                Span::raw(" player 1 | "),
                Span::styled("↑↓←→", Style::default().fg(snake_color(PlayerTag::Two))),
                Span::raw(" player 2 | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("Enter", key),
                Span::raw(format!(" to start {} | ", mode_name(snapshot.mode))),
                Span::styled("M", key),
                Span::raw(" mode | "),
                Span::styled("N/P", key),
                Span::raw(" level | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn snake_color(tag: PlayerTag) -> Color {
    match tag {
        PlayerTag::Solo => Color::Green,
        PlayerTag::One => Color::Cyan,
        PlayerTag::Two => Color::Magenta,
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Single => "single player",
        Mode::Versus => "versus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, LevelCatalog};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn snapshot(mode: Mode) -> Snapshot {
        let config = GameConfig::default();
        let mut engine =
            GameEngine::new(config.clone(), LevelCatalog::builtin(config.grid())).unwrap();
        let mut session = engine.new_session(1, 70).unwrap();
        engine.start_round(&mut session, mode, 1).unwrap();
        Snapshot::from(&session)
    }

    #[test]
    fn test_running_frame_shows_scores() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let snapshot = snapshot(Mode::Single);

        terminal
            .draw(|frame| Renderer::new().render(frame, &snapshot, &GameMetrics::new()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score:"));
        assert!(text.contains("High:"));
        assert!(text.contains("Classic"));
    }

    #[test]
    fn test_versus_winner_panel() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut snapshot = snapshot(Mode::Versus);
        snapshot.phase = Phase::RoundOver(RoundOutcome::Winner(PlayerId::Two));

        terminal
            .draw(|frame| Renderer::new().render(frame, &snapshot, &GameMetrics::new()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("PLAYER 2 WINS"));
        assert!(text.contains("P1:"));
    }
}
