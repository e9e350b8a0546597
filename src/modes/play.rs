use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{GameEngine, GameSession, Mode, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::TickTimer;
use crate::render::Renderer;
use crate::storage::HighScoreStore;

/// Interactive terminal game
pub struct PlayMode {
    engine: GameEngine,
    session: GameSession,
    store: HighScoreStore,
    /// Mode the next round starts in
    mode: Mode,
    timer: TickTimer,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(
        engine: GameEngine,
        store: HighScoreStore,
        mode: Mode,
        level_id: u32,
    ) -> Result<Self> {
        let high_score = store.load()?;
        let mut session = engine
            .new_session(level_id, high_score)
            .with_context(|| format!("Cannot open level {}", level_id))?;
        session.mode = mode;
        let timer = TickTimer::new(session.speed);

        Ok(Self {
            engine,
            session,
            store,
            mode,
            timer,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only while a round runs
                _ = self.timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = Snapshot::from(&self.session);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.quit();
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key, self.session.mode);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(player, direction) => {
                self.engine.steer(&mut self.session, player, direction);
            }
            KeyAction::Start => {
                if !self.session.is_running() {
                    self.start_round();
                }
            }
            KeyAction::Restart => self.start_round(),
            KeyAction::NextLevel | KeyAction::PreviousLevel if !self.session.is_running() => {
                let changed = if action == KeyAction::NextLevel {
                    self.engine.next_level(&mut self.session)
                } else {
                    self.engine.previous_level(&mut self.session)
                };
                if let Err(err) = changed {
                    debug!(%err, "Level change ignored");
                }
            }
            KeyAction::ToggleMode if !self.session.is_running() => {
                self.mode = self.mode.toggled();
                self.session.mode = self.mode;
                info!(mode = ?self.mode, "Mode selected");
            }
            KeyAction::Quit => self.quit(),
            _ => {}
        }
    }

    fn start_round(&mut self) {
        let level_id = self.session.level_id;
        if let Err(err) = self.engine.start_round(&mut self.session, self.mode, level_id) {
            warn!(%err, "Could not start round");
            return;
        }
        self.metrics.on_round_start();
        self.timer.start(self.session.speed);
    }

    fn update_game(&mut self) {
        let result = self.engine.tick(&mut self.session);

        if let Some(period) = result.reschedule {
            self.timer.reconfigure(period);
        }

        if let Some(outcome) = result.terminated {
            self.timer.stop();
            self.metrics.on_round_over(outcome);
        }

        if let Some(score) = result.new_high_score {
            if let Err(err) = self.store.save(score) {
                warn!(?err, path = ?self.store.path(), "Failed to save high score");
            }
        }
    }

    fn quit(&mut self) {
        if self.engine.stop_round(&mut self.session) {
            self.timer.stop();
            self.metrics.on_round_stop();
        }
        self.should_quit = true;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        Direction, GameConfig, LevelCatalog, Phase, PlayerId, PlayerTag, Position, Snake,
    };
    use tempfile::TempDir;

    fn play_mode(dir: &TempDir) -> PlayMode {
        let config = GameConfig::default();
        let engine = GameEngine::new(config.clone(), LevelCatalog::builtin(config.grid())).unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.json"));
        PlayMode::new(engine, store, Mode::Single, 1).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = play_mode(&dir);
        assert_eq!(mode.session.phase, Phase::Idle);
        assert_eq!(mode.session.high_score, 0);
        assert!(!mode.timer.is_running());
    }

    #[test]
    fn test_invalid_start_level() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::default();
        let engine = GameEngine::new(config.clone(), LevelCatalog::builtin(config.grid())).unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.json"));
        assert!(PlayMode::new(engine, store, Mode::Single, 99).is_err());
    }

    #[tokio::test]
    async fn test_start_and_quit() {
        let dir = TempDir::new().unwrap();
        let mut mode = play_mode(&dir);

        mode.handle_action(KeyAction::Start);
        assert!(mode.session.is_running());
        assert!(mode.timer.is_running());

        mode.handle_action(KeyAction::Quit);
        assert!(mode.should_quit);
        assert!(!mode.timer.is_running());
        assert_eq!(mode.session.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn test_level_and_mode_locked_while_running() {
        let dir = TempDir::new().unwrap();
        let mut mode = play_mode(&dir);

        mode.handle_action(KeyAction::NextLevel);
        assert_eq!(mode.session.level_id, 2);
        mode.handle_action(KeyAction::ToggleMode);
        assert_eq!(mode.session.mode, Mode::Versus);

        mode.handle_action(KeyAction::Start);
        assert_eq!(mode.session.snakes.len(), 2);
        mode.handle_action(KeyAction::NextLevel);
        mode.handle_action(KeyAction::ToggleMode);
        assert_eq!(mode.session.level_id, 2);
        assert_eq!(mode.session.mode, Mode::Versus);
        assert!(mode.session.is_running());
    }

    #[tokio::test]
    async fn test_game_over_saves_high_score() {
        let dir = TempDir::new().unwrap();
        let mut mode = play_mode(&dir);

        mode.handle_action(KeyAction::Start);
        mode.session.scores[0] = 60;
        mode.session.snakes[0] = Snake::new(Position::new(0, 3), Direction::Left, PlayerTag::Solo);
        mode.update_game();

        assert!(!mode.timer.is_running());
        assert_eq!(mode.metrics.rounds_played, 1);
        assert_eq!(mode.store.load().unwrap(), 60);
    }

    #[tokio::test]
    async fn test_steer_goes_through_engine() {
        let dir = TempDir::new().unwrap();
        let mut mode = play_mode(&dir);
        mode.handle_action(KeyAction::Start);

        mode.handle_action(KeyAction::Steer(PlayerId::One, Direction::Left));
        assert_eq!(mode.session.snakes[0].pending_direction, Direction::Right);

        mode.handle_action(KeyAction::Steer(PlayerId::One, Direction::Up));
        assert_eq!(mode.session.snakes[0].pending_direction, Direction::Up);
    }
}
