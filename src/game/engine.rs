use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::{Direction, PlayerId},
    collision::{eats, CollisionType},
    config::{ConfigError, GameConfig},
    food::{self, Occupancy, Placement},
    grid::{Grid, Position},
    level::{LevelCatalog, LevelError},
    snake::{PlayerTag, Snake},
    state::{GameSession, Mode, Phase, RoundOutcome},
};

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Per player, whether the snake ate food this tick
    pub ate_food: [bool; 2],
    /// Per player, the collision that killed it
    pub collisions: [Option<CollisionType>; 2],
    /// Food placement ran out of attempts and may overlap something
    pub food_exhausted: bool,
}

/// Result of a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// False when the session was not running and nothing happened
    pub ticked: bool,
    /// Set on the tick that ends the round; the scheduler must stop
    pub terminated: Option<RoundOutcome>,
    /// New tick period the scheduler must switch to
    pub reschedule: Option<Duration>,
    /// Score to persist as the new high score
    pub new_high_score: Option<u32>,
    pub info: TickInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    catalog: LevelCatalog,
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, catalog: LevelCatalog) -> Result<Self, ConfigError> {
        Self::with_rng(config, catalog, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Fails if `config` would leave an empty grid or a zero divisor
    pub fn with_rng(
        config: GameConfig,
        catalog: LevelCatalog,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> Grid {
        self.config.grid()
    }

    /// Create an idle session with `level_id` loaded
    pub fn new_session(&self, level_id: u32, high_score: u32) -> Result<GameSession, LevelError> {
        let mut session = GameSession::new(self.grid(), self.config.initial_tick(), high_score);
        self.load_level(&mut session, level_id)?;
        Ok(session)
    }

    /// Copy a level's walls and wrap flag into the session
    ///
    /// A running round is stopped, since its snakes may now overlap walls.
    pub fn load_level(&self, session: &mut GameSession, level_id: u32) -> Result<(), LevelError> {
        let level = self.catalog.get(level_id)?;

        session.level_id = level_id;
        session.level_name = level.name.clone();
        session.walls = level.walls.clone();
        session.wrap = level.wrap;
        session.phase = Phase::Idle;
        session.snakes.clear();
        session.food = None;

        info!(
            level = level_id,
            name = %level.name,
            walls = level.walls.len(),
            wrap = level.wrap,
            "Loaded level"
        );
        Ok(())
    }

    pub fn next_level(&self, session: &mut GameSession) -> Result<u32, LevelError> {
        let next = self.catalog.next(session.level_id)?;
        self.load_level(session, next)?;
        Ok(next)
    }

    pub fn previous_level(&self, session: &mut GameSession) -> Result<u32, LevelError> {
        let previous = self.catalog.previous(session.level_id)?;
        self.load_level(session, previous)?;
        Ok(previous)
    }

    /// Reset the session and start a fresh round
    pub fn start_round(
        &mut self,
        session: &mut GameSession,
        mode: Mode,
        level_id: u32,
    ) -> Result<(), LevelError> {
        self.load_level(session, level_id)?;

        session.mode = mode;
        session.scores = [0; 2];
        session.speed = self.config.initial_tick();
        session.ticks = 0;
        session.snakes = spawn_snakes(mode, session.grid);
        session.food = None;
        self.relocate_food(session);
        session.phase = Phase::Running;

        info!(
            ?mode,
            level = level_id,
            speed_ms = session.speed.as_millis() as u64,
            "Round started"
        );
        Ok(())
    }

    /// Abandon the running round without an outcome
    pub fn stop_round(&self, session: &mut GameSession) -> bool {
        if !session.is_running() {
            return false;
        }
        session.phase = Phase::Idle;
        info!(ticks = session.ticks, "Round stopped");
        true
    }

    /// Buffer a direction intent for `player`'s snake
    pub fn steer(&self, session: &mut GameSession, player: PlayerId, direction: Direction) -> bool {
        if !session.is_running() {
            return false;
        }
        session
            .snake_mut(player)
            .is_some_and(|snake| snake.set_pending_direction(direction))
    }

    /// Advance the session by one tick
    pub fn tick(&mut self, session: &mut GameSession) -> TickResult {
        if !session.is_running() {
            return TickResult::default();
        }

        let mut result = match session.mode {
            Mode::Single => self.tick_single(session),
            Mode::Versus => self.tick_versus(session),
        };

        session.ticks += 1;
        if result.terminated.is_none() && self.food_blocked(session) {
            // A full board may have left food under a snake; retry now that tails moved
            let placement = self.relocate_food(session);
            result.info.food_exhausted |= placement.exhausted;
        }
        result.ticked = true;
        result
    }

    fn tick_single(&mut self, session: &mut GameSession) -> TickResult {
        let mut result = TickResult::default();
        let grid = session.grid;
        let wrap = session.wrap;

        let Some(snake) = session.snakes.first_mut() else {
            return result;
        };
        snake.advance();
        snake.apply_wrap(grid, wrap);

        if let Some(cause) = session.arena().check(&session.snakes[0], None) {
            let score = session.scores[0];
            result.info.collisions[0] = Some(cause);
            let outcome = RoundOutcome::GameOver { score, cause };
            result.terminated = Some(self.end_round(session, outcome));

            if score > session.high_score {
                session.high_score = score;
                result.new_high_score = Some(score);
                info!(score, "New high score");
            }
            return result;
        }

        if self.consume_food(session, PlayerId::One, &mut result) {
            let score = session.scores[0];
            if score % self.config.speed_milestone == 0 {
                let floor = Duration::from_millis(self.config.min_tick_ms);
                let step = Duration::from_millis(self.config.tick_step_ms);
                let faster = session.speed.saturating_sub(step).max(floor);
                if faster != session.speed {
                    session.speed = faster;
                    result.reschedule = Some(faster);
                    debug!(score, speed_ms = faster.as_millis() as u64, "Speed increased");
                }
            }
        }

        result
    }

    fn tick_versus(&mut self, session: &mut GameSession) -> TickResult {
        let mut result = TickResult::default();
        let grid = session.grid;
        let wrap = session.wrap;

        if session.snakes.len() < Mode::Versus.player_count() {
            return result;
        }
        for snake in session.snakes.iter_mut() {
            snake.advance();
            snake.apply_wrap(grid, wrap);
        }

        let arena = session.arena();
        let one = arena.check(&session.snakes[0], Some(&session.snakes[1]));
        let two = arena.check(&session.snakes[1], Some(&session.snakes[0]));
        result.info.collisions = [one, two];

        let outcome = match (one.is_some(), two.is_some()) {
            (true, true) => Some(RoundOutcome::Draw),
            (true, false) => Some(RoundOutcome::Winner(PlayerId::Two)),
            (false, true) => Some(RoundOutcome::Winner(PlayerId::One)),
            (false, false) => None,
        };
        if let Some(outcome) = outcome {
            result.terminated = Some(self.end_round(session, outcome));
            return result;
        }

        for player in [PlayerId::One, PlayerId::Two] {
            self.consume_food(session, player, &mut result);
        }
        result
    }

    /// Grow and score if `player`'s head is on the food, otherwise drop the
    /// tail. Returns whether food was eaten.
    fn consume_food(
        &mut self,
        session: &mut GameSession,
        player: PlayerId,
        result: &mut TickResult,
    ) -> bool {
        let index = player.index();
        let ate = session
            .food
            .is_some_and(|food| eats(&session.snakes[index], food));

        if ate {
            session.scores[index] += self.config.food_reward;
            result.info.ate_food[index] = true;
            let placement = self.relocate_food(session);
            result.info.food_exhausted |= placement.exhausted;
        } else {
            session.snakes[index].truncate_tail();
        }
        ate
    }

    fn end_round(&self, session: &mut GameSession, outcome: RoundOutcome) -> RoundOutcome {
        session.phase = Phase::RoundOver(outcome);
        info!(?outcome, scores = ?session.scores, ticks = session.ticks, "Round over");
        outcome
    }

    fn relocate_food(&mut self, session: &mut GameSession) -> Placement {
        let mut forbidden: Vec<&dyn Occupancy> = Vec::with_capacity(1 + session.snakes.len());
        forbidden.push(&session.walls);
        for snake in &session.snakes {
            forbidden.push(snake);
        }

        let placement = food::place(
            &mut self.rng,
            session.grid,
            &forbidden,
            self.config.food_attempts,
        );
        if placement.exhausted {
            warn!(
                attempts = placement.attempts,
                x = placement.position.x,
                y = placement.position.y,
                "No free cell found for food; keeping last sample"
            );
        }
        session.food = Some(placement.position);
        placement
    }

    fn food_blocked(&self, session: &GameSession) -> bool {
        session.food.is_some_and(|food| {
            session.walls.contains(&food) || session.snakes.iter().any(|snake| snake.occupies(food))
        })
    }
}

/// Fresh snakes for a new round, indexed by player
pub fn spawn_snakes(mode: Mode, grid: Grid) -> Vec<Snake> {
    let row = grid.height / 2;
    match mode {
        Mode::Single => vec![Snake::new(
            Position::new(grid.width / 2, row),
            Direction::Right,
            PlayerTag::Solo,
        )],
        Mode::Versus => vec![
            Snake::new(Position::new(grid.width / 4, row), Direction::Right, PlayerTag::One),
            Snake::new(
                Position::new(grid.width - 1 - grid.width / 4, row),
                Direction::Left,
                PlayerTag::Two,
            ),
        ],
    }
}
