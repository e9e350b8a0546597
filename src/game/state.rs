use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use super::action::PlayerId;
use super::collision::{Arena, CollisionType};
use super::grid::{Grid, Position};
use super::snake::Snake;

/// Single player or local two-player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Single,
    Versus,
}

impl Mode {
    pub fn player_count(&self) -> usize {
        match self {
            Mode::Single => 1,
            Mode::Versus => 2,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Mode::Single => Mode::Versus,
            Mode::Versus => Mode::Single,
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Single player died
    GameOver { score: u32, cause: CollisionType },
    Winner(PlayerId),
    Draw,
}

/// Where the session is in its round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    RoundOver(RoundOutcome),
}

/// Complete mutable state of one game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub phase: Phase,
    pub mode: Mode,
    pub grid: Grid,
    pub level_id: u32,
    pub level_name: String,
    /// Copy of the loaded level's walls
    pub walls: HashSet<Position>,
    pub wrap: bool,
    /// Indexed by `PlayerId::index`
    pub scores: [u32; 2],
    /// Current tick period
    pub speed: Duration,
    /// Indexed by `PlayerId::index`; empty until the first round starts
    pub snakes: Vec<Snake>,
    pub food: Option<Position>,
    pub high_score: u32,
    pub ticks: u64,
}

impl GameSession {
    /// Create an idle session with no level loaded yet
    pub fn new(grid: Grid, speed: Duration, high_score: u32) -> Self {
        Self {
            phase: Phase::Idle,
            mode: Mode::Single,
            grid,
            level_id: 0,
            level_name: String::new(),
            walls: HashSet::new(),
            wrap: false,
            scores: [0; 2],
            speed,
            snakes: Vec::new(),
            food: None,
            high_score,
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn snake(&self, player: PlayerId) -> Option<&Snake> {
        self.snakes.get(player.index())
    }

    pub fn snake_mut(&mut self, player: PlayerId) -> Option<&mut Snake> {
        self.snakes.get_mut(player.index())
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::RoundOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub(crate) fn arena(&self) -> Arena<'_> {
        Arena {
            grid: self.grid,
            wrap: self.wrap,
            walls: &self.walls,
        }
    }
}
