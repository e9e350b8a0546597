use std::time::Duration;

use super::grid::{Grid, Position};
use super::snake::PlayerTag;
use super::state::{GameSession, Mode, Phase};

/// A snake as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeView {
    pub tag: PlayerTag,
    /// Head first
    pub body: Vec<Position>,
}

/// Read-only copy of everything a frame needs
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    pub walls: Vec<Position>,
    pub wrap: bool,
    pub food: Option<Position>,
    pub snakes: Vec<SnakeView>,
    pub mode: Mode,
    pub scores: [u32; 2],
    pub high_score: u32,
    pub phase: Phase,
    pub level_id: u32,
    pub level_name: String,
    pub speed: Duration,
}

impl From<&GameSession> for Snapshot {
    fn from(session: &GameSession) -> Self {
        let mut walls: Vec<Position> = session.walls.iter().copied().collect();
        walls.sort_by_key(|p| (p.y, p.x));

        Self {
            grid: session.grid,
            walls,
            wrap: session.wrap,
            food: session.food,
            snakes: session
                .snakes
                .iter()
                .map(|snake| SnakeView {
                    tag: snake.tag,
                    body: snake.body().iter().copied().collect(),
                })
                .collect(),
            mode: session.mode,
            scores: session.scores,
            high_score: session.high_score,
            phase: session.phase,
            level_id: session.level_id,
            level_name: session.level_name.clone(),
            speed: session.speed,
        }
    }
}

impl Snapshot {
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.binary_search_by_key(&(pos.y, pos.x), |p| (p.y, p.x)).is_ok()
    }

    /// The snake drawn at `pos` and whether `pos` is its head
    pub fn snake_at(&self, pos: Position) -> Option<(PlayerTag, bool)> {
        self.snakes.iter().find_map(|snake| {
            let index = snake.body.iter().position(|&segment| segment == pos)?;
            Some((snake.tag, index == 0))
        })
    }
}
