use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::grid::{Grid, Position};
use super::snake::Snake;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the grid on a level without wrap-around
    Boundary,
    /// Head ran into a level wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Head ran into the other player's snake
    Opponent,
}

/// Everything a moved head can run into, except the other snake
#[derive(Debug, Clone, Copy)]
pub struct Arena<'a> {
    pub grid: Grid,
    pub wrap: bool,
    pub walls: &'a HashSet<Position>,
}

impl Arena<'_> {
    /// First fatal collision for `snake` after it has advanced, if any
    pub fn check(&self, snake: &Snake, opponent: Option<&Snake>) -> Option<CollisionType> {
        if snake.collides_with_boundary(self.grid, self.wrap) {
            return Some(CollisionType::Boundary);
        }
        if snake.collides_with_self() {
            return Some(CollisionType::SelfCollision);
        }
        if snake.collides_with_walls(self.walls) {
            return Some(CollisionType::Wall);
        }
        if opponent.is_some_and(|other| snake.collides_with_other(other)) {
            return Some(CollisionType::Opponent);
        }
        None
    }
}

pub fn eats(snake: &Snake, food: Position) -> bool {
    snake.head() == food
}
