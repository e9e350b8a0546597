use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::grid::{Grid, Position};

/// Colour tag the renderer uses for a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTag {
    Solo,
    One,
    Two,
}

/// The snake in the game
///
/// Direction changes are buffered in `pending_direction` and only committed
/// by [`Snake::advance`], so at most one turn is honoured per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Head at index 0. Never empty.
    body: VecDeque<Position>,
    /// Direction applied on the last advance
    pub direction: Direction,
    /// Direction that the next advance will commit
    pub pending_direction: Direction,
    pub tag: PlayerTag,
}

impl Snake {
    /// Create a one-segment snake already heading in `direction`
    pub fn new(head: Position, direction: Direction, tag: PlayerTag) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
            pending_direction: direction,
            tag,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        tag: PlayerTag,
    ) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending_direction: direction,
            tag,
        })
    }

    /// Body segments, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a turn for the next tick
    ///
    /// Returns false and keeps the previous pending direction when `direction`
    /// reverses the applied direction or is not a movement at all.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if direction == Direction::Stopped || self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Commit the pending direction and push a new head. The body grows by
    /// one until the caller truncates the tail.
    pub fn advance(&mut self) {
        self.direction = self.pending_direction;
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);
    }

    /// Wrap an out-of-grid head onto the opposite edge, if wrapping is on
    pub fn apply_wrap(&mut self, grid: Grid, wrap: bool) {
        if wrap {
            self.body[0] = grid.wrap(self.body[0]);
        }
    }

    /// Drop the last segment, keeping at least the head
    pub fn truncate_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Check if the head sits on any other segment
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn collides_with_boundary(&self, grid: Grid, wrap: bool) -> bool {
        !wrap && !grid.in_bounds(self.head())
    }

    pub fn collides_with_walls(&self, walls: &HashSet<Position>) -> bool {
        walls.contains(&self.head())
    }

    /// Check if the head sits on any segment of `other`, head included
    pub fn collides_with_other(&self, other: &Snake) -> bool {
        other.occupies(self.head())
    }
}
