//! Food placement by bounded rejection sampling
//!
//! A sample is rejected while it lands on any forbidden cell (walls or a live
//! snake). After `max_attempts` rejections the last sample is kept anyway and
//! the result is marked `exhausted`, so a full board never stalls a tick.

use rand::Rng;
use std::collections::HashSet;

use super::grid::{Grid, Position};
use super::snake::Snake;

/// Anything that can block a food cell
pub trait Occupancy {
    fn occupies(&self, pos: Position) -> bool;
}

impl Occupancy for HashSet<Position> {
    fn occupies(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

impl Occupancy for Snake {
    fn occupies(&self, pos: Position) -> bool {
        Snake::occupies(self, pos)
    }
}

/// Outcome of one placement call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    /// Samples drawn, including the accepted one
    pub attempts: u32,
    /// True when every sample was blocked and `position` may overlap
    pub exhausted: bool,
}

/// Pick a free cell for food
///
/// An empty grid has nothing to sample and comes back exhausted at the origin.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    forbidden: &[&dyn Occupancy],
    max_attempts: u32,
) -> Placement {
    let mut position = Position::new(0, 0);
    if grid.cell_count() == 0 {
        return Placement {
            position,
            attempts: 0,
            exhausted: true,
        };
    }
    for attempt in 1..=max_attempts.max(1) {
        position = Position::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        if !is_blocked(position, forbidden) {
            return Placement {
                position,
                attempts: attempt,
                exhausted: false,
            };
        }
    }

    Placement {
        position,
        attempts: max_attempts.max(1),
        exhausted: true,
    }
}

pub fn is_blocked(pos: Position, forbidden: &[&dyn Occupancy]) -> bool {
    forbidden.iter().any(|set| set.occupies(pos))
}
