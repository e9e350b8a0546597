//! Level catalog: numbered, immutable level definitions
//!
//! Levels are numbered contiguously from 1. A level is a name, a set of wall
//! cells and a wrap-around flag. The built-in catalog is laid out relative to
//! the grid so every board size gets the same shapes, and the spawn row
//! (`height / 2`) is always left open.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::grid::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level {0} does not exist")]
    NotFound(u32),
    #[error("level {0} is the last level")]
    NoNextLevel(u32),
    #[error("level {0} is the first level")]
    NoPreviousLevel(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(default)]
    pub walls: HashSet<Position>,
    #[serde(default)]
    pub wrap: bool,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        walls: impl IntoIterator<Item = Position>,
        wrap: bool,
    ) -> Self {
        Self {
            name: name.into(),
            walls: walls.into_iter().collect(),
            wrap,
        }
    }
}

/// Read-only registry of levels, looked up by 1-based id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// The stock levels, shaped for `grid`
    pub fn builtin(grid: Grid) -> Self {
        let (w, h) = (grid.width, grid.height);

        let pillars = {
            let (left, top) = (w / 5, h / 5);
            let (right, bottom) = (w - w / 5 - 2, h - h / 5 - 2);
            [(left, top), (right, top), (left, bottom), (right, bottom)]
                .into_iter()
                .flat_map(|(x, y)| block(x, y, 2, 2))
                .collect::<Vec<_>>()
        };

        let corridors = {
            let gap = [w / 2 - 1, w / 2];
            [h / 4, h - 1 - h / 4]
                .into_iter()
                .flat_map(|y| (2..w - 2).map(move |x| Position::new(x, y)))
                .filter(|p| !gap.contains(&p.x))
                .collect::<Vec<_>>()
        };

        let fortress = {
            let x_gap = [w / 2 - 1, w / 2];
            let y_gap = [h / 2 - 1, h / 2];
            let top_bottom = (0..w)
                .filter(|x| !x_gap.contains(x))
                .flat_map(|x| [Position::new(x, 0), Position::new(x, h - 1)]);
            let sides = (1..h - 1)
                .filter(|y| !y_gap.contains(y))
                .flat_map(|y| [Position::new(0, y), Position::new(w - 1, y)]);
            top_bottom.chain(sides).collect::<Vec<_>>()
        };

        Self::new(vec![
            Level::new("Classic", [], false),
            Level::new("Wrap Around", [], true),
            Level::new("Pillars", pillars, false),
            Level::new("Corridors", corridors, true),
            Level::new("Fortress", fortress, true),
        ])
    }

    /// Load levels from a JSON array of `{ "name", "walls", "wrap" }` records
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read levels from {:?}", path))?;
        let levels: Vec<Level> =
            serde_json::from_str(&json).context("Failed to deserialize levels")?;
        anyhow::ensure!(!levels.is_empty(), "Level file {:?} contains no levels", path);
        Ok(Self::new(levels))
    }

    pub fn get(&self, id: u32) -> Result<&Level, LevelError> {
        id.checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
            .ok_or(LevelError::NotFound(id))
    }

    pub fn next(&self, id: u32) -> Result<u32, LevelError> {
        let next = id.saturating_add(1);
        self.get(next).map(|_| next).map_err(|_| LevelError::NoNextLevel(id))
    }

    pub fn previous(&self, id: u32) -> Result<u32, LevelError> {
        let previous = id.saturating_sub(1);
        self.get(previous)
            .map(|_| previous)
            .map_err(|_| LevelError::NoPreviousLevel(id))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn block(x: i32, y: i32, width: i32, height: i32) -> impl Iterator<Item = Position> {
    (y..y + height).flat_map(move |row| (x..x + width).map(move |col| Position::new(col, row)))
}
