//! Core game simulation for Snake
//!
//! Everything here is free of I/O and rendering. A front end owns a
//! [`GameSession`], feeds direction intents through [`GameEngine::steer`],
//! calls [`GameEngine::tick`] on its own timer and draws a [`Snapshot`].

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod level;
pub mod snake;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, PlayerId};
pub use collision::CollisionType;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, TickInfo, TickResult};
pub use food::Placement;
pub use grid::{Grid, Position};
pub use level::{Level, LevelCatalog, LevelError};
pub use snake::{PlayerTag, Snake};
pub use snapshot::{SnakeView, Snapshot};
pub use state::{GameSession, Mode, Phase, RoundOutcome};
