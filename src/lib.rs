//! Snake Arena - grid Snake with levels and local two-player versus
//!
//! This library provides:
//! - Core tick-based simulation (game module)
//! - High-score persistence (storage module)
//! - Terminal front end: input mapping, rendering and the play loop

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
