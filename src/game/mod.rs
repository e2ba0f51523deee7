//! Core 2048 board engine
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`Board`] and [`GamePhase`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod phase;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::Board;
pub use error::{BoardError, ConfigError};
pub use grid::{Grid, MAX_TILE, is_valid_tile, move_row_left, row_is_left_movable};
pub use phase::GamePhase;
