//! 2048 - the sliding-tile puzzle in the terminal
//!
//! This library provides:
//! - The board engine: grid, move/merge, legality, win/loss, spawning (game module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
