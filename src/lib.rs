//! Neonflap - a neon-styled flappy bird for the terminal.
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod audio;
pub mod game;
pub mod ui;
pub mod utils;

pub use game::logic::{Intent, TickEvent};
pub use game::types::{GamePhase, World};
