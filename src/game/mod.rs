//! Core simulation: entity models, the per-tick update, and the
//! idle/playing/game-over state machine.
//!
//! Everything here is pure state plus an RNG. Rendering, input, audio, and
//! persistence live with the driver in `main.rs`.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
