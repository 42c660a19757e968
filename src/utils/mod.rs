//! Shared helpers outside the simulation itself.

pub mod persistence;
