//! Implementation of the chess match: board, pieces, their movement rules and
//! the engine that enforces them.

pub mod core;
pub mod error;
pub mod game;
pub mod grid;
pub mod piece;
pub mod setup;
pub mod squares;
