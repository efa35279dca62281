//! Implementation of the board, the pieces and their movement rules.

pub mod board;
pub mod core;
pub mod piece;
