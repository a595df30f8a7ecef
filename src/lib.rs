//! Chess rules engine with a fixed-depth minimax player.

pub mod chess_boards;
pub mod engines;
