use crate::chess_boards::chess_board::{Board, Move};

pub mod engine_minmax;
pub mod engine_random;
pub mod evaluator;

pub use engine_minmax::MiniMax;
pub use engine_random::RandomMoveStrategy;
pub use evaluator::StandardBoardEvaluator;

/// Picks a move for the side to move.
pub trait MoveStrategy {
    fn name(&self) -> &str;
    /// `None` when no move of the side to move is accepted.
    fn execute(&mut self, board: &Board) -> Option<Move>;
    /// Leaf positions scored by the last call to `execute`.
    fn num_boards_evaluated(&self) -> u64;
}

/// Static score of a position from White's point of view.
pub trait BoardEvaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32;
}
