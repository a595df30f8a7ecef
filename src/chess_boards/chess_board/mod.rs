pub mod board_utils;
pub mod error;
pub mod model;
pub mod moves;
pub mod player;

mod chess_board;
mod move_generation;
#[cfg(test)]
pub(crate) mod test_utils;

pub use chess_board::{Board, Builder};
pub use error::{BoardError, MoveError};
pub use model::{Alliance, Piece, PieceType, Tile};
pub use moves::{CastleMove, Move, MoveFactory, MoveStatus, MoveTransition};
pub use player::Player;
