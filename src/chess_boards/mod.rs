pub mod chess_board;
pub mod perft;

pub use chess_board::{Alliance, Board, Move, MoveFactory, MoveStatus, MoveTransition, Piece, PieceType, Player};
pub use perft::{perft, perft_divide};
