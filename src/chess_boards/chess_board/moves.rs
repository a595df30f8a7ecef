//! Moves, their execution against a board, and the transitions a player
//! produces when attempting them.

use super::board_utils;
use super::error::MoveError;
use super::{Board, Builder, Piece, PieceType};
use std::borrow::Cow;
use std::fmt;

/// King and rook placement of a castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    pub king: Piece,
    pub destination: usize,
    pub rook: Piece,
    pub rook_destination: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    MajorMove { piece: Piece, destination: usize },
    MajorAttackMove { piece: Piece, destination: usize, attacked: Piece },
    PawnMove { piece: Piece, destination: usize },
    PawnJump { piece: Piece, destination: usize },
    PawnAttackMove { piece: Piece, destination: usize, attacked: Piece },
    PawnEnPassantAttackMove { piece: Piece, destination: usize, attacked: Piece },
    /// Wraps the pawn move reaching the last rank. Always promotes to a queen.
    PawnPromotion { decorated: Box<Move> },
    KingSideCastleMove(CastleMove),
    QueenSideCastleMove(CastleMove),
    NullMove,
}

impl Move {
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::MajorMove { piece, .. }
            | Move::MajorAttackMove { piece, .. }
            | Move::PawnMove { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnAttackMove { piece, .. }
            | Move::PawnEnPassantAttackMove { piece, .. } => Some(piece),
            Move::PawnPromotion { decorated } => decorated.moved_piece(),
            Move::KingSideCastleMove(castle) | Move::QueenSideCastleMove(castle) => Some(&castle.king),
            Move::NullMove => None,
        }
    }

    pub fn current_coordinate(&self) -> Option<usize> {
        self.moved_piece().map(Piece::position)
    }

    pub fn destination_coordinate(&self) -> Option<usize> {
        match self {
            Move::MajorMove { destination, .. }
            | Move::MajorAttackMove { destination, .. }
            | Move::PawnMove { destination, .. }
            | Move::PawnJump { destination, .. }
            | Move::PawnAttackMove { destination, .. }
            | Move::PawnEnPassantAttackMove { destination, .. } => Some(*destination),
            Move::PawnPromotion { decorated } => decorated.destination_coordinate(),
            Move::KingSideCastleMove(castle) | Move::QueenSideCastleMove(castle) => Some(castle.destination),
            Move::NullMove => None,
        }
    }

    pub fn attacked_piece(&self) -> Option<&Piece> {
        match self {
            Move::MajorAttackMove { attacked, .. }
            | Move::PawnAttackMove { attacked, .. }
            | Move::PawnEnPassantAttackMove { attacked, .. } => Some(attacked),
            Move::PawnPromotion { decorated } => decorated.attacked_piece(),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.attacked_piece().is_some()
    }

    pub fn is_castling_move(&self) -> bool {
        matches!(self, Move::KingSideCastleMove(_) | Move::QueenSideCastleMove(_))
    }

    pub fn castle_rook(&self) -> Option<&Piece> {
        match self {
            Move::KingSideCastleMove(castle) | Move::QueenSideCastleMove(castle) => Some(&castle.rook),
            _ => None,
        }
    }

    /// Pawn pushes never capture, so they do not attack their destination.
    pub fn is_pawn_advance(&self) -> bool {
        match self {
            Move::PawnMove { .. } | Move::PawnJump { .. } => true,
            Move::PawnPromotion { decorated } => decorated.is_pawn_advance(),
            _ => false,
        }
    }

    /// Coordinate pair such as `e2e4`, or `0000` for the null move.
    pub fn as_algebraic(&self) -> String {
        match (self.current_coordinate(), self.destination_coordinate()) {
            (Some(from), Some(to)) => format!(
                "{}{}",
                board_utils::position_at_coordinate(from),
                board_utils::position_at_coordinate(to)
            ),
            _ => "0000".to_string(),
        }
    }

    /// Builds the board reached by playing this move on `board`.
    pub fn execute(&self, board: &Board) -> Result<Board, MoveError> {
        match self {
            Move::NullMove => Err(MoveError::NullMove),
            Move::PawnPromotion { decorated } => decorated.build_successor(board, self, true),
            _ => self.build_successor(board, self, false),
        }
    }

    fn build_successor(&self, board: &Board, recorded: &Move, promote: bool) -> Result<Board, MoveError> {
        let moved_piece = self.moved_piece().ok_or(MoveError::NullMove)?;
        let castle_rook = self.castle_rook();
        let attacked = self.attacked_piece();

        let mut builder = Builder::new();
        for piece in board.all_pieces() {
            if piece == moved_piece || Some(piece) == castle_rook || Some(piece) == attacked {
                continue;
            }
            builder.set_piece(*piece);
        }

        let mut transformed = moved_piece.move_piece(self);
        if promote {
            transformed = transformed.promotion_piece();
        }
        builder.set_piece(transformed);

        if let Move::KingSideCastleMove(castle) | Move::QueenSideCastleMove(castle) = self {
            builder.set_piece(Piece::with_first_move(
                PieceType::Rook,
                castle.rook_destination,
                castle.rook.alliance(),
                false,
            ));
        }
        if let Move::PawnJump { .. } = self {
            builder.set_en_passant_pawn(transformed);
        }

        builder
            .set_move_maker(moved_piece.alliance().opposite())
            .set_move_transition(recorded.clone())
            .build()
            .map_err(MoveError::from)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let square = board_utils::position_at_coordinate;
        match self {
            Move::MajorMove { piece, destination } => write!(f, "{}{}", piece.kind(), square(*destination)),
            Move::MajorAttackMove { piece, destination, .. } => {
                write!(f, "{}x{}", piece.kind(), square(*destination))
            }
            Move::PawnMove { destination, .. } | Move::PawnJump { destination, .. } => {
                write!(f, "{}", square(*destination))
            }
            Move::PawnAttackMove { piece, destination, .. }
            | Move::PawnEnPassantAttackMove { piece, destination, .. } => {
                let file = &square(piece.position())[..1];
                write!(f, "{}x{}", file, square(*destination))
            }
            Move::PawnPromotion { decorated } => write!(f, "{}={}", decorated, PieceType::Queen),
            Move::KingSideCastleMove(_) => write!(f, "O-O"),
            Move::QueenSideCastleMove(_) => write!(f, "O-O-O"),
            Move::NullMove => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveStatus::Done => write!(f, "done"),
            MoveStatus::IllegalMove => write!(f, "illegal move"),
            MoveStatus::LeavesPlayerInCheck => write!(f, "leaves player in check"),
        }
    }
}

/// Outcome of a player attempting a move.
///
/// Unless the status is `Done` the destination board is only kept for
/// inspection: it is either the source board itself or the rejected
/// speculative position, and is not part of the game.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    from_board: &'a Board,
    to_board: Cow<'a, Board>,
    transition_move: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    pub fn new(from_board: &'a Board, to_board: Cow<'a, Board>, transition_move: Move, status: MoveStatus) -> Self {
        Self {
            from_board,
            to_board,
            transition_move,
            status,
        }
    }

    pub fn from_board(&self) -> &'a Board {
        self.from_board
    }

    pub fn to_board(&self) -> &Board {
        &self.to_board
    }

    pub fn into_to_board(self) -> Board {
        self.to_board.into_owned()
    }

    pub fn transition_move(&self) -> &Move {
        &self.transition_move
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }
}

/// Turns coordinate pairs into the matching generated move.
pub struct MoveFactory;

impl MoveFactory {
    /// Looks the move up among the legal moves of both sides. Returns
    /// `Move::NullMove` when nothing matches.
    pub fn create_move(board: &Board, current_coordinate: usize, destination_coordinate: usize) -> Move {
        board
            .all_legal_moves()
            .find(|mv| {
                mv.current_coordinate() == Some(current_coordinate)
                    && mv.destination_coordinate() == Some(destination_coordinate)
            })
            .cloned()
            .unwrap_or(Move::NullMove)
    }

    pub fn create_move_from_algebraic(board: &Board, from: &str, to: &str) -> Result<Move, MoveError> {
        let from_coordinate =
            board_utils::coordinate_at_position(from).ok_or_else(|| MoveError::UnknownSquare(from.to_string()))?;
        let to_coordinate =
            board_utils::coordinate_at_position(to).ok_or_else(|| MoveError::UnknownSquare(to.to_string()))?;
        if !board.tile(from_coordinate).is_occupied() {
            return Err(MoveError::NoPiece(from.to_string()));
        }
        Ok(Self::create_move(board, from_coordinate, to_coordinate))
    }

    /// Accepts the four character form used on the command line, e.g. `g1f3`.
    pub fn create_move_from_pair(board: &Board, pair: &str) -> Result<Move, MoveError> {
        match (pair.get(..2), pair.get(2..)) {
            (Some(from), Some(to)) if pair.len() == 4 => Self::create_move_from_algebraic(board, from, to),
            _ => Err(MoveError::UnknownSquare(pair.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{board_from_placement, play_moves};
    use super::super::{Alliance, Board};
    use super::*;

    #[test]
    fn test_null_move_cannot_execute() {
        let board = Board::create_standard_board();
        assert_eq!(Move::NullMove.execute(&board).unwrap_err(), MoveError::NullMove);
        assert_eq!(Move::NullMove.current_coordinate(), None);
        assert_eq!(Move::NullMove.destination_coordinate(), None);
        assert_eq!(Move::NullMove.as_algebraic(), "0000");
    }

    #[test]
    fn test_create_move() {
        let board = Board::create_standard_board();
        let mv = MoveFactory::create_move(&board, 52, 36);
        assert!(matches!(mv, Move::PawnJump { .. }));
        assert_eq!(mv.as_algebraic(), "e2e4");

        // Knight on g1 cannot reach g3
        assert_eq!(MoveFactory::create_move(&board, 62, 46), Move::NullMove);

        let mv = MoveFactory::create_move_from_algebraic(&board, "g1", "f3").unwrap();
        assert!(matches!(mv, Move::MajorMove { .. }));
        assert_eq!(
            MoveFactory::create_move_from_algebraic(&board, "e4", "e5").unwrap_err(),
            MoveError::NoPiece("e4".to_string())
        );
        assert_eq!(
            MoveFactory::create_move_from_algebraic(&board, "i2", "e4").unwrap_err(),
            MoveError::UnknownSquare("i2".to_string())
        );
        assert_eq!(
            MoveFactory::create_move_from_pair(&board, "e2e"),
            Err(MoveError::UnknownSquare("e2e".to_string()))
        );
    }

    #[test]
    fn test_execute_moves_piece_and_flips_side() {
        let board = Board::create_standard_board();
        let mv = MoveFactory::create_move(&board, 52, 36);
        let next = mv.execute(&board).unwrap();

        assert!(!next.tile(52).is_occupied());
        let pawn = next.tile(36).piece().unwrap();
        assert_eq!(pawn.kind(), PieceType::Pawn);
        assert!(!pawn.is_first_move());
        assert_eq!(next.current_player().alliance(), Alliance::Black);
        assert_eq!(next.en_passant_pawn(), Some(pawn));
        assert_eq!(next.transition_move(), Some(&mv));

        // The move itself is untouched by execution
        assert_eq!(mv.current_coordinate(), Some(52));
        assert_eq!(mv.destination_coordinate(), Some(36));
        assert!(board.tile(52).is_occupied());
    }

    #[test]
    fn test_execute_capture_removes_attacked_piece() {
        let board = play_moves(&Board::create_standard_board(), &["e2e4", "d7d5"]);
        let mv = MoveFactory::create_move(&board, 36, 27);
        assert!(mv.is_attack());
        assert_eq!(mv.to_string(), "exd5");

        let next = mv.execute(&board).unwrap();
        assert_eq!(next.black_pieces().len(), 15);
        assert_eq!(next.white_pieces().len(), 16);
        assert_eq!(next.tile(27).piece().unwrap().alliance(), Alliance::White);
    }

    #[test]
    fn test_en_passant() {
        let board = play_moves(&Board::create_standard_board(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let d5_pawn = board.en_passant_pawn().unwrap();
        assert_eq!(d5_pawn.position(), 27);

        let mv = MoveFactory::create_move(&board, 28, 19);
        assert!(matches!(mv, Move::PawnEnPassantAttackMove { .. }));
        assert_eq!(mv.attacked_piece(), Some(d5_pawn));
        let transition = board.current_player().make_move(&mv);
        assert_eq!(transition.status(), MoveStatus::Done);
        let next = transition.to_board();
        assert!(!next.tile(27).is_occupied());
        assert!(!next.tile(28).is_occupied());
        assert_eq!(next.tile(19).piece().unwrap().alliance(), Alliance::White);
        assert_eq!(next.black_pieces().len(), 15);
        assert_eq!(next.en_passant_pawn(), None);

        // The chance is gone one ply later
        let board = play_moves(&board, &["a2a3", "a6a5"]);
        assert_eq!(board.en_passant_pawn(), None);
        assert_eq!(MoveFactory::create_move(&board, 28, 19), Move::NullMove);
    }

    #[test]
    fn test_black_en_passant() {
        let board = board_from_placement("4k3/8/8/8/3p4/8/4P3/4K3", Alliance::White);
        let board = play_moves(&board, &["e2e4"]);
        let e4_pawn = board.en_passant_pawn().unwrap();
        assert_eq!(e4_pawn.position(), 36);
        assert_eq!(e4_pawn.alliance(), Alliance::White);

        let mv = MoveFactory::create_move_from_algebraic(&board, "d4", "e3").unwrap();
        assert!(matches!(mv, Move::PawnEnPassantAttackMove { .. }));
        assert_eq!(mv.attacked_piece(), Some(e4_pawn));
        assert_eq!(mv.to_string(), "dxe3");

        let transition = board.current_player().make_move(&mv);
        assert_eq!(transition.status(), MoveStatus::Done);
        let next = transition.to_board();
        assert!(!next.tile(36).is_occupied());
        assert!(!next.tile(35).is_occupied());
        assert_eq!(next.tile(44).piece().unwrap().alliance(), Alliance::Black);
        assert_eq!(next.white_pieces().len(), 1);
        assert_eq!(next.en_passant_pawn(), None);
    }

    #[test]
    fn test_promotion_to_queen() {
        let board = board_from_placement("8/4P3/8/8/8/8/8/k5K1", Alliance::White);
        let mv = MoveFactory::create_move(&board, 12, 4);
        assert!(matches!(mv, Move::PawnPromotion { .. }));
        assert_eq!(mv.to_string(), "e8=Q");

        let transition = board.current_player().make_move(&mv);
        assert!(transition.status().is_done());
        let queen = transition.to_board().tile(4).piece().unwrap();
        assert_eq!(queen.kind(), PieceType::Queen);
        assert_eq!(queen.alliance(), Alliance::White);
        assert_eq!(transition.to_board().white_pieces().len(), 2);
        assert_eq!(transition.to_board().transition_move(), Some(&mv));
    }

    #[test]
    fn test_castle_moves_rook_too() {
        let board = board_from_placement("r3k2r/8/8/8/8/8/8/R3K2R", Alliance::White);
        let mv = MoveFactory::create_move(&board, 60, 62);
        assert!(matches!(mv, Move::KingSideCastleMove(_)));
        assert_eq!(mv.to_string(), "O-O");

        let next = board.current_player().make_move(&mv).into_to_board();
        let king = next.tile(62).piece().unwrap();
        let rook = next.tile(61).piece().unwrap();
        assert_eq!(king.kind(), PieceType::King);
        assert!(king.is_castled());
        assert_eq!(rook.kind(), PieceType::Rook);
        assert!(!rook.is_first_move());
        assert!(!next.tile(63).is_occupied());
        assert!(next.white_player().is_castled());

        let next = play_moves(&next, &["e8c8"]);
        assert_eq!(next.tile(2).piece().unwrap().kind(), PieceType::King);
        assert_eq!(next.tile(3).piece().unwrap().kind(), PieceType::Rook);
        assert!(!next.tile(0).is_occupied());
        assert!(next.black_player().is_castled());
        assert_eq!(next.transition_move().unwrap().to_string(), "O-O-O");
    }

    #[test]
    fn test_move_notation() {
        let board = Board::create_standard_board();
        assert_eq!(MoveFactory::create_move(&board, 62, 45).to_string(), "Nf3");
        assert_eq!(MoveFactory::create_move(&board, 52, 44).to_string(), "e3");
        assert_eq!(Move::NullMove.to_string(), "--");

        let board = play_moves(&board, &["e2e4", "d7d5", "f1b5"]);
        assert_eq!(board.transition_move().unwrap().to_string(), "Bb5");
        let block = MoveFactory::create_move(&board, 2, 11);
        assert_eq!(block.to_string(), "Bd7");
    }

    #[test]
    fn test_move_equality() {
        let board = Board::create_standard_board();
        let a = MoveFactory::create_move(&board, 52, 36);
        let b = MoveFactory::create_move(&board, 52, 36);
        let c = MoveFactory::create_move(&board, 52, 44);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Move::NullMove);
    }
}
