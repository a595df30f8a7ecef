//! Per-side view of a board: legal moves including castles, check state,
//! and the checkmate / stalemate derivation built on `make_move`.

use super::board_utils::NUM_TILES;
use super::moves::{CastleMove, Move, MoveStatus, MoveTransition};
use super::{Alliance, Board, Piece};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

const KING_HOME_COLUMN: usize = 4;

/// Columns involved in one castle, relative to the back rank.
struct CastleSide {
    rook_column: usize,
    king_destination: usize,
    rook_destination: usize,
    must_be_empty: &'static [usize],
    must_be_safe: &'static [usize],
    wrap: fn(CastleMove) -> Move,
}

const KING_SIDE: CastleSide = CastleSide {
    rook_column: 7,
    king_destination: 6,
    rook_destination: 5,
    must_be_empty: &[5, 6],
    must_be_safe: &[5, 6],
    wrap: Move::KingSideCastleMove,
};

const QUEEN_SIDE: CastleSide = CastleSide {
    rook_column: 0,
    king_destination: 2,
    rook_destination: 3,
    must_be_empty: &[1, 2, 3],
    must_be_safe: &[2, 3],
    wrap: Move::QueenSideCastleMove,
};

fn back_rank_start(alliance: Alliance) -> usize {
    alliance.choose_player(56, 0)
}

impl CastleSide {
    fn castle(&self, board: &Board, king: &Piece, attacked: &[bool; NUM_TILES]) -> Option<Move> {
        let rank = back_rank_start(king.alliance());
        if self.must_be_empty.iter().any(|column| board.tile(rank + column).is_occupied()) {
            return None;
        }
        if self.must_be_safe.iter().any(|column| attacked[rank + column]) {
            return None;
        }
        let rook = board.tile(rank + self.rook_column).piece()?;
        if !rook.kind().is_rook() || !rook.is_first_move() || rook.alliance() != king.alliance() {
            return None;
        }
        Some((self.wrap)(CastleMove {
            king: *king,
            destination: rank + self.king_destination,
            rook: *rook,
            rook_destination: rank + self.rook_destination,
        }))
    }
}

fn attacks_on(coordinate: usize, moves: &[Move]) -> bool {
    moves.iter().any(|mv| mv.destination_coordinate() == Some(coordinate))
}

/// Squares the opponent could capture on. Pawn pushes are left out and pawn
/// diagonals are counted even when empty.
fn attacked_coordinates(board: &Board, opponent: Alliance, opponent_moves: &[Move]) -> [bool; NUM_TILES] {
    let mut attacked = [false; NUM_TILES];
    for destination in opponent_moves
        .iter()
        .filter(|mv| !mv.is_pawn_advance())
        .filter_map(Move::destination_coordinate)
    {
        attacked[destination] = true;
    }
    for pawn in board.pieces(opponent) {
        for destination in pawn.pawn_attack_coordinates() {
            attacked[destination] = true;
        }
    }
    attacked
}

fn calculate_king_castles(board: &Board, king: &Piece, is_in_check: bool, opponent_moves: &[Move]) -> Vec<Move> {
    let home = back_rank_start(king.alliance()) + KING_HOME_COLUMN;
    if !king.is_first_move() || king.position() != home || is_in_check {
        return Vec::new();
    }
    let attacked = attacked_coordinates(board, king.alliance().opposite(), opponent_moves);
    [KING_SIDE, QUEEN_SIDE]
        .iter()
        .filter_map(|side| side.castle(board, king, &attacked))
        .collect()
}

fn calculate_legal_moves(pieces: &[Piece], board: &Board) -> Vec<Move> {
    pieces.iter().flat_map(|piece| piece.calculate_legal_moves(board)).collect()
}

/// Everything a board knows about one side. Owned by the board.
#[derive(Debug, Clone)]
pub struct PlayerState {
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    is_in_check: bool,
    has_escape_moves: OnceLock<bool>,
}

impl PlayerState {
    fn new(board: &Board, king: Piece, standard_moves: &[Move], opponent_moves: &[Move]) -> Self {
        let is_in_check = attacks_on(king.position(), opponent_moves);
        let mut legal_moves = standard_moves.to_vec();
        legal_moves.extend(calculate_king_castles(board, &king, is_in_check, opponent_moves));
        Self {
            alliance: king.alliance(),
            king,
            legal_moves,
            is_in_check,
            has_escape_moves: OnceLock::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Players {
    white: PlayerState,
    black: PlayerState,
}

impl Players {
    pub(crate) fn calculate(board: &Board) -> Self {
        let white_standard = calculate_legal_moves(board.white_pieces(), board);
        let black_standard = calculate_legal_moves(board.black_pieces(), board);
        Self {
            white: PlayerState::new(board, *board.king(Alliance::White), &white_standard, &black_standard),
            black: PlayerState::new(board, *board.king(Alliance::Black), &black_standard, &white_standard),
        }
    }

    pub(crate) fn state(&self, alliance: Alliance) -> &PlayerState {
        alliance.choose_player(&self.white, &self.black)
    }
}

/// One side of a board, borrowed from it.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(board: &'a Board, state: &'a PlayerState) -> Self {
        Self { board, state }
    }

    pub fn alliance(&self) -> Alliance {
        self.state.alliance
    }

    pub fn king(&self) -> &'a Piece {
        &self.state.king
    }

    /// Pseudo-legal moves of every piece followed by the available castles.
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.pieces(self.alliance())
    }

    pub fn opponent(&self) -> Player<'a> {
        self.board.player(self.alliance().opposite())
    }

    pub fn is_in_check(&self) -> bool {
        self.state.is_in_check
    }

    pub fn is_castled(&self) -> bool {
        self.state.king.is_castled()
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        self.state.king.is_king_side_castle_capable()
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        self.state.king.is_queen_side_castle_capable()
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        if mv.is_castling_move() && self.is_in_check() {
            return false;
        }
        self.state.legal_moves.contains(mv)
    }

    /// Attempts `mv`. The source board is never modified; a rejected move
    /// reports why in the transition status.
    pub fn make_move(&self, mv: &Move) -> MoveTransition<'a> {
        if !self.is_move_legal(mv) {
            debug!(side = %self.alliance(), mv = %mv.as_algebraic(), "move is not legal here");
            return self.rejected(mv);
        }
        let successor = match mv.execute(self.board) {
            Ok(successor) => successor,
            Err(err) => {
                debug!(side = %self.alliance(), mv = %mv.as_algebraic(), %err, "move could not be executed");
                return self.rejected(mv);
            }
        };

        let king_position = successor.king(self.alliance()).position();
        if attacks_on(king_position, successor.current_player().legal_moves()) {
            debug!(side = %self.alliance(), mv = %mv.as_algebraic(), "move leaves the king in check");
            return MoveTransition::new(
                self.board,
                Cow::Owned(successor),
                mv.clone(),
                MoveStatus::LeavesPlayerInCheck,
            );
        }
        MoveTransition::new(self.board, Cow::Owned(successor), mv.clone(), MoveStatus::Done)
    }

    fn rejected(&self, mv: &Move) -> MoveTransition<'a> {
        MoveTransition::new(self.board, Cow::Borrowed(self.board), mv.clone(), MoveStatus::IllegalMove)
    }

    /// True when at least one legal move survives `make_move`. Computed once per board.
    pub fn has_escape_moves(&self) -> bool {
        *self.state.has_escape_moves.get_or_init(|| {
            self.legal_moves()
                .iter()
                .any(|mv| self.make_move(mv).status().is_done())
        })
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_escape_moves()
    }
}

impl fmt::Display for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alliance())
    }
}
