use super::board_utils::{self, EIGHTH_FILE, FIRST_FILE, SECOND_FILE, SEVENTH_FILE};
use super::{Board, Move, Piece, PieceType};

const KNIGHT_OFFSETS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const QUEEN_OFFSETS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_OFFSETS: [i32; 4] = [-9, -7, 7, 9];
const ROOK_OFFSETS: [i32; 4] = [-8, -1, 1, 8];
const PAWN_OFFSETS: [i32; 4] = [8, 16, 7, 9];

/// True when applying `offset` from `position` would wrap around to the other
/// side of the board.
fn is_column_exclusion(kind: PieceType, position: usize, offset: i32) -> bool {
    let on = |file| board_utils::is_on_file(file, position);
    match kind {
        PieceType::Knight => {
            (on(FIRST_FILE) && matches!(offset, -17 | -10 | 6 | 15))
                || (on(SECOND_FILE) && matches!(offset, -10 | 6))
                || (on(SEVENTH_FILE) && matches!(offset, -6 | 10))
                || (on(EIGHTH_FILE) && matches!(offset, -15 | -6 | 10 | 17))
        }
        PieceType::Bishop => (on(FIRST_FILE) && matches!(offset, -9 | 7)) || (on(EIGHTH_FILE) && matches!(offset, -7 | 9)),
        PieceType::Rook => (on(FIRST_FILE) && offset == -1) || (on(EIGHTH_FILE) && offset == 1),
        PieceType::Queen | PieceType::King => {
            (on(FIRST_FILE) && matches!(offset, -9 | -1 | 7)) || (on(EIGHTH_FILE) && matches!(offset, -7 | 1 | 9))
        }
        // Pawn diagonals depend on the alliance and are checked in `pawn_diagonal`.
        PieceType::Pawn => false,
    }
}

impl Piece {
    /// Pseudo-legal moves of this piece on `board`. King safety is not
    /// considered here, and castles are added by the player.
    pub fn calculate_legal_moves(&self, board: &Board) -> Vec<Move> {
        match self.kind() {
            PieceType::Pawn => self.pawn_moves(board),
            PieceType::Knight => self.stepping_moves(board, &KNIGHT_OFFSETS),
            PieceType::King => self.stepping_moves(board, &KING_OFFSETS),
            PieceType::Bishop => self.sliding_moves(board, &BISHOP_OFFSETS),
            PieceType::Rook => self.sliding_moves(board, &ROOK_OFFSETS),
            PieceType::Queen => self.sliding_moves(board, &QUEEN_OFFSETS),
        }
    }

    /// Squares this pawn would capture on, whether or not anything stands there.
    pub fn pawn_attack_coordinates(&self) -> Vec<usize> {
        if self.kind() != PieceType::Pawn {
            return Vec::new();
        }
        [7, 9]
            .into_iter()
            .filter_map(|offset| self.pawn_diagonal(offset))
            .collect()
    }

    fn quiet_or_attack(&self, board: &Board, destination: usize) -> Option<Move> {
        match board.tile(destination).piece() {
            None => Some(Move::MajorMove { piece: *self, destination }),
            Some(other) if other.alliance() != self.alliance() => Some(Move::MajorAttackMove {
                piece: *self,
                destination,
                attacked: *other,
            }),
            Some(_) => None,
        }
    }

    fn stepping_moves(&self, board: &Board, offsets: &[i32]) -> Vec<Move> {
        offsets
            .iter()
            .filter(|&&offset| !is_column_exclusion(self.kind(), self.position(), offset))
            .filter_map(|&offset| board_utils::offset_coordinate(self.position(), offset))
            .filter_map(|destination| self.quiet_or_attack(board, destination))
            .collect()
    }

    fn sliding_moves(&self, board: &Board, offsets: &[i32]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            let mut current = self.position();
            loop {
                if is_column_exclusion(self.kind(), current, offset) {
                    break;
                }
                let Some(destination) = board_utils::offset_coordinate(current, offset) else {
                    break;
                };
                let blocked = board.tile(destination).is_occupied();
                if let Some(mv) = self.quiet_or_attack(board, destination) {
                    moves.push(mv);
                }
                if blocked {
                    break;
                }
                current = destination;
            }
        }
        moves
    }

    fn pawn_diagonal(&self, offset: i32) -> Option<usize> {
        let alliance = self.alliance();
        let wraps = match offset {
            7 => {
                (alliance.is_white() && board_utils::is_on_file(EIGHTH_FILE, self.position()))
                    || (alliance.is_black() && board_utils::is_on_file(FIRST_FILE, self.position()))
            }
            9 => {
                (alliance.is_white() && board_utils::is_on_file(FIRST_FILE, self.position()))
                    || (alliance.is_black() && board_utils::is_on_file(EIGHTH_FILE, self.position()))
            }
            _ => true,
        };
        if wraps {
            return None;
        }
        board_utils::offset_coordinate(self.position(), alliance.direction() * offset)
    }

    fn promote_if_needed(&self, mv: Move, destination: usize) -> Move {
        if self.alliance().is_pawn_promotion_square(destination) {
            Move::PawnPromotion { decorated: Box::new(mv) }
        } else {
            mv
        }
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Move> {
        let alliance = self.alliance();
        let mut moves = Vec::new();
        for offset in PAWN_OFFSETS {
            match offset {
                8 => {
                    let Some(destination) = board_utils::offset_coordinate(self.position(), alliance.direction() * 8) else {
                        continue;
                    };
                    if !board.tile(destination).is_occupied() {
                        let mv = Move::PawnMove { piece: *self, destination };
                        moves.push(self.promote_if_needed(mv, destination));
                    }
                }
                16 => {
                    if !self.is_first_move() || !alliance.is_pawn_start_square(self.position()) {
                        continue;
                    }
                    let behind = board_utils::offset_coordinate(self.position(), alliance.direction() * 8);
                    let destination = board_utils::offset_coordinate(self.position(), alliance.direction() * 16);
                    if let (Some(behind), Some(destination)) = (behind, destination) {
                        if !board.tile(behind).is_occupied() && !board.tile(destination).is_occupied() {
                            moves.push(Move::PawnJump { piece: *self, destination });
                        }
                    }
                }
                _ => {
                    let Some(destination) = self.pawn_diagonal(offset) else {
                        continue;
                    };
                    if let Some(mv) = self.pawn_capture(board, destination) {
                        moves.push(self.promote_if_needed(mv, destination));
                    }
                }
            }
        }
        moves
    }

    fn pawn_capture(&self, board: &Board, destination: usize) -> Option<Move> {
        match board.tile(destination).piece() {
            Some(other) if other.alliance() != self.alliance() => Some(Move::PawnAttackMove {
                piece: *self,
                destination,
                attacked: *other,
            }),
            Some(_) => None,
            None => {
                let en_passant_pawn = board.en_passant_pawn()?;
                let behind = board_utils::offset_coordinate(destination, self.alliance().opposite_direction() * 8)?;
                (en_passant_pawn.alliance() != self.alliance() && en_passant_pawn.position() == behind).then(|| {
                    Move::PawnEnPassantAttackMove {
                        piece: *self,
                        destination,
                        attacked: *en_passant_pawn,
                    }
                })
            }
        }
    }
}
