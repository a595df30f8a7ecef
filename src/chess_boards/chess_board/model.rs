use super::board_utils::{self, NUM_TILES};
use super::Move;
use lazy_static::lazy_static;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alliance {
    #[default]
    White,
    Black,
}

impl Alliance {
    /// Row step a pawn of this side advances by: White moves towards row 0.
    pub fn direction(&self) -> i32 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    pub fn opposite_direction(&self) -> i32 {
        -self.direction()
    }

    pub fn is_white(&self) -> bool {
        matches!(self, Alliance::White)
    }

    pub fn is_black(&self) -> bool {
        matches!(self, Alliance::Black)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    pub fn is_pawn_promotion_square(&self, coordinate: usize) -> bool {
        match self {
            Alliance::White => board_utils::is_on_rank(board_utils::EIGHTH_RANK, coordinate),
            Alliance::Black => board_utils::is_on_rank(board_utils::FIRST_RANK, coordinate),
        }
    }

    /// The rank a pawn of this side must stand on to make a double step.
    pub fn is_pawn_start_square(&self, coordinate: usize) -> bool {
        match self {
            Alliance::White => board_utils::is_on_rank(board_utils::SECOND_RANK, coordinate),
            Alliance::Black => board_utils::is_on_rank(board_utils::SEVENTH_RANK, coordinate),
        }
    }

    pub fn choose_player<T>(&self, white: T, black: T) -> T {
        match self {
            Alliance::White => white,
            Alliance::Black => black,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 300,
            PieceType::Bishop => 300,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 10_000,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(self, PieceType::King)
    }

    pub fn is_rook(&self) -> bool {
        matches!(self, PieceType::Rook)
    }

    /// Upper-case letter of the piece, as used in move notation.
    pub fn letter(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An immutable piece standing on a tile.
///
/// Two pieces are equal when kind, alliance, position and first-move flag
/// match. The king's castle flags are carried along but do not take part in
/// equality.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceType,
    position: usize,
    alliance: Alliance,
    first_move: bool,
    castled: bool,
    king_side_castle_capable: bool,
    queen_side_castle_capable: bool,
}

impl Piece {
    pub fn new(kind: PieceType, position: usize, alliance: Alliance) -> Self {
        Self::with_first_move(kind, position, alliance, true)
    }

    pub fn with_first_move(kind: PieceType, position: usize, alliance: Alliance, first_move: bool) -> Self {
        Self {
            kind,
            position,
            alliance,
            first_move,
            castled: false,
            king_side_castle_capable: false,
            queen_side_castle_capable: false,
        }
    }

    pub fn king(position: usize, alliance: Alliance, king_side_castle_capable: bool, queen_side_castle_capable: bool) -> Self {
        Self {
            king_side_castle_capable,
            queen_side_castle_capable,
            ..Self::new(PieceType::King, position, alliance)
        }
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    pub fn is_castled(&self) -> bool {
        self.castled
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        self.king_side_castle_capable
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        self.queen_side_castle_capable
    }

    /// Returns the piece as it stands after `mv` has carried it to its destination.
    pub fn move_piece(&self, mv: &Move) -> Piece {
        let destination = mv.destination_coordinate().unwrap_or(self.position);
        match self.kind {
            PieceType::King => Piece {
                position: destination,
                first_move: false,
                castled: mv.is_castling_move(),
                king_side_castle_capable: false,
                queen_side_castle_capable: false,
                ..*self
            },
            kind => Piece::with_first_move(kind, destination, self.alliance, false),
        }
    }

    // Underpromotion is not supported.
    pub fn promotion_piece(&self) -> Piece {
        Piece::with_first_move(PieceType::Queen, self.position, self.alliance, false)
    }

    pub fn to_char(&self) -> char {
        let symbol = self.kind.letter();
        match self.alliance {
            Alliance::White => symbol,
            Alliance::Black => symbol.to_ascii_lowercase(),
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.kind == other.kind
            && self.alliance == other.alliance
            && self.first_move == other.first_move
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.alliance.hash(state);
        self.position.hash(state);
        self.first_move.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty { coordinate: usize },
    Occupied { coordinate: usize, piece: Piece },
}

lazy_static! {
    static ref EMPTY_TILES: [Tile; NUM_TILES] = std::array::from_fn(|coordinate| Tile::Empty { coordinate });
}

impl Tile {
    /// Occupied tiles are made fresh; empty ones come from the shared cache.
    pub fn create(coordinate: usize, piece: Option<Piece>) -> Tile {
        match piece {
            Some(piece) => Tile::Occupied { coordinate, piece },
            None => EMPTY_TILES
                .get(coordinate)
                .copied()
                .unwrap_or(Tile::Empty { coordinate }),
        }
    }

    pub fn coordinate(&self) -> usize {
        match self {
            Tile::Empty { coordinate } | Tile::Occupied { coordinate, .. } => *coordinate,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied { .. })
    }

    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Empty { .. } => None,
            Tile::Occupied { piece, .. } => Some(piece),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Empty { .. } => write!(f, "-"),
            Tile::Occupied { piece, .. } => write!(f, "{}", piece.to_char()),
        }
    }
}
