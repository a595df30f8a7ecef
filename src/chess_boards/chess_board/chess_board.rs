use super::board_utils::{self, NUM_TILES, NUM_TILES_PER_ROW};
use super::error::BoardError;
use super::player::{Player, Players};
use super::{Alliance, Move, Piece, PieceType, Tile};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

const BACK_RANK: [PieceType; NUM_TILES_PER_ROW] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An immutable chess position. Every move produces a new board.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: [Tile; NUM_TILES],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_king: Piece,
    black_king: Piece,
    next_move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
    transition_move: Option<Move>,
    players: OnceLock<Players>,
}

impl Board {
    pub fn create_standard_board() -> Self {
        let mut config = BTreeMap::new();
        for (column, kind) in BACK_RANK.into_iter().enumerate() {
            for (alliance, back_rank, pawn_rank) in [(Alliance::Black, 0, 8), (Alliance::White, 56, 48)] {
                let piece = match kind {
                    PieceType::King => Piece::king(back_rank + column, alliance, true, true),
                    kind => Piece::new(kind, back_rank + column, alliance),
                };
                config.insert(piece.position(), piece);
                let pawn = Piece::new(PieceType::Pawn, pawn_rank + column, alliance);
                config.insert(pawn.position(), pawn);
            }
        }
        let white_king = Piece::king(60, Alliance::White, true, true);
        let black_king = Piece::king(4, Alliance::Black, true, true);
        Self::assemble(&config, white_king, black_king, Alliance::White, None, None)
    }

    fn assemble(
        config: &BTreeMap<usize, Piece>,
        white_king: Piece,
        black_king: Piece,
        next_move_maker: Alliance,
        en_passant_pawn: Option<Piece>,
        transition_move: Option<Move>,
    ) -> Self {
        let tiles: [Tile; NUM_TILES] =
            std::array::from_fn(|coordinate| Tile::create(coordinate, config.get(&coordinate).copied()));
        let active = |alliance: Alliance| -> Vec<Piece> {
            tiles
                .iter()
                .filter_map(Tile::piece)
                .filter(|piece| piece.alliance() == alliance)
                .copied()
                .collect()
        };
        let white_pieces = active(Alliance::White);
        let black_pieces = active(Alliance::Black);
        Self {
            tiles,
            white_pieces,
            black_pieces,
            white_king,
            black_king,
            next_move_maker,
            en_passant_pawn,
            transition_move,
            players: OnceLock::new(),
        }
    }

    fn players(&self) -> &Players {
        self.players.get_or_init(|| Players::calculate(self))
    }

    /// # Panics
    ///
    /// Panics if `coordinate` is not below 64.
    pub fn tile(&self, coordinate: usize) -> &Tile {
        &self.tiles[coordinate]
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        alliance.choose_player(&self.white_pieces, &self.black_pieces)
    }

    /// White pieces first, each side in tile order.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.white_pieces.iter().chain(self.black_pieces.iter())
    }

    pub fn king(&self, alliance: Alliance) -> &Piece {
        alliance.choose_player(&self.white_king, &self.black_king)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Alliance::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Alliance::Black)
    }

    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, self.players().state(alliance))
    }

    pub fn current_player(&self) -> Player<'_> {
        self.player(self.next_move_maker)
    }

    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    /// The move that produced this board, if it came from one.
    pub fn transition_move(&self) -> Option<&Move> {
        self.transition_move.as_ref()
    }

    /// Legal moves of both sides, White's first.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> {
        self.white_player()
            .legal_moves()
            .iter()
            .chain(self.black_player().legal_moves().iter())
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..NUM_TILES_PER_ROW {
            let rank = NUM_TILES_PER_ROW - row;
            board_representation.push_str(&format!("{} │", rank));
            for column in 0..NUM_TILES_PER_ROW {
                let square = match self.tile(row * NUM_TILES_PER_ROW + column).piece() {
                    None => ' ',
                    Some(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row + 1 < NUM_TILES_PER_ROW {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (coordinate, tile) in self.tiles.iter().enumerate() {
            write!(f, "{:>3}", tile.to_string())?;
            if (coordinate + 1) % NUM_TILES_PER_ROW == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Stages pieces by coordinate before a board is built.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    board_config: BTreeMap<usize, Piece>,
    next_move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
    transition_move: Option<Move>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `piece` on its own coordinate, replacing whatever was staged there.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.board_config.insert(piece.position(), piece);
        self
    }

    pub fn set_move_maker(&mut self, next_move_maker: Alliance) -> &mut Self {
        self.next_move_maker = next_move_maker;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    pub fn set_move_transition(&mut self, transition_move: Move) -> &mut Self {
        self.transition_move = Some(transition_move);
        self
    }

    pub fn build(&self) -> Result<Board, BoardError> {
        let find_king = |alliance: Alliance| {
            self.board_config
                .values()
                .find(|piece| piece.kind().is_king() && piece.alliance() == alliance && piece.position() < NUM_TILES)
                .copied()
                .ok_or(BoardError::MissingKing(alliance))
        };
        let white_king = find_king(Alliance::White)?;
        let black_king = find_king(Alliance::Black)?;

        if let Some(pawn) = &self.en_passant_pawn {
            debug!(
                square = board_utils::position_at_coordinate(pawn.position()),
                side = %pawn.alliance(),
                "en passant pawn recorded"
            );
        }

        Ok(Board::assemble(
            &self.board_config,
            white_king,
            black_king,
            self.next_move_maker,
            self.en_passant_pawn,
            self.transition_move.clone(),
        ))
    }
}
