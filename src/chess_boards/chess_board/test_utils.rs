use super::{Alliance, Board, Builder, MoveFactory, MoveStatus, Piece, PieceType};

/// Builds a board from the piece placement field of a FEN string. Every piece
/// counts as unmoved.
pub fn board_from_placement(placement: &str, next_move_maker: Alliance) -> Board {
    let mut builder = Builder::new();
    let mut coordinate = 0;
    for c in placement.chars() {
        match c {
            '/' => {}
            '1'..='8' => coordinate += c.to_digit(10).unwrap() as usize,
            _ => {
                let alliance = if c.is_ascii_uppercase() { Alliance::White } else { Alliance::Black };
                let kind = match c.to_ascii_lowercase() {
                    'p' => PieceType::Pawn,
                    'n' => PieceType::Knight,
                    'b' => PieceType::Bishop,
                    'r' => PieceType::Rook,
                    'q' => PieceType::Queen,
                    'k' => PieceType::King,
                    other => panic!("unknown piece {other}"),
                };
                builder.set_piece(Piece::new(kind, coordinate, alliance));
                coordinate += 1;
            }
        }
    }
    assert_eq!(coordinate, 64, "placement must cover 64 squares");
    builder.set_move_maker(next_move_maker).build().unwrap()
}

/// Plays coordinate moves such as `e2e4` in order, asserting each is accepted.
pub fn play_moves(board: &Board, moves: &[&str]) -> Board {
    let mut board = board.clone();
    for pair in moves {
        let mv = MoveFactory::create_move_from_pair(&board, pair).unwrap();
        let transition = board.current_player().make_move(&mv);
        assert_eq!(transition.status(), MoveStatus::Done, "move {pair} was rejected");
        board = transition.into_to_board();
    }
    board
}

pub fn assert_moves<I: Iterator<Item = super::Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}
