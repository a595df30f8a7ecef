use crate::chess_boards::chess_board::Board;

/// Counts the leaf positions reachable in exactly `depth` plies.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let player = board.current_player();
    let mut node_count = 0u64;
    for mv in player.legal_moves() {
        let transition = player.make_move(mv);
        if transition.status().is_done() {
            node_count += perft(transition.to_board(), depth - 1);
        }
    }
    node_count
}

/// Node count below each accepted root move, sorted by coordinate pair.
/// Empty at depth 0, where there is nothing to divide.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let player = board.current_player();
    let mut result_moves: Vec<(String, u64)> = player
        .legal_moves()
        .iter()
        .filter_map(|mv| {
            let transition = player.make_move(mv);
            transition
                .status()
                .is_done()
                .then(|| (mv.as_algebraic(), perft(transition.to_board(), depth - 1)))
        })
        .collect();
    result_moves.sort();
    result_moves
}
