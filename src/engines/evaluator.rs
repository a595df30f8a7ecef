use super::BoardEvaluator;
use crate::chess_boards::chess_board::{Board, Player};

const CHECK_BONUS: i32 = 50;
const CHECK_MATE_BONUS: i32 = 10_000;
const DEPTH_BONUS: i32 = 100;
const CASTLE_BONUS: i32 = 60;

/// Material, mobility, check, mate and castling.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBoardEvaluator;

impl StandardBoardEvaluator {
    fn score_player(player: Player<'_>, depth: u32) -> i32 {
        piece_value(player) + mobility(player) + check(player) + checkmate(player, depth) + castled(player)
    }
}

impl BoardEvaluator for StandardBoardEvaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32 {
        Self::score_player(board.white_player(), depth) - Self::score_player(board.black_player(), depth)
    }
}

fn piece_value(player: Player<'_>) -> i32 {
    player.active_pieces().iter().map(|piece| piece.value()).sum()
}

fn mobility(player: Player<'_>) -> i32 {
    player.legal_moves().len() as i32
}

fn check(player: Player<'_>) -> i32 {
    if player.opponent().is_in_check() {
        CHECK_BONUS
    } else {
        0
    }
}

fn checkmate(player: Player<'_>, depth: u32) -> i32 {
    if player.opponent().is_in_checkmate() {
        CHECK_MATE_BONUS * depth_bonus(depth)
    } else {
        0
    }
}

// Mates found with more search depth left are closer to the root.
fn depth_bonus(depth: u32) -> i32 {
    if depth == 0 {
        1
    } else {
        DEPTH_BONUS * depth as i32
    }
}

fn castled(player: Player<'_>) -> i32 {
    if player.is_castled() {
        CASTLE_BONUS
    } else {
        0
    }
}
