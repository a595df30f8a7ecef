use super::evaluator::StandardBoardEvaluator;
use super::{BoardEvaluator, MoveStrategy};
use crate::chess_boards::chess_board::{Board, Move};
use std::time::Instant;
use tracing::{debug, info};

/// Plain fixed-depth minimax. Every line is searched to the full depth unless
/// the game ends first.
#[derive(Debug, Clone)]
pub struct MiniMax<E: BoardEvaluator = StandardBoardEvaluator> {
    evaluator: E,
    search_depth: u32,
    boards_evaluated: u64,
}

impl MiniMax<StandardBoardEvaluator> {
    pub fn new(search_depth: u32) -> Self {
        Self::with_evaluator(search_depth, StandardBoardEvaluator)
    }
}

impl<E: BoardEvaluator> MiniMax<E> {
    pub fn with_evaluator(search_depth: u32, evaluator: E) -> Self {
        Self {
            evaluator,
            search_depth,
            boards_evaluated: 0,
        }
    }

    pub fn search_depth(&self) -> u32 {
        self.search_depth
    }

    /// Best move for the side to move together with its score.
    ///
    /// White takes the highest score and Black the lowest. Among equal scores
    /// the first move in legal-move order wins.
    pub fn find_best_move(&mut self, board: &Board) -> Option<(Move, i32)> {
        let start_time = Instant::now();
        self.boards_evaluated = 0;

        let player = board.current_player();
        let maximizing = player.alliance().is_white();
        let depth = self.search_depth.saturating_sub(1);
        let mut best: Option<(Move, i32)> = None;

        for mv in player.legal_moves() {
            let transition = player.make_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            let score = if maximizing {
                self.min(transition.to_board(), depth)
            } else {
                self.max(transition.to_board(), depth)
            };
            debug!(mv = %mv, score, "root move scored");

            let improves = match &best {
                None => true,
                Some((_, best_score)) if maximizing => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };
            if improves {
                best = Some((mv.clone(), score));
            }
        }

        info!(
            side = %player.alliance(),
            depth = self.search_depth,
            best_move = %best.as_ref().map_or_else(|| "none".to_string(), |(mv, _)| mv.to_string()),
            boards_evaluated = self.boards_evaluated,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "search finished"
        );
        best
    }

    fn is_end_game_scenario(board: &Board) -> bool {
        let player = board.current_player();
        player.is_in_checkmate() || player.is_in_stalemate()
    }

    fn leaf(&mut self, board: &Board, depth: u32) -> Option<i32> {
        if depth == 0 || Self::is_end_game_scenario(board) {
            self.boards_evaluated += 1;
            Some(self.evaluator.evaluate(board, depth))
        } else {
            None
        }
    }

    fn min(&mut self, board: &Board, depth: u32) -> i32 {
        if let Some(score) = self.leaf(board, depth) {
            return score;
        }
        let player = board.current_player();
        let mut lowest_seen_value = i32::MAX;
        for mv in player.legal_moves() {
            let transition = player.make_move(mv);
            if transition.status().is_done() {
                lowest_seen_value = lowest_seen_value.min(self.max(transition.to_board(), depth - 1));
            }
        }
        lowest_seen_value
    }

    fn max(&mut self, board: &Board, depth: u32) -> i32 {
        if let Some(score) = self.leaf(board, depth) {
            return score;
        }
        let player = board.current_player();
        let mut highest_seen_value = i32::MIN;
        for mv in player.legal_moves() {
            let transition = player.make_move(mv);
            if transition.status().is_done() {
                highest_seen_value = highest_seen_value.max(self.min(transition.to_board(), depth - 1));
            }
        }
        highest_seen_value
    }
}

impl<E: BoardEvaluator> MoveStrategy for MiniMax<E> {
    fn name(&self) -> &str {
        "MiniMax"
    }

    fn execute(&mut self, board: &Board) -> Option<Move> {
        self.find_best_move(board).map(|(mv, _)| mv)
    }

    fn num_boards_evaluated(&self) -> u64 {
        self.boards_evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_boards::chess_board::test_utils::{board_from_placement, play_moves};
    use crate::chess_boards::chess_board::{Alliance, MoveStatus};

    struct MaterialOnly;

    impl BoardEvaluator for MaterialOnly {
        fn evaluate(&self, board: &Board, _depth: u32) -> i32 {
            let white: i32 = board.white_pieces().iter().map(|p| p.value()).sum();
            let black: i32 = board.black_pieces().iter().map(|p| p.value()).sum();
            white - black
        }
    }

    #[test]
    fn test_finds_fools_mate() {
        let board = play_moves(&Board::create_standard_board(), &["f2f3", "e7e5", "g2g4"]);
        let mut engine = MiniMax::new(2);
        let mv = engine.execute(&board).unwrap();
        assert_eq!(mv.as_algebraic(), "d8h4");
        assert!(engine.num_boards_evaluated() > 0);

        let transition = board.current_player().make_move(&mv);
        assert!(transition.to_board().current_player().is_in_checkmate());
    }

    #[test]
    fn test_finds_mate_in_one() {
        let board = board_from_placement("5k2/1R6/Q7/8/8/8/8/3K4", Alliance::White);
        let mut engine = MiniMax::new(1);
        let (mv, score) = engine.find_best_move(&board).unwrap();
        assert_eq!(mv.as_algebraic(), "a6a8");
        assert!(score > 10_000);
    }

    #[test]
    fn test_takes_free_material() {
        // Black to move can take the undefended queen on d4
        let board = board_from_placement("3rk3/8/8/8/3Q4/8/8/K7", Alliance::Black);
        let mut engine = MiniMax::with_evaluator(1, MaterialOnly);
        assert_eq!(engine.execute(&board).unwrap().as_algebraic(), "d8d4");
    }

    #[test]
    fn test_no_move_when_game_is_over() {
        let board = play_moves(&Board::create_standard_board(), &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let mut engine = MiniMax::new(2);
        assert_eq!(engine.execute(&board), None);

        let board = board_from_placement("k7/8/1Q6/8/8/8/8/7K", Alliance::Black);
        assert_eq!(engine.execute(&board), None);
    }

    #[test]
    fn test_selected_move_is_always_accepted() {
        // Black is in check and g7g6 is the only answer
        let board = play_moves(&Board::create_standard_board(), &["e2e4", "f7f6", "d1h5"]);
        let mut engine = MiniMax::new(1);
        let mv = engine.execute(&board).unwrap();
        assert_eq!(mv.as_algebraic(), "g7g6");
        assert_eq!(board.current_player().make_move(&mv).status(), MoveStatus::Done);
    }

    #[test]
    fn test_depth_zero_still_answers() {
        let board = Board::create_standard_board();
        let mut engine = MiniMax::new(0);
        let mv = engine.execute(&board).unwrap();
        assert_eq!(board.current_player().make_move(&mv).status(), MoveStatus::Done);
        assert_eq!(engine.num_boards_evaluated(), 20);
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = play_moves(&Board::create_standard_board(), &["e2e4", "e7e5"]);
        let first = MiniMax::new(2).execute(&board);
        let second = MiniMax::new(2).execute(&board);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_keep_first_move() {
        struct Flat;
        impl BoardEvaluator for Flat {
            fn evaluate(&self, _board: &Board, _depth: u32) -> i32 {
                0
            }
        }
        let board = Board::create_standard_board();
        let mut engine = MiniMax::with_evaluator(1, Flat);
        let first_legal = board.current_player().legal_moves()[0].clone();
        assert_eq!(engine.execute(&board), Some(first_legal));
        assert_eq!(engine.name(), "MiniMax");
    }
}
