use super::MoveStrategy;
use crate::chess_boards::chess_board::{Board, Move};
use rand::prelude::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Plays a uniformly random accepted move. Seeded, so games can be replayed.
pub struct RandomMoveStrategy {
    rng: Pcg64,
}

impl RandomMoveStrategy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl MoveStrategy for RandomMoveStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn execute(&mut self, board: &Board) -> Option<Move> {
        let player = board.current_player();
        let accepted: Vec<&Move> = player
            .legal_moves()
            .iter()
            .filter(|mv| player.make_move(mv).status().is_done())
            .collect();
        accepted.choose(&mut self.rng).map(|mv| (*mv).clone())
    }

    fn num_boards_evaluated(&self) -> u64 {
        0
    }
}
