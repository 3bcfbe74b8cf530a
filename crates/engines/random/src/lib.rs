//! Casual-strength move selection.
//!
//! Most of the time this strategy plays a uniformly random legal move; the
//! rest of the time it plays the best move according to the one-move
//! heuristic. The mix keeps games loose without being completely blind.
//! Also the fallback of last resort when a stronger strategy misbehaves.

use chess_kernel::{
    Difficulty, Engine, Move, Position, SearchContext, SearchResult, evaluate_move,
    legal_moves_into,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lib_tests;

/// Probability of taking the greedy pick instead of a random one.
const GREEDY_CHANCE: f64 = 0.3;

pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic selection for a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, pos: &mut Position, ctx: &SearchContext) -> SearchResult {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        self.nodes = moves.len() as u64;
        if moves.is_empty() {
            return SearchResult::no_moves();
        }

        // Score everything so the runner-up is available even when the
        // pick itself is random.
        let mut scored: Vec<(Move, i32)> = moves
            .iter()
            .map(|&mv| (mv, evaluate_move(pos, mv, Difficulty::Easy, ctx.prev)))
            .collect();
        scored.sort_by_key(|&(_, score)| std::cmp::Reverse(score));

        let best_move = if self.rng.gen_bool(GREEDY_CHANCE) {
            Some(scored[0].0)
        } else {
            moves.choose(&mut self.rng).copied()
        };
        let alternative = scored
            .iter()
            .map(|&(mv, _)| mv)
            .find(|&mv| Some(mv) != best_move);
        let score = scored
            .iter()
            .find(|&&(mv, _)| Some(mv) == best_move)
            .map(|&(_, s)| s)
            .unwrap_or(0);

        SearchResult {
            best_move,
            alternative,
            score,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "random"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
