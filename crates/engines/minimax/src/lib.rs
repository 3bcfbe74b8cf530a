//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are always from the perspective of the side to move at the root.
//! The search walks make/unmake on the shared position and honors the
//! cooperative time control: when the clock latches, it backs out with the
//! best move found so far.

use chess_kernel::{
    Color, Difficulty, Engine, Move, Position, SearchContext, SearchResult, evaluate,
    legal_moves_into,
};

#[cfg(test)]
mod lib_tests;

/// Base score for a forced mate; remaining depth is added so nearer mates
/// score higher.
pub const MATE_SCORE: i32 = 100_000;

pub struct MinimaxEngine {
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn choose_move(&mut self, pos: &mut Position, ctx: &SearchContext) -> SearchResult {
        self.nodes = 0;
        ctx.limits.start();

        let root = pos.side_to_move;
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return SearchResult::no_moves();
        }

        let depth = ctx.limits.depth;
        let mut best: Option<Move> = None;
        let mut alternative: Option<Move> = None;
        let mut best_score = i32::MIN;

        for &mv in &moves {
            let undo = pos.make_move(mv);
            let score = self.minimax(pos, depth.saturating_sub(1), i32::MIN, i32::MAX, root, ctx);
            pos.unmake_move(mv, undo);

            if score > best_score || best.is_none() {
                alternative = best;
                best_score = score;
                best = Some(mv);
            }
            if ctx.limits.should_stop() {
                break;
            }
        }

        SearchResult {
            best_move: best,
            alternative,
            score: best_score,
            depth,
            nodes: self.nodes,
            stopped: ctx.limits.should_stop(),
        }
    }

    fn name(&self) -> &str {
        "minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

impl MinimaxEngine {
    fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        root: Color,
        ctx: &SearchContext,
    ) -> i32 {
        self.nodes += 1;
        if ctx.limits.time_control.should_check_time(self.nodes) {
            ctx.limits.time_control.check_time();
        }
        if ctx.limits.should_stop() {
            return evaluate(pos, root, Difficulty::Medium);
        }

        if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
            return 0;
        }
        // Entering a position the game has already seen twice completes a
        // threefold repetition.
        let hash = pos.position_hash();
        if ctx.history.iter().filter(|&&h| h == hash).count() >= 2 {
            return 0;
        }

        if depth == 0 {
            return evaluate(pos, root, Difficulty::Medium);
        }

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            let side = pos.side_to_move;
            if !pos.in_check(side) {
                return 0;
            }
            return if side == root {
                -(MATE_SCORE + depth as i32)
            } else {
                MATE_SCORE + depth as i32
            };
        }

        let maximizing = pos.side_to_move == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let undo = pos.make_move(mv);
            let score = self.minimax(pos, depth - 1, alpha, beta, root, ctx);
            pos.unmake_move(mv, undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
