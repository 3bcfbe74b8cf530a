//! Full-strength strategy: a small opening book early on, then time-boxed
//! iterative deepening with heuristic move ordering.
//!
//! Each completed depth overwrites the previous best, so the answer is
//! always the last depth that finished inside the budget. Depths start at 2;
//! a partially searched depth is only used when nothing deeper completed.

use chess_kernel::{
    Color, Difficulty, Engine, Move, Position, PrevMove, SearchContext, SearchResult, evaluate,
    evaluate_move, legal_moves_into,
};
use minimax_ai::MATE_SCORE;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

mod book;


const START_DEPTH: u8 = 2;
const MAX_DEPTH: u8 = 20;
/// Root candidates kept after ordering when more exist. Trades
/// completeness for time at wide positions.
const ROOT_WIDTH: usize = 15;
/// The book only speaks this early in the game.
const BOOK_HALFMOVE_LIMIT: u32 = 10;

pub struct DeepeningEngine {
    rng: StdRng,
    nodes: u64,
}

impl DeepeningEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Default for DeepeningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for DeepeningEngine {
    fn choose_move(&mut self, pos: &mut Position, ctx: &SearchContext) -> SearchResult {
        self.nodes = 0;

        if let Some(mv) = self.book_move(pos, ctx) {
            return SearchResult {
                best_move: Some(mv),
                alternative: None,
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
            };
        }

        ctx.limits.start();
        let root = pos.side_to_move;
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            return SearchResult::no_moves();
        }

        self.order_moves(pos, &mut moves, ctx.prev);
        if moves.len() > ROOT_WIDTH {
            moves.truncate(ROOT_WIDTH);
        }

        let max_depth = ctx.limits.depth.clamp(START_DEPTH, MAX_DEPTH);
        let mut best: Option<Move> = None;
        let mut alternative: Option<Move> = None;
        let mut best_score = 0;
        let mut depth_reached = 0;
        let mut stopped = false;

        for depth in START_DEPTH..=max_depth {
            let mut iter_best: Option<Move> = None;
            let mut iter_alt: Option<Move> = None;
            let mut iter_score = i32::MIN;
            let mut alpha = i32::MIN;

            for &mv in &moves {
                let undo = pos.make_move(mv);
                let score = self.search(pos, depth - 1, alpha, i32::MAX, root, ctx);
                pos.unmake_move(mv, undo);

                if score > iter_score || iter_best.is_none() {
                    iter_alt = iter_best;
                    iter_score = score;
                    iter_best = Some(mv);
                }
                alpha = alpha.max(iter_score);
                if ctx.limits.should_stop() {
                    break;
                }
            }

            let completed = !ctx.limits.should_stop();
            if completed {
                tracing::debug!(depth, score = iter_score, nodes = self.nodes, "depth complete");
            }
            if completed || best.is_none() {
                best = iter_best;
                alternative = iter_alt;
                best_score = iter_score;
                depth_reached = depth;
            }
            if !completed {
                stopped = true;
                break;
            }
            if best_score >= MATE_SCORE {
                break;
            }
            // The budget is only consulted between depths; a running depth
            // is never interrupted preemptively.
            if ctx.limits.time_control.check_time() {
                stopped = true;
                break;
            }
        }

        SearchResult {
            best_move: best,
            alternative,
            score: best_score,
            depth: depth_reached,
            nodes: self.nodes,
            stopped,
        }
    }

    fn name(&self) -> &str {
        "deepening"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

impl DeepeningEngine {
    /// A uniformly random legal book reply, if the book covers the last
    /// played move and the game is still young enough.
    fn book_move(&mut self, pos: &mut Position, ctx: &SearchContext) -> Option<Move> {
        if pos.halfmoves_played() >= BOOK_HALFMOVE_LIMIT {
            return None;
        }
        let key = ctx.prev.map(|p| (p.from, p.to));
        let candidates = book::replies(key)?;

        let mut legal = Vec::with_capacity(64);
        legal_moves_into(pos, &mut legal);
        let playable: Vec<Move> = legal
            .into_iter()
            .filter(|m| candidates.contains(&(m.from, m.to)))
            .collect();

        let pick = playable.choose(&mut self.rng).copied();
        if let Some(mv) = pick {
            tracing::debug!(from = mv.from, to = mv.to, "playing book move");
        }
        pick
    }

    /// Captures first, then by the one-move heuristic.
    fn order_moves(&mut self, pos: &mut Position, moves: &mut Vec<Move>, prev: Option<PrevMove>) {
        let mut scored: Vec<(Move, bool, i32)> = moves
            .iter()
            .map(|&mv| {
                (
                    mv,
                    mv.is_capture(),
                    evaluate_move(pos, mv, Difficulty::Hard, prev),
                )
            })
            .collect();
        scored.sort_by_key(|&(_, capture, score)| std::cmp::Reverse((capture, score)));
        moves.clear();
        moves.extend(scored.into_iter().map(|(mv, _, _)| mv));
    }

    fn search(
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
            return evaluate(pos, root, Difficulty::Hard);
        }

        if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
            return 0;
        }
        let hash = pos.position_hash();
        if ctx.history.iter().filter(|&&h| h == hash).count() >= 2 {
            return 0;
        }

        if depth == 0 {
            return evaluate(pos, root, Difficulty::Hard);
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

        // Ordering pays for itself only where the remaining subtree is
        // deep.
        if depth > 2 {
            self.order_moves(pos, &mut moves, None);
        }

        let maximizing = pos.side_to_move == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let undo = pos.make_move(mv);
            let score = self.search(pos, depth - 1, alpha, beta, root, ctx);
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
