//! The computer side of a game.
//!
//! Picks a strategy for the configured difficulty, runs it against the
//! live game, and plays the answer. A strategy that misbehaves, whether by
//! returning an unplayable move or by corrupting the position it searched,
//! never stalls the game: after one retry with the runner-up candidate the
//! player degrades to random selection for that move.

use std::time::Duration;

use chess_kernel::{Difficulty, Engine, Game, MoveRecord, SearchLimits};
use deepening_ai::DeepeningEngine;
use minimax_ai::MinimaxEngine;
use random_ai::RandomEngine;


const MEDIUM_DEPTH: u8 = 4;
const MEDIUM_BUDGET: Duration = Duration::from_millis(2000);
const HARD_DEPTH: u8 = 20;
const HARD_BUDGET: Duration = Duration::from_millis(5000);

pub struct ComputerPlayer {
    difficulty: Difficulty,
    engine: Box<dyn Engine>,
    seed: Option<u64>,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            engine: build_engine(difficulty, None),
            seed: None,
        }
    }

    /// Fully deterministic play for a fixed seed, difficulty permitting.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            engine: build_engine(difficulty, Some(seed)),
            seed: Some(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Numeric form used by the interface, 1 through 3.
    pub fn set_level(&mut self, level: u8) {
        self.set_difficulty(Difficulty::from_level(level));
    }

    /// Switching strength rebuilds the strategy, which also discards any
    /// opening-book progress it was tracking.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.engine = build_engine(difficulty, self.seed);
    }

    pub fn new_game(&mut self) {
        self.engine.new_game();
    }

    /// Choose and play one move for the side to move, returning its record.
    /// None only when the game accepts no move at all.
    pub fn make_move(&mut self, game: &mut Game) -> Option<MoveRecord> {
        if game.status().is_over() || game.awaiting_promotion().is_some() {
            return None;
        }

        match game.run_engine(self.engine.as_mut(), limits_for(self.difficulty)) {
            Some(result) => {
                if let Some(mv) = result.best_move
                    && game.play_move(mv)
                {
                    return game.history().last().copied();
                }
                if let Some(alt) = result.alternative
                    && game.play_move(alt)
                {
                    tracing::warn!(
                        strategy = self.engine.name(),
                        "primary move rejected, played the runner-up"
                    );
                    return game.history().last().copied();
                }
                tracing::warn!(
                    strategy = self.engine.name(),
                    "no playable move from strategy, degrading to random"
                );
            }
            None => {
                tracing::error!(
                    strategy = self.engine.name(),
                    "strategy failed, degrading to random"
                );
            }
        }
        self.random_rescue(game)
    }

    fn random_rescue(&mut self, game: &mut Game) -> Option<MoveRecord> {
        let mut rescue = match self.seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::new(),
        };
        let result = game.run_engine(&mut rescue, SearchLimits::depth(1))?;
        let mv = result.best_move?;
        if game.play_move(mv) {
            game.history().last().copied()
        } else {
            None
        }
    }
}

fn build_engine(difficulty: Difficulty, seed: Option<u64>) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Easy => Box::new(seed.map_or_else(RandomEngine::new, RandomEngine::with_seed)),
        Difficulty::Medium => Box::new(MinimaxEngine::new()),
        Difficulty::Hard => {
            Box::new(seed.map_or_else(DeepeningEngine::new, DeepeningEngine::with_seed))
        }
    }
}

fn limits_for(difficulty: Difficulty) -> SearchLimits {
    match difficulty {
        Difficulty::Easy => SearchLimits::depth(1),
        Difficulty::Medium => SearchLimits::depth_and_time(MEDIUM_DEPTH, MEDIUM_BUDGET),
        Difficulty::Hard => SearchLimits::depth_and_time(HARD_DEPTH, HARD_BUDGET),
    }
}
