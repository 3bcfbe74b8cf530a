pub mod board;
pub mod eval;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;

pub use board::*;
pub use eval::{GamePhase, PrevMove, evaluate, evaluate_move, piece_value};
pub use fen::{FenError, generate_fen, parse_fen};
pub use game::*;
pub use movegen::*;
pub use perft::perft;
pub use time_control::*;
pub use types::*;

/// Playing strength, selected per computer player. Affects which strategy
/// runs and which evaluation terms are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Levels 1..=3; anything above clamps to the strongest.
    pub fn from_level(level: u8) -> Difficulty {
        match level {
            0 | 1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// What a strategy hands back after deciding on a move.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// None only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    /// Runner-up, for callers that want a second candidate if the first is
    /// rejected.
    pub alternative: Option<Move>,
    /// Score in centipawns from the mover's perspective.
    pub score: i32,
    /// Depth actually reached.
    pub depth: u8,
    pub nodes: u64,
    /// True if the clock cut the search short.
    pub stopped: bool,
}

impl SearchResult {
    pub fn no_moves() -> Self {
        Self {
            best_move: None,
            alternative: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Game state a strategy may consult beyond the position itself.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub limits: SearchLimits,
    /// The move most recently played in the game, by either side.
    pub prev: Option<PrevMove>,
    /// Hashes of every position reached so far, for repetition awareness.
    pub history: Vec<u64>,
}

impl SearchContext {
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            prev: None,
            history: Vec::new(),
        }
    }
}

/// A move-selection strategy. Implementations must leave the position
/// exactly as they found it; the game layer verifies this by hash.
pub trait Engine: Send {
    fn choose_move(&mut self, pos: &mut Position, ctx: &SearchContext) -> SearchResult;

    fn name(&self) -> &str;

    /// Reset internal state for a fresh game.
    fn new_game(&mut self) {}
}
