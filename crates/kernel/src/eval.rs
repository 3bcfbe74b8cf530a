//! Position evaluation: material, piece-square tables, phase weighting,
//! check bonuses, center control, mobility, and the harder positional terms
//! (development, king safety, pawn structure) enabled at full strength.
//!
//! Also hosts `evaluate_move`, the cheap single-move heuristic the engines
//! use for move ordering; it is not a substitute for full evaluation.

use crate::Difficulty;
use crate::board::Position;
use crate::movegen::legal_moves_for;
use crate::types::*;

/// Material values in centipawns, indexed by `PieceKind::idx()`.
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

pub const CHECK_BONUS: i32 = 50;
pub const CHECK_BONUS_HARD: i32 = 80;
const MOBILITY_WEIGHT: i32 = 2;

/// Opening: fewer than 10 half-moves played. Endgame: non-king material
/// below 3000 centipawns or fewer than 10 non-king pieces left. Everything
/// between is the middlegame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub fn of(pos: &Position) -> GamePhase {
        if pos.halfmoves_played() < 10 {
            return GamePhase::Opening;
        }
        let mut total_value = 0i32;
        let mut piece_count = 0i32;
        for s in 0..64u8 {
            if let Some(pc) = pos.piece_at(s)
                && pc.kind != PieceKind::King
            {
                total_value += piece_value(pc.kind);
                piece_count += 1;
            }
        }
        if total_value < 3000 || piece_count < 10 {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }

    /// Positional-term multiplier, in tenths.
    fn positional_weight(self) -> i32 {
        match self {
            GamePhase::Opening => 12,
            GamePhase::Middlegame => 10,
            GamePhase::Endgame => 8,
        }
    }
}

// Piece-square tables, written from white's point of view with the far
// (promotion) rank first; `pst` mirrors them for black.
#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [ 0,  0,  0,  0,  0,  0,  0,  0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [ 5,  5, 10, 25, 25, 10,  5,  5],
    [ 0,  0,  0, 20, 20,  0,  0,  0],
    [ 5, -5,-10,  0,  0,-10, -5,  5],
    [ 5, 10, 10,-20,-20, 10, 10,  5],
    [ 0,  0,  0,  0,  0,  0,  0,  0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20,-10,-10,-10,-10,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0, 10, 10, 10, 10,  0,-10],
    [-10,  5,  5, 10, 10,  5,  5,-10],
    [-10,  0,  5, 10, 10,  5,  0,-10],
    [-10,  5,  5,  5,  5,  5,  5,-10],
    [-10,  0,  5,  0,  0,  5,  0,-10],
    [-20,-10,-10,-10,-10,-10,-10,-20],
];

#[rustfmt::skip]
const ROOK_TABLE: [[i32; 8]; 8] = [
    [ 0,  0,  0,  0,  0,  0,  0,  0],
    [ 5, 10, 10, 10, 10, 10, 10,  5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [ 0,  0,  0,  5,  5,  0,  0,  0],
];

#[rustfmt::skip]
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20,-10,-10, -5, -5,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0,  5,  5,  5,  5,  0,-10],
    [ -5,  0,  5,  5,  5,  5,  0, -5],
    [  0,  0,  5,  5,  5,  5,  0, -5],
    [-10,  5,  5,  5,  5,  5,  0,-10],
    [-10,  0,  5,  0,  0,  0,  0,-10],
    [-20,-10,-10, -5, -5,-10,-10,-20],
];

#[rustfmt::skip]
const KING_TABLE: [[i32; 8]; 8] = [
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-20,-30,-30,-40,-40,-30,-30,-20],
    [-10,-20,-20,-20,-20,-20,-20,-10],
    [ 20, 20,  0,  0,  0,  0, 20, 20],
    [ 20, 30, 10,  0,  0, 10, 30, 20],
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-20,-20,-30,-40,-50],
    [-30,-20,-10,  0,  0,-10,-20,-30],
    [-30,-10, 20, 30, 30, 20,-10,-30],
    [-30,-10, 30, 40, 40, 30,-10,-30],
    [-30,-10, 30, 40, 40, 30,-10,-30],
    [-30,-10, 20, 30, 30, 20,-10,-30],
    [-30,-30,  0,  0,  0,  0,-30,-30],
    [-50,-30,-30,-30,-30,-30,-30,-50],
];

fn base_table(kind: PieceKind) -> &'static [[i32; 8]; 8] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

fn table_lookup(table: &[[i32; 8]; 8], color: Color, s: u8) -> i32 {
    let (row, col) = match color {
        Color::White => ((7 - rank_of(s)) as usize, file_of(s) as usize),
        Color::Black => (rank_of(s) as usize, (7 - file_of(s)) as usize),
    };
    table[row][col]
}

/// Piece-square value for a piece of `color` standing on `s`, with the
/// endgame king table substituted when the phase calls for it.
pub fn pst(kind: PieceKind, color: Color, s: u8, phase: GamePhase) -> i32 {
    let table = if kind == PieceKind::King && phase == GamePhase::Endgame {
        &KING_ENDGAME_TABLE
    } else {
        base_table(kind)
    };
    table_lookup(table, color, s)
}

const CENTER_SQUARES: [u8; 4] = [27, 28, 35, 36]; // d4 e4 d5 e5

/// Twice the Manhattan distance from the board center (3.5, 3.5).
fn center_distance_x2(s: u8) -> i32 {
    (7 - 2 * rank_of(s) as i32).abs() + (7 - 2 * file_of(s) as i32).abs()
}

/// Evaluate the position from `perspective`'s point of view. Positive is
/// good for `perspective`. The position is mutated transiently for the
/// mobility and center-control queries and restored before returning.
pub fn evaluate(pos: &mut Position, perspective: Color, difficulty: Difficulty) -> i32 {
    let phase = GamePhase::of(pos);
    let weight = phase.positional_weight();
    let opponent = perspective.other();
    let mut score = 0i32;

    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        let value = piece_value(pc.kind) + pst(pc.kind, pc.color, s, phase) * weight / 10;
        if pc.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }

    let check_bonus = if difficulty == Difficulty::Hard {
        CHECK_BONUS_HARD
    } else {
        CHECK_BONUS
    };
    if pos.in_check(opponent) {
        score += check_bonus;
    }
    if pos.in_check(perspective) {
        score -= check_bonus;
    }

    let mut own_moves = Vec::with_capacity(64);
    let mut opp_moves = Vec::with_capacity(64);
    legal_moves_for(pos, perspective, &mut own_moves);
    legal_moves_for(pos, opponent, &mut opp_moves);

    score += center_control(pos, perspective, &own_moves);
    score += (own_moves.len() as i32 - opp_moves.len() as i32) * MOBILITY_WEIGHT;

    if difficulty == Difficulty::Hard {
        score += development(pos, perspective, phase);
        score += king_safety(pos, perspective, phase);
        score += pawn_structure(pos, perspective);
    }

    score
}

/// Occupying a center square is worth 10; each own piece able to move onto
/// one is worth 5 per square.
fn center_control(pos: &Position, color: Color, own_moves: &[Move]) -> i32 {
    let mut control = 0;
    for &center in &CENTER_SQUARES {
        if let Some(pc) = pos.piece_at(center)
            && pc.color == color
        {
            control += 10;
        }
        let mut seen_from = [false; 64];
        for mv in own_moves {
            if mv.to == center && !seen_from[mv.from as usize] {
                seen_from[mv.from as usize] = true;
                control += 5;
            }
        }
    }
    control
}

/// Opening-only: minors still at home are a liability, minors off the back
/// rank and a completed castle are assets.
fn development(pos: &Position, color: Color, phase: GamePhase) -> i32 {
    if phase != GamePhase::Opening {
        return 0;
    }
    let mut score = 0;
    let home_rank: i8 = match color {
        Color::White => 0,
        Color::Black => 7,
    };

    for file in 1..7 {
        if let Some(s) = sq(file, home_rank)
            && let Some(pc) = pos.piece_at(s)
            && pc.color == color
            && matches!(pc.kind, PieceKind::Knight | PieceKind::Bishop)
        {
            score -= 10;
        }
    }

    for s in 0..64u8 {
        if let Some(pc) = pos.piece_at(s)
            && pc.color == color
            && matches!(pc.kind, PieceKind::Knight | PieceKind::Bishop)
            && rank_of(s) != home_rank
        {
            score += 5;
        }
    }

    let ksq = pos.king_sq(color);
    if rank_of(ksq) == home_rank && matches!(file_of(ksq), 2 | 6) {
        score += 30;
    }

    score
}

fn king_safety(pos: &Position, color: Color, phase: GamePhase) -> i32 {
    let mut score = 0;
    let ksq = pos.king_sq(color);
    let kf = file_of(ksq);
    let kr = rank_of(ksq);
    let enemy = color.other();

    let mut protecting = 0;
    let mut attacking = 0;
    for (df, dr) in crate::board::KING_DELTAS {
        let Some(s) = sq(kf + df, kr + dr) else {
            continue;
        };
        if let Some(pc) = pos.piece_at(s) {
            if pc.color == color {
                protecting += 1;
            } else {
                attacking += 1;
            }
        }
        if pos.is_square_attacked(s, enemy) {
            score -= 5;
        }
    }
    score += protecting * 5;
    score -= attacking * 8;

    let dist_x2 = center_distance_x2(ksq);
    if phase != GamePhase::Endgame {
        // Exposed central king before the endgame.
        if dist_x2 < 4 {
            score -= 20;
        }
    } else {
        score += (8 - dist_x2) * 5 / 2;
    }

    score
}

fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let mut score = 0;
    let mut pawns_per_file = [0i32; 8];
    let mut advanced = [false; 8];
    let forward: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let own_pawn = |s: Option<u8>| {
        s.and_then(|s| pos.piece_at(s))
            .is_some_and(|pc| pc.kind == PieceKind::Pawn && pc.color == color)
    };

    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.kind != PieceKind::Pawn || pc.color != color {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);
        pawns_per_file[f as usize] += 1;

        // Past the midline.
        let crossed = match color {
            Color::White => r > 3,
            Color::Black => r < 4,
        };
        if crossed {
            advanced[f as usize] = true;
            score += 5;
        }

        if own_pawn(sq(f - 1, r)) {
            score += 5;
        }
        if own_pawn(sq(f + 1, r)) {
            score += 5;
        }

        if let Some(front) = sq(f, r + forward)
            && pos.piece_at(front).is_some()
        {
            score -= 10;
        }
    }

    for f in 0..8usize {
        if pawns_per_file[f] == 0 {
            continue;
        }
        let isolated = (f == 0 || pawns_per_file[f - 1] == 0)
            && (f == 7 || pawns_per_file[f + 1] == 0);
        if isolated {
            score -= 10;
        }
        if pawns_per_file[f] > 1 {
            score -= (pawns_per_file[f] - 1) * 15;
        }
    }

    if advanced[3] || advanced[4] {
        score += 10;
    }

    score
}

/// The previous move actually played in the game, for the ping-pong
/// penalty at full strength.
#[derive(Clone, Copy, Debug)]
pub struct PrevMove {
    pub from: u8,
    pub to: u8,
    pub color: Color,
}

/// Cheap single-move heuristic for ordering and the easy strategy's greedy
/// pick. Simulates the move just long enough to ask the check questions,
/// then restores the position.
pub fn evaluate_move(
    pos: &mut Position,
    mv: Move,
    difficulty: Difficulty,
    prev: Option<PrevMove>,
) -> i32 {
    let Some(piece) = pos.piece_at(mv.from) else {
        tracing::error!(from = mv.from, "evaluate_move called with empty from-square");
        return 0;
    };
    let hard = difficulty == Difficulty::Hard;
    let phase = GamePhase::of(pos);
    let mut score = 0i32;

    let captured = match mv.kind {
        MoveKind::Capture => pos.piece_at(mv.to),
        MoveKind::EnPassant { capture_sq } => pos.piece_at(capture_sq),
        _ => None,
    };
    if let Some(victim) = captured {
        score += piece_value(victim.kind) * 10;
        if hard && piece_value(victim.kind) > piece_value(piece.kind) {
            score += (piece_value(victim.kind) - piece_value(piece.kind)) * 2;
        }
    }

    // Positional delta on the base tables, weighted 1.5x outside the
    // endgame.
    let table = base_table(piece.kind);
    let delta = table_lookup(table, piece.color, mv.to) - table_lookup(table, piece.color, mv.from);
    score += delta;
    if phase != GamePhase::Endgame {
        score += delta / 2;
    }

    if mv.promotion.is_some() && piece.kind == PieceKind::Pawn {
        score += piece_value(PieceKind::Queen) - piece_value(PieceKind::Pawn);
    }

    if matches!(mv.kind, MoveKind::Castle { .. }) {
        score += 30;
        if hard && phase == GamePhase::Opening {
            score += 20;
        }
    }

    let undo = pos.make_move(mv);
    if pos.in_check(piece.color) {
        score -= 100;
        if hard {
            score -= 50;
        }
    }
    if pos.in_check(piece.color.other()) {
        score += 50;
        if hard {
            score += 20;
        }
    }
    pos.unmake_move(mv, undo);

    if hard {
        let home_rank: i8 = match piece.color {
            Color::White => 0,
            Color::Black => 7,
        };
        if phase == GamePhase::Opening
            && matches!(piece.kind, PieceKind::Knight | PieceKind::Bishop)
            && rank_of(mv.from) == home_rank
            && rank_of(mv.to) != home_rank
        {
            score += 15;
        }

        if phase == GamePhase::Endgame && piece.kind == PieceKind::King {
            score += (8 - center_distance_x2(mv.to)) * 5 / 2;
        }

        // Moving straight back to where we came from last turn.
        if let Some(prev) = prev
            && prev.color == piece.color
            && prev.from == mv.to
            && prev.to == mv.from
        {
            score -= 30;
        }
    }

    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
