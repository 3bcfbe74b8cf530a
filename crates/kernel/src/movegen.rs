//! Pseudo-legal move generation plus the self-check legality filter.

use crate::board::{DIAG_DIRS, KING_DELTAS, KNIGHT_DELTAS, ORTHO_DIRS, Position};
use crate::types::*;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves for the side to move, returning a fresh vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across
/// calls. Filters by playing each pseudo-legal move on the mutable position
/// and rejecting any that leave the mover's own king attacked.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// Legal moves for one piece only. The game layer's `possible_moves` and
/// the evaluator's per-piece queries go through here.
pub fn legal_moves_from(pos: &mut Position, from: u8) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    let Some(pc) = pos.piece_at(from) else {
        return out;
    };
    if pc.color != pos.side_to_move {
        return out;
    }
    piece_moves(pos, from, pc, &mut out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
    out
}

/// Legal moves for an arbitrary color, regardless of whose turn it is.
/// Used by the evaluator's mobility differential; the side-to-move flip is
/// restored before returning.
pub fn legal_moves_for(pos: &mut Position, color: Color, out: &mut Vec<Move>) {
    let saved_stm = pos.side_to_move;
    let saved_ep = pos.en_passant;
    pos.side_to_move = color;
    if color != saved_stm {
        // The en-passant window only ever belongs to the side to move.
        pos.en_passant = None;
    }
    legal_moves_into(pos, out);
    pos.side_to_move = saved_stm;
    pos.en_passant = saved_ep;
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        piece_moves(pos, from, pc, out);
    }
}

fn piece_moves(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAG_DIRS, out),
        PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHO_DIRS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc.color, &DIAG_DIRS, out);
            gen_slider(pos, from, pc.color, &ORTHO_DIRS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_DELTAS, out);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, kind: MoveKind, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTION_KINDS {
            out.push(Move {
                from,
                to,
                kind,
                promotion: Some(pk),
            });
        }
    } else {
        out.push(Move {
            from,
            to,
            kind,
            promotion: None,
        });
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    // Single and double push, blocked by any occupant.
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, MoveKind::Quiet, promo_rank, out);

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::quiet(from, to2));
        }
    }

    // Diagonal captures, including en passant.
    for df in [-1i8, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        if let Some(target) = pos.piece_at(to) {
            if target.color != c {
                push_pawn_move(from, to, MoveKind::Capture, promo_rank, out);
            }
        } else if pos.en_passant == Some(to) {
            // The captured pawn sits beside us, not on the destination.
            let capture_sq = sq(f + df, r).expect("en-passant capture square in bounds");
            out.push(Move {
                from,
                to,
                kind: MoveKind::EnPassant { capture_sq },
                promotion: None,
            });
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for &(df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(pc) if pc.color != c => out.push(Move::capture(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for &(df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::capture(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: king and rook unmoved (rights still held), intervening squares
/// empty, rook actually present, and no square the king transits — origin
/// included — attacked by the opponent.
fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, kingside, queenside) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let rook = |s: u8| {
        matches!(
            pos.piece_at(s),
            Some(Piece {
                kind: PieceKind::Rook,
                color
            }) if color == c
        )
    };

    // King side: king home -> home+2, rook home+3 -> home+1.
    if kingside
        && rook(home + 3)
        && pos.piece_at(home + 1).is_none()
        && pos.piece_at(home + 2).is_none()
        && !pos.is_square_attacked(home + 1, enemy)
        && !pos.is_square_attacked(home + 2, enemy)
    {
        out.push(Move {
            from,
            to: home + 2,
            kind: MoveKind::Castle {
                rook_from: home + 3,
                rook_to: home + 1,
            },
            promotion: None,
        });
    }

    // Queen side: king home -> home-2, rook home-4 -> home-1; the b-file
    // square must be empty but only the king's transit squares need to be
    // safe.
    if queenside
        && rook(home - 4)
        && pos.piece_at(home - 1).is_none()
        && pos.piece_at(home - 2).is_none()
        && pos.piece_at(home - 3).is_none()
        && !pos.is_square_attacked(home - 1, enemy)
        && !pos.is_square_attacked(home - 2, enemy)
    {
        out.push(Move {
            from,
            to: home - 2,
            kind: MoveKind::Castle {
                rook_from: home - 4,
                rook_to: home - 1,
            },
            promotion: None,
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
