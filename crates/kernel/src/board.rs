//! Board state and the simulate/undo primitive.
//!
//! `Position` owns the 64-square arena plus the auxiliary state (side to
//! move, castling rights, en-passant target, clocks). `make_move` and
//! `unmake_move` form the one shared simulation pair reused by the legality
//! filter, the evaluator, and every search engine; a make followed by the
//! matching unmake must restore the position exactly.

use crate::types::*;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAG_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square behind a pawn that just advanced two ranks.
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Cached king squares, [white, black]. Updated incrementally by
    /// make/unmake so attack checks never scan for the king.
    pub kings: [u8; 2],
}

/// Everything `unmake_move` needs to restore the prior position.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub captured_sq: u8,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            kings: [4, 60],
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::all();

        for f in 0..8 {
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> u8 {
        self.kings[c.idx()]
    }

    /// Half-moves played since the start of the game, derived from the
    /// move counters. Drives the opening/middlegame/endgame phase split.
    pub fn halfmoves_played(&self) -> u32 {
        (self.fullmove_number - 1) * 2
            + match self.side_to_move {
                Color::White => 0,
                Color::Black => 1,
            }
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.is_square_attacked(self.king_sq(c), c.other())
    }

    /// True if any piece of `by` attacks `target`. Pure scan over the eight
    /// attack geometries; never mutates.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // Pawns attack diagonally toward the enemy, so look one rank back
        // toward the attacker's side of the board.
        let pawn_dr: i8 = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        for df in [-1i8, 1] {
            if let Some(s) = sq(tf + df, tr + pawn_dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::Pawn
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::Knight
            {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::King
            {
                return true;
            }
        }

        for (dirs, a, b) in [
            (DIAG_DIRS, PieceKind::Bishop, PieceKind::Queen),
            (ORTHO_DIRS, PieceKind::Rook, PieceKind::Queen),
        ] {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        if pc.color == by && (pc.kind == a || pc.kind == b) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// Apply a move, returning the state needed to take it back.
    ///
    /// The caller guarantees `mv.from` holds a piece of the side to move;
    /// the move generator is the only producer of `Move` values.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.piece_at(mv.from).expect("make_move: empty from-square");
        let mut undo = Undo {
            captured: None,
            captured_sq: mv.to,
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
        };

        self.en_passant = None;

        match mv.kind {
            MoveKind::Quiet => {}
            MoveKind::Capture => {
                undo.captured = self.piece_at(mv.to);
            }
            MoveKind::EnPassant { capture_sq } => {
                undo.captured = self.piece_at(capture_sq);
                undo.captured_sq = capture_sq;
                self.set_piece(capture_sq, None);
            }
            MoveKind::Castle { rook_from, rook_to } => {
                let rook = self.piece_at(rook_from);
                self.set_piece(rook_from, None);
                self.set_piece(rook_to, rook);
            }
        }

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(moved));

        // Promotion: the piece changes kind only when the move carries a
        // choice. The game layer defers the choice and swaps the kind later.
        if let Some(promo) = mv.promotion
            && moved.kind == PieceKind::Pawn
        {
            self.set_piece(
                mv.to,
                Some(Piece {
                    color: moved.color,
                    kind: promo,
                }),
            );
        }

        if moved.kind == PieceKind::King {
            self.kings[moved.color.idx()] = mv.to;
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }

        // A rook leaving or being captured on its home square revokes the
        // matching right. true -> false only; rights never come back.
        for (rsq, piece_sq) in [(mv.from, Some(moved)), (mv.to, undo.captured)] {
            if let Some(pc) = piece_sq
                && pc.kind == PieceKind::Rook
            {
                match (pc.color, rsq) {
                    (Color::White, 0) => self.castling.wq = false,
                    (Color::White, 7) => self.castling.wk = false,
                    (Color::Black, 56) => self.castling.bq = false,
                    (Color::Black, 63) => self.castling.bk = false,
                    _ => {}
                }
            }
        }

        // Double pawn push opens an en-passant window for one reply.
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(mv.from);
            let tr = rank_of(mv.to);
            if (fr - tr).abs() == 2 {
                self.en_passant = sq(file_of(mv.from), (fr + tr) / 2);
            }
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    /// Exact inverse of `make_move` for the same `mv`/`undo` pair.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let MoveKind::Castle { rook_from, rook_to } = mv.kind {
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        // Put the mover back as whatever it was before (undoes promotion).
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));
        if let Some(captured) = undo.captured {
            self.set_piece(undo.captured_sq, Some(captured));
        }

        if undo.moved_piece.kind == PieceKind::King {
            self.kings[undo.moved_piece.color.idx()] = mv.from;
        }
    }

    /// Lightweight FNV-based hash over board, side, castling, and
    /// en-passant. Used for repetition detection and for verifying that
    /// searches restore the position they were handed.
    pub fn position_hash(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h = h.wrapping_mul(0x100000001b3);
            h
        }

        let mut h = 0xcbf29ce484222325u64;
        h = mix(
            h,
            match self.side_to_move {
                Color::White => 1,
                Color::Black => 2,
            },
        );
        h = mix(h, if self.castling.wk { 3 } else { 5 });
        h = mix(h, if self.castling.wq { 7 } else { 11 });
        h = mix(h, if self.castling.bk { 13 } else { 17 });
        h = mix(h, if self.castling.bq { 19 } else { 23 });
        if let Some(ep) = self.en_passant {
            h = mix(h, 29 + ep as u64);
        }
        for (i, sq) in self.board.iter().enumerate() {
            let v = if let Some(pc) = sq {
                (i as u64) ^ ((pc.color.idx() as u64) << 6) ^ ((pc.kind.idx() as u64) << 3)
            } else {
                i as u64
            };
            h = mix(h, v);
        }
        h
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a lone minor piece, or
    /// one bishop each on same-colored squares.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0usize;
        let mut bishop_squares: Vec<u8> = Vec::new();
        for s in 0..64u8 {
            let Some(pc) = self.piece_at(s) else { continue };
            match pc.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_squares.push(s);
                }
            }
        }
        if minors <= 1 {
            return true;
        }
        // Two bishops on equal-colored squares cannot force mate.
        if minors == 2 && bishop_squares.len() == 2 {
            let shade = |s: u8| (file_of(s) + rank_of(s)) % 2;
            return shade(bishop_squares[0]) == shade(bishop_squares[1]);
        }
        false
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
