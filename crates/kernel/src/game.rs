//! The playable game on top of the raw position: selection, move execution,
//! pawn promotion hand-off, status tracking, and the serializable view the
//! interface layer consumes.
//!
//! The interface speaks `Coord` (row 0 is black's back rank); everything
//! internal is square indices. Conversion happens at this boundary and
//! nowhere else.

use serde::Serialize;

use crate::board::Position;
use crate::eval::PrevMove;
use crate::movegen::{legal_moves, legal_moves_from};
use crate::time_control::SearchLimits;
use crate::types::*;
use crate::{Engine, SearchContext, SearchResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum GameStatus {
    InProgress,
    Check { color: Color },
    Checkmate { winner: Color },
    Stalemate,
    Draw { reason: DrawReason },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::Draw { .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// One executed move, as remembered by the game.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
    /// Filled in once the player picks; a queen until then.
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
    /// Whether the move put the opponent in check, mate included.
    pub check: bool,
    pub checkmate: bool,
    #[serde(skip)]
    pub mv: Move,
}

pub struct Game {
    position: Position,
    status: GameStatus,
    selected: Option<u8>,
    /// Destination square of a pawn awaiting its promotion piece. While
    /// set, no other action is accepted and the turn has not passed.
    pending_promotion: Option<u8>,
    history: Vec<MoveRecord>,
    /// Position hashes after every completed move, starting position
    /// included. Drives threefold-repetition detection.
    hash_history: Vec<u64>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        let hash = position.position_hash();
        let mut game = Self {
            position,
            status: GameStatus::InProgress,
            selected: None,
            pending_promotion: None,
            history: Vec::new(),
            hash_history: vec![hash],
        };
        game.update_status();
        game
    }

    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Whose turn it is. While a promotion is pending the turn has not
    /// passed yet, even though the underlying position already switched.
    pub fn current_player(&self) -> Color {
        if self.pending_promotion.is_some() {
            self.position.side_to_move.other()
        } else {
            self.position.side_to_move
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn get_piece(&self, at: Coord) -> Option<Piece> {
        self.position.piece_at(at.to_sq()?)
    }

    pub fn awaiting_promotion(&self) -> Option<Coord> {
        self.pending_promotion.map(Coord::from_sq)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<PrevMove> {
        self.history.last().map(|rec| PrevMove {
            from: rec.mv.from,
            to: rec.mv.to,
            color: rec.piece.color,
        })
    }

    /// Select one of the current player's pieces. Returns false and leaves
    /// the selection untouched for anything else.
    pub fn select_piece(&mut self, at: Coord) -> bool {
        if self.status.is_over() || self.pending_promotion.is_some() {
            return false;
        }
        let Some(s) = at.to_sq() else {
            return false;
        };
        match self.position.piece_at(s) {
            Some(pc) if pc.color == self.position.side_to_move => {
                self.selected = Some(s);
                true
            }
            _ => false,
        }
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected.map(Coord::from_sq)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Destinations for the currently selected piece; empty with nothing
    /// selected.
    pub fn selected_moves(&mut self) -> Vec<Coord> {
        match self.selected {
            Some(s) => self.possible_moves(Coord::from_sq(s)),
            None => Vec::new(),
        }
    }

    /// Destination squares legal for the piece at `at`. Promotion variants
    /// collapse to one entry per destination.
    pub fn possible_moves(&mut self, at: Coord) -> Vec<Coord> {
        if self.status.is_over() || self.pending_promotion.is_some() {
            return Vec::new();
        }
        let Some(from) = at.to_sq() else {
            return Vec::new();
        };
        let mut dests: Vec<Coord> = Vec::new();
        for mv in legal_moves_from(&mut self.position, from) {
            let coord = Coord::from_sq(mv.to);
            if !dests.contains(&coord) {
                dests.push(coord);
            }
        }
        dests
    }

    /// Play a move, returning its record, or None without side effects if
    /// the move is not legal in the current position. A pawn reaching the
    /// last rank leaves the game waiting on `promote_pawn` before the turn
    /// passes; `awaiting_promotion` reports that state.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<MoveRecord> {
        if self.status.is_over() || self.pending_promotion.is_some() {
            return None;
        }
        let (from_sq, to_sq) = (from.to_sq()?, to.to_sq()?);
        let candidates = legal_moves_from(&mut self.position, from_sq);
        let &mv = candidates.iter().find(|m| {
            m.to == to_sq && (m.promotion.is_none() || m.promotion == Some(PieceKind::Queen))
        })?;
        Some(self.execute(mv))
    }

    /// Play a fully specified move, promotion piece included. Strategy
    /// output comes through here; the move must still be legal.
    pub fn play_move(&mut self, mv: Move) -> bool {
        if self.status.is_over() || self.pending_promotion.is_some() {
            return false;
        }
        if !legal_moves(&self.position).contains(&mv) {
            return false;
        }
        self.execute(mv);
        if let Some(kind) = mv.promotion
            && self.pending_promotion.is_some()
        {
            self.promote_pawn(kind);
        }
        true
    }

    fn execute(&mut self, mv: Move) -> MoveRecord {
        let piece = self
            .position
            .piece_at(mv.from)
            .expect("legal move from occupied square");
        let captured = match mv.kind {
            MoveKind::Capture => self.position.piece_at(mv.to),
            MoveKind::EnPassant { capture_sq } => self.position.piece_at(capture_sq),
            _ => None,
        };

        // A promotion is played as a queen first; promote_pawn swaps the
        // piece if the player picks otherwise.
        let pending = mv.promotion.is_some();
        let played = Move {
            promotion: if pending {
                Some(PieceKind::Queen)
            } else {
                None
            },
            ..mv
        };
        self.position.make_move(played);
        self.selected = None;

        self.history.push(MoveRecord {
            piece,
            from: Coord::from_sq(mv.from),
            to: Coord::from_sq(mv.to),
            captured,
            promotion: pending.then_some(PieceKind::Queen),
            kind: mv.kind,
            check: false,
            checkmate: false,
            mv: played,
        });

        if pending {
            self.pending_promotion = Some(mv.to);
        } else {
            self.hash_history.push(self.position.position_hash());
            self.update_status();
            self.stamp_last_record();
        }
        *self.history.last().expect("record just pushed")
    }

    /// Copy the check flags of the freshly computed status onto the move
    /// that produced it.
    fn stamp_last_record(&mut self) {
        let (check, checkmate) = match self.status {
            GameStatus::Check { .. } => (true, false),
            GameStatus::Checkmate { .. } => (true, true),
            _ => (false, false),
        };
        if let Some(rec) = self.history.last_mut() {
            rec.check = check;
            rec.checkmate = checkmate;
        }
    }

    /// Resolve a pending promotion. Only queen, rook, bishop, or knight are
    /// accepted.
    pub fn promote_pawn(&mut self, kind: PieceKind) -> bool {
        let Some(s) = self.pending_promotion else {
            return false;
        };
        if matches!(kind, PieceKind::Pawn | PieceKind::King) {
            return false;
        }
        let Some(placeholder) = self.position.piece_at(s) else {
            return false;
        };
        self.position.set_piece(
            s,
            Some(Piece {
                color: placeholder.color,
                kind,
            }),
        );
        if let Some(rec) = self.history.last_mut() {
            rec.promotion = Some(kind);
        }
        self.pending_promotion = None;
        self.hash_history.push(self.position.position_hash());
        self.update_status();
        self.stamp_last_record();
        true
    }

    fn update_status(&mut self) {
        let side = self.position.side_to_move;
        let in_check = self.position.in_check(side);

        if legal_moves(&self.position).is_empty() {
            self.status = if in_check {
                GameStatus::Checkmate {
                    winner: side.other(),
                }
            } else {
                GameStatus::Stalemate
            };
            return;
        }

        if self.position.is_fifty_move_draw() {
            self.status = GameStatus::Draw {
                reason: DrawReason::FiftyMoveRule,
            };
            return;
        }
        let current = self.position.position_hash();
        let repeats = self.hash_history.iter().filter(|&&h| h == current).count();
        if repeats >= 3 {
            self.status = GameStatus::Draw {
                reason: DrawReason::ThreefoldRepetition,
            };
            return;
        }
        if self.position.is_insufficient_material() {
            self.status = GameStatus::Draw {
                reason: DrawReason::InsufficientMaterial,
            };
            return;
        }

        self.status = if in_check {
            GameStatus::Check { color: side }
        } else {
            GameStatus::InProgress
        };
    }

    /// Run a strategy against the live position. Strategies search by
    /// mutating the position and must restore it exactly; if the hash does
    /// not match afterwards the result is discarded.
    pub fn run_engine(
        &mut self,
        engine: &mut dyn Engine,
        limits: SearchLimits,
    ) -> Option<SearchResult> {
        if self.status.is_over() || self.pending_promotion.is_some() {
            return None;
        }
        let ctx = SearchContext {
            limits,
            prev: self.last_move(),
            history: self.hash_history.clone(),
        };
        let before = self.position.position_hash();
        let result = engine.choose_move(&mut self.position, &ctx);
        if self.position.position_hash() != before {
            tracing::error!(
                engine = engine.name(),
                "strategy left the position modified, discarding its move"
            );
            return None;
        }
        Some(result)
    }

    pub fn view(&self) -> GameView {
        let mut board: Vec<Vec<Option<Piece>>> = vec![vec![None; 8]; 8];
        for s in 0..64u8 {
            let c = Coord::from_sq(s);
            board[c.row as usize][c.col as usize] = self.position.piece_at(s);
        }

        let mut captured_by_white = Vec::new();
        let mut captured_by_black = Vec::new();
        for rec in &self.history {
            if let Some(victim) = rec.captured {
                match victim.color {
                    Color::Black => captured_by_white.push(victim.kind),
                    Color::White => captured_by_black.push(victim.kind),
                }
            }
        }

        GameView {
            board,
            selected: self.selected(),
            current_player: self.current_player(),
            status: self.status,
            in_check: self.position.in_check(self.position.side_to_move),
            awaiting_promotion: self.awaiting_promotion(),
            moves: self.history.clone(),
            captured_by_white,
            captured_by_black,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of everything the interface needs to draw the game.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// `board[row][col]`, row 0 at black's back rank.
    pub board: Vec<Vec<Option<Piece>>>,
    pub selected: Option<Coord>,
    pub current_player: Color,
    pub status: GameStatus,
    pub in_check: bool,
    pub awaiting_promotion: Option<Coord>,
    pub moves: Vec<MoveRecord>,
    pub captured_by_white: Vec<PieceKind>,
    pub captured_by_black: Vec<PieceKind>,
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
