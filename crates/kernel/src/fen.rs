//! Forsyth-Edwards Notation parsing and generation.
//!
//! Not part of the public game interface; tests and diagnostics set up
//! positions from FEN, so parsing reports real errors instead of panicking.

use crate::board::{CastlingRights, Position};
use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 whitespace-separated fields")]
    MissingFields,
    #[error("board section must have 8 ranks")]
    BadRankCount,
    #[error("invalid piece character {0:?}")]
    BadPiece(char),
    #[error("rank does not describe exactly 8 files")]
    BadFileCount,
    #[error("invalid side to move {0:?}")]
    BadSideToMove(String),
    #[error("invalid castling character {0:?}")]
    BadCastling(char),
    #[error("invalid en-passant square {0:?}")]
    BadEnPassant(String),
    #[error("invalid clock field {0:?}")]
    BadClock(String),
    #[error("each side must have exactly one king")]
    MissingKing,
}

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields);
    }

    let mut pos = Position::empty();

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount);
    }
    let mut kings: [Option<u8>; 2] = [None, None];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let mut file: i8 = 0;
        let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as i8;
            } else {
                let color = if ch.is_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = match ch.to_ascii_lowercase() {
                    'p' => PieceKind::Pawn,
                    'n' => PieceKind::Knight,
                    'b' => PieceKind::Bishop,
                    'r' => PieceKind::Rook,
                    'q' => PieceKind::Queen,
                    'k' => PieceKind::King,
                    _ => return Err(FenError::BadPiece(ch)),
                };
                let s = sq(file, rank).ok_or(FenError::BadFileCount)?;
                pos.board[s as usize] = Some(Piece { color, kind });
                if kind == PieceKind::King {
                    kings[color.idx()] = Some(s);
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::BadFileCount);
            }
        }
        if file != 8 {
            return Err(FenError::BadFileCount);
        }
    }
    let (Some(wk), Some(bk)) = (kings[0], kings[1]) else {
        return Err(FenError::MissingKing);
    };
    pos.kings = [wk, bk];

    pos.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::BadSideToMove(other.to_string())),
    };

    let mut castling = CastlingRights::none();
    if parts[2] != "-" {
        for c in parts[2].chars() {
            match c {
                'K' => castling.wk = true,
                'Q' => castling.wq = true,
                'k' => castling.bk = true,
                'q' => castling.bq = true,
                _ => return Err(FenError::BadCastling(c)),
            }
        }
    }
    pos.castling = castling;

    pos.en_passant = if parts[3] == "-" {
        None
    } else {
        Some(coord_to_sq(parts[3]).ok_or_else(|| FenError::BadEnPassant(parts[3].to_string()))?)
    };

    let halfmove = parts.get(4).copied().unwrap_or("0");
    let fullmove = parts.get(5).copied().unwrap_or("1");
    pos.halfmove_clock = halfmove
        .parse()
        .map_err(|_| FenError::BadClock(halfmove.to_string()))?;
    pos.fullmove_number = fullmove
        .parse()
        .map_err(|_| FenError::BadClock(fullmove.to_string()))?;

    Ok(pos)
}

pub fn generate_fen(pos: &Position) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            let s = (rank * 8 + file) as u8;
            match pos.piece_at(s) {
                None => empty += 1,
                Some(pc) => {
                    if empty > 0 {
                        out.push(char::from_digit(empty, 10).unwrap());
                        empty = 0;
                    }
                    let ch = match pc.kind {
                        PieceKind::Pawn => 'p',
                        PieceKind::Knight => 'n',
                        PieceKind::Bishop => 'b',
                        PieceKind::Rook => 'r',
                        PieceKind::Queen => 'q',
                        PieceKind::King => 'k',
                    };
                    out.push(match pc.color {
                        Color::White => ch.to_ascii_uppercase(),
                        Color::Black => ch,
                    });
                }
            }
        }
        if empty > 0 {
            out.push(char::from_digit(empty, 10).unwrap());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    if pos.castling == CastlingRights::none() {
        out.push('-');
    } else {
        if pos.castling.wk {
            out.push('K');
        }
        if pos.castling.wq {
            out.push('Q');
        }
        if pos.castling.bk {
            out.push('k');
        }
        if pos.castling.bq {
            out.push('q');
        }
    }

    out.push(' ');
    match pos.en_passant {
        None => out.push('-'),
        Some(s) => out.push_str(&sq_to_coord(s)),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
