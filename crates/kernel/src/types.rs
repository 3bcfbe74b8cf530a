use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

/// What a move does besides relocating the moving piece. Closed set: the
/// generator never produces anything outside these four shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MoveKind {
    Quiet,
    Capture,
    /// Capture square differs from the destination square.
    EnPassant { capture_sq: u8 },
    Castle { rook_from: u8, rook_to: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn quiet(from: u8, to: u8) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Quiet,
            promotion: None,
        }
    }

    pub fn capture(from: u8, to: u8) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Capture,
            promotion: None,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant { .. })
    }
}

// Helpers
pub fn file_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub fn rank_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}

/// UI-facing coordinates: row 0 is black's back rank, row 7 white's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn from_sq(s: u8) -> Self {
        Self {
            row: 7 - (s / 8),
            col: s % 8,
        }
    }

    pub fn to_sq(self) -> Option<u8> {
        if self.row > 7 || self.col > 7 {
            return None;
        }
        Some((7 - self.row) * 8 + self.col)
    }
}
