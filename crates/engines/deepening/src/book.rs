//! A handful of mainline openings, keyed by the move just played in the
//! game. `None` is the start-of-game key for the first move as white.

/// Candidate replies as (from, to) square pairs.
type Line = &'static [(u8, u8)];

const E2E4: (u8, u8) = (12, 28);
const D2D4: (u8, u8) = (11, 27);

const FIRST_MOVES: Line = &[
    E2E4,
    D2D4,
    (10, 26), // c2-c4
    (6, 21),  // Ng1-f3
];

const REPLIES_TO_E4: Line = &[
    (52, 36), // e7-e5
    (50, 34), // c7-c5, Sicilian
    (52, 44), // e7-e6, French
    (50, 42), // c7-c6, Caro-Kann
    (51, 43), // d7-d6
    (51, 35), // d7-d5, Scandinavian
];

const REPLIES_TO_D4: Line = &[
    (51, 35), // d7-d5
    (62, 45), // Ng8-f6
    (52, 44), // e7-e6
    (50, 34), // c7-c5
];

/// Look up candidate replies for the last move played, or the opening set
/// when no move has been played yet.
pub fn replies(last: Option<(u8, u8)>) -> Option<Line> {
    match last {
        None => Some(FIRST_MOVES),
        Some(mv) if mv == E2E4 => Some(REPLIES_TO_E4),
        Some(mv) if mv == D2D4 => Some(REPLIES_TO_D4),
        Some(_) => None,
    }
}
