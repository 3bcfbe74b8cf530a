use super::*;
use crate::Difficulty;
use crate::fen::parse_fen;
use crate::legal_moves;

#[test]
fn test_startpos_is_symmetric() {
    let mut pos = Position::startpos();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let white = evaluate(&mut pos, Color::White, difficulty);
        let black = evaluate(&mut pos, Color::Black, difficulty);
        assert_eq!(white, black, "mirror-image position, {difficulty:?}");
    }
}

#[test]
fn test_material_advantage_dominates() {
    // White is a queen up.
    let mut pos = parse_fen("4k3/8/8/8/8/8/8/3QK3 w - - 20 30").unwrap();
    let white = evaluate(&mut pos, Color::White, Difficulty::Medium);
    let black = evaluate(&mut pos, Color::Black, Difficulty::Medium);
    assert!(white > 700, "queen-up side should be winning, got {white}");
    assert!(black < -700, "queen-down side should be losing, got {black}");
}

#[test]
fn test_phase_transitions() {
    assert_eq!(GamePhase::of(&Position::startpos()), GamePhase::Opening);

    // Full material but past move 10.
    let middlegame =
        parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 12").unwrap();
    assert_eq!(GamePhase::of(&middlegame), GamePhase::Middlegame);

    let endgame = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 40").unwrap();
    assert_eq!(GamePhase::of(&endgame), GamePhase::Endgame);
}

#[test]
fn test_pst_rotates_for_black() {
    // Black's tables are the 180-degree rotation of white's.
    let f3 = 21;
    let c6 = 42;
    assert_eq!(
        pst(PieceKind::Knight, Color::White, f3, GamePhase::Middlegame),
        pst(PieceKind::Knight, Color::Black, c6, GamePhase::Middlegame)
    );
    let e4 = 28;
    let d5 = 35;
    assert_eq!(
        pst(PieceKind::Pawn, Color::White, e4, GamePhase::Middlegame),
        pst(PieceKind::Pawn, Color::Black, d5, GamePhase::Middlegame)
    );
}

#[test]
fn test_king_table_switches_in_endgame() {
    // Tucked in the corner is good early and bad once the endgame starts.
    let g1 = 6;
    let early = pst(PieceKind::King, Color::White, g1, GamePhase::Middlegame);
    let late = pst(PieceKind::King, Color::White, g1, GamePhase::Endgame);
    assert!(early > 0);
    assert!(late < 0);
}

#[test]
fn test_evaluate_move_prefers_capture() {
    // White knight on e4 can take the d6 pawn or retreat.
    let mut pos = parse_fen("4k3/8/3p4/8/4N3/8/8/4K3 w - - 10 12").unwrap();
    let capture = legal_moves(&pos)
        .into_iter()
        .find(|m| m.is_capture())
        .expect("Nxd6 available");
    let quiet = legal_moves(&pos)
        .into_iter()
        .find(|m| m.from == 28 && !m.is_capture())
        .expect("a quiet knight move");
    let cap_score = evaluate_move(&mut pos, capture, Difficulty::Medium, None);
    let quiet_score = evaluate_move(&mut pos, quiet, Difficulty::Medium, None);
    assert!(cap_score > quiet_score + 500);
}

#[test]
fn test_evaluate_move_promotion_bonus() {
    let mut pos = parse_fen("8/P6k/8/8/8/8/8/K7 w - - 10 30").unwrap();
    let promo = legal_moves(&pos)
        .into_iter()
        .find(|m| m.promotion == Some(PieceKind::Queen))
        .unwrap();
    let score = evaluate_move(&mut pos, promo, Difficulty::Medium, None);
    assert!(score >= 800, "promotion should score at least the queen gain");
}

#[test]
fn test_evaluate_move_restores_position() {
    let mut pos = Position::startpos();
    let before = pos.position_hash();
    for mv in legal_moves(&pos) {
        evaluate_move(&mut pos, mv, Difficulty::Hard, None);
        assert_eq!(pos.position_hash(), before);
    }
}

#[test]
fn test_ping_pong_penalty_at_full_strength() {
    // Knight shuffling straight back to where it came from.
    let mut pos = parse_fen("4k3/8/8/8/8/5N2/8/4K3 w - - 12 14").unwrap();
    let back = Move::quiet(21, 6); // Nf3-g1
    let prev = PrevMove {
        from: 6,
        to: 21,
        color: Color::White,
    };
    let with_prev = evaluate_move(&mut pos, back, Difficulty::Hard, Some(prev));
    let without = evaluate_move(&mut pos, back, Difficulty::Hard, None);
    assert_eq!(with_prev, without - 30);
}

#[test]
fn test_hard_adds_positional_terms() {
    // Doubled isolated pawns hurt only at full strength.
    let mut weak =
        parse_fen("4k3/8/8/8/8/3P4/3P4/4K3 w - - 20 20").unwrap();
    let mut sound =
        parse_fen("4k3/8/8/8/8/8/2PP4/4K3 w - - 20 20").unwrap();
    let weak_hard = evaluate(&mut weak, Color::White, Difficulty::Hard);
    let sound_hard = evaluate(&mut sound, Color::White, Difficulty::Hard);
    assert!(sound_hard > weak_hard);
}
