//! Draw detection at the position level: fifty-move rule, insufficient
//! material, and the hashing that backs threefold repetition.

use chess_kernel::{Color, Position, legal_moves, parse_fen};

#[test]
fn stalemate_has_no_moves_and_no_check() {
    let pos = parse_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(legal_moves(&pos).is_empty());
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn fifty_move_rule_boundary() {
    let at_limit = parse_fen("8/8/8/4k3/8/4K3/8/8 w - - 100 60").unwrap();
    assert!(at_limit.is_fifty_move_draw());

    let one_short = parse_fen("8/8/8/4k3/8/4K3/8/8 w - - 99 60").unwrap();
    assert!(!one_short.is_fifty_move_draw());
}

#[test]
fn insufficient_material_cases() {
    for fen in [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",      // bare kings
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",     // lone bishop
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",    // lone knight
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",  // same-shade bishops
    ] {
        let pos = parse_fen(fen).unwrap();
        assert!(pos.is_insufficient_material(), "{fen} cannot be won");
    }

    for fen in [
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",    // a pawn can promote
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",    // rook mates
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",  // opposite-shade bishops
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",   // two knights
    ] {
        let pos = parse_fen(fen).unwrap();
        assert!(!pos.is_insufficient_material(), "{fen} is still a game");
    }
}

#[test]
fn hash_tracks_repetition_relevant_state() {
    assert_eq!(
        Position::startpos().position_hash(),
        parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap()
            .position_hash()
    );

    let base = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -";
    let a = parse_fen(&format!("{base} 2 3")).unwrap();
    let b = parse_fen(&format!("{base} 6 5")).unwrap();
    // Clocks differ, the board does not: repetition only cares about the
    // board, side, castling, and en passant.
    assert_eq!(a.position_hash(), b.position_hash());

    let white = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let black = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_ne!(white.position_hash(), black.position_hash());

    let rights = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
    assert_ne!(white.position_hash(), rights.position_hash());

    let ep = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let no_ep = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_ne!(ep.position_hash(), no_ep.position_hash());
}
