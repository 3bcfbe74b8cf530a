//! Known-good perft counts for the move generator, run in parallel.

use rayon::prelude::*;

use chess_kernel::{parse_fen, perft};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const MIXED: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const PROMOTIONS: &str = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";

#[test]
fn perft_reference_positions() {
    let cases: Vec<(&str, u8, u64)> = vec![
        (STARTPOS, 1, 20),
        (STARTPOS, 2, 400),
        (STARTPOS, 3, 8_902),
        (STARTPOS, 4, 197_281),
        (KIWIPETE, 1, 48),
        (KIWIPETE, 2, 2_039),
        (KIWIPETE, 3, 97_862),
        (ENDGAME, 1, 14),
        (ENDGAME, 2, 191),
        (ENDGAME, 3, 2_812),
        (ENDGAME, 4, 43_238),
        (MIXED, 1, 6),
        (MIXED, 2, 264),
        (MIXED, 3, 9_467),
        (PROMOTIONS, 1, 24),
        (PROMOTIONS, 2, 496),
        (PROMOTIONS, 3, 9_483),
    ];

    cases.par_iter().for_each(|&(fen, depth, expected)| {
        let mut pos = parse_fen(fen).expect("reference FEN parses");
        let got = perft(&mut pos, depth);
        assert_eq!(
            got, expected,
            "perft mismatch for '{fen}' at depth {depth}"
        );
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let mut pos = parse_fen(STARTPOS).unwrap();
    assert_eq!(perft(&mut pos, 0), 1);
}
