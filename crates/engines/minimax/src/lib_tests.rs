use super::*;
use chess_kernel::{SearchContext, SearchLimits, legal_moves, parse_fen};

fn ctx(depth: u8) -> SearchContext {
    SearchContext::new(SearchLimits::depth(depth))
}

#[test]
fn test_finds_back_rank_mate() {
    let mut engine = MinimaxEngine::new();
    let mut pos = parse_fen("6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1").unwrap();
    let result = engine.choose_move(&mut pos, &ctx(3));
    let mv = result.best_move.unwrap();
    assert_eq!((mv.from, mv.to), (4, 60), "Re1-e8 mates");
    assert!(result.score >= MATE_SCORE);
}

#[test]
fn test_takes_the_hanging_queen() {
    let mut engine = MinimaxEngine::new();
    let mut pos = parse_fen("4k3/8/3q4/8/4N3/8/8/4K3 w - - 10 12").unwrap();
    let result = engine.choose_move(&mut pos, &ctx(3));
    let mv = result.best_move.unwrap();
    assert!(mv.is_capture(), "expected Nxd6, got {mv:?}");
    assert_eq!(mv.to, 43);
}

#[test]
fn test_no_moves_when_mated() {
    let mut engine = MinimaxEngine::new();
    let mut pos =
        parse_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    let result = engine.choose_move(&mut pos, &ctx(3));
    assert!(result.best_move.is_none());
}

#[test]
fn test_position_restored_after_search() {
    let mut engine = MinimaxEngine::new();
    let mut pos = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let before = pos.position_hash();
    engine.choose_move(&mut pos, &ctx(3));
    assert_eq!(pos.position_hash(), before);
}

#[test]
fn test_moves_are_legal() {
    let mut engine = MinimaxEngine::new();
    let mut pos = Position::startpos();
    let result = engine.choose_move(&mut pos, &ctx(2));
    assert!(legal_moves(&pos).contains(&result.best_move.unwrap()));
}

#[test]
fn test_escapes_check() {
    // Only legal responses deal with the check; the engine must pick one.
    let mut engine = MinimaxEngine::new();
    let mut pos =
        parse_fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2").unwrap();
    let result = engine.choose_move(&mut pos, &ctx(2));
    let mv = result.best_move.unwrap();
    let undo = pos.make_move(mv);
    assert!(!pos.in_check(chess_kernel::Color::Black));
    pos.unmake_move(mv, undo);
}

/// Plain minimax without pruning, same terminal rules as the engine.
fn unpruned(pos: &mut Position, depth: u8, root: Color, ctx: &SearchContext) -> i32 {
    if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
        return 0;
    }
    let hash = pos.position_hash();
    if ctx.history.iter().filter(|&&h| h == hash).count() >= 2 {
        return 0;
    }
    if depth == 0 {
        return evaluate(pos, root, Difficulty::Medium);
    }
    let mut moves = Vec::new();
    legal_moves_into(pos, &mut moves);
    if moves.is_empty() {
        let side = pos.side_to_move;
        if !pos.in_check(side) {
            return 0;
        }
        return if side == root {
            -(MATE_SCORE + depth as i32)
        } else {
            MATE_SCORE + depth as i32
        };
    }

    let maximizing = pos.side_to_move == root;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let undo = pos.make_move(mv);
        let score = unpruned(pos, depth - 1, root, ctx);
        pos.unmake_move(mv, undo);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

#[test]
fn test_pruning_preserves_the_score() {
    // Alpha-beta is an optimization, not a behavior change: the root score
    // must match exhaustive minimax at the same depth.
    for fen in [
        "4k3/8/3q4/8/4N3/8/8/4K3 w - - 10 12",
        "6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
    ] {
        let context = ctx(3);
        let mut pos = parse_fen(fen).unwrap();
        let root = pos.side_to_move;
        let reference = unpruned(&mut pos, 3, root, &context);

        let mut engine = MinimaxEngine::new();
        let result = engine.choose_move(&mut pos, &ctx(3));
        assert_eq!(result.score, reference, "score diverged for {fen}");
    }
}
