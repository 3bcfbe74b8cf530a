//! Perft node counting, the move generator's ground truth.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Count the leaf positions reachable in exactly `depth` plies. One move
/// buffer is allocated per ply up front so the recursion itself does not
/// allocate.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let (buf, rest) = layers
            .split_first_mut()
            .expect("one buffer per remaining ply");
        legal_moves_into(pos, buf);

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.unmake_move(mv, undo);
        }
        nodes
    }

    if depth == 0 {
        return 1;
    }
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}
