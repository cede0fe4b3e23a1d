//! Leaf counting for move-generator verification.

use crate::board::Position;
use crate::movegen::{legal_move_count, legal_moves, legal_moves_into};
use crate::types::Move;

/// Number of leaf positions reachable in exactly `depth` plies.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    match depth {
        0 => 1,
        1 => legal_move_count(pos) as u64,
        _ => {
            // One reusable move buffer per ply below the root
            let mut layers = vec![Vec::with_capacity(64); depth as usize];
            count(*pos, depth, &mut layers)
        }
    }
}

/// Leaf counts split by root move, for locating generator bugs.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let mut next = *pos;
            next.make_move(mv);
            (mv, perft(&next, depth - 1))
        })
        .collect()
}

fn count(pos: Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
    if depth == 1 {
        return legal_move_count(&pos) as u64;
    }
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 0;
    };
    legal_moves_into(&pos, buf);

    let mut nodes = 0;
    for &mv in buf.iter() {
        let mut next = pos;
        next.make_move(mv);
        nodes += count(next, depth - 1, rest);
    }
    nodes
}
