//! Canonical position identity.
//!
//! `PositionKey` encodes everything that decides which moves are available
//! and how they play out: placement, side to move, castling rights and a
//! capturable en-passant square. Move counters are left out, so the same
//! position reached by different move orders gets the same key.
//!
//! Equality compares the full packed encoding. Hashing only feeds a Zobrist
//! value, computed from the same fields, so a `HashMap` stays cheap without
//! trusting a 64-bit hash to tell positions apart.

use std::hash::{Hash, Hasher};

use crate::attacks::pawn_attacks;
use crate::board::Position;
use crate::types::{Color, Move, PieceKind, file_of};

struct ZobristTable {
    /// Indexed by [color * 6 + kind][square]
    pieces: [[u64; 64]; 12],
    black_to_move: u64,
    /// [wk, wq, bk, bq]
    castling: [u64; 4],
    ep_file: [u64; 8],
}

/// splitmix64 step: returns (next state, output).
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    (state, z ^ (z >> 31))
}

static ZOBRIST: ZobristTable = {
    let mut state = 0x5EED_C0DE_1234_ABCDu64;
    let mut pieces = [[0u64; 64]; 12];
    let mut p = 0;
    while p < 12 {
        let mut s = 0;
        while s < 64 {
            let (next, out) = splitmix64(state);
            state = next;
            pieces[p][s] = out;
            s += 1;
        }
        p += 1;
    }

    let (next, black_to_move) = splitmix64(state);
    state = next;

    let mut castling = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        let (next, out) = splitmix64(state);
        state = next;
        castling[i] = out;
        i += 1;
    }

    let mut ep_file = [0u64; 8];
    let mut i = 0;
    while i < 8 {
        let (next, out) = splitmix64(state);
        state = next;
        ep_file[i] = out;
        i += 1;
    }

    ZobristTable {
        pieces,
        black_to_move,
        castling,
        ep_file,
    }
};

/// Collision-free identity of a position for search and repetition purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionKey {
    hash: u64,
    /// One nibble per square: 0 = empty, 1..=12 = color * 6 + kind + 1
    placement: [u64; 4],
    /// bit 0: black to move, bits 1-4: castling, bits 5-8: en-passant file + 1
    state: u16,
}

impl Hash for PositionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Position {
    /// The en-passant square, but only when the side to move has a legal
    /// capture onto it. A double push nobody can answer, or only answer with
    /// a pinned pawn, does not change the position.
    pub fn capturable_en_passant(&self) -> Option<u8> {
        let ep = self.en_passant?;
        let us = self.side_to_move;
        let mut capturers = pawn_attacks(ep, us.other()) & self.pieces(us, PieceKind::Pawn);
        capturers
            .any(|from| {
                let mut mv = Move::new(from, ep);
                mv.is_en_passant = true;
                let mut next = *self;
                next.make_move(mv);
                !next.in_check(us)
            })
            .then_some(ep)
    }

    pub fn canonical_key(&self) -> PositionKey {
        let mut hash = 0u64;
        let mut placement = [0u64; 4];

        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let code = color.idx() * 6 + kind.idx();
                for s in self.pieces(color, kind) {
                    hash ^= ZOBRIST.pieces[code][s as usize];
                    placement[s as usize / 16] |= ((code as u64) + 1) << ((s % 16) * 4);
                }
            }
        }

        let mut state = 0u16;
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move;
            state |= 1;
        }
        for (i, on) in self.castling.flags().into_iter().enumerate() {
            if on {
                hash ^= ZOBRIST.castling[i];
                state |= 1 << (1 + i);
            }
        }
        if let Some(ep) = self.capturable_en_passant() {
            let file = file_of(ep) as usize;
            hash ^= ZOBRIST.ep_file[file];
            state |= ((file as u16) + 1) << 5;
        }

        PositionKey {
            hash,
            placement,
            state,
        }
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod key_tests;
