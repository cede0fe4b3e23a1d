//! Pre-computed attack tables.
//!
//! Leaper attacks (knight, king, pawn) are fixed per square. Slider attacks
//! walk pre-computed rays and cut them at the first blocker.

use crate::bitboard::Bitboard;
use crate::types::Color;

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        attacks[sq as usize] = Bitboard(bits);
        sq += 1;
    }
    attacks
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
]);

pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
]);

/// Squares a white pawn on the index square attacks.
pub static WHITE_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[(-1, 1), (1, 1)]);

/// Squares a black pawn on the index square attacks.
pub static BLACK_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[(-1, -1), (1, -1)]);

/// Ray directions as (file, rank) steps.
/// Indices 0..4 grow the square index (N, NE, E, NW), 4..8 shrink it (S, SW, W, SE).
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (-1, 1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (1, -1),
];

const DIAGONAL_DIRS: [usize; 4] = [1, 3, 5, 7];
const ORTHOGONAL_DIRS: [usize; 4] = [0, 2, 4, 6];

/// RAYS[direction][square]: every square in that direction, excluding the origin.
pub static RAYS: [[Bitboard; 64]; 8] = {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0u8;
        while sq < 64 {
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
                f += df;
                r += dr;
            }
            rays[dir][sq as usize] = Bitboard(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
};

/// Get pawn attacks for a given color and square.
#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[sq as usize],
        Color::Black => BLACK_PAWN_ATTACKS[sq as usize],
    }
}

/// Get knight attacks for a given square.
#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Get king attacks for a given square.
#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

#[inline]
fn ray_attacks(sq: u8, occupied: Bitboard, dirs: [usize; 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for dir in dirs {
        let ray = RAYS[dir][sq as usize];
        let blockers = ray & occupied;
        // The nearest blocker is the lowest bit on growing rays, the highest on shrinking ones.
        let nearest = if dir < 4 { blockers.lsb() } else { blockers.msb() };
        attacks |= match nearest {
            Some(b) => ray & !RAYS[dir][b as usize],
            None => ray,
        };
    }
    attacks
}

/// Calculate bishop attacks given a square and occupied squares.
#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, DIAGONAL_DIRS)
}

/// Calculate rook attacks given a square and occupied squares.
#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, ORTHOGONAL_DIRS)
}

/// Calculate queen attacks (union of bishop and rook attacks).
#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
