use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::*;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    out.retain(|&mv| is_legal(pos, mv));
}

/// True as soon as one legal move is found.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(pos, &mut pseudo);
    pseudo.into_iter().any(|mv| is_legal(pos, mv))
}

/// Number of legal moves for the side to move.
pub fn legal_move_count(pos: &Position) -> usize {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(pos, &mut pseudo);
    pseudo.into_iter().filter(|&mv| is_legal(pos, mv)).count()
}

/// A pseudo-legal move is legal if it does not leave the mover's king attacked.
fn is_legal(pos: &Position, mv: Move) -> bool {
    let mover = pos.side_to_move;
    let mut next = *pos;
    next.make_move(mv);
    !next.in_check(mover)
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    let own = pos.color_occupancy(us);
    let occ = pos.occupied();

    for from in pos.pieces(us, PieceKind::Pawn) {
        gen_pawn(pos, from, us, out);
    }
    for from in pos.pieces(us, PieceKind::Knight) {
        push_targets(from, knight_attacks(from) & !own, out);
    }
    for from in pos.pieces(us, PieceKind::Bishop) {
        push_targets(from, bishop_attacks(from, occ) & !own, out);
    }
    for from in pos.pieces(us, PieceKind::Rook) {
        push_targets(from, rook_attacks(from, occ) & !own, out);
    }
    for from in pos.pieces(us, PieceKind::Queen) {
        push_targets(from, queen_attacks(from, occ) & !own, out);
    }
    for from in pos.pieces(us, PieceKind::King) {
        push_targets(from, king_attacks(from) & !own, out);
        gen_castle(pos, from, us, out);
    }
}

fn push_targets(from: u8, targets: Bitboard, out: &mut Vec<Move>) {
    out.extend(targets.map(|to| Move::new(from, to)));
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTION_KINDS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    // Pushes
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    // Captures and en-passant
    let enemies = pos.color_occupancy(c.other());
    for to in pawn_attacks(from, c) {
        if enemies.contains(to) {
            push_pawn_move(from, to, promo_rank, out);
        } else if pos.en_passant == Some(to) {
            let mut mv = Move::new(from, to);
            mv.is_en_passant = true;
            out.push(mv);
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    // (king home, king-side right, queen-side right)
    let (home, king_side, queen_side) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let empty = |s: u8| pos.piece_at(s).is_none();
    let safe = |s: u8| !pos.is_square_attacked(s, enemy);
    let rook_on = |s: u8| pos.piece_at(s) == Some(Piece::new(c, PieceKind::Rook));

    // King side: f and g files empty and not attacked
    if king_side
        && rook_on(home + 3)
        && empty(home + 1)
        && empty(home + 2)
        && safe(home + 1)
        && safe(home + 2)
    {
        let mut mv = Move::new(home, home + 2);
        mv.is_castle = true;
        out.push(mv);
    }
    // Queen side: b, c, d files empty; c and d not attacked
    if queen_side
        && rook_on(home - 4)
        && empty(home - 1)
        && empty(home - 2)
        && empty(home - 3)
        && safe(home - 1)
        && safe(home - 2)
    {
        let mut mv = Move::new(home, home - 2);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
