//! Move ordering. Only affects how much gets pruned, never the result.

use chess_core::{Bitboard, Board, Move, PieceKind};

use crate::adapter::SearchBoard;
use crate::eval::piece_value;

const HINT_BONUS: i32 = 100_000;
const MATE_BONUS: i32 = 10_000;
const CAPTURE_BONUS: i32 = 1_000;
const PROMOTION_BONUS: i32 = 900;
const CHECK_BONUS: i32 = 100;
const CENTER_BONUS: i32 = 30;

pub trait MoveOrderer<B: SearchBoard + ?Sized> {
    /// `moves` reordered best-first. `hint` is the previous iteration's best move.
    fn order(&self, board: &B, moves: &[B::Move], hint: Option<B::Move>) -> Vec<B::Move>;
}

/// Input order, except that the hint goes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrder;

impl<B: SearchBoard + ?Sized> MoveOrderer<B> for InputOrder {
    fn order(&self, _board: &B, moves: &[B::Move], hint: Option<B::Move>) -> Vec<B::Move> {
        let mut out = moves.to_vec();
        if let Some(pos) = hint.and_then(|h| out.iter().position(|&m| m == h)) {
            let mv = out.remove(pos);
            out.insert(0, mv);
        }
        out
    }
}

/// Hint first, then mates, captures by MVV-LVA, promotions, checks and
/// central moves. Equal scores keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOrderer;

impl HeuristicOrderer {
    pub fn score(&self, board: &Board, mv: Move, hint: Option<Move>) -> i32 {
        let mut score = 0;
        if hint == Some(mv) {
            score += HINT_BONUS;
        }

        let victim = if mv.is_en_passant {
            Some(PieceKind::Pawn)
        } else {
            board.piece_at(mv.to).map(|p| p.kind)
        };
        if let (Some(victim), Some(attacker)) = (victim, board.piece_at(mv.from)) {
            score += CAPTURE_BONUS + piece_value(victim) - piece_value(attacker.kind) / 10;
        }

        if mv.promo.is_some() {
            score += PROMOTION_BONUS;
        }

        let mut next = *board.position();
        next.make_move(mv);
        if next.is_checkmate() {
            score += MATE_BONUS;
        } else if next.in_check(next.side_to_move) {
            score += CHECK_BONUS;
        }

        if Bitboard::CENTER.contains(mv.to) {
            score += CENTER_BONUS;
        }
        score
    }
}

impl MoveOrderer<Board> for HeuristicOrderer {
    fn order(&self, board: &Board, moves: &[Move], hint: Option<Move>) -> Vec<Move> {
        let mut scored: Vec<(i32, Move)> = moves
            .iter()
            .map(|&mv| (self.score(board, mv, hint), mv))
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
