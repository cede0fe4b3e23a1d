//! The slice of the board the search consumes.
//!
//! `SearchBoard` keeps the recursion independent of chess: the engine runs
//! it over `chess_core::Board`, and tests run it over hand-built trees whose
//! minimax value is known.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use chess_core::{Board, Color, Move, PositionKey};

pub trait SearchBoard {
    type Move: Copy + Eq + Debug;
    type Key: Copy + Eq + Hash;

    /// True when the side to move is the first player (White).
    fn first_player_to_move(&self) -> bool;

    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play a move; every call is paired with a later `undo`.
    fn apply(&mut self, mv: Self::Move);

    fn undo(&mut self);

    fn is_game_over(&self) -> bool;

    /// The current position has occurred `count` times, this one included.
    fn is_repetition(&self, count: usize) -> bool;

    fn key(&self) -> Self::Key;

    /// Captures and promotions: the moves quiescence keeps searching.
    fn is_noisy(&self, mv: Self::Move) -> bool;
}

impl SearchBoard for Board {
    type Move = Move;
    type Key = PositionKey;

    fn first_player_to_move(&self) -> bool {
        self.side_to_move() == Color::White
    }

    fn legal_moves(&self) -> Vec<Move> {
        Board::legal_moves(self)
    }

    fn apply(&mut self, mv: Move) {
        Board::apply(self, mv);
    }

    fn undo(&mut self) {
        Board::undo(self);
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn is_repetition(&self, count: usize) -> bool {
        Board::is_repetition(self, count)
    }

    fn key(&self) -> PositionKey {
        self.canonical_key()
    }

    fn is_noisy(&self, mv: Move) -> bool {
        mv.promo.is_some() || mv.is_en_passant || self.piece_at(mv.to).is_some()
    }
}

/// A move applied for the lifetime of the guard and undone when it drops,
/// whichever way the enclosing frame is left.
pub struct ScopedMove<'a, B: SearchBoard> {
    board: &'a mut B,
}

impl<'a, B: SearchBoard> ScopedMove<'a, B> {
    pub fn new(board: &'a mut B, mv: B::Move) -> Self {
        board.apply(mv);
        Self { board }
    }
}

impl<B: SearchBoard> Deref for ScopedMove<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: SearchBoard> DerefMut for ScopedMove<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: SearchBoard> Drop for ScopedMove<'_, B> {
    fn drop(&mut self) {
        self.board.undo();
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod adapter_tests;
