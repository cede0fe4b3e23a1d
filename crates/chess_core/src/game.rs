//! `Board`: a position plus the stack of moves that produced it.
//!
//! This is the adapter the search drives. Moves are applied and taken back
//! in strict stack order; each stack entry remembers the key of the position
//! it left so repetition queries need no replay.

use std::ops::Deref;

use crate::board::{Position, Undo};
use crate::error::FenError;
use crate::key::PositionKey;
use crate::movegen::{legal_moves, legal_moves_into};
use crate::types::{Color, Move};

#[derive(Clone, Copy, Debug)]
struct Ply {
    mv: Move,
    undo: Undo,
    /// Key of the position before `mv` was played
    key: PositionKey,
}

#[derive(Clone, Debug)]
pub struct Board {
    pos: Position,
    plies: Vec<Ply>,
}

impl Board {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            plies: Vec::with_capacity(128),
        }
    }

    pub fn startpos() -> Self {
        Self::new(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::new)
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.pos)
    }

    pub fn legal_moves_into(&self, out: &mut Vec<Move>) {
        legal_moves_into(&self.pos, out);
    }

    /// Play a legal move. Must be paired with a later `undo`.
    pub fn apply(&mut self, mv: Move) {
        let key = self.pos.canonical_key();
        let undo = self.pos.make_move(mv);
        self.plies.push(Ply { mv, undo, key });
    }

    /// Take back the most recent move and return it.
    ///
    /// # Panics
    /// If no move has been applied; an unmatched undo is a caller bug.
    pub fn undo(&mut self) -> Move {
        let ply = self
            .plies
            .pop()
            .expect("Board::undo called with no applied move to take back");
        self.pos.unmake_move(ply.mv, ply.undo);
        ply.mv
    }

    /// Moves applied since this board was created, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.plies.iter().map(|p| p.mv)
    }

    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.plies.last().map(|p| p.mv)
    }

    pub fn canonical_key(&self) -> PositionKey {
        self.pos.canonical_key()
    }

    pub fn is_in_check(&self) -> bool {
        self.pos.in_check(self.pos.side_to_move)
    }

    /// True if the current position has occurred at least `count` times,
    /// counting this occurrence. Only positions since the last capture or
    /// pawn move can match, so the scan stops at the halfmove clock.
    pub fn is_repetition(&self, count: usize) -> bool {
        if count <= 1 {
            return true;
        }
        let current = self.pos.canonical_key();
        let window = (self.pos.halfmove_clock as usize).min(self.plies.len());
        let mut seen = 1;
        // Positions with the same side to move sit two plies apart.
        for ply in self.plies.iter().rev().take(window).skip(1).step_by(2) {
            if ply.key == current {
                seen += 1;
                if seen >= count {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.is_repetition(5)
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.pos.is_seventyfive_move_draw()
    }

    /// Checkmate, stalemate, dead position, or one of the automatic draws
    /// (75-move rule, fivefold repetition).
    pub fn is_game_over(&self) -> bool {
        self.pos.is_insufficient_material()
            || self.is_seventyfive_moves()
            || self.is_fivefold_repetition()
            || !crate::movegen::has_legal_move(&self.pos)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Position> for Board {
    fn from(pos: Position) -> Self {
        Self::new(pos)
    }
}

/// Read-only access to every `Position` query.
impl Deref for Board {
    type Target = Position;

    fn deref(&self) -> &Position {
        &self.pos
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
