pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod game;
pub mod key;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use error::{FenError, UciError};
pub use game::Board;
pub use key::PositionKey;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;

use serde::Serialize;

// =============================================================================
// Engine trait: implemented by every move-selecting agent
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// None if the side to move has no legal move
    pub best_move: Option<Move>,
    /// Centipawns, positive favours White
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    pub nodes: u64,
    /// Whether the time control cut the search short
    pub stopped: bool,
}

/// Diagnostics for the most recent move selection. Reset on every search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub name: String,
    pub nodes_searched: u64,
    pub depth_completed: u8,
    pub table_hits: u64,
    /// Deepest quiescence ply reached below the horizon
    pub max_quiescence_ply: u8,
}

/// Trait that all chess engines must implement.
///
/// The board is borrowed mutably so an engine can walk the tree with
/// apply/undo; it is handed back exactly as it came in.
pub trait Engine: Send {
    fn search(&mut self, board: &mut Board, limits: SearchLimits) -> SearchResult;

    /// Limits used by `select_move` (configured depth and time budget).
    fn default_limits(&self) -> SearchLimits {
        SearchLimits::default()
    }

    /// Pick a move with the engine's own limits. None if there is no legal move.
    fn select_move(&mut self, board: &mut Board) -> Option<Move> {
        let limits = self.default_limits();
        self.search(board, limits).best_move
    }

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-chess"
    }

    fn stats(&self) -> SearchStats;

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}

    /// Set a UCI option. Returns true if the option was recognized and applied.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
