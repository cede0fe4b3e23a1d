//! Minimax Chess Engine
//!
//! Alpha-beta minimax over absolute scores, a quiescence extension for
//! captures and promotions, a transposition table and iterative deepening
//! under a cooperative time control. The search itself is generic over
//! `SearchBoard`, so it runs on anything that can apply and undo moves.

pub mod adapter;
pub mod config;
pub mod driver;
pub mod eval;
pub mod ordering;
pub mod pst;
pub mod search;
pub mod tt;

#[cfg(test)]
mod test_tree;

use chess_core::{Board, Engine, SearchLimits, SearchResult, SearchStats};
use tracing::warn;

pub use adapter::{ScopedMove, SearchBoard};
pub use config::{ConfigError, EngineConfig};
pub use driver::DriverOutcome;
pub use eval::{evaluate_position, ClassicalEvaluator, Evaluator, MaterialEvaluator, MATE_SCORE};
pub use ordering::{HeuristicOrderer, InputOrder, MoveOrderer};
pub use search::{SearchSettings, Searcher};
pub use tt::{Replacement, TranspositionTable};

/// Chess engine driving the generic searcher over a `Board`.
pub struct MinimaxEngine<E = ClassicalEvaluator> {
    config: EngineConfig,
    searcher: Searcher<Board, E, HeuristicOrderer>,
    stats: SearchStats,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_evaluator(config, ClassicalEvaluator)
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator<Board>> MinimaxEngine<E> {
    /// Any evaluator over `Board`, e.g. `MaterialEvaluator` or a learned model.
    pub fn with_evaluator(config: EngineConfig, evaluator: E) -> Self {
        let searcher = Searcher::new(
            evaluator,
            HeuristicOrderer,
            config.search_settings(),
            config.replacement(),
        );
        let stats = SearchStats {
            name: config.name.clone(),
            ..SearchStats::default()
        };
        Self {
            config,
            searcher,
            stats,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable<chess_core::PositionKey> {
        self.searcher.table()
    }

    /// Like `Engine::set_option`, but reports why an option was refused.
    pub fn try_set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set_option(name, value)?;
        self.searcher.set_settings(self.config.search_settings());
        self.searcher.table_mut().set_replacement(self.config.replacement());
        Ok(())
    }
}

impl<E: Evaluator<Board> + Send> Engine for MinimaxEngine<E> {
    fn search(&mut self, board: &mut Board, limits: SearchLimits) -> SearchResult {
        limits.start();
        self.searcher
            .begin(limits.time_control.clone(), !self.config.persistent_table);

        let outcome = self.searcher.iterative_deepening(board, limits.depth);

        self.stats = SearchStats {
            name: self.config.name.clone(),
            nodes_searched: self.searcher.nodes(),
            depth_completed: outcome.depth_completed,
            table_hits: self.searcher.table_hits(),
            max_quiescence_ply: self.searcher.max_quiescence_ply(),
        };

        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.depth_completed,
            nodes: self.searcher.nodes(),
            stopped: outcome.stopped,
        }
    }

    fn default_limits(&self) -> SearchLimits {
        self.config.limits()
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn stats(&self) -> SearchStats {
        self.stats.clone()
    }

    fn new_game(&mut self) {
        self.searcher.table_mut().clear();
        self.stats = SearchStats {
            name: self.config.name.clone(),
            ..SearchStats::default()
        };
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match self.try_set_option(name, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "option rejected");
                false
            }
        }
    }
}
