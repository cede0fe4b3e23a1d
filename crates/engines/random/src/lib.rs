//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. The baseline
//! any real engine should easily beat, and a cheap opponent for stress
//! testing move generation.

use chess_core::{Board, Engine, SearchLimits, SearchResult, SearchStats};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};


/// A chess engine that plays random legal moves.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine {
    /// Seeded generator; None draws from the thread-local one
    rng: Option<StdRng>,
    stats: SearchStats,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible choices: the same seed picks the same moves.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::default()
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &mut Board, _limits: SearchLimits) -> SearchResult {
        let moves = board.legal_moves();
        let best_move = match self.rng.as_mut() {
            Some(rng) => moves.choose(rng).copied(),
            None => moves.choose(&mut thread_rng()).copied(),
        };

        self.stats = SearchStats {
            name: self.name().to_string(),
            nodes_searched: 1,
            depth_completed: 1,
            ..SearchStats::default()
        };

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn stats(&self) -> SearchStats {
        self.stats.clone()
    }

    fn new_game(&mut self) {
        self.stats = SearchStats::default();
    }
}
