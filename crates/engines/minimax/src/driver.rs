//! Iterative deepening over the root moves.

use tracing::debug;

use crate::adapter::SearchBoard;
use crate::eval::Evaluator;
use crate::ordering::MoveOrderer;
use crate::search::{Searcher, INFINITY};

/// What one top-level search settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOutcome<M> {
    /// None only when there is no legal move
    pub best_move: Option<M>,
    /// Score of `best_move` at `depth_completed`; 0 if no iteration completed
    pub score: i32,
    pub depth_completed: u8,
    /// The time control ended the search before `max_depth`
    pub stopped: bool,
}

impl<B, E, O> Searcher<B, E, O>
where
    B: SearchBoard,
    B::Move: std::fmt::Display,
    E: Evaluator<B>,
    O: MoveOrderer<B>,
{
    /// Search depths 1 through `max_depth`, each seeded with the previous
    /// iteration's best move. Only completed iterations update the answer.
    pub fn iterative_deepening(&mut self, board: &mut B, max_depth: u8) -> DriverOutcome<B::Move> {
        let root_moves = board.legal_moves();
        if root_moves.is_empty() {
            return DriverOutcome {
                best_move: None,
                score: 0,
                depth_completed: 0,
                stopped: false,
            };
        }

        let maximizing = board.first_player_to_move();
        let mut best: Option<(B::Move, i32)> = None;
        let mut depth_completed = 0;

        for depth in 1..=max_depth.max(1) {
            let hint = best.map(|(mv, _)| mv);
            let ordered = self.orderer.order(board, &root_moves, hint);
            match self.search_root(board, &ordered, depth, maximizing) {
                Some(found) => {
                    best = Some(found);
                    depth_completed = depth;
                    debug!(
                        depth,
                        score = found.1,
                        nodes = self.nodes(),
                        best = %found.0,
                        "iteration complete"
                    );
                }
                None => {
                    debug!(depth, nodes = self.nodes(), "iteration abandoned");
                    break;
                }
            }
        }

        let (best_move, score) = match best {
            Some((mv, score)) => (mv, score),
            // Not even depth 1 finished: any legal move beats none
            None => (self.orderer.order(board, &root_moves, None)[0], 0),
        };
        DriverOutcome {
            best_move: Some(best_move),
            score,
            depth_completed,
            stopped: self.is_stopped(),
        }
    }

    /// One full-width iteration. None if the time control interrupted it.
    fn search_root(
        &mut self,
        board: &mut B,
        ordered: &[B::Move],
        depth: u8,
        maximizing: bool,
    ) -> Option<(B::Move, i32)> {
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(B::Move, i32)> = None;

        for &mv in ordered {
            let score = self.child_score(board, mv, depth - 1, alpha, beta, !maximizing);
            if self.is_stopped() {
                return None;
            }
            let improves = match best {
                None => true,
                Some((_, s)) if maximizing => score > s,
                Some((_, s)) => score < s,
            };
            if improves {
                best = Some((mv, score));
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
