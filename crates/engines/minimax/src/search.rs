//! Alpha-beta minimax with a quiescence extension.
//!
//! Scores are absolute (positive favours the first player) and each frame
//! is told whether it maximises, rather than negating scores per ply.
//! Once the time control fires, every frame returns straight away without
//! touching the table; the caller must discard whatever score comes back.

use chess_core::TimeControl;

use crate::adapter::{ScopedMove, SearchBoard};
use crate::eval::{Evaluator, MATE_THRESHOLD};
use crate::ordering::MoveOrderer;
use crate::tt::{Replacement, TranspositionTable};

/// Bound beyond every reachable score.
pub const INFINITY: i32 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiescence plies below the horizon
    pub quiescence_depth: u8,
    /// A move that repeats a position this many times scores as a draw
    pub repetition_count: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            quiescence_depth: 10,
            repetition_count: 2,
        }
    }
}

/// Pull a mate score one step towards zero per ply it travels up, so a
/// quicker mate outranks a slower one and a slower loss a quicker one.
#[inline]
pub fn decay_mate(score: i32) -> i32 {
    if score > MATE_THRESHOLD {
        score - 1
    } else if score < -MATE_THRESHOLD {
        score + 1
    } else {
        score
    }
}

/// The child-side alpha matching a parent-side alpha: the largest child
/// score that still decays to at most `alpha`.
#[inline]
fn child_alpha(alpha: i32) -> i32 {
    if alpha >= MATE_THRESHOLD {
        alpha + 1
    } else if alpha < -MATE_THRESHOLD {
        alpha - 1
    } else {
        alpha
    }
}

/// The smallest child score that still decays to at least `beta`.
#[inline]
fn child_beta(beta: i32) -> i32 {
    if beta > MATE_THRESHOLD {
        beta + 1
    } else if beta <= -MATE_THRESHOLD {
        beta - 1
    } else {
        beta
    }
}

pub struct Searcher<B: SearchBoard, E, O> {
    pub(crate) evaluator: E,
    pub(crate) orderer: O,
    table: TranspositionTable<B::Key>,
    settings: SearchSettings,
    time_control: TimeControl,
    nodes: u64,
    max_quiescence_ply: u8,
    stopped: bool,
}

impl<B, E, O> Searcher<B, E, O>
where
    B: SearchBoard,
    E: Evaluator<B>,
    O: MoveOrderer<B>,
{
    pub fn new(evaluator: E, orderer: O, settings: SearchSettings, replacement: Replacement) -> Self {
        Self {
            evaluator,
            orderer,
            table: TranspositionTable::new(replacement),
            settings,
            time_control: TimeControl::default(),
            nodes: 0,
            max_quiescence_ply: 0,
            stopped: false,
        }
    }

    /// Reset counters for a new top-level search, optionally dropping the table.
    pub fn begin(&mut self, time_control: TimeControl, clear_table: bool) {
        if clear_table {
            tracing::trace!(entries = self.table.len(), "clearing transposition table");
            self.table.clear();
        } else {
            self.table.reset_hits();
        }
        self.time_control = time_control;
        self.nodes = 0;
        self.max_quiescence_ply = 0;
        self.stopped = false;
    }

    /// Minimax value of `board` searched `depth` plies deep, with quiescence
    /// at the horizon. `maximizing` is true when the first player is to move.
    pub fn alpha_beta(&mut self, board: &mut B, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        if self.enter_node() {
            return 0;
        }
        if board.is_game_over() {
            return self.evaluator.evaluate(board);
        }

        let key = board.key();
        if let Some(score) = self.table.get(&key, depth) {
            return score;
        }

        if depth == 0 {
            let score = self.quiescence(board, alpha, beta, maximizing, 0);
            if !self.stopped {
                self.table.put(key, 0, score);
            }
            return score;
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return self.evaluator.evaluate(board);
        }
        let ordered = self.orderer.order(board, &moves, None);

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in ordered {
            let score = self.child_score(board, mv, depth - 1, alpha, beta, !maximizing);
            if self.stopped {
                return 0;
            }
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        self.table.put(key, depth, best);
        best
    }

    /// Score of playing `mv`: zero if it repeats an earlier position,
    /// otherwise the child's search value with mate scores decayed.
    /// The window is widened by the decay so cutoffs in the child agree
    /// with the decayed comparison made here.
    pub(crate) fn child_score(
        &mut self,
        board: &mut B,
        mv: B::Move,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        let mut child = ScopedMove::new(board, mv);
        if child.is_repetition(self.settings.repetition_count) {
            return 0;
        }
        decay_mate(self.alpha_beta(&mut *child, depth, child_alpha(alpha), child_beta(beta), maximizing))
    }

    /// Captures and promotions only, until the position is quiet or the
    /// ply limit is reached. The side to move may always stand pat.
    pub fn quiescence(&mut self, board: &mut B, mut alpha: i32, mut beta: i32, maximizing: bool, ply: u8) -> i32 {
        if self.enter_node() {
            return 0;
        }
        self.max_quiescence_ply = self.max_quiescence_ply.max(ply);

        let stand_pat = self.evaluator.evaluate(board);
        if ply >= self.settings.quiescence_depth || board.is_game_over() {
            return stand_pat;
        }

        let noisy: Vec<B::Move> = board
            .legal_moves()
            .into_iter()
            .filter(|&mv| board.is_noisy(mv))
            .collect();
        if noisy.is_empty() {
            return stand_pat;
        }

        if maximizing {
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return alpha;
            }
            beta = beta.min(stand_pat);
        }

        let ordered = self.orderer.order(board, &noisy, None);
        let mut best = stand_pat;
        for mv in ordered {
            let score = {
                let mut child = ScopedMove::new(board, mv);
                self.quiescence(&mut *child, alpha, beta, !maximizing, ply + 1)
            };
            if self.stopped {
                return 0;
            }
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Count the node and poll the clock. True once the search must unwind.
    #[inline]
    fn enter_node(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        self.nodes += 1;
        if self.time_control.poll(self.nodes) {
            self.stopped = true;
        }
        self.stopped
    }

    /// Nodes entered since the last `begin`, quiescence included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Table answers used since the last `begin`.
    pub fn table_hits(&self) -> u64 {
        self.table.hits()
    }

    /// Deepest quiescence ply reached below the horizon.
    pub fn max_quiescence_ply(&self) -> u8 {
        self.max_quiescence_ply
    }

    /// True once the time control fired; later scores are meaningless.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn table(&self) -> &TranspositionTable<B::Key> {
        &self.table
    }

    /// Direct table access, e.g. to clear it for a new game.
    pub fn table_mut(&mut self) -> &mut TranspositionTable<B::Key> {
        &mut self.table
    }

    /// Takes effect from the next node searched.
    pub fn set_settings(&mut self, settings: SearchSettings) {
        self.settings = settings;
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
