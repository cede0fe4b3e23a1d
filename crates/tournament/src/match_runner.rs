//! Match runner for playing games between engines

use std::time::Duration;

use chess_core::{Board, Color, Engine, SearchLimits};
use serde::Serialize;
use tracing::{debug, info};

use crate::results::{GameOutcome, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies after which an unfinished game is scored a draw
    pub max_plies: u32,
    /// Whether the first engine switches colour every game
    pub alternate_colors: bool,
    /// Colour of the first engine in the first game
    pub engine_color: Color,
    /// Search depth for both engines (None = each engine's own limits)
    pub depth: Option<u8>,
    /// Maximum time per move (None = no limit)
    pub time_per_move: Option<Duration>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 200,
            alternate_colors: true,
            engine_color: Color::White,
            depth: None,
            time_per_move: None,
        }
    }
}

impl MatchConfig {
    /// Fresh limits for one move; each call gets its own clock.
    fn search_limits(&self, engine: &dyn Engine) -> SearchLimits {
        match (self.depth, self.time_per_move) {
            (None, None) => engine.default_limits(),
            (depth, Some(time)) => SearchLimits::depth_and_time(depth.unwrap_or(u8::MAX), time),
            (Some(depth), None) => SearchLimits::depth(depth),
        }
    }

    /// Colour the first engine plays in game `game` (zero-based).
    pub fn color_for_game(&self, game: u32) -> Color {
        if self.alternate_colors && game % 2 == 1 {
            self.engine_color.other()
        } else {
            self.engine_color
        }
    }
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
    /// The ply cap was reached
    MoveLimit,
    /// An engine produced no move although one was legal
    NoMove,
    /// An engine produced a move that is not legal; it loses the game
    IllegalMove,
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub termination: Termination,
    /// Moves played, in UCI text
    pub moves: Vec<String>,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `num_games` from the start position. Returns the result from
    /// `engine`'s point of view.
    pub fn run_match(&self, engine: &mut dyn Engine, opponent: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new(engine.name(), opponent.name());

        for game in 0..self.config.num_games {
            let color = self.config.color_for_game(game);
            let record = match color {
                Color::White => self.play_game(engine, opponent, Board::startpos()),
                Color::Black => self.play_game(opponent, engine, Board::startpos()),
            };
            let game_result = record.outcome.for_color(color);
            result.record(color, game_result);

            info!(
                game = game + 1,
                of = self.config.num_games,
                ?color,
                ?game_result,
                termination = ?record.termination,
                plies = record.moves.len(),
                "game finished"
            );
        }

        result
    }

    /// Play one game from `board` until it is over or the ply cap is hit.
    pub fn play_game(&self, white: &mut dyn Engine, black: &mut dyn Engine, mut board: Board) -> GameRecord {
        white.new_game();
        black.new_game();
        let mut moves = Vec::new();

        while !board.is_game_over() && (moves.len() as u32) < self.config.max_plies {
            let mover = board.side_to_move();
            let engine: &mut dyn Engine = match mover {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let limits = self.config.search_limits(engine);
            let Some(mv) = engine.search(&mut board, limits).best_move else {
                return GameRecord {
                    outcome: GameOutcome::Draw,
                    termination: Termination::NoMove,
                    moves,
                };
            };
            if !board.legal_moves().contains(&mv) {
                debug!(engine = engine.name(), mv = %mv, "illegal move");
                return GameRecord {
                    outcome: GameOutcome::winner(mover.other()),
                    termination: Termination::IllegalMove,
                    moves,
                };
            }
            board.apply(mv);
            moves.push(mv.to_string());
        }

        let (outcome, termination) = classify(&board);
        GameRecord {
            outcome,
            termination,
            moves,
        }
    }
}

/// Outcome of the game in its final position. A game that is not over was
/// stopped by the ply cap and counts as a draw.
fn classify(board: &Board) -> (GameOutcome, Termination) {
    if board.is_checkmate() {
        (GameOutcome::winner(board.side_to_move().other()), Termination::Checkmate)
    } else if board.is_stalemate() {
        (GameOutcome::Draw, Termination::Stalemate)
    } else if board.is_insufficient_material() {
        (GameOutcome::Draw, Termination::InsufficientMaterial)
    } else if board.is_seventyfive_moves() {
        (GameOutcome::Draw, Termination::SeventyFiveMoves)
    } else if board.is_fivefold_repetition() {
        (GameOutcome::Draw, Termination::FivefoldRepetition)
    } else {
        (GameOutcome::Draw, Termination::MoveLimit)
    }
}

/// Quick utility to run a match with default settings
pub fn quick_match(engine: &mut dyn Engine, opponent: &mut dyn Engine, num_games: u32, depth: u8) -> MatchResult {
    let runner = MatchRunner::new(MatchConfig {
        num_games,
        depth: Some(depth),
        ..Default::default()
    });
    runner.run_match(engine, opponent)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
