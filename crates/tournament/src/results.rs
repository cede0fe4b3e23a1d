//! Game outcomes and match tallies

use chess_core::Color;
use serde::{Deserialize, Serialize};

/// Who won a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    White,
    Black,
    Draw,
}

impl GameOutcome {
    /// The outcome in which `color` won.
    pub fn winner(color: Color) -> Self {
        match color {
            Color::White => GameOutcome::White,
            Color::Black => GameOutcome::Black,
        }
    }

    /// The outcome seen by the side that played `color`.
    pub fn for_color(self, color: Color) -> GameResult {
        match (self, color) {
            (GameOutcome::Draw, _) => GameResult::Draw,
            (GameOutcome::White, Color::White) | (GameOutcome::Black, Color::Black) => GameResult::Win,
            _ => GameResult::Loss,
        }
    }
}

/// Result of a single game for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Results of a match, from the first engine's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub engine: String,
    pub opponent: String,
    pub as_white: Tally,
    pub as_black: Tally,
}

impl MatchResult {
    pub fn new(engine: &str, opponent: &str) -> Self {
        Self {
            engine: engine.to_string(),
            opponent: opponent.to_string(),
            as_white: Tally::default(),
            as_black: Tally::default(),
        }
    }

    pub fn record(&mut self, color: Color, result: GameResult) {
        match color {
            Color::White => self.as_white.record(result),
            Color::Black => self.as_black.record(result),
        }
    }

    /// Both colours combined.
    pub fn overall(&self) -> Tally {
        Tally {
            wins: self.as_white.wins + self.as_black.wins,
            losses: self.as_white.losses + self.as_black.losses,
            draws: self.as_white.draws + self.as_black.draws,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.overall().total()
    }

    /// 1 per win, 0.5 per draw, as a fraction of games played (0.5 if none).
    pub fn score(&self) -> f64 {
        let t = self.overall();
        if t.total() == 0 {
            return 0.5;
        }
        (t.wins as f64 + 0.5 * t.draws as f64) / t.total() as f64
    }

    pub fn summary(&self) -> MatchSummary {
        let t = self.overall();
        let percent = |n: u32| {
            if t.total() == 0 {
                0.0
            } else {
                100.0 * n as f64 / t.total() as f64
            }
        };
        MatchSummary {
            engine: self.engine.clone(),
            opponent: self.opponent.clone(),
            games: t.total(),
            wins: t.wins,
            losses: t.losses,
            draws: t.draws,
            win_rate: percent(t.wins),
            loss_rate: percent(t.losses),
            draw_rate: percent(t.draws),
        }
    }

    /// Generate a text report
    pub fn report(&self) -> String {
        let s = self.summary();
        let mut report = format!("=== {} vs {} ===\n", s.engine, s.opponent);
        report.push_str(&format!("{:<8} {:>5} {:>5} {:>5}\n", "", "W", "L", "D"));
        for (label, t) in [("White", self.as_white), ("Black", self.as_black)] {
            report.push_str(&format!("{:<8} {:>5} {:>5} {:>5}\n", label, t.wins, t.losses, t.draws));
        }
        report.push_str(&format!(
            "{} games: {:.1}% won, {:.1}% lost, {:.1}% drawn\n",
            s.games, s.win_rate, s.loss_rate, s.draw_rate
        ));
        report
    }
}

/// Flat totals and percentage rates, for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub engine: String,
    pub opponent: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub draw_rate: f64,
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
