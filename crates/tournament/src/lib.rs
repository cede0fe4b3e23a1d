//! Engine comparison for ML-chess
//!
//! Plays engines against each other over a `Board`, to a finished game or a
//! ply cap, and tallies the results per colour:
//!
//! ```ignore
//! let runner = MatchRunner::new(MatchConfig { num_games: 20, ..Default::default() });
//! let result = runner.run_match(&mut minimax, &mut random);
//! println!("{}", result.report());
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
