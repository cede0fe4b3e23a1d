use super::*;
use minimax_engine::MinimaxEngine;
use random_engine::RandomEngine;

fn config(num_games: u32, max_plies: u32) -> MatchConfig {
    MatchConfig {
        num_games,
        max_plies,
        ..Default::default()
    }
}

#[test]
fn mate_in_one_ends_the_game() {
    let runner = MatchRunner::new(config(1, 200));
    let board = Board::from_fen("4k3/3ppp2/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mut minimax = MinimaxEngine::new();
    let mut random = RandomEngine::with_seed(1);

    let record = runner.play_game(&mut minimax, &mut random, board);
    assert_eq!(record.outcome, GameOutcome::White);
    assert_eq!(record.termination, Termination::Checkmate);
    assert_eq!(record.moves, vec!["a1a8".to_string()]);
}

#[test]
fn finished_position_plays_no_moves() {
    let runner = MatchRunner::new(config(1, 200));
    let board = Board::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let mut first = RandomEngine::with_seed(1);
    let mut second = RandomEngine::with_seed(2);

    let record = runner.play_game(&mut first, &mut second, board);
    assert_eq!(record.outcome, GameOutcome::Draw);
    assert_eq!(record.termination, Termination::Stalemate);
    assert!(record.moves.is_empty());
}

#[test]
fn ply_cap_scores_a_draw() {
    let runner = MatchRunner::new(config(1, 2));
    let mut first = RandomEngine::with_seed(3);
    let mut second = RandomEngine::with_seed(4);

    let record = runner.play_game(&mut first, &mut second, Board::startpos());
    assert_eq!(record.outcome, GameOutcome::Draw);
    assert_eq!(record.termination, Termination::MoveLimit);
    assert_eq!(record.moves.len(), 2);
}

#[test]
fn colours_alternate_between_games() {
    let runner = MatchRunner::new(config(4, 6));
    let mut first = RandomEngine::with_seed(5);
    let mut second = RandomEngine::with_seed(6);

    let result = runner.run_match(&mut first, &mut second);
    assert_eq!(result.as_white.total(), 2);
    assert_eq!(result.as_black.total(), 2);

    let fixed = MatchRunner::new(MatchConfig {
        alternate_colors: false,
        engine_color: Color::Black,
        ..config(3, 6)
    });
    let result = fixed.run_match(&mut first, &mut second);
    assert_eq!(result.as_black.total(), 3);
    assert_eq!(result.as_white.total(), 0);
}

#[test]
fn minimax_does_not_lose_to_random() {
    let mut minimax = MinimaxEngine::new();
    let mut random = RandomEngine::with_seed(7);

    let result = quick_match(&mut minimax, &mut random, 2, 2);
    assert_eq!(result.engine, "Minimax");
    assert_eq!(result.opponent, "Random v1.0");
    assert_eq!(result.total_games(), 2);
    assert_eq!(result.as_white.total(), 1);
    assert_eq!(result.overall().losses, 0);

    let json = serde_json::to_value(result.summary()).unwrap();
    assert_eq!(json["games"], 2);
    assert_eq!(json["loss_rate"], 0.0);
}
