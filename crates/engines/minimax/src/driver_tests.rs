use std::cell::Cell;

use super::*;
use crate::ordering::InputOrder;
use crate::search::SearchSettings;
use crate::test_tree::{static_value, GameTree, Leaf, Node};
use crate::tt::Replacement;
use chess_core::TimeControl;

fn searcher_with(tc: TimeControl) -> Searcher<GameTree, fn(&GameTree) -> i32, InputOrder> {
    let mut s = Searcher::new(
        static_value as fn(&GameTree) -> i32,
        InputOrder,
        SearchSettings::default(),
        Replacement::Always,
    );
    s.begin(tc, true);
    s
}

/// Root 0; children 1 (leaves 2, 3) and 4 (leaves 5, 6).
fn two_by_two() -> GameTree {
    GameTree::build(Node(
        0,
        vec![Node(1, vec![Leaf(3), Leaf(8)]), Node(2, vec![Leaf(7), Leaf(9)])],
    ))
}

#[test]
fn no_moves_no_answer() {
    let mut tree = GameTree::build(Leaf(5));
    let outcome = searcher_with(TimeControl::new(None)).iterative_deepening(&mut tree, 3);
    assert_eq!(outcome.best_move, None);
    assert_eq!(outcome.depth_completed, 0);
    assert!(!outcome.stopped);
}

#[test]
fn picks_the_best_root_move() {
    let mut tree = two_by_two();
    let outcome = searcher_with(TimeControl::new(None)).iterative_deepening(&mut tree, 2);
    assert_eq!(outcome.best_move, Some(4));
    assert_eq!(outcome.score, 7);
    assert_eq!(outcome.depth_completed, 2);
    assert!(!outcome.stopped);
    assert_eq!(tree.current(), 0);
}

#[test]
fn minimizing_root_picks_the_lowest() {
    let mut tree = GameTree::build(Node(0, vec![Node(0, vec![Leaf(3), Leaf(-4), Leaf(1)])]));
    tree.apply(1);
    let outcome = searcher_with(TimeControl::new(None)).iterative_deepening(&mut tree, 1);
    assert_eq!(outcome.best_move, Some(3));
    assert_eq!(outcome.score, -4);
}

#[test]
fn depth_zero_still_searches_one_ply() {
    let mut tree = two_by_two();
    let outcome = searcher_with(TimeControl::new(None)).iterative_deepening(&mut tree, 0);
    assert_eq!(outcome.depth_completed, 1);
    assert_eq!(outcome.best_move, Some(4));
}

#[test]
fn quicker_mate_wins_at_the_root() {
    // Child 1 mates at once; child 2 mates two plies later
    let mut tree = GameTree::build(Node(
        0,
        vec![
            Node(0, vec![Node(0, vec![Leaf(999_999)])]),
            Leaf(999_999),
        ],
    ));
    let outcome = searcher_with(TimeControl::new(None)).iterative_deepening(&mut tree, 4);
    assert_eq!(outcome.best_move, Some(4));
    assert_eq!(outcome.score, 999_998);
}

#[test]
fn stopped_before_depth_one_falls_back_to_first_move() {
    let tc = TimeControl::new(None);
    tc.stop();
    let mut tree = two_by_two();
    let outcome = searcher_with(tc).iterative_deepening(&mut tree, 3);
    assert_eq!(outcome.best_move, Some(1));
    assert_eq!(outcome.score, 0);
    assert_eq!(outcome.depth_completed, 0);
    assert!(outcome.stopped);
    assert_eq!(tree.current(), 0);
}

#[test]
fn interrupted_iteration_is_discarded() {
    let tc = TimeControl::new(None);
    let evaluations = Cell::new(0);
    let stopper = tc.clone();
    // Depth 1 evaluates twice; the third evaluation is inside depth 2
    let evaluator = move |tree: &GameTree| -> i32 {
        evaluations.set(evaluations.get() + 1);
        if evaluations.get() == 3 {
            stopper.stop();
        }
        tree.value()
    };
    let mut s = Searcher::new(evaluator, InputOrder, SearchSettings::default(), Replacement::Always);
    s.begin(tc, true);

    let mut tree = two_by_two();
    let outcome = s.iterative_deepening(&mut tree, 3);
    // Depth 1 sees the static values 1 and 2 of the children
    assert_eq!(outcome.best_move, Some(4));
    assert_eq!(outcome.score, 2);
    assert_eq!(outcome.depth_completed, 1);
    assert!(outcome.stopped);
    assert_eq!(tree.current(), 0);
}
