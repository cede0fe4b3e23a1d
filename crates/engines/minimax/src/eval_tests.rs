use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

/// The same position with colours swapped and the board turned over.
fn color_flipped(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() })
            .collect()
    };
    let placement: Vec<String> = fields[0].split('/').rev().map(swap).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" { "-".to_string() } else { swap(fields[2]) };
    let ep = match fields[3].as_bytes() {
        [f, b'3'] => format!("{}6", *f as char),
        [f, b'6'] => format!("{}3", *f as char),
        _ => "-".to_string(),
    };
    format!("{} {} {} {} {} {}", placement.join("/"), side, castling, ep, fields[4], fields[5])
}

#[test]
fn checkmate_scores_are_extreme_and_signed() {
    let black_mated = board("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(ClassicalEvaluator.evaluate(&black_mated), MATE_SCORE);
    assert_eq!(MaterialEvaluator.evaluate(&black_mated), MATE_SCORE);

    let white_mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(ClassicalEvaluator.evaluate(&white_mated), -MATE_SCORE);
}

#[test]
fn drawn_positions_score_zero() {
    for fen in [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "8/8/4k3/8/8/4KB2/8/8 w - - 0 1",
        "8/8/4k3/8/8/4K3/4Q3/8 w - - 150 100",
    ] {
        assert_eq!(ClassicalEvaluator.evaluate(&board(fen)), 0, "{fen}");
    }
}

#[test]
fn start_position_is_balanced() {
    assert_eq!(ClassicalEvaluator.evaluate(&Board::startpos()), 0);
    assert_eq!(MaterialEvaluator.evaluate(&Board::startpos()), 0);
}

#[test]
fn color_flip_negates_score() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 30",
        "6k1/5ppp/8/8/8/8/5PPP/3RR1K1 b - - 0 25",
        "k7/8/8/8/8/8/8/4K2R w - - 0 50",
    ] {
        let original = ClassicalEvaluator.evaluate(&board(fen));
        let flipped = ClassicalEvaluator.evaluate(&board(&color_flipped(fen)));
        assert_eq!(original, -flipped, "{fen}");
    }
}

#[test]
fn evaluation_is_idempotent() {
    let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let key = b.canonical_key();
    let first = ClassicalEvaluator.evaluate(&b);
    let second = ClassicalEvaluator.evaluate(&b);
    assert_eq!(first, second);
    assert_eq!(b.canonical_key(), key);
}

#[test]
fn endgame_classification() {
    assert!(!is_endgame(&Position::startpos()));
    // Queens off
    assert!(is_endgame(&pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1")));
    // Queen on but little else
    assert!(is_endgame(&pos("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")));
    assert!(!is_endgame(&pos("r2qk2r/8/8/8/8/8/8/R2QK2R w - - 0 1")));
}

#[test]
fn side_in_check_gets_zero_opponent_mobility() {
    let p = pos("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    let (white, black) = move_counts(&p);
    assert_eq!(white, 0);
    assert!(black > 0);
}

#[test]
fn leader_is_penalised_for_smothering_trailing_side() {
    // White is a rook up; the black king on a8 has two moves
    let cramped = pos("k7/8/1K6/8/8/8/8/7R w - - 0 1");
    let (white, black) = move_counts(&cramped);
    assert!(black < LOW_MOBILITY);
    let expected = white * MOBILITY_WEIGHT - (LOW_MOBILITY - black) * LOW_MOBILITY_PENALTY;
    assert_eq!(mobility(&cramped, 500), expected);

    // Balanced material scores the plain difference
    let balanced = Position::startpos();
    assert_eq!(mobility(&balanced, 0), 0);
}

#[test]
fn pawn_shield_counts_pawns_in_front_of_king() {
    assert_eq!(pawn_shield(&pos("4k3/8/8/8/8/8/5PPP/6K1 w - - 0 1")), 3 * PAWN_SHIELD);
    assert_eq!(pawn_shield(&pos("6k1/5ppp/8/8/8/8/8/6K1 w - - 0 1")), -3 * PAWN_SHIELD);
    assert_eq!(pawn_shield(&pos("4k3/8/8/8/8/5PPP/8/6K1 w - - 0 1")), 0);
}

#[test]
fn doubled_and_passed_pawns() {
    assert_eq!(doubled_pawns(&pos("4k3/8/8/8/8/P7/P7/4K3 w - - 0 1")), -DOUBLED_PAWN);
    assert_eq!(doubled_pawns(&pos("4k3/p7/p7/p7/8/8/8/4K3 w - - 0 1")), 2 * DOUBLED_PAWN);

    // d5 is three steps from its starting rank
    assert_eq!(passed_pawns(&pos("4k3/8/8/3P4/8/8/8/4K3 w - - 0 1")), 30);
    // An enemy pawn ahead on a neighbouring file blocks it
    assert_eq!(passed_pawns(&pos("4k3/2p5/8/3P4/8/8/8/4K3 w - - 0 1")), 0);
    assert_eq!(passed_pawns(&pos("4k3/8/8/8/3p4/8/8/4K3 w - - 0 1")), -30);
}

#[test]
fn rook_file_bonuses() {
    assert_eq!(rook_files(&pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")), ROOK_OPEN_FILE);
    assert_eq!(rook_files(&pos("4k3/p7/8/8/8/8/8/R3K3 w - - 0 1")), ROOK_SEMI_OPEN_FILE);
    assert_eq!(rook_files(&pos("r3k3/8/8/8/8/8/P7/4K3 w - - 0 1")), -ROOK_SEMI_OPEN_FILE);
    assert_eq!(rook_files(&pos("r3k3/p7/8/8/8/8/P7/R3K3 w - - 0 1")), 0);
}

#[test]
fn bishop_pair_is_worth_more_in_endgame() {
    let p = pos("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
    assert_eq!(bishop_pair(&p, false), BISHOP_PAIR);
    assert_eq!(bishop_pair(&p, true), BISHOP_PAIR_ENDGAME);
}

#[test]
fn corralling_prefers_lone_king_on_edge() {
    let cornered = pos("k7/8/8/8/8/8/8/4K2R w - - 0 1");
    // Edge distance 7, king distance 11
    assert_eq!(corral_king(&cornered, 500), 7 * CORRAL_EDGE + 3 * CORRAL_PROXIMITY);

    let central = pos("8/8/8/3k4/8/8/8/4K2R w - - 0 1");
    assert!(corral_king(&cornered, 500) > corral_king(&central, 500));
    assert_eq!(corral_king(&cornered, 200), 0);
}

#[test]
fn development_counts_minors_off_back_rank() {
    let p = pos("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1");
    assert_eq!(development(&p), DEVELOPED_MINOR);
}

#[test]
fn closures_are_evaluators() {
    let constant = |_: &Board| 42;
    assert_eq!(constant.evaluate(&Board::startpos()), 42);
}
