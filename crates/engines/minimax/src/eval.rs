//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favours
//! White whichever side is to move. Every term below is computed for both
//! colours and summed as White minus Black.

use chess_core::{legal_move_count, Bitboard, Board, Color, PieceKind, Position};

use crate::pst::square_bonus;

/// Material values indexed by `PieceKind::idx()`. Kings are not counted.
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Score of a checkmate, signed by the side that delivered it.
pub const MATE_SCORE: i32 = 999_999;
/// Scores beyond this are forced mates.
pub const MATE_THRESHOLD: i32 = 999_000;

/// Total material below which the position counts as an endgame.
const ENDGAME_MATERIAL: i32 = 1300;

const WINNING_MARGIN: i32 = 400;
const MOBILITY_WEIGHT: i32 = 10;
const LOW_MOBILITY: i32 = 5;
const LOW_MOBILITY_PENALTY: i32 = 25;
const TRAILING_MOBILITY_REWARD: i32 = 5;

const PAWN_SHIELD: i32 = 15;
const DOUBLED_PAWN: i32 = 10;
const CENTER_OCCUPANT: i32 = 20;
const CENTER_ATTACKER: i32 = 5;
const IN_CHECK: i32 = 50;
const DEVELOPED_MINOR: i32 = 10;
const DEVELOPMENT_MOVES: u32 = 15;
const PASSED_PAWN_STEP: i32 = 10;
const ROOK_OPEN_FILE: i32 = 20;
const ROOK_SEMI_OPEN_FILE: i32 = 15;
const BISHOP_PAIR: i32 = 20;
const BISHOP_PAIR_ENDGAME: i32 = 30;

const CORRAL_LEAD: i32 = 300;
const CORRAL_EDGE: i32 = 15;
const CORRAL_PROXIMITY: i32 = 10;

/// Maps a position to a score. This is the seam a learned evaluator plugs into.
pub trait Evaluator<B: ?Sized> {
    fn evaluate(&self, board: &B) -> i32;
}

impl<B: ?Sized, F> Evaluator<B> for F
where
    F: Fn(&B) -> i32,
{
    fn evaluate(&self, board: &B) -> i32 {
        self(board)
    }
}

/// Terminal positions short-circuit every other term.
pub fn terminal_score(board: &Board) -> Option<i32> {
    if board.is_checkmate() {
        return Some(match board.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        });
    }
    if board.is_stalemate()
        || board.is_insufficient_material()
        || board.is_seventyfive_moves()
        || board.is_fivefold_repetition()
    {
        return Some(0);
    }
    None
}

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Material of one side.
pub fn material(pos: &Position, color: Color) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| piece_value(kind) * pos.piece_count(kind, color) as i32)
        .sum()
}

/// No queens left, or little material on the board.
pub fn is_endgame(pos: &Position) -> bool {
    let queens = pos.piece_count(PieceKind::Queen, Color::White)
        + pos.piece_count(PieceKind::Queen, Color::Black);
    queens == 0 || material(pos, Color::White) + material(pos, Color::Black) < ENDGAME_MATERIAL
}

fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Material only, with the same terminal shortcut.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator<Board> for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        if let Some(score) = terminal_score(board) {
            return score;
        }
        material(board, Color::White) - material(board, Color::Black)
    }
}

/// The full hand-tuned evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalEvaluator;

impl Evaluator<Board> for ClassicalEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        if let Some(score) = terminal_score(board) {
            return score;
        }
        evaluate_position(board.position())
    }
}

/// Every non-terminal term of the classical evaluation.
pub fn evaluate_position(pos: &Position) -> i32 {
    let endgame = is_endgame(pos);
    let white_material = material(pos, Color::White);
    let black_material = material(pos, Color::Black);

    let mut score = placement(pos, endgame);
    score += mobility(pos, white_material - black_material);
    if !endgame {
        score += pawn_shield(pos);
    }
    score += doubled_pawns(pos);
    score += center_control(pos);
    score += check(pos);
    if !endgame && pos.fullmove_number <= DEVELOPMENT_MOVES {
        score += development(pos);
    }
    score += passed_pawns(pos);
    score += rook_files(pos);
    score += bishop_pair(pos, endgame);
    if endgame {
        score += corral_king(pos, white_material - black_material);
    }
    score
}

fn placement(pos: &Position, endgame: bool) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for sq in pos.pieces(color, kind) {
                score += sign(color) * (piece_value(kind) + square_bonus(kind, color, sq, endgame));
            }
        }
    }
    score
}

/// Legal-move counts for (White, Black). The side not to move is measured
/// after a pass; if it cannot pass (in check) its count is taken as zero.
fn move_counts(pos: &Position) -> (i32, i32) {
    let mover = legal_move_count(pos) as i32;
    let other = pos
        .null_move()
        .map(|passed| legal_move_count(&passed) as i32)
        .unwrap_or(0);
    match pos.side_to_move {
        Color::White => (mover, other),
        Color::Black => (other, mover),
    }
}

/// With a decisive lead, the leader's own mobility is rewarded and the
/// trailing side is kept breathing: squeezing it below a few legal moves is
/// penalised so the search does not stumble into stalemate.
fn mobility(pos: &Position, material_lead: i32) -> i32 {
    let (white, black) = move_counts(pos);
    let leader = if material_lead > WINNING_MARGIN {
        Color::White
    } else if material_lead < -WINNING_MARGIN {
        Color::Black
    } else {
        return (white - black) * MOBILITY_WEIGHT;
    };

    let (own, trailing) = match leader {
        Color::White => (white, black),
        Color::Black => (black, white),
    };
    let trailing_term = if trailing < LOW_MOBILITY {
        -(LOW_MOBILITY - trailing) * LOW_MOBILITY_PENALTY
    } else {
        trailing * TRAILING_MOBILITY_REWARD
    };
    sign(leader) * (own * MOBILITY_WEIGHT + trailing_term)
}

/// Own pawns on the three squares directly in front of the king.
fn pawn_shield(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let Some(ksq) = pos.king_sq(color) else {
            continue;
        };
        let (file, rank) = (ksq % 8, ksq / 8);
        let front = match color {
            Color::White if rank < 7 => Bitboard::rank(rank + 1),
            Color::Black if rank > 0 => Bitboard::rank(rank - 1),
            _ => continue,
        };
        let shield = front & Bitboard::adjacent_files(file) & pos.pieces(color, PieceKind::Pawn);
        score += sign(color) * PAWN_SHIELD * shield.popcount() as i32;
    }
    score
}

fn doubled_pawns(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let pawns = pos.pieces(color, PieceKind::Pawn);
        for file in 0..8 {
            let on_file = (pawns & Bitboard::file(file)).popcount() as i32;
            if on_file > 1 {
                score -= sign(color) * DOUBLED_PAWN * (on_file - 1);
            }
        }
    }
    score
}

fn center_control(pos: &Position) -> i32 {
    let mut score = 0;
    for sq in Bitboard::CENTER {
        if let Some(piece) = pos.piece_at(sq) {
            score += sign(piece.color) * CENTER_OCCUPANT;
        }
        for color in Color::ALL {
            score += sign(color) * CENTER_ATTACKER * pos.attackers_of(color, sq).popcount() as i32;
        }
    }
    score
}

fn check(pos: &Position) -> i32 {
    let us = pos.side_to_move;
    if pos.in_check(us) {
        -sign(us) * IN_CHECK
    } else {
        0
    }
}

/// Knights and bishops that have left their back rank.
fn development(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let back_rank = match color {
            Color::White => Bitboard::rank(0),
            Color::Black => Bitboard::rank(7),
        };
        let minors = pos.pieces(color, PieceKind::Knight) | pos.pieces(color, PieceKind::Bishop);
        let developed = minors & !back_rank;
        score += sign(color) * DEVELOPED_MINOR * developed.popcount() as i32;
    }
    score
}

/// Pawns with no enemy pawn ahead on their own or a neighbouring file,
/// worth more the closer they are to promoting.
fn passed_pawns(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let enemy_pawns = pos.pieces(color.other(), PieceKind::Pawn);
        for sq in pos.pieces(color, PieceKind::Pawn) {
            let (file, rank) = (sq % 8, sq / 8);
            let (ahead, advancement) = match color {
                Color::White => (Bitboard::ranks_above(rank), rank as i32 - 1),
                Color::Black => (Bitboard::ranks_below(rank), 6 - rank as i32),
            };
            if (ahead & Bitboard::adjacent_files(file) & enemy_pawns).is_empty() {
                score += sign(color) * PASSED_PAWN_STEP * advancement;
            }
        }
    }
    score
}

fn rook_files(pos: &Position) -> i32 {
    let mut score = 0;
    let white_pawns = pos.pieces(Color::White, PieceKind::Pawn);
    let black_pawns = pos.pieces(Color::Black, PieceKind::Pawn);
    for file in 0..8 {
        let mask = Bitboard::file(file);
        let white_open = (white_pawns & mask).is_empty();
        let black_open = (black_pawns & mask).is_empty();
        let has_rook = |c: Color| !(pos.pieces(c, PieceKind::Rook) & mask).is_empty();

        if white_open && black_open {
            if has_rook(Color::White) {
                score += ROOK_OPEN_FILE;
            }
            if has_rook(Color::Black) {
                score -= ROOK_OPEN_FILE;
            }
        } else if white_open {
            if has_rook(Color::White) {
                score += ROOK_SEMI_OPEN_FILE;
            }
        } else if black_open && has_rook(Color::Black) {
            score -= ROOK_SEMI_OPEN_FILE;
        }
    }
    score
}

fn bishop_pair(pos: &Position, endgame: bool) -> i32 {
    let bonus = if endgame { BISHOP_PAIR_ENDGAME } else { BISHOP_PAIR };
    Color::ALL
        .iter()
        .filter(|&&c| pos.piece_count(PieceKind::Bishop, c) >= 2)
        .map(|&c| sign(c) * bonus)
        .sum()
}

/// In a won endgame, push the losing king to the edge and bring the
/// winning king close to it.
fn corral_king(pos: &Position, material_lead: i32) -> i32 {
    let winner = if material_lead > CORRAL_LEAD {
        Color::White
    } else if material_lead < -CORRAL_LEAD {
        Color::Black
    } else {
        return 0;
    };
    let (Some(own_king), Some(lone_king)) = (pos.king_sq(winner), pos.king_sq(winner.other())) else {
        return 0;
    };

    let (lf, lr) = ((lone_king % 8) as i32, (lone_king / 8) as i32);
    let (of, or) = ((own_king % 8) as i32, (own_king / 8) as i32);
    // Manhattan distance to the centre point (3.5, 3.5); always a whole number
    let edge_distance = ((2 * lf - 7).abs() + (2 * lr - 7).abs()) / 2;
    let king_distance = (of - lf).abs() + (or - lr).abs();

    sign(winner) * (edge_distance * CORRAL_EDGE + (14 - king_distance) * CORRAL_PROXIMITY)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
