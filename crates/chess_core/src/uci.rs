//! UCI long algebraic move text and the `position` command arguments.

use crate::board::{Position, STARTPOS_FEN};
use crate::error::UciError;
use crate::game::Board;
use crate::movegen::legal_moves;
use crate::types::*;

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Resolve move text against the legal moves of `pos`, so the castle and
/// en-passant flags come from the generator. A pawn reaching the last rank
/// without a suffix is read as a queen promotion.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(c) => match PieceKind::from_char(c)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    let mut candidates = legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == from && m.to == to);
    match promo {
        Some(kind) => candidates.find(|m| m.promo == Some(kind)),
        None => candidates.find(|m| m.promo.is_none() || m.promo == Some(PieceKind::Queen)),
    }
}

/// Build a board from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn board_from_uci(args: &[&str]) -> Result<Board, UciError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut board = match setup.split_first() {
        None | Some((&"startpos", [])) => Board::from_fen(STARTPOS_FEN)?,
        Some((&"fen", fields)) => Board::from_fen(&fields.join(" "))?,
        Some((other, _)) => return Err(UciError::PositionKind(other.to_string())),
    };

    for &txt in moves {
        let mv = parse_uci_move(board.position(), txt)
            .ok_or_else(|| UciError::IllegalMove(txt.to_string()))?;
        board.apply(mv);
    }
    Ok(board)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
