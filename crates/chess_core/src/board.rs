use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::movegen::has_legal_move;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// Flags in Zobrist order: [wk, wq, bk, bq].
    pub fn flags(self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }
}

/// Copyable board state: placement, side to move, rights and counters.
///
/// Placement is kept twice, as a mailbox for `piece_at` and as per-piece
/// bitboards for attack queries. `set_piece` is the only writer of both.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    board: [Option<Piece>; 64],
    pieces: [[Bitboard; 6]; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Position {
    fn empty() -> Self {
        Position {
            board: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            p.set_piece(f, Some(Piece::new(Color::White, kind)));
            p.set_piece(8 + f, Some(Piece::new(Color::White, PieceKind::Pawn)));
            p.set_piece(48 + f, Some(Piece::new(Color::Black, PieceKind::Pawn)));
            p.set_piece(56 + f, Some(Piece::new(Color::Black, kind)));
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut p = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    p.set_piece(s, Some(Piece::new(color, kind)));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        p.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => p.castling.wk = true,
                    'Q' => p.castling.wq = true,
                    'k' => p.castling.bk = true,
                    'q' => p.castling.bq = true,
                    _ => return Err(FenError::CastlingChar(c)),
                }
            }
        }

        p.en_passant = match parts[3] {
            "-" => None,
            coord => Some(coord_to_sq(coord).ok_or_else(|| FenError::EnPassant(coord.to_string()))?),
        };

        let counter = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                Some(txt) => txt.parse().map_err(|_| FenError::Counter(txt.to_string())),
                None => Ok(default),
            }
        };
        p.halfmove_clock = counter(parts.get(4), 0)?;
        p.fullmove_number = counter(parts.get(5), 1)?;

        Ok(p)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights: String = self
            .castling
            .flags()
            .iter()
            .zip(['K', 'Q', 'k', 'q'])
            .filter(|(on, _)| **on)
            .map(|(_, c)| c)
            .collect();
        if rights.is_empty() {
            out.push('-');
        } else {
            out.push_str(&rights);
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        let bit = Bitboard::from_square(sq);
        if let Some(old) = self.board[sq as usize] {
            self.pieces[old.color.idx()][old.kind.idx()] &= !bit;
        }
        if let Some(new) = pc {
            self.pieces[new.color.idx()][new.kind.idx()] |= bit;
        }
        self.board[sq as usize] = pc;
    }

    /// Squares holding pieces of the given color and kind.
    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }

    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.idx()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn occupied(&self) -> Bitboard {
        self.color_occupancy(Color::White) | self.color_occupancy(Color::Black)
    }

    pub fn piece_count(&self, kind: PieceKind, color: Color) -> u32 {
        self.pieces(color, kind).popcount()
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).lsb()
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        !self.attackers_of(by, target).is_empty()
    }

    /// Every piece of `by` that attacks `target`, pins ignored.
    pub fn attackers_of(&self, by: Color, target: u8) -> Bitboard {
        let occ = self.occupied();
        let queens = self.pieces(by, PieceKind::Queen);
        let diagonal = self.pieces(by, PieceKind::Bishop) | queens;
        let straight = self.pieces(by, PieceKind::Rook) | queens;

        // A `by` pawn attacks target from the squares an opposite pawn on target would attack.
        (pawn_attacks(target, by.other()) & self.pieces(by, PieceKind::Pawn))
            | (knight_attacks(target) & self.pieces(by, PieceKind::Knight))
            | (king_attacks(target) & self.pieces(by, PieceKind::King))
            | (bishop_attacks(target, occ) & diagonal)
            | (rook_attacks(target, occ) & straight)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side can ever mate: no pawns or major pieces, and at most one
    /// minor piece or only bishops that all share one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut heavy = Bitboard::EMPTY;
        let mut knights = Bitboard::EMPTY;
        let mut bishops = Bitboard::EMPTY;
        for c in Color::ALL {
            heavy |= self.pieces(c, PieceKind::Pawn)
                | self.pieces(c, PieceKind::Rook)
                | self.pieces(c, PieceKind::Queen);
            knights |= self.pieces(c, PieceKind::Knight);
            bishops |= self.pieces(c, PieceKind::Bishop);
        }
        if !heavy.is_empty() {
            return false;
        }
        if knights.popcount() + bishops.popcount() <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & !Bitboard::LIGHT_SQUARES).is_empty())
    }

    /// Passing is only legal when the side to move is not in check.
    pub fn can_pass(&self) -> bool {
        !self.in_check(self.side_to_move)
    }

    /// The position after the side to move passes, or `None` if it cannot.
    pub fn null_move(&self) -> Option<Position> {
        if !self.can_pass() {
            return None;
        }
        let mut next = *self;
        next.en_passant = None;
        next.halfmove_clock += 1;
        if self.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }
        next.side_to_move = self.side_to_move.other();
        Some(next)
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let undo_base = Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
            rook_move: None,
            ep_captured_sq: None,
        };

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
            }
        }

        self.set_piece(from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ if moved.kind == PieceKind::Pawn && is_promotion_rank(moved.color, to) => {
                Piece::new(moved.color, PieceKind::Queen)
            }
            _ => moved,
        };
        self.set_piece(to, Some(landed));

        // Castling rook move, keyed by the king's destination
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf).expect("castling without a rook");
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
                rook_move = Some((rf, rt));
            }
        }

        // A king or rook leaving home, or a rook captured at home, drops the right
        for s in [from, to] {
            match s {
                0 => self.castling.wq = false,
                7 => self.castling.wk = false,
                56 => self.castling.bq = false,
                63 => self.castling.bk = false,
                _ => {}
            }
        }
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }

        // Double pawn push sets the en-passant square
        if moved.kind == PieceKind::Pawn && (rank_of(from) - rank_of(to)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            rook_move,
            ep_captured_sq,
            ..undo_base
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt).expect("castled rook missing on unmake");
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // The moved piece goes back as it was, which also reverts promotions
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

fn is_promotion_rank(color: Color, to: u8) -> bool {
    match color {
        Color::White => rank_of(to) == 7,
        Color::Black => rank_of(to) == 0,
    }
}
