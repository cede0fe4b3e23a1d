use thiserror::Error;

/// Reasons a FEN string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in the placement field, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}'")]
    PieceChar(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    CastlingChar(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
}

/// Reasons the arguments of a UCI `position` command can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("expected 'startpos' or 'fen', found '{0}'")]
    PositionKind(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("illegal move '{0}'")]
    IllegalMove(String),
}
