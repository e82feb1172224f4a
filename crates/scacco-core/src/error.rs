//! Error types for FEN parsing and board validation.

/// A FEN string that does not describe a valid position.
///
/// No partial board is ever produced: parsing either yields a fully
/// validated [`Board`](crate::board::Board) or one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Not exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    /// The placement field does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// A placement rank describes more or fewer than 8 squares.
    #[error("rank {rank} of the placement field describes {length} squares")]
    BadRankLength { rank: usize, length: usize },

    /// A character in the placement field is neither a piece nor a 1-8 run.
    #[error("invalid piece character {character:?}")]
    InvalidPieceChar { character: char },

    /// The active color field is not "w" or "b".
    #[error("invalid active color {found:?}")]
    InvalidColor { found: String },

    /// A character in the castling field is not one of "KQkq".
    #[error("invalid castling character {character:?}")]
    InvalidCastlingChar { character: char },

    /// The en-passant field is not "-" or a square on rank 3 or 6.
    #[error("invalid en passant target {found:?}")]
    InvalidEnPassant { found: String },

    /// A move counter is not a number. The counters are otherwise ignored.
    #[error("invalid {field}: {found:?}")]
    InvalidMoveCounter { field: &'static str, found: String },

    /// The fields parsed but the position they describe is not playable.
    #[error("invalid board: {source}")]
    InvalidBoard {
        #[from]
        source: BoardError,
    },
}

/// Structural problems with a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },

    /// Pawns on rank 1 or rank 8.
    #[error("pawns found on a back rank")]
    PawnsOnBackRank,

    /// Two piece bitboards claim the same square.
    #[error("overlapping piece bitboards")]
    OverlappingPieces,

    /// The side occupancy bitboards overlap.
    #[error("white and black occupancy overlap")]
    InconsistentSides,

    /// The occupied union does not match the side bitboards.
    #[error("occupied bitboard disagrees with side bitboards")]
    InconsistentOccupied,

    /// The square grid disagrees with the bitboards.
    #[error("square grid disagrees with the bitboards")]
    MailboxMismatch,

    /// A castling right is claimed but the king or rook has left home.
    #[error("castling right '{right}' has no king/rook on the home squares")]
    MissingCastlingPiece { right: char },

    /// The en-passant target is occupied or on a rank inconsistent with
    /// the side to move.
    #[error("en passant target square is not a valid skipped square")]
    BadEnPassantTarget,
}
