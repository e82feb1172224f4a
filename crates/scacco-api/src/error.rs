//! Errors at the external move boundary.

/// Why a move string from the outside world was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// The string is not `<from><to>[promo]` long-algebraic notation.
    #[error("malformed move string {0:?}")]
    Malformed(String),

    /// Well-formed, but not a legal move in the current position.
    #[error("illegal move {0:?}")]
    Illegal(String),
}
