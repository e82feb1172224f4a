//! Long-algebraic move strings.
//!
//! Parsing never guesses a move's flag from its coordinates. The string
//! is resolved against the current legal-move list and the generator's
//! flag is taken verbatim, so castling, en passant and double pushes are
//! classified exactly as the move generator classified them.

use scacco_core::{Board, Move, PieceKind, Square};

use crate::error::NotationError;

/// Parse `<from><to>[promo]` (e.g. `e2e4`, `e1g1`, `e7e8q`) into the
/// matching legal move for `board`.
pub fn parse_long_move(board: &mut Board, s: &str) -> Result<Move, NotationError> {
    let malformed = || NotationError::Malformed(s.to_string());

    if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
        return Err(malformed());
    }
    let src = Square::from_algebraic(&s[0..2]).ok_or_else(malformed)?;
    let dst = Square::from_algebraic(&s[2..4]).ok_or_else(malformed)?;
    let promo = match s.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return Err(malformed()),
    };

    board
        .legal_moves()
        .iter()
        .find(|m| m.source() == src && m.dest() == dst && m.promotion_kind() == promo)
        .copied()
        .ok_or_else(|| NotationError::Illegal(s.to_string()))
}

#[cfg(test)]
mod tests {
    use scacco_core::{Board, MoveFlag, Square};

    use super::parse_long_move;
    use crate::error::NotationError;

    #[test]
    fn double_push_gets_the_generator_flag() {
        let mut board = Board::starting_position();
        let mv = parse_long_move(&mut board, "e2e4").unwrap();
        assert_eq!(mv.flag(), MoveFlag::DoublePush);

        let single = parse_long_move(&mut board, "e2e3").unwrap();
        assert_eq!(single.flag(), MoveFlag::Normal);
    }

    #[test]
    fn a_queen_sliding_two_ranks_is_not_a_double_push() {
        // Same rank pattern as a pawn double push; the flag must come
        // from the legal-move list, not from the coordinates.
        let mut board: Board = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let mv = parse_long_move(&mut board, "d1d3").unwrap();
        assert_eq!(mv.flag(), MoveFlag::Normal);
    }

    #[test]
    fn castling_resolves_to_the_castle_flag() {
        let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let kingside = parse_long_move(&mut board, "e1g1").unwrap();
        assert_eq!(kingside.flag(), MoveFlag::CastleKingside);
        let queenside = parse_long_move(&mut board, "e1c1").unwrap();
        assert_eq!(queenside.flag(), MoveFlag::CastleQueenside);
    }

    #[test]
    fn en_passant_resolves_to_the_ep_flag() {
        let mut board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let mv = parse_long_move(&mut board, "e5d6").unwrap();
        assert_eq!(mv.flag(), MoveFlag::EnPassant);
    }

    #[test]
    fn promotion_requires_the_suffix() {
        let mut board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = parse_long_move(&mut board, "a7a8n").unwrap();
        assert_eq!(mv.flag(), MoveFlag::PromoKnight);
        assert_eq!(mv.source(), Square::A7);

        // Bare a7a8 matches no legal move: every generated move to the
        // last rank carries a promotion piece.
        assert_eq!(
            parse_long_move(&mut board, "a7a8"),
            Err(NotationError::Illegal("a7a8".into()))
        );
    }

    #[test]
    fn malformed_strings_are_rejected() {
        let mut board = Board::starting_position();
        for s in ["", "e2", "e2e", "e2e4qq", "z9e4", "e2e9", "e2e4x"] {
            assert_eq!(
                parse_long_move(&mut board, s),
                Err(NotationError::Malformed(s.into())),
                "expected malformed for {s:?}"
            );
        }
    }

    #[test]
    fn legal_looking_but_illegal_moves_are_rejected() {
        let mut board = Board::starting_position();
        for s in ["e2e5", "e1e2", "d8h4", "a1a3"] {
            assert_eq!(
                parse_long_move(&mut board, s),
                Err(NotationError::Illegal(s.into())),
                "expected illegal for {s:?}"
            );
        }
    }
}
