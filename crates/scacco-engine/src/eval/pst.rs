//! Piece-square tables.
//!
//! Tables are written from White's perspective in LERF order (index 0 is
//! a1, index 63 is h8). Look values up through [`pst_value`], which
//! mirrors the square vertically (`sq ^ 56`) for Black.

use scacco_core::{Color, PieceKind, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // rank 1
      0,   0,   0,   0,   0,   0,   0,   0,
    // rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // rank 4
      0,   0,   0,  20,  20,   0,   0,   0,
    // rank 5
      5,   5,  10,  25,  25,  10,   5,   5,
    // rank 6
     10,  10,  20,  30,  30,  20,  10,  10,
    // rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// Middlegame-flavored king table: castled corners good, the center bad.
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// All tables, indexed by [`PieceKind::index()`].
pub static PST: [[i32; 64]; PieceKind::COUNT] = [
    PAWN_PST,
    KNIGHT_PST,
    BISHOP_PST,
    ROOK_PST,
    QUEEN_PST,
    KING_PST,
];

/// PST bonus for a piece of `kind` and `color` on `sq`.
#[inline]
pub fn pst_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let idx = match color {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    };
    PST[kind.index()][idx]
}

#[cfg(test)]
mod tests {
    use scacco_core::{Color, PieceKind, Square};

    use super::pst_value;

    #[test]
    fn white_center_pawn_bonus() {
        assert_eq!(pst_value(PieceKind::Pawn, Color::White, Square::E4), 20);
        assert_eq!(pst_value(PieceKind::Pawn, Color::White, Square::D4), 20);
    }

    #[test]
    fn black_mirrors_white_vertically() {
        for kind in PieceKind::ALL {
            for sq in Square::all() {
                let mirrored = Square::from_index(sq.index() as u8 ^ 56).unwrap();
                assert_eq!(
                    pst_value(kind, Color::Black, sq),
                    pst_value(kind, Color::White, mirrored),
                    "mirror mismatch for {kind:?} on {sq}"
                );
            }
        }
    }

    #[test]
    fn castled_king_beats_centralized_king() {
        let castled = pst_value(PieceKind::King, Color::White, Square::G1);
        let wandering = pst_value(PieceKind::King, Color::White, Square::E4);
        assert!(castled > wandering);
    }

    #[test]
    fn rim_knight_is_penalized() {
        assert!(pst_value(PieceKind::Knight, Color::White, Square::A4) < 0);
        assert!(pst_value(PieceKind::Knight, Color::White, Square::D4) > 0);
    }

    #[test]
    fn seventh_rank_pawn_is_nearly_home() {
        assert_eq!(pst_value(PieceKind::Pawn, Color::White, Square::E7), 50);
        assert_eq!(pst_value(PieceKind::Pawn, Color::Black, Square::E2), 50);
    }
}
