//! Attack generation: precomputed leaper tables and direction-stepped
//! sliding attacks. Slider rays are walked one square at a time until they
//! hit a blocker; the blocker square itself is included.

mod tables;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

use self::tables::{BETWEEN, KING_ATTACKS, KNIGHT_ATTACKS, LINE, PAWN_ATTACKS};

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Diagonal capture targets of a pawn of `color` on `sq`.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Rook attacks from `sq` against `occupied`.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    slide(sq, occupied, &ROOK_DIRS)
}

/// Bishop attacks from `sq` against `occupied`.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    slide(sq, occupied, &BISHOP_DIRS)
}

/// Queen attacks from `sq` against `occupied`.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares strictly between `a` and `b` when aligned on a rank, file or
/// diagonal; the empty bitboard otherwise.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index()][b.index()]
}

/// The full edge-to-edge line through `a` and `b` (endpoints included),
/// or the empty bitboard when they are not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    LINE[a.index()][b.index()]
}

fn slide(sq: Square, occupied: Bitboard, dirs: &[(i8, i8); 4]) -> Bitboard {
    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::from_index_unchecked((r * 8 + f) as u8);
            attacks = attacks.with(target);
            if occupied.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}
