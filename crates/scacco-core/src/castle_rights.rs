//! Castling rights as a 4-bit set inside a `u8`.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;

/// Castling availability: bit 0 = WK, bit 1 = WQ, bit 2 = BK, bit 3 = BQ.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All four rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// White king-side.
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    /// White queen-side.
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    /// Black king-side.
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    /// Black queen-side.
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Both rights of one color.
    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Raw bits (low 4).
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is present.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Rights with all bits of `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Rights with all bits of `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Both rights of `color`, as a set.
    #[inline]
    pub const fn both(color: Color) -> CastleRights {
        match color {
            Color::White => Self::WHITE_BOTH,
            Color::Black => Self::BLACK_BOTH,
        }
    }

    /// Parse the FEN castling field ("KQkq" subset or "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.insert(flag);
        }
        Ok(rights)
    }

    /// Serialize to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for (flag, c) in [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ] {
            if self.contains(flag) {
                s.push(c);
            }
        }
        s
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::CastleRights;
    use crate::color::Color;

    #[test]
    fn insert_and_remove() {
        let rights = CastleRights::NONE
            .insert(CastleRights::WHITE_KING)
            .insert(CastleRights::BLACK_QUEEN);
        assert!(rights.contains(CastleRights::WHITE_KING));
        assert!(!rights.contains(CastleRights::WHITE_QUEEN));
        assert!(rights.remove(CastleRights::WHITE_KING).contains(CastleRights::BLACK_QUEEN));
        assert!(!rights.remove(CastleRights::WHITE_KING).contains(CastleRights::WHITE_KING));
    }

    #[test]
    fn both_of_a_color() {
        assert_eq!(CastleRights::both(Color::White), CastleRights::WHITE_BOTH);
        assert_eq!(
            CastleRights::ALL.remove(CastleRights::both(Color::Black)),
            CastleRights::WHITE_BOTH
        );
    }

    #[test]
    fn fen_roundtrip() {
        for fen in ["KQkq", "KQ", "Kq", "k", "-"] {
            let rights = CastleRights::from_fen(fen).unwrap();
            assert_eq!(rights.to_fen(), *fen, "roundtrip failed for {fen}");
        }
    }

    #[test]
    fn fen_rejects_unknown_letters() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("0").is_err());
    }
}
