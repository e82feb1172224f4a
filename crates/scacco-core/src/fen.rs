//! FEN parsing and serialization for [`Board`].
//!
//! All six fields are required and checked, but the halfmove clock and
//! fullmove number are not tracked by the engine: they only need to be
//! numeric, and serialization always emits `0 1`.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::rank::Rank;
use crate::square::Square;

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::empty();

        // FEN lists rank 8 first, files a to h within each rank.
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += run as u8;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    if file >= 8 {
                        return Err(FenError::BadRankLength {
                            rank: row,
                            length: file as usize + 1,
                        });
                    }
                    let sq = Square::from_index_unchecked(rank * 8 + file);
                    board.put_piece(sq, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: row,
                    length: file as usize,
                });
            }
        }

        board.set_side_to_move(match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        });

        board.set_castling(CastleRights::from_fen(fields[2])?);

        if fields[3] != "-" {
            let sq = Square::from_algebraic(fields[3])
                .filter(|sq| matches!(sq.rank(), Rank::Rank3 | Rank::Rank6))
                .ok_or_else(|| FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                })?;
            board.set_en_passant(Some(sq));
        }

        // The counters are ignored but must still be numbers.
        for (field, name) in [(fields[4], "halfmove clock"), (fields[5], "fullmove number")] {
            field
                .parse::<u16>()
                .map_err(|_| FenError::InvalidMoveCounter {
                    field: name,
                    found: field.to_string(),
                })?;
        }

        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            let mut run = 0u8;
            for file_idx in 0u8..8 {
                let sq = Square::from_index_unchecked(rank_idx * 8 + file_idx);
                match self.piece_on(sq) {
                    Some(piece) => {
                        if run > 0 {
                            write!(f, "{run}")?;
                            run = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                write!(f, "{run}")?;
            }
            if rank_idx > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        // Move counters are not tracked; emit the fixed defaults.
        write!(f, " 0 1")
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::error::{BoardError, FenError};
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let board: Board = fen.parse().unwrap();
        assert_eq!(board.to_string(), fen, "FEN roundtrip failed");
        let again: Board = board.to_string().parse().unwrap();
        assert_eq!(board, again);
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn roundtrip_with_en_passant() {
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 1");
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn roundtrip_sparse_endgame() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn counters_are_normalized_on_output() {
        let board: Board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 31 17"
            .parse()
            .unwrap();
        assert!(board.to_string().ends_with(" 0 1"));
    }

    #[test]
    fn starting_position_matches_constant() {
        let parsed: Board = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Board::starting_position());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            "8/8/8/8/8/8/8/8 w -".parse::<Board>(),
            Err(FenError::WrongFieldCount { found: 3 })
        ));
    }

    #[test]
    fn rejects_bad_placement() {
        assert!("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>().is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>().is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_bad_color_and_counters() {
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Board>().is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1".parse::<Board>().is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 x".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_en_passant_off_the_skip_ranks() {
        // e4 can never be a skipped square.
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1".parse::<Board>().is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_en_passant_rank_inconsistent_with_side() {
        // White to move cannot have a rank-3 target.
        let result = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1".parse::<Board>();
        assert!(matches!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::BadEnPassantTarget
            })
        ));
    }

    #[test]
    fn rejects_missing_kings() {
        assert!("8/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>().is_err());
        assert!("4k3/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>().is_err());
        assert!("4k3/8/8/8/8/8/8/2K2K2 w - - 0 1".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_castling_right_without_the_rook() {
        // White claims K but the h1 rook is gone.
        let result = "r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1".parse::<Board>();
        assert!(matches!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::MissingCastlingPiece { right: 'K' }
            })
        ));
    }

    #[test]
    fn rejects_castling_right_with_displaced_king() {
        let result = "r3k2r/8/8/8/8/8/8/R4K1R w KQ - 0 1".parse::<Board>();
        assert!(matches!(
            result,
            Err(FenError::InvalidBoard {
                source: BoardError::MissingCastlingPiece { .. }
            })
        ));
    }

    #[test]
    fn rejects_pawns_on_back_ranks() {
        assert!("P3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>().is_err());
    }

    #[test]
    fn scenario_fen_with_wrong_side_rank_is_still_parseable() {
        // Rank-6 target with White to move is the consistent orientation.
        let board: Board = "rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 2"
            .parse()
            .unwrap();
        assert_eq!(board.en_passant(), Some(Square::D6));
    }
}
