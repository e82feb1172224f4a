//! The position: piece placement, side to move, castling rights, en
//! passant target, undo history and a cached legal-move list.

use std::fmt;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::fen::STARTING_FEN;
use crate::make_move::Undo;
use crate::movegen::{MoveList, generate_legal_moves};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// Outcome classification for the side to move.
///
/// Only checkmate and stalemate are detected; repetition and fifty-move
/// draws are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The side to move has at least one legal move.
    InProgress,
    /// The side to move is checkmated; the carried color is the winner.
    Mate(Color),
    /// Stalemate.
    Draw,
}

/// A full chess position.
///
/// The mailbox grid and the bitboards are redundant views of the same
/// placement and are kept coherent by every mutation. Equality compares
/// the position proper; the undo history and the cached move list are
/// bookkeeping and do not participate.
#[derive(Clone)]
pub struct Board {
    /// Piece on each square, indexed by [`Square::index()`].
    squares: [Option<Piece>; Square::COUNT],
    /// Occupancy per color and piece kind.
    pieces: [[Bitboard; PieceKind::COUNT]; Color::COUNT],
    /// Occupancy per color.
    sides: [Bitboard; Color::COUNT],
    /// Union of both sides.
    occupied: Bitboard,
    /// Which side moves next.
    side_to_move: Color,
    /// Remaining castling rights.
    castling: CastleRights,
    /// Square a pawn just skipped, if the last move was a double push.
    en_passant: Option<Square>,
    /// Undo records, newest last.
    pub(crate) history: Vec<Undo>,
    /// Legal moves for the current position, dropped on any mutation.
    pub(crate) cached_moves: Option<MoveList>,
}

impl Board {
    /// The standard starting position.
    pub fn starting_position() -> Board {
        STARTING_FEN.parse().expect("starting FEN is valid")
    }

    /// A board with no pieces on it. FEN parsing fills it in.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
            pieces: [[Bitboard::EMPTY; PieceKind::COUNT]; Color::COUNT],
            sides: [Bitboard::EMPTY; Color::COUNT],
            occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            history: Vec::new(),
            cached_moves: None,
        }
    }

    /// Put a piece on an empty square, updating grid and bitboards.
    #[inline]
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "put on occupied {sq}");
        let mask = sq.bitboard();
        self.squares[sq.index()] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.sides[piece.color.index()] |= mask;
        self.occupied |= mask;
    }

    /// Remove and return the piece on a square, if any.
    #[inline]
    pub(crate) fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        let mask = sq.bitboard();
        self.pieces[piece.color.index()][piece.kind.index()] ^= mask;
        self.sides[piece.color.index()] ^= mask;
        self.occupied ^= mask;
        Some(piece)
    }

    /// The piece on `sq`, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Occupancy of one piece kind of one color.
    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Occupancy of one side.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Occupancy of both sides.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// The king square of `color`.
    ///
    /// # Panics
    ///
    /// Panics if the side has no king, which [`validate`](Self::validate)
    /// rules out for any board this crate hands out.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color, PieceKind::King)
            .lsb()
            .expect("each side has exactly one king")
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Current en-passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// All legal moves for the side to move.
    ///
    /// The list is computed once per position and cached; `make_move` and
    /// `undo_move` drop the cache.
    pub fn legal_moves(&mut self) -> MoveList {
        if self.cached_moves.is_none() {
            self.cached_moves = Some(generate_legal_moves(self));
        }
        self.cached_moves.clone().unwrap_or_default()
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.flip())
    }

    /// Classify the current position for the side to move.
    pub fn game_state(&mut self) -> GameState {
        if !self.legal_moves().is_empty() {
            GameState::InProgress
        } else if self.in_check() {
            GameState::Mate(self.side_to_move.flip())
        } else {
            GameState::Draw
        }
    }

    /// Whether `by` attacks `sq`, by reverse lookup: attack patterns are
    /// cast from the target square and intersected with the attacker's
    /// pieces of each kind.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.is_square_attacked_with_occ(sq, by, self.occupied)
    }

    /// [`is_square_attacked`](Self::is_square_attacked) against a caller-
    /// supplied occupancy, for rays that must see through or past a piece
    /// that is about to move.
    pub(crate) fn is_square_attacked_with_occ(
        &self,
        sq: Square,
        by: Color,
        occupied: Bitboard,
    ) -> bool {
        if (knight_attacks(sq) & self.pieces(by, PieceKind::Knight)).is_nonempty() {
            return true;
        }
        if (king_attacks(sq) & self.pieces(by, PieceKind::King)).is_nonempty() {
            return true;
        }
        // A pawn of `by` attacks `sq` iff a pawn of the other color on `sq`
        // would attack the pawn's square.
        if (pawn_attacks(by.flip(), sq) & self.pieces(by, PieceKind::Pawn)).is_nonempty() {
            return true;
        }
        let rook_queen = self.pieces(by, PieceKind::Rook) | self.pieces(by, PieceKind::Queen);
        if (rook_attacks(sq, occupied) & rook_queen).is_nonempty() {
            return true;
        }
        let bishop_queen = self.pieces(by, PieceKind::Bishop) | self.pieces(by, PieceKind::Queen);
        if (bishop_attacks(sq, occupied) & bishop_queen).is_nonempty() {
            return true;
        }
        false
    }

    /// Every square attacked by `by`, with slider rays cast against the
    /// given occupancy.
    ///
    /// Move generation passes the occupancy with the defending king
    /// removed, so a checked king cannot hide on the far side of its own
    /// square along the checking ray.
    pub fn attacked_squares(&self, by: Color, occupied: Bitboard) -> Bitboard {
        let mut attacked = Bitboard::EMPTY;
        for sq in self.pieces(by, PieceKind::Pawn) {
            attacked |= pawn_attacks(by, sq);
        }
        for sq in self.pieces(by, PieceKind::Knight) {
            attacked |= knight_attacks(sq);
        }
        for sq in self.pieces(by, PieceKind::King) {
            attacked |= king_attacks(sq);
        }
        let diagonal = self.pieces(by, PieceKind::Bishop) | self.pieces(by, PieceKind::Queen);
        for sq in diagonal {
            attacked |= bishop_attacks(sq, occupied);
        }
        let orthogonal = self.pieces(by, PieceKind::Rook) | self.pieces(by, PieceKind::Queen);
        for sq in orthogonal {
            attacked |= rook_attacks(sq, occupied);
        }
        attacked
    }

    /// Check every structural invariant.
    ///
    /// Run after FEN parsing and in debug builds after each mutation.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let kings = self.pieces(color, PieceKind::King).count();
            if kings != 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { color, count: kings });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        let pawns = self.pieces(Color::White, PieceKind::Pawn)
            | self.pieces(Color::Black, PieceKind::Pawn);
        if (pawns & back_ranks).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        // Piece bitboards must partition each side's occupancy.
        for color in Color::ALL {
            let mut union = Bitboard::EMPTY;
            let mut total = 0;
            for kind in PieceKind::ALL {
                let bb = self.pieces(color, kind);
                union |= bb;
                total += bb.count();
            }
            if union != self.sides[color.index()] || total != union.count() {
                return Err(BoardError::OverlappingPieces);
            }
        }
        if (self.sides[0] & self.sides[1]).is_nonempty() {
            return Err(BoardError::InconsistentSides);
        }
        if self.occupied != (self.sides[0] | self.sides[1]) {
            return Err(BoardError::InconsistentOccupied);
        }

        // Grid and bitboards must agree square by square.
        for sq in Square::all() {
            let expected = self.squares[sq.index()];
            let actual = Color::ALL.into_iter().find_map(|color| {
                PieceKind::ALL
                    .into_iter()
                    .find(|&kind| self.pieces(color, kind).contains(sq))
                    .map(|kind| Piece::new(kind, color))
            });
            if expected != actual {
                return Err(BoardError::MailboxMismatch);
            }
        }

        // A held castling right implies the king and rook are still home.
        let claims = [
            (CastleRights::WHITE_KING, 'K', Square::E1, Square::H1, Color::White),
            (CastleRights::WHITE_QUEEN, 'Q', Square::E1, Square::A1, Color::White),
            (CastleRights::BLACK_KING, 'k', Square::E8, Square::H8, Color::Black),
            (CastleRights::BLACK_QUEEN, 'q', Square::E8, Square::A8, Color::Black),
        ];
        for (right, letter, king_home, rook_home, color) in claims {
            if self.castling.contains(right) {
                let king_home_held = self.piece_on(king_home) == Some(Piece::new(PieceKind::King, color));
                let rook_home_held = self.piece_on(rook_home) == Some(Piece::new(PieceKind::Rook, color));
                if !king_home_held || !rook_home_held {
                    return Err(BoardError::MissingCastlingPiece { right: letter });
                }
            }
        }

        // The en-passant target is the empty square a pawn skipped last
        // move, so its rank is fixed by the side to move.
        if let Some(ep) = self.en_passant {
            let expected_rank = match self.side_to_move {
                Color::White => Rank::Rank6,
                Color::Black => Rank::Rank3,
            };
            if ep.rank() != expected_rank || self.occupied.contains(ep) {
                return Err(BoardError::BadEnPassantTarget);
            }
        }

        Ok(())
    }

    /// A wrapper that renders the board as an 8x8 text grid.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.squares == other.squares
            && self.pieces == other.pieces
            && self.sides == other.sides
            && self.occupied == other.occupied
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is the FEN form, implemented alongside the parser.
        write!(f, "Board(\"{}\")", self)
    }
}

/// Renders ranks 8 down to 1 with `.` for empty squares.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            write!(f, "{}  ", rank_idx + 1)?;
            for file_idx in 0u8..8 {
                let sq = Square::from_index_unchecked(rank_idx * 8 + file_idx);
                let c = match self.0.piece_on(sq) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, GameState};
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn starting_position_validates() {
        Board::starting_position().validate().unwrap();
    }

    #[test]
    fn starting_position_placement() {
        let board = Board::starting_position();
        assert_eq!(board.piece_on(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.piece_on(Square::A1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_on(Square::E4), None);
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn king_squares() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn put_and_take_keep_views_coherent() {
        let mut board = Board::starting_position();
        let pawn = board.take_piece(Square::E2).unwrap();
        assert_eq!(pawn, Piece::WHITE_PAWN);
        assert!(!board.occupied().contains(Square::E2));
        board.put_piece(Square::E4, pawn);
        assert_eq!(board.piece_on(Square::E4), Some(Piece::WHITE_PAWN));
        board.validate().unwrap();
    }

    #[test]
    fn take_from_empty_square_is_none() {
        let mut board = Board::starting_position();
        assert_eq!(board.take_piece(Square::E4), None);
    }

    #[test]
    fn starting_attacks() {
        let board = Board::starting_position();
        assert!(board.is_square_attacked(Square::F3, Color::White)); // Ng1
        assert!(board.is_square_attacked(Square::E2, Color::White));
        assert!(!board.is_square_attacked(Square::E4, Color::White));
        assert!(!board.is_square_attacked(Square::E4, Color::Black));
    }

    #[test]
    fn attacked_squares_matches_per_square_probe() {
        let board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        for by in Color::ALL {
            let set = board.attacked_squares(by, board.occupied());
            for sq in Square::all() {
                assert_eq!(
                    set.contains(sq),
                    board.is_square_attacked(sq, by),
                    "mismatch on {sq} for {by:?}"
                );
            }
        }
    }

    #[test]
    fn game_state_starting_is_in_progress() {
        let mut board = Board::starting_position();
        assert_eq!(board.game_state(), GameState::InProgress);
        assert!(!board.in_check());
    }

    #[test]
    fn game_state_fools_mate() {
        // 1.f3 e5 2.g4 Qh4#, and White has no reply.
        let mut board: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        assert_eq!(board.game_state(), GameState::Mate(Color::Black));
    }

    #[test]
    fn game_state_stalemate() {
        // Black king cornered on a8 by king and queen, not in check.
        let mut board: Board = "k7/2Q5/1K6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(board.game_state(), GameState::Draw);
    }

    #[test]
    fn bare_kings_still_have_moves() {
        let mut board: Board = "8/8/8/8/8/8/4K3/4k3 w - - 0 1".parse().unwrap();
        assert!(!board.legal_moves().is_empty());
        assert_eq!(board.game_state(), GameState::InProgress);
    }

    #[test]
    fn equality_ignores_history_and_cache() {
        let mut a = Board::starting_position();
        let b = Board::starting_position();
        let _ = a.legal_moves(); // populate the cache on one of them
        assert_eq!(a, b);
    }

    #[test]
    fn pretty_renders_both_back_ranks() {
        let rendered = Board::starting_position().pretty().to_string();
        assert!(rendered.contains("r n b q k b n r"));
        assert!(rendered.contains("R N B Q K B N R"));
        assert!(rendered.contains("a b c d e f g h"));
    }
}
