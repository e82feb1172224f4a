//! In-place move execution and reversal.
//!
//! `make_move` trusts the flag carried by the [`Move`]: flags are set by
//! the generator (or copied from it by the notation parser) and are never
//! re-derived from coordinates here.

use tracing::trace;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Everything needed to restore the previous position exactly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Undo {
    /// The move that was applied.
    mv: Move,
    /// The piece that stood on the destination square. `None` for en
    /// passant: the captured pawn is not on the destination and is
    /// restored from the flag instead.
    captured: Option<Piece>,
    /// En-passant target before the move.
    en_passant: Option<Square>,
    /// Castling rights before the move.
    castling: CastleRights,
}

/// Castling rights lost when a move touches the indexed square, as source
/// or destination. Covers king moves, rook moves, and rooks captured on
/// their home corners.
const CASTLE_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

/// Post-castling rook relocation, keyed by the king's destination.
const fn rook_castle_squares(king_dest: Square) -> (Square, Square) {
    match king_dest.index() {
        6 => (Square::H1, Square::F1),  // white O-O
        2 => (Square::A1, Square::D1),  // white O-O-O
        62 => (Square::H8, Square::F8), // black O-O
        58 => (Square::A8, Square::D8), // black O-O-O
        _ => unreachable!(),
    }
}

impl Board {
    /// Apply `mv` to the position and push an undo record.
    ///
    /// `mv` must come from [`legal_moves`](Self::legal_moves) for the
    /// current position; this is not re-checked outside debug builds.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move();
        let them = us.flip();
        let src = mv.source();
        let dst = mv.dest();

        debug_assert!(
            self.legal_moves().as_slice().contains(&mv),
            "make_move got a move not in the legal list: {mv:?}"
        );

        // Whatever stands on the destination is captured, except when
        // castling (the rook is ours) and en passant (the square is empty).
        let captured = if mv.is_castle() {
            None
        } else {
            self.take_piece(dst)
        };

        self.history.push(Undo {
            mv,
            captured,
            en_passant: self.en_passant(),
            castling: self.castling(),
        });

        let mover = match self.take_piece(src) {
            Some(piece) => piece,
            None => unreachable!("legal move from an empty square"),
        };
        self.put_piece(dst, mover);

        self.set_en_passant(None);
        match mv.flag() {
            MoveFlag::Normal => {}
            MoveFlag::DoublePush => {
                // The skipped square sits between source and destination.
                let skipped = Square::from_index((src.index() + dst.index()) as u8 / 2);
                self.set_en_passant(skipped);
            }
            MoveFlag::EnPassant => {
                // The captured pawn is one rank behind the arrival square.
                let behind = match us {
                    Color::White => dst.offset_ranks(-1),
                    Color::Black => dst.offset_ranks(1),
                };
                let taken = self.take_piece(behind);
                debug_assert_eq!(taken, Some(Piece::new(PieceKind::Pawn, them)));
            }
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let (rook_src, rook_dst) = rook_castle_squares(dst);
                match self.take_piece(rook_src) {
                    Some(rook) => self.put_piece(rook_dst, rook),
                    None => unreachable!("castling without a rook"),
                }
            }
            MoveFlag::PromoQueen
            | MoveFlag::PromoRook
            | MoveFlag::PromoBishop
            | MoveFlag::PromoKnight => {
                // promotion_kind is Some for exactly these flags
                let kind = mv.promotion_kind().unwrap_or(PieceKind::Queen);
                self.take_piece(dst);
                self.put_piece(dst, Piece::new(kind, us));
            }
        }

        let rights = self
            .castling()
            .remove(CASTLE_REVOKE[src.index()])
            .remove(CASTLE_REVOKE[dst.index()]);
        if rights != self.castling() {
            trace!(%mv, before = %self.castling(), after = %rights, "castling rights revoked");
            self.set_castling(rights);
        }

        self.set_side_to_move(them);
        self.cached_moves = None;

        debug_assert!(self.validate().is_ok(), "make_move broke an invariant");
    }

    /// Reverse the most recent [`make_move`](Self::make_move).
    ///
    /// Returns the move that was undone, or `None` if the history is
    /// empty. Restores the position bit-exactly (the move cache aside).
    pub fn undo_move(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        let mv = undo.mv;
        let them = self.side_to_move();
        let us = them.flip(); // the side that made the move
        let src = mv.source();
        let dst = mv.dest();

        self.set_side_to_move(us);
        self.set_castling(undo.castling);
        self.set_en_passant(undo.en_passant);

        match mv.flag() {
            MoveFlag::PromoQueen
            | MoveFlag::PromoRook
            | MoveFlag::PromoBishop
            | MoveFlag::PromoKnight => {
                // The pawn comes back in place of the promoted piece.
                self.take_piece(dst);
                self.put_piece(src, Piece::new(PieceKind::Pawn, us));
            }
            _ => {
                match self.take_piece(dst) {
                    Some(mover) => self.put_piece(src, mover),
                    None => unreachable!("undo of a move with an empty destination"),
                }
            }
        }

        match mv.flag() {
            MoveFlag::EnPassant => {
                let behind = match us {
                    Color::White => dst.offset_ranks(-1),
                    Color::Black => dst.offset_ranks(1),
                };
                self.put_piece(behind, Piece::new(PieceKind::Pawn, them));
            }
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let (rook_src, rook_dst) = rook_castle_squares(dst);
                match self.take_piece(rook_dst) {
                    Some(rook) => self.put_piece(rook_src, rook),
                    None => unreachable!("undo of castling without a rook"),
                }
            }
            _ => {}
        }

        if let Some(captured) = undo.captured {
            self.put_piece(dst, captured);
        }

        self.cached_moves = None;

        debug_assert!(self.validate().is_ok(), "undo_move broke an invariant");
        Some(mv)
    }
}
