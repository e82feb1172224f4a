//! Pawn move generation: pushes, captures, promotions, en passant.

use crate::attacks::{line, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;

pub(super) fn gen_pawns(
    board: &Board,
    king_sq: Square,
    pinned: Bitboard,
    evasion_mask: Bitboard,
    list: &mut MoveList,
) {
    let us = board.side_to_move();
    let them = us.flip();
    let enemy = board.side(them);
    let occupied = board.occupied();
    let empty = !occupied;
    let our_pawns = board.pieces(us, PieceKind::Pawn);

    let promo_rank = match us {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    };
    let push = |bb: Bitboard| -> Bitboard {
        match us {
            Color::White => bb << 8,
            Color::Black => bb >> 8,
        }
    };
    // Step from a push destination back to the pawn that made it.
    let back = |sq: Square, ranks: i8| -> Square {
        match us {
            Color::White => sq.offset_ranks(-ranks),
            Color::Black => sq.offset_ranks(ranks),
        }
    };

    let single_push = push(our_pawns) & empty;

    // Single pushes, promoting when the destination is the last rank.
    for dst in single_push & evasion_mask {
        let src = back(dst, 1);
        if pinned.contains(src) && !line(king_sq, src).contains(dst) {
            continue;
        }
        if promo_rank.contains(dst) {
            for flag in MoveFlag::PROMOTIONS {
                list.push(Move::with_flag(src, dst, flag));
            }
        } else {
            list.push(Move::new(src, dst));
        }
    }

    // Double pushes from the start rank; both squares must be empty.
    let double_rank = match us {
        Color::White => Bitboard::RANK_4,
        Color::Black => Bitboard::RANK_5,
    };
    for dst in push(single_push) & empty & double_rank & evasion_mask {
        let src = back(dst, 2);
        if pinned.contains(src) && !line(king_sq, src).contains(dst) {
            continue;
        }
        list.push(Move::with_flag(src, dst, MoveFlag::DoublePush));
    }

    // Ordinary diagonal captures.
    for src in our_pawns {
        for dst in pawn_attacks(us, src) & enemy & evasion_mask {
            if pinned.contains(src) && !line(king_sq, src).contains(dst) {
                continue;
            }
            if promo_rank.contains(dst) {
                for flag in MoveFlag::PROMOTIONS {
                    list.push(Move::with_flag(src, dst, flag));
                }
            } else {
                list.push(Move::new(src, dst));
            }
        }
    }

    // En passant. The capture resolves a check either by landing on the
    // evasion mask or by removing the checking pawn itself.
    if let Some(ep_sq) = board.en_passant() {
        let captured_sq = match us {
            Color::White => ep_sq.offset_ranks(-1),
            Color::Black => ep_sq.offset_ranks(1),
        };
        for src in pawn_attacks(them, ep_sq) & our_pawns {
            if !evasion_mask.contains(ep_sq) && !evasion_mask.contains(captured_sq) {
                continue;
            }
            if pinned.contains(src) && !line(king_sq, src).contains(ep_sq) {
                continue;
            }
            // Removing both pawns can open a rank toward the king; re-cast
            // rook rays against the post-capture occupancy to catch the
            // discovered check no pin mask sees.
            let after =
                (occupied ^ src.bitboard() ^ captured_sq.bitboard()) | ep_sq.bitboard();
            let rook_queen =
                board.pieces(them, PieceKind::Rook) | board.pieces(them, PieceKind::Queen);
            if (rook_attacks(king_sq, after) & rook_queen).is_nonempty() {
                continue;
            }
            list.push(Move::with_flag(src, ep_sq, MoveFlag::EnPassant));
        }
    }
}
