//! Bishop, rook and queen move generation.

use crate::attacks::{bishop_attacks, line, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;

pub(super) fn gen_sliders(
    board: &Board,
    king_sq: Square,
    pinned: Bitboard,
    evasion_mask: Bitboard,
    list: &mut MoveList,
) {
    gen_one_kind(board, king_sq, pinned, evasion_mask, list, PieceKind::Bishop, bishop_attacks);
    gen_one_kind(board, king_sq, pinned, evasion_mask, list, PieceKind::Rook, rook_attacks);
    gen_one_kind(board, king_sq, pinned, evasion_mask, list, PieceKind::Queen, queen_attacks);
}

fn gen_one_kind(
    board: &Board,
    king_sq: Square,
    pinned: Bitboard,
    evasion_mask: Bitboard,
    list: &mut MoveList,
    kind: PieceKind,
    attacks: impl Fn(Square, Bitboard) -> Bitboard,
) {
    let us = board.side_to_move();
    let friendly = board.side(us);
    let occupied = board.occupied();

    for src in board.pieces(us, kind) {
        let mut targets = attacks(src, occupied) & !friendly & evasion_mask;
        // A pinned slider keeps to the ray through its king.
        if pinned.contains(src) {
            targets &= line(king_sq, src);
        }
        for dst in targets {
            list.push(Move::new(src, dst));
        }
    }
}
