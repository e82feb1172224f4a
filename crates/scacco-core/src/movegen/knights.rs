//! Knight move generation.

use crate::attacks::knight_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;

use super::MoveList;

pub(super) fn gen_knights(
    board: &Board,
    pinned: Bitboard,
    evasion_mask: Bitboard,
    list: &mut MoveList,
) {
    let us = board.side_to_move();
    let friendly = board.side(us);

    // A pinned knight never has a legal move: no knight jump stays on the
    // pin ray.
    for src in board.pieces(us, PieceKind::Knight) & !pinned {
        for dst in knight_attacks(src) & !friendly & evasion_mask {
            list.push(Move::new(src, dst));
        }
    }
}
