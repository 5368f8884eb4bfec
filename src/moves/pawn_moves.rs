//! Pawn movement.
//!
//! White pawns advance towards rank 0 and Black pawns towards rank 7. A
//! pawn may step forward onto an empty square, double-step only while it
//! still stands on its original square with both squares ahead empty, and
//! capture one square diagonally forward onto an enemy piece. En passant
//! is not part of this rule set.

use crate::game_state::chess_types::{Board, Color, Piece, Square, SquareSet};

pub const WHITE_PAWN_CAPTURES: [u64; 64] = generate_pawn_captures(-1);
pub const BLACK_PAWN_CAPTURES: [u64; 64] = generate_pawn_captures(1);

/// Diagonal capture geometry, independent of occupancy.
#[inline]
pub const fn pawn_capture_squares(color: Color, square: Square) -> SquareSet {
    match color {
        Color::White => SquareSet(WHITE_PAWN_CAPTURES[square.index() as usize]),
        Color::Black => SquareSet(BLACK_PAWN_CAPTURES[square.index() as usize]),
    }
}

pub fn pawn_destinations(piece: &Piece, board: &Board) -> SquareSet {
    let direction = piece.color.pawn_direction();
    let mut out = SquareSet::EMPTY;

    if let Some(one_step) = piece.square.offset(0, direction) {
        if board.is_empty(one_step) {
            out.insert(one_step);

            if piece.square == piece.origin {
                if let Some(two_step) = one_step.offset(0, direction) {
                    if board.is_empty(two_step) {
                        out.insert(two_step);
                    }
                }
            }
        }
    }

    out |= pawn_capture_squares(piece.color, piece.square) & board.occupancy(piece.color.opposite());
    out
}

const fn generate_pawn_captures(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + rank_step;
        let mut attacks = 0u64;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (rank as usize * 8 + (file - 1) as usize);
            }
            if file < 7 {
                attacks |= 1u64 << (rank as usize * 8 + (file + 1) as usize);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
