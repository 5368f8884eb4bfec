//! Rook movement along ranks and files.

use crate::game_state::chess_types::{Board, Piece, Square, SquareSet};
use crate::moves::bishop_moves::trace_rays;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn rook_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    trace_rays(square, &ROOK_DIRECTIONS, occupancy)
}

pub fn rook_destinations(piece: &Piece, board: &Board) -> SquareSet {
    rook_attacks(piece.square, board.occupancy_all()) & !board.occupancy(piece.color)
}
