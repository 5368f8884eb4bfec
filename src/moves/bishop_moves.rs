//! Bishop movement.
//!
//! Also hosts the ray tracer shared by every sliding piece: a ray walks
//! outward one square at a time and stops on the first occupied square,
//! which is included so the caller can decide whether it is a capture.

use crate::game_state::chess_types::{Board, Piece, Square, SquareSet};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Squares a bishop on `square` reaches given `occupancy`, blockers included.
#[inline]
pub fn bishop_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    trace_rays(square, &BISHOP_DIRECTIONS, occupancy)
}

/// Pseudo-legal bishop destinations: diagonal rays minus own pieces.
pub fn bishop_destinations(piece: &Piece, board: &Board) -> SquareSet {
    bishop_attacks(piece.square, board.occupancy_all()) & !board.occupancy(piece.color)
}

pub(crate) fn trace_rays(square: Square, directions: &[(i8, i8)], occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    for &(file_step, rank_step) in directions {
        attacks |= trace_ray(square, file_step, rank_step, occupancy);
    }
    attacks
}

fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    let mut current = square.offset(file_step, rank_step);

    while let Some(target) = current {
        attacks.insert(target);
        if occupancy.contains(target) {
            break;
        }
        current = target.offset(file_step, rank_step);
    }

    attacks
}
