//! Attack and check detection.
//!
//! Built only on pseudo-legal destinations. Nothing here may call into the
//! legality filter, since legality itself is defined through these checks.

use crate::game_state::chess_types::{Board, Color, PieceKind, Square};
use crate::moves::piece_rules::pseudo_legal_destinations;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.king_square(color)
}

/// True when any piece of `attacker_color` has `square` among its
/// pseudo-legal destinations.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|piece| pseudo_legal_destinations(piece, board).contains(square))
}

/// A side without a king is never reported in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    board
        .pieces_of(attacker_color)
        .filter(|piece| pseudo_legal_destinations(piece, board).contains(square))
        .map(|piece| (piece.square, piece.kind))
        .collect()
}
