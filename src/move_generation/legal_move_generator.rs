//! Legal move validation.
//!
//! A move is legal when it matches the mover's pseudo-legal geometry (or is
//! a castling move that passes [`can_castle`]) and the mover's king is not
//! attacked on the board that results from playing it. The resulting board
//! is a disposable copy; the board under test is never modified.

use crate::game_state::chess_types::{Board, Color, PieceKind, Square, SquareSet};
use crate::game_state::game_state::GameStatus;
use crate::move_generation::legal_move_apply::{build_move, is_promotion_square};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::{can_castle, castle_move_to, castling_destinations};
use crate::moves::move_descriptions::{Move, MoveKind};
use crate::moves::piece_rules::pseudo_legal_destinations;

pub fn is_legal(board: &Board, mv: &Move) -> bool {
    let Some(mover) = board.piece_at(mv.from) else {
        return false;
    };
    if mover.id != mv.mover {
        return false;
    }

    let geometry_ok = match mv.kind {
        MoveKind::Castle { rook_from, .. } => {
            castle_move_to(board, mover, mv.to).as_ref() == Some(mv)
                && can_castle(board, mv.from, rook_from)
        }
        MoveKind::Normal => {
            !is_promotion_square(mover.kind, mover.color, mv.to)
                && pseudo_legal_destinations(mover, board).contains(mv.to)
        }
        MoveKind::PromotionPending => {
            is_promotion_square(mover.kind, mover.color, mv.to)
                && pseudo_legal_destinations(mover, board).contains(mv.to)
        }
        MoveKind::PromotionComplete(kind) => {
            kind.is_promotion_choice()
                && is_promotion_square(mover.kind, mover.color, mv.to)
                && pseudo_legal_destinations(mover, board).contains(mv.to)
        }
    };
    if !geometry_ok {
        return false;
    }

    match board.apply(mv) {
        Ok(trial) => !is_king_in_check(&trial, mover.color),
        Err(_) => false,
    }
}

/// Destinations of the piece on `from` that pass [`is_legal`].
pub fn legal_destinations(board: &Board, from: Square) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };

    let mut candidates = pseudo_legal_destinations(piece, board);
    if piece.kind == PieceKind::King {
        candidates |= castling_destinations(board, piece);
    }

    candidates
        .iter()
        .filter(|&to| {
            build_move(board, from, to)
                .map(|mv| is_legal(board, &mv))
                .unwrap_or(false)
        })
        .collect()
}

/// Every legal move of `color`. Promotions appear once, as
/// `PromotionPending`.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut out = Vec::new();
    for piece in board.pieces_of(color) {
        for to in legal_destinations(board, piece.square) {
            if let Ok(mv) = build_move(board, piece.square, to) {
                out.push(mv);
            }
        }
    }
    out
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|piece| !legal_destinations(board, piece.square).is_empty())
}

/// End-of-game evaluation for the side about to move.
///
/// A side whose king is gone has lost; no further moves are evaluated.
pub fn evaluate_status(board: &Board, side_to_move: Color) -> GameStatus {
    if board.king_square(side_to_move).is_none() {
        GameStatus::Checkmate {
            winner: side_to_move.opposite(),
        }
    } else if has_any_legal_move(board, side_to_move) {
        GameStatus::InProgress
    } else if is_king_in_check(board, side_to_move) {
        GameStatus::Checkmate {
            winner: side_to_move.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}
