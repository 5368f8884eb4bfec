//! Turning a `(from, to)` request into a classified `Move`.

use crate::errors::RuleError;
use crate::game_state::chess_types::{Board, Color, PieceKind, Square};
use crate::move_generation::legal_moves_king::castle_move_to;
use crate::moves::move_descriptions::{Move, MoveKind};

/// Builds the move the piece on `from` makes when sent to `to`.
///
/// Recognises castling (king two files towards an unmoved rook) and pawn
/// arrival on the farthest rank. Legality is not checked here.
pub fn build_move(board: &Board, from: Square, to: Square) -> Result<Move, RuleError> {
    let mover = board.piece_at(from).ok_or(RuleError::InvalidSelection(from))?;

    if mover.kind == PieceKind::King {
        if let Some(castle) = castle_move_to(board, mover, to) {
            return Ok(castle);
        }
    }

    let captured = board
        .piece_at(to)
        .filter(|target| target.color != mover.color)
        .map(|target| target.id);
    let kind = if is_promotion_square(mover.kind, mover.color, to) {
        MoveKind::PromotionPending
    } else {
        MoveKind::Normal
    };

    Ok(Move {
        from,
        to,
        mover: mover.id,
        captured,
        kind,
    })
}

#[inline]
pub fn is_promotion_square(kind: PieceKind, color: Color, to: Square) -> bool {
    kind == PieceKind::Pawn && to.rank() == color.promotion_rank()
}
