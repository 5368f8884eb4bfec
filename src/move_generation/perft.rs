//! Move-path enumeration for validating the legality layer.
//!
//! Counts every legal move sequence of a given depth and classifies the
//! final move of each. Promotions are expanded into one leaf per promotion
//! kind, matching published reference counts for positions without en
//! passant captures.

use crate::errors::RuleError;
use crate::game_state::chess_types::{Board, Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves};
use crate::moves::move_descriptions::{Move, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> Result<PerftCounts, RuleError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let side = game_state.side_to_move;
    let mut total = PerftCounts::default();

    for mv in expanded_moves(&game_state.board, side) {
        let mut local = PerftCounts::default();
        perft_recurse(&game_state.board, side, &mv, depth, 1, &mut local)?;
        total.merge(local);
    }

    Ok(total)
}

/// Node count below each root move, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Result<Vec<(Move, usize)>, RuleError> {
    let side = game_state.side_to_move;
    let mut out = Vec::new();

    for mv in expanded_moves(&game_state.board, side) {
        let mut local = PerftCounts::default();
        perft_recurse(&game_state.board, side, &mv, depth.max(1), 1, &mut local)?;
        out.push((mv, local.nodes));
    }

    Ok(out)
}

fn expanded_moves(board: &Board, side: Color) -> Vec<Move> {
    let mut out = Vec::new();
    for mv in legal_moves(board, side) {
        if mv.kind == MoveKind::PromotionPending {
            out.extend(PieceKind::PROMOTION_CHOICES.iter().map(|&kind| mv.promoted_to(kind)));
        } else {
            out.push(mv);
        }
    }
    out
}

fn perft_recurse(
    board: &Board,
    side: Color,
    mv: &Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> Result<(), RuleError> {
    let next = board.apply(mv)?;
    let opponent = side.opposite();

    if current_depth == search_depth {
        counts.nodes += 1;

        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.is_promotion() {
            counts.promotions += 1;
        }
        if is_king_in_check(&next, opponent) {
            counts.checks += 1;
            if !has_any_legal_move(&next, opponent) {
                counts.checkmates += 1;
            }
        }

        return Ok(());
    }

    for child in expanded_moves(&next, opponent) {
        perft_recurse(&next, opponent, &child, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}
