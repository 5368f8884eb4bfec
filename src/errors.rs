//! Errors used throughout the rules engine.
//!
//! `RuleError` is the single error type of the crate. The first group of
//! variants are rejected operations: the caller's request was refused, the
//! game state is unchanged (apart from a cleared selection after an illegal
//! move) and the caller should simply ask for new input. Parsing variants
//! report bad text at the boundary. `InvalidState` reports an internal
//! inconsistency and is never produced by the controller in normal play.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Selected an empty square or a piece of the side not to move.
    #[error("no piece of the side to move on {0}")]
    InvalidSelection(Square),

    /// Destination fails geometry, blocking, castling preconditions, or
    /// leaves the mover's king in check.
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// A promotion choice outside a pending promotion, or naming anything
    /// other than queen, rook, bishop or knight. Carries the choice as given.
    #[error("invalid promotion choice: {0}")]
    InvalidPromotionChoice(String),

    #[error("game is already over: {0}")]
    OperationAfterGameOver(GameStatus),

    #[error("no piece is selected")]
    NoFigureSelected,

    #[error("a promotion piece must be chosen first")]
    PromotionChoiceRequired,

    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid game state: {0}")]
    InvalidState(String),
}
