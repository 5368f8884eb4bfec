//! Move values exchanged between the validator, the board and the controller.

use std::fmt;

use crate::game_state::chess_types::{PieceId, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    /// King and rook relocate together in one application.
    Castle {
        rook: PieceId,
        rook_from: Square,
        rook_to: Square,
    },
    /// A pawn reached its farthest rank and still waits for its new kind.
    PromotionPending,
    /// The pawn is replaced by a fresh piece of the given kind.
    PromotionComplete(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub mover: PieceId,
    pub captured: Option<PieceId>,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::PromotionPending | MoveKind::PromotionComplete(_)
        )
    }

    /// The same move, finished with the chosen promotion kind.
    pub fn promoted_to(&self, kind: PieceKind) -> Move {
        Move {
            kind: MoveKind::PromotionComplete(kind),
            ..*self
        }
    }

    /// In-place swap of the pawn already standing on `to` for its
    /// promotion piece.
    pub fn promotion_swap(&self, kind: PieceKind) -> Move {
        Move {
            from: self.to,
            to: self.to,
            mover: self.mover,
            captured: None,
            kind: MoveKind::PromotionComplete(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, separator, self.to)?;
        match self.kind {
            MoveKind::PromotionComplete(kind) => write!(f, "={}", kind.to_char().to_ascii_uppercase()),
            MoveKind::PromotionPending => write!(f, "=?"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveKind};
    use crate::game_state::chess_types::{PieceId, PieceKind, Square};

    #[test]
    fn promotion_swap_stays_on_destination() {
        let pending = Move {
            from: Square::new(0, 1).expect("a7"),
            to: Square::new(1, 0).expect("b8"),
            mover: PieceId(8),
            captured: Some(PieceId(1)),
            kind: MoveKind::PromotionPending,
        };
        let swap = pending.promotion_swap(PieceKind::Queen);
        assert_eq!(swap.from, pending.to);
        assert_eq!(swap.to, pending.to);
        assert_eq!(swap.captured, None);
        assert_eq!(pending.promoted_to(PieceKind::Knight).to_string(), "a7xb8=N");
    }
}
