//! Square-to-piece board value.
//!
//! `Board` is a plain value. Every change to a position goes through
//! [`Board::apply`], which returns a new board and leaves the receiver
//! untouched, so legality checks can play hypothetical moves on a
//! throwaway copy.

use crate::errors::RuleError;
use crate::game_state::chess_rules::BACK_RANK_ORDER;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    occupancy_by_color: [u64; 2],
    next_piece_id: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            occupancy_by_color: [0; 2],
            next_piece_id: 0,
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting layout: back ranks in [`BACK_RANK_ORDER`] and a
    /// full pawn rank in front of each.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK_ORDER.into_iter().enumerate() {
                if let Some(square) = Square::new(file as u8, color.back_rank()) {
                    board.place_piece(color, kind, square);
                }
            }
            for file in 0..8 {
                if let Some(square) = Square::new(file, color.pawn_rank()) {
                    board.place_piece(color, PieceKind::Pawn, square);
                }
            }
        }
        board
    }

    /// Puts a fresh, unmoved piece on an empty square during setup.
    pub(crate) fn place_piece(&mut self, color: Color, kind: PieceKind, square: Square) -> PieceId {
        let id = self.allocate_id();
        self.squares[square.index() as usize] = Some(Piece {
            id,
            color,
            kind,
            square,
            has_moved: false,
            origin: square,
        });
        self.recalc_occupancy();
        id
    }

    /// Setup-time access used to adjust moved flags and origins.
    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.index() as usize].as_mut()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index() as usize].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index() as usize].is_none()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn find_piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|piece| piece.id == id)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.square)
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> SquareSet {
        SquareSet(self.occupancy_by_color[color.index()])
    }

    #[inline]
    pub fn occupancy_all(&self) -> SquareSet {
        SquareSet(
            self.occupancy_by_color[Color::White.index()] | self.occupancy_by_color[Color::Black.index()],
        )
    }

    /// Squares strictly between `a` and `b`, ordered from `a` towards `b`.
    ///
    /// Empty when the squares are adjacent, equal, or not on a shared rank,
    /// file or diagonal.
    pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
        let df = b.file() as i8 - a.file() as i8;
        let dr = b.rank() as i8 - a.rank() as i8;

        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if a == b || !aligned {
            return Vec::new();
        }

        let step_f = df.signum();
        let step_r = dr.signum();
        let mut out = Vec::new();
        let mut current = a.offset(step_f, step_r);
        while let Some(square) = current {
            if square == b {
                break;
            }
            out.push(square);
            current = square.offset(step_f, step_r);
        }
        out
    }

    /// Returns a new board with `mv` applied.
    ///
    /// Clears the source, removes the captured piece, places the mover on
    /// the destination with `has_moved` set, and for castling relocates the
    /// rook in the same step. `PromotionComplete` puts a newly created piece
    /// of the chosen kind on the destination instead of the mover.
    pub fn apply(&self, mv: &Move) -> Result<Board, RuleError> {
        let mover = *self
            .piece_at(mv.from)
            .ok_or_else(|| RuleError::InvalidState(format!("no piece on source square {}", mv.from)))?;
        if mover.id != mv.mover {
            return Err(RuleError::InvalidState(format!(
                "piece {} on {} is not the mover {}",
                mover.id, mv.from, mv.mover
            )));
        }

        let mut next = self.clone();
        next.squares[mv.from.index() as usize] = None;

        if let Some(captured) = mv.captured {
            match next.squares[mv.to.index() as usize] {
                Some(piece) if piece.id == captured && piece.color != mover.color => {
                    next.squares[mv.to.index() as usize] = None;
                }
                _ => {
                    return Err(RuleError::InvalidState(format!(
                        "captured piece {captured} is not on {}",
                        mv.to
                    )))
                }
            }
        }

        if !next.is_empty(mv.to) {
            return Err(RuleError::InvalidState(format!(
                "destination {} is occupied",
                mv.to
            )));
        }

        match mv.kind {
            MoveKind::PromotionComplete(kind) => {
                let id = next.allocate_id();
                next.squares[mv.to.index() as usize] = Some(Piece {
                    id,
                    color: mover.color,
                    kind,
                    square: mv.to,
                    has_moved: true,
                    origin: mv.to,
                });
            }
            MoveKind::Castle {
                rook,
                rook_from,
                rook_to,
            } => {
                next.put_moved(mover, mv.to);
                let rook_piece = next
                    .squares[rook_from.index() as usize]
                    .take()
                    .filter(|piece| piece.id == rook)
                    .ok_or_else(|| {
                        RuleError::InvalidState(format!("castling rook {rook} is not on {rook_from}"))
                    })?;
                if !next.is_empty(rook_to) {
                    return Err(RuleError::InvalidState(format!(
                        "castling rook destination {rook_to} is occupied"
                    )));
                }
                next.put_moved(rook_piece, rook_to);
            }
            MoveKind::Normal | MoveKind::PromotionPending => {
                next.put_moved(mover, mv.to);
            }
        }

        next.recalc_occupancy();
        Ok(next)
    }

    fn put_moved(&mut self, piece: Piece, to: Square) {
        self.squares[to.index() as usize] = Some(Piece {
            square: to,
            has_moved: true,
            ..piece
        });
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id = self.next_piece_id.saturating_add(1);
        id
    }

    fn recalc_occupancy(&mut self) {
        let mut occupancy = [0u64; 2];
        for piece in self.squares.iter().flatten() {
            occupancy[piece.color.index()] |= piece.square.mask();
        }
        self.occupancy_by_color = occupancy;
    }
}
