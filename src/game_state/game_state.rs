//! Live game record.
//!
//! `GameState` holds the board, whose turn it is, the notation log and the
//! phase of the current turn. The controller owns exactly one of these per
//! game and replaces it wholesale on restart.

use std::fmt;

use crate::errors::RuleError;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::square_to_algebraic;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The mated side, for a checkmate.
    pub fn loser(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner.opposite()),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => {
                write!(f, "checkmate, {} is mated, {winner} wins", winner.opposite())
            }
            GameStatus::Stalemate => write!(f, "stalemate, draw"),
        }
    }
}

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingSelection,
    FigureSelected {
        square: Square,
        destinations: SquareSet,
    },
    /// The pawn already stands on its last rank; the turn finishes once a
    /// promotion kind is chosen.
    AwaitingPromotionChoice { pending: Move },
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    /// Starts at 1 and increases after each Black move.
    pub move_number: u16,
    /// One entry per move number, `"<n>. <white> <black>"`.
    pub notation: Vec<String>,
    /// Completed moves in play order.
    pub move_log: Vec<Move>,
    pub phase: TurnPhase,
    pub status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            move_number: 1,
            notation: Vec::new(),
            move_log: Vec::new(),
            phase: TurnPhase::AwaitingSelection,
            status: GameStatus::InProgress,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        Self {
            board: Board::starting_position(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, RuleError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn selected_square(&self) -> Option<Square> {
        match self.phase {
            TurnPhase::FigureSelected { square, .. } => Some(square),
            _ => None,
        }
    }

    pub fn pending_promotion(&self) -> Option<&Move> {
        match &self.phase {
            TurnPhase::AwaitingPromotionChoice { pending } => Some(pending),
            _ => None,
        }
    }

    /// Records a finished move in the notation and the move log, then hands
    /// the turn to the other side.
    pub(crate) fn record_completed_move(&mut self, mv: Move) {
        self.record_notation(mv.to);
        self.move_log.push(mv);
        self.side_to_move = self.side_to_move.opposite();
        self.phase = TurnPhase::AwaitingSelection;
    }

    fn record_notation(&mut self, destination: Square) {
        let text = square_to_algebraic(destination);
        match self.side_to_move {
            Color::White => {
                self.notation.push(format!("{}. {text}", self.move_number));
            }
            Color::Black => {
                let open_entry = self
                    .notation
                    .last_mut()
                    .filter(|entry| entry.split(' ').count() == 2);
                match open_entry {
                    Some(entry) => {
                        entry.push(' ');
                        entry.push_str(&text);
                    }
                    // Black moved first (position set up from FEN).
                    None => self.notation.push(format!("{}. ... {text}", self.move_number)),
                }
                self.move_number = self.move_number.saturating_add(1);
            }
        }
    }
}
