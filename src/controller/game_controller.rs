//! Turn state machine driving one game.
//!
//! The controller owns the live [`GameState`] and is the only place it
//! changes. Every inbound event either succeeds with a [`TurnOutcome`] or is
//! rejected with a [`RuleError`]; a rejection leaves the state untouched,
//! except that an illegal target clears the current selection.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::controller::controller_config::{ControllerConfig, RestartPolicy};
use crate::errors::RuleError;
use crate::game_state::chess_types::{Color, PieceKind, Square, SquareSet};
use crate::game_state::game_state::{GameState, GameStatus, TurnPhase};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_generator::{evaluate_status, is_legal, legal_destinations};
use crate::moves::move_descriptions::{Move, MoveKind};
use crate::utils::render_game_state::render_board;

/// Result of an accepted inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A piece is selected; `destinations` are its legal targets.
    Selected {
        square: Square,
        destinations: SquareSet,
    },
    Deselected,
    /// The pawn stands on its last rank and waits for a promotion kind.
    AwaitingPromotion { square: Square },
    /// A move finished. `notation` is the entry it was written into and
    /// `status` the evaluation for the side now to move.
    Completed {
        mv: Move,
        notation: String,
        status: GameStatus,
    },
    Restarted,
}

#[derive(Debug, Clone)]
pub struct GameController {
    state: GameState,
    config: ControllerConfig,
    started_at: DateTime<Utc>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl GameController {
    /// Fresh game from the standard starting position.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            state: GameState::new_game(),
            config,
            started_at: Utc::now(),
        }
    }

    /// Takes over an existing position and evaluates it for the side to
    /// move, so a position that is already mate or stalemate is terminal.
    pub fn from_state(mut state: GameState, config: ControllerConfig) -> Self {
        if state.phase == TurnPhase::AwaitingSelection {
            state.status = evaluate_status(&state.board, state.side_to_move);
        }
        Self {
            state,
            config,
            started_at: Utc::now(),
        }
    }

    pub fn from_fen(fen: &str, config: ControllerConfig) -> Result<Self, RuleError> {
        Ok(Self::from_state(GameState::from_fen(fen)?, config))
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn notation(&self) -> &[String] {
        &self.state.notation
    }

    /// Legal targets of the selected piece, for highlighting.
    pub fn highlighted_squares(&self) -> SquareSet {
        match self.state.phase {
            TurnPhase::FigureSelected { destinations, .. } => destinations,
            _ => SquareSet::EMPTY,
        }
    }

    /// Selects a piece of the side to move. Selecting the already selected
    /// square again deselects it.
    pub fn select_square(&mut self, square: Square) -> Result<TurnOutcome, RuleError> {
        self.ensure_in_progress()?;

        match self.state.phase {
            TurnPhase::AwaitingPromotionChoice { .. } => Err(RuleError::PromotionChoiceRequired),
            TurnPhase::FigureSelected { square: selected, .. } if selected == square => {
                Ok(self.deselect())
            }
            TurnPhase::FigureSelected { .. } => Err(RuleError::InvalidSelection(square)),
            TurnPhase::AwaitingSelection => {
                let owned = self
                    .state
                    .board
                    .piece_at(square)
                    .is_some_and(|piece| piece.color == self.state.side_to_move);
                if !owned {
                    debug!("rejected selection of {square}");
                    return Err(RuleError::InvalidSelection(square));
                }

                let destinations = legal_destinations(&self.state.board, square);
                debug!("selected {square} with {} legal destinations", destinations.len());
                self.state.phase = TurnPhase::FigureSelected {
                    square,
                    destinations,
                };
                Ok(TurnOutcome::Selected {
                    square,
                    destinations,
                })
            }
        }
    }

    /// Moves the selected piece to `to`.
    ///
    /// An illegal target clears the selection and is reported as
    /// [`RuleError::IllegalMove`]. A pawn reaching its last rank stops in
    /// [`TurnPhase::AwaitingPromotionChoice`] without switching turns.
    pub fn choose_target(&mut self, to: Square) -> Result<TurnOutcome, RuleError> {
        self.ensure_in_progress()?;

        let from = match self.state.phase {
            TurnPhase::AwaitingSelection => return Err(RuleError::NoFigureSelected),
            TurnPhase::AwaitingPromotionChoice { .. } => return Err(RuleError::PromotionChoiceRequired),
            TurnPhase::FigureSelected { square, .. } => square,
        };
        if from == to {
            return Ok(self.deselect());
        }

        let mv = match build_move(&self.state.board, from, to) {
            Ok(mv) if is_legal(&self.state.board, &mv) => mv,
            _ => {
                debug!("rejected illegal move {from} -> {to}");
                self.state.phase = TurnPhase::AwaitingSelection;
                return Err(RuleError::IllegalMove { from, to });
            }
        };

        let next_board = self.state.board.apply(&mv)?;
        self.state.board = next_board;

        if mv.kind == MoveKind::PromotionPending {
            debug!("{} pawn reached {to}, waiting for promotion choice", self.state.side_to_move);
            self.state.phase = TurnPhase::AwaitingPromotionChoice { pending: mv };
            return Ok(TurnOutcome::AwaitingPromotion { square: to });
        }

        Ok(self.finish_move(mv))
    }

    /// Replaces the waiting pawn with a new piece of `kind`.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<TurnOutcome, RuleError> {
        self.ensure_in_progress()?;

        let pending = match self.state.phase {
            TurnPhase::AwaitingPromotionChoice { pending } if kind.is_promotion_choice() => pending,
            _ => return Err(RuleError::InvalidPromotionChoice(kind.to_string())),
        };

        let next_board = self.state.board.apply(&pending.promotion_swap(kind))?;
        self.state.board = next_board;

        Ok(self.finish_move(pending.promoted_to(kind)))
    }

    /// Board click: targets when a piece is selected, selects otherwise.
    pub fn click(&mut self, square: Square) -> Result<TurnOutcome, RuleError> {
        match self.state.phase {
            TurnPhase::FigureSelected { .. } if self.state.status == GameStatus::InProgress => {
                self.choose_target(square)
            }
            _ => self.select_square(square),
        }
    }

    /// Discards the current game and starts a new one.
    pub fn restart_game(&mut self) -> TurnOutcome {
        self.state = GameState::new_game();
        self.started_at = Utc::now();
        info!("new game started at {}", self.started_at.to_rfc3339());
        TurnOutcome::Restarted
    }

    fn ensure_in_progress(&self) -> Result<(), RuleError> {
        if self.state.status.is_over() {
            warn!("operation rejected, game is over ({})", self.state.status);
            return Err(RuleError::OperationAfterGameOver(self.state.status));
        }
        Ok(())
    }

    fn deselect(&mut self) -> TurnOutcome {
        self.state.phase = TurnPhase::AwaitingSelection;
        TurnOutcome::Deselected
    }

    fn finish_move(&mut self, mv: Move) -> TurnOutcome {
        let mover = self.state.side_to_move;
        self.state.record_completed_move(mv);

        let status = evaluate_status(&self.state.board, self.state.side_to_move);
        self.state.status = status;

        let notation = self.state.notation.last().cloned().unwrap_or_default();
        info!("{mover} played {mv} ({notation})");
        if self.config.log_board_after_move {
            debug!("\n{}", render_board(&self.state.board));
        }

        if status.is_over() {
            info!("game over: {status}");
            if self.config.restart_policy == RestartPolicy::Automatic {
                self.restart_game();
            }
        }

        TurnOutcome::Completed {
            mv,
            notation,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameController, TurnOutcome};
    use crate::controller::controller_config::{ControllerConfig, RestartPolicy};
    use crate::errors::RuleError;
    use crate::game_state::chess_types::{Board, Color, PieceKind, Square};
    use crate::game_state::game_state::{GameState, GameStatus, TurnPhase};

    fn sq(text: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(text).expect("valid square")
    }

    fn play(controller: &mut GameController, from: &str, to: &str) -> TurnOutcome {
        controller.select_square(sq(from)).expect("selection accepted");
        controller.choose_target(sq(to)).expect("move accepted")
    }

    fn fools_mate(controller: &mut GameController) -> TurnOutcome {
        play(controller, "f2", "f3");
        play(controller, "e7", "e5");
        play(controller, "g2", "g4");
        play(controller, "d8", "h4")
    }

    #[test]
    fn selection_exposes_legal_destinations() {
        let mut controller = GameController::default();
        let outcome = controller.select_square(sq("g1")).expect("own knight");
        let TurnOutcome::Selected { destinations, .. } = outcome else {
            panic!("expected a selection, got {outcome:?}");
        };
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(sq("f3")));
        assert!(destinations.contains(sq("h3")));
        assert_eq!(controller.highlighted_squares(), destinations);
    }

    #[test]
    fn selecting_empty_or_enemy_squares_is_rejected() {
        let mut controller = GameController::default();
        assert_eq!(
            controller.select_square(sq("e4")),
            Err(RuleError::InvalidSelection(sq("e4")))
        );
        assert_eq!(
            controller.select_square(sq("e7")),
            Err(RuleError::InvalidSelection(sq("e7")))
        );
        assert_eq!(controller.state().phase, TurnPhase::AwaitingSelection);
    }

    #[test]
    fn selecting_the_same_square_again_deselects() {
        let mut controller = GameController::default();
        controller.select_square(sq("e2")).expect("own pawn");
        assert_eq!(controller.click(sq("e2")), Ok(TurnOutcome::Deselected));
        assert_eq!(controller.state().selected_square(), None);
        assert_eq!(controller.state().board, Board::starting_position());
    }

    #[test]
    fn target_without_selection_is_rejected() {
        let mut controller = GameController::default();
        assert_eq!(
            controller.choose_target(sq("e4")),
            Err(RuleError::NoFigureSelected)
        );
    }

    #[test]
    fn illegal_target_clears_the_selection_only() {
        let mut controller = GameController::default();
        controller.select_square(sq("e2")).expect("own pawn");
        assert_eq!(
            controller.choose_target(sq("e5")),
            Err(RuleError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(controller.state().phase, TurnPhase::AwaitingSelection);
        assert_eq!(controller.state().board, Board::starting_position());
        assert_eq!(controller.side_to_move(), Color::White);
        assert!(controller.notation().is_empty());
    }

    #[test]
    fn moves_pair_up_in_numbered_entries() {
        let mut controller = GameController::default();
        play(&mut controller, "e2", "e4");
        play(&mut controller, "e7", "e5");
        let outcome = play(&mut controller, "g1", "f3");

        assert_eq!(controller.notation(), ["1. e4 e5", "2. f3"]);
        assert_eq!(controller.side_to_move(), Color::Black);
        assert!(matches!(
            outcome,
            TurnOutcome::Completed {
                status: GameStatus::InProgress,
                ..
            }
        ));
    }

    #[test]
    fn checkmate_is_terminal_until_restart() {
        let mut controller = GameController::default();
        let outcome = fools_mate(&mut controller);

        let mate = GameStatus::Checkmate {
            winner: Color::Black,
        };
        assert!(matches!(outcome, TurnOutcome::Completed { status, .. } if status == mate));
        assert_eq!(controller.status(), mate);
        assert_eq!(controller.notation(), ["1. f3 e5", "2. g4 h4"]);
        assert_eq!(
            controller.select_square(sq("e2")),
            Err(RuleError::OperationAfterGameOver(mate))
        );
        assert_eq!(
            controller.choose_promotion(PieceKind::Queen),
            Err(RuleError::OperationAfterGameOver(mate))
        );

        let before = controller.started_at();
        assert_eq!(controller.restart_game(), TurnOutcome::Restarted);
        assert!(controller.started_at() >= before);
        assert_eq!(controller.status(), GameStatus::InProgress);
        assert_eq!(controller.state().move_number, 1);
        assert!(controller.notation().is_empty());
        assert!(controller.select_square(sq("e2")).is_ok());
    }

    #[test]
    fn automatic_policy_reports_then_resets() {
        let config = ControllerConfig {
            restart_policy: RestartPolicy::Automatic,
            ..ControllerConfig::default()
        };
        let mut controller = GameController::new(config);
        let outcome = fools_mate(&mut controller);

        assert!(matches!(
            outcome,
            TurnOutcome::Completed {
                status: GameStatus::Checkmate {
                    winner: Color::Black
                },
                ..
            }
        ));
        assert_eq!(controller.status(), GameStatus::InProgress);
        assert_eq!(controller.state().board, Board::starting_position());
        assert!(controller.notation().is_empty());
    }

    #[test]
    fn stalemate_ends_the_game() {
        let mut controller =
            GameController::from_fen("7k/8/4Q1K1/8/8/8/8/8 w - - 0 1", ControllerConfig::default())
                .expect("fen parses");
        let outcome = play(&mut controller, "e6", "f7");

        assert!(matches!(
            outcome,
            TurnOutcome::Completed {
                status: GameStatus::Stalemate,
                ..
            }
        ));
        assert!(matches!(
            controller.select_square(sq("h8")),
            Err(RuleError::OperationAfterGameOver(GameStatus::Stalemate))
        ));
    }

    #[test]
    fn promotion_finishes_as_one_notation_entry() {
        let mut controller =
            GameController::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1", ControllerConfig::default())
                .expect("fen parses");

        assert_eq!(
            controller.choose_promotion(PieceKind::Queen),
            Err(RuleError::InvalidPromotionChoice("Queen".to_owned()))
        );

        let outcome = play(&mut controller, "a7", "a8");
        assert_eq!(outcome, TurnOutcome::AwaitingPromotion { square: sq("a8") });
        assert_eq!(controller.side_to_move(), Color::White);
        assert!(controller.notation().is_empty());
        assert_eq!(
            controller.select_square(sq("a1")),
            Err(RuleError::PromotionChoiceRequired)
        );
        assert_eq!(
            controller.choose_promotion(PieceKind::King),
            Err(RuleError::InvalidPromotionChoice("King".to_owned()))
        );

        let outcome = controller
            .choose_promotion(PieceKind::Queen)
            .expect("queen is a valid choice");
        assert!(matches!(outcome, TurnOutcome::Completed { mv, .. } if mv.is_promotion()));

        let queen = controller.state().board.piece_at(sq("a8")).expect("promoted piece");
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert_eq!(controller.notation(), ["1. a8"]);
        assert_eq!(controller.side_to_move(), Color::Black);
        assert_eq!(controller.state().move_log.len(), 1);
    }

    #[test]
    fn castling_moves_king_and_rook_in_one_turn() {
        let mut controller = GameController::from_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ControllerConfig::default(),
        )
        .expect("fen parses");

        controller.select_square(sq("e1")).expect("own king");
        assert!(controller.highlighted_squares().contains(sq("g1")));
        assert!(controller.highlighted_squares().contains(sq("c1")));

        let outcome = controller.click(sq("g1")).expect("castle accepted");
        assert!(matches!(outcome, TurnOutcome::Completed { mv, .. } if mv.is_castle()));

        let board = &controller.state().board;
        assert_eq!(board.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(board.is_empty(sq("h1")));
        assert_eq!(controller.notation(), ["1. g1"]);
        assert_eq!(controller.side_to_move(), Color::Black);
    }

    #[test]
    fn rook_that_moved_and_returned_can_no_longer_castle() {
        let mut controller = GameController::from_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ControllerConfig::default(),
        )
        .expect("fen parses");

        play(&mut controller, "h1", "h2");
        play(&mut controller, "a8", "a7");
        play(&mut controller, "h2", "h1");
        play(&mut controller, "a7", "a8");

        let rook = controller.state().board.piece_at(sq("h1")).expect("rook back on h1");
        assert!(rook.has_moved);

        controller.select_square(sq("e1")).expect("own king");
        assert!(!controller.highlighted_squares().contains(sq("g1")));
        assert!(controller.highlighted_squares().contains(sq("c1")));
    }

    #[test]
    fn position_where_a_king_can_be_taken_is_refused() {
        assert!(matches!(
            GameController::from_fen("4k3/8/8/8/8/8/P7/1r2K3 b - - 0 1", ControllerConfig::default()),
            Err(RuleError::InvalidFen(_))
        ));
    }

    #[test]
    fn kingless_state_is_terminal() {
        let mut state = GameState::new_empty();
        state.board.place_piece(Color::White, PieceKind::Pawn, sq("a2"));
        state.board.place_piece(Color::Black, PieceKind::King, sq("e8"));
        let mut controller = GameController::from_state(state, ControllerConfig::default());

        let lost = GameStatus::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(controller.status(), lost);
        assert_eq!(
            controller.select_square(sq("a2")),
            Err(RuleError::OperationAfterGameOver(lost))
        );
    }

    #[test]
    fn loaded_mate_position_is_already_terminal() {
        let controller = GameController::from_fen(
            "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            ControllerConfig::default(),
        )
        .expect("fen parses");
        assert_eq!(
            controller.status(),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
    }
}
