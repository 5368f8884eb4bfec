//! Line-oriented console front end.
//!
//! Reads one command per line, maps it onto a single controller event and
//! prints the outcome or the rejection. Squares are written in algebraic
//! form (`e2`). A bare square acts like a board click.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::controller::controller_config::ControllerConfig;
use crate::controller::game_controller::{GameController, TurnOutcome};
use crate::errors::RuleError;
use crate::game_state::chess_types::{PieceKind, Square, SquareSet};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::render_game_state::{move_history_text, render_board, render_game_state};

const HELP_TEXT: &str = "commands: <square> | select <sq> | target <sq> | promote q|r|b|n | restart | board | history | status | help | quit";

pub fn run_stdio_loop(config: ControllerConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = ConsoleSession::new(config);

    writeln!(stdout, "{}", render_game_state(session.controller.state()))?;
    writeln!(stdout, "{HELP_TEXT}")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleSession {
    controller: GameController,
}

impl ConsoleSession {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            controller: GameController::new(config),
        }
    }

    #[inline]
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Handles one input line. Returns `true` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();
        debug!("console command: {trimmed}");

        let result = match cmd {
            "select" => parse_square(arg).and_then(|sq| self.controller.select_square(sq)),
            "target" => parse_square(arg).and_then(|sq| self.controller.choose_target(sq)),
            "promote" => parse_promotion(arg).and_then(|kind| self.controller.choose_promotion(kind)),
            "restart" => Ok(self.controller.restart_game()),
            "board" => {
                writeln!(out, "{}", render_board(&self.controller.state().board))?;
                return Ok(false);
            }
            "history" => {
                writeln!(out, "{}", move_history_text(self.controller.state()))?;
                return Ok(false);
            }
            "status" => {
                writeln!(out, "{}", render_game_state(self.controller.state()))?;
                return Ok(false);
            }
            "help" => {
                writeln!(out, "{HELP_TEXT}")?;
                return Ok(false);
            }
            "quit" => return Ok(true),
            _ => match algebraic_to_square(cmd) {
                Ok(square) => self.controller.click(square),
                Err(_) => {
                    writeln!(out, "unknown command '{cmd}'")?;
                    return Ok(false);
                }
            },
        };

        match result {
            Ok(outcome) => self.write_outcome(&outcome, out)?,
            Err(err) => writeln!(out, "rejected: {err}")?,
        }

        Ok(false)
    }

    fn write_outcome(&self, outcome: &TurnOutcome, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            TurnOutcome::Selected {
                square,
                destinations,
            } => writeln!(out, "selected {square}: {}", format_squares(*destinations)),
            TurnOutcome::Deselected => writeln!(out, "deselected"),
            TurnOutcome::AwaitingPromotion { square } => {
                writeln!(out, "pawn on {square}, choose promotion: q r b n")
            }
            TurnOutcome::Completed {
                notation, status, ..
            } => {
                writeln!(out, "{notation}")?;
                if status.is_over() {
                    writeln!(out, "game over: {status}")?;
                }
                writeln!(out, "{}", render_game_state(self.controller.state()))
            }
            TurnOutcome::Restarted => {
                writeln!(out, "new game")?;
                writeln!(out, "{}", render_game_state(self.controller.state()))
            }
        }
    }
}

fn parse_square(arg: Option<&str>) -> Result<Square, RuleError> {
    algebraic_to_square(arg.unwrap_or_default())
}

fn parse_promotion(arg: Option<&str>) -> Result<PieceKind, RuleError> {
    let mut chars = arg.unwrap_or_default().chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind), None) => Ok(kind),
        _ => Err(RuleError::InvalidPromotionChoice(
            arg.unwrap_or_default().to_owned(),
        )),
    }
}

fn format_squares(squares: SquareSet) -> String {
    if squares.is_empty() {
        return "no legal moves".to_owned();
    }
    squares
        .iter()
        .map(square_to_algebraic)
        .collect::<Vec<_>>()
        .join(" ")
}
