//! Plays seeded random games through the controller and reports results.
//!
//! Run with:
//! `cargo run --release --bin random_playout`
//! `cargo run --release --bin random_playout -- --seed 7 --games 20 --max-plies 300`

use chrono::Utc;
use log::info;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use plum_board::controller::controller_config::ControllerConfig;
use plum_board::controller::game_controller::{GameController, TurnOutcome};
use plum_board::errors::RuleError;
use plum_board::game_state::chess_types::{PieceKind, Square};
use plum_board::move_generation::legal_move_generator::legal_destinations;

fn parse_arg_u64(args: &[String], flag: &str, default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u64>() {
                return v;
            }
        }
    }
    default
}

fn parse_arg_usize(args: &[String], flag: &str, default: usize) -> usize {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<usize>() {
                return v.max(1);
            }
        }
    }
    default
}

/// Plays one game. Returns the number of completed plies.
fn play_game(controller: &mut GameController, rng: &mut StdRng, max_plies: usize) -> Result<usize, RuleError> {
    let mut plies = 0usize;

    while plies < max_plies && !controller.status().is_over() {
        let side = controller.side_to_move();
        let board = &controller.state().board;
        let movable: Vec<Square> = board
            .pieces_of(side)
            .map(|piece| piece.square)
            .filter(|&square| !legal_destinations(board, square).is_empty())
            .collect();

        let Some(&from) = movable.choose(rng) else {
            break;
        };

        let destinations: Vec<Square> = match controller.select_square(from)? {
            TurnOutcome::Selected { destinations, .. } => destinations.iter().collect(),
            other => {
                return Err(RuleError::InvalidState(format!(
                    "unexpected selection outcome {other:?}"
                )))
            }
        };
        let Some(&to) = destinations.choose(rng) else {
            break;
        };

        if let TurnOutcome::AwaitingPromotion { .. } = controller.choose_target(to)? {
            let kind = PieceKind::PROMOTION_CHOICES
                .choose(rng)
                .copied()
                .unwrap_or(PieceKind::Queen);
            controller.choose_promotion(kind)?;
        }
        plies += 1;
    }

    Ok(plies)
}

fn main() -> Result<(), RuleError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = parse_arg_u64(&args, "--seed", 1234);
    let games = parse_arg_usize(&args, "--games", 10);
    let max_plies = parse_arg_usize(&args, "--max-plies", 300);

    let started = Utc::now();
    info!("random playout: seed={seed} games={games} max_plies={max_plies}");
    let mut rng = StdRng::seed_from_u64(seed);

    for game in 1..=games {
        let mut controller = GameController::new(ControllerConfig::default());
        let plies = play_game(&mut controller, &mut rng, max_plies)?;

        let status = controller.status();
        let result = if status.is_over() {
            status.to_string()
        } else {
            format!("unfinished after {max_plies} plies")
        };
        println!("game {game}: {result}, {plies} plies");
        println!("  {}", controller.notation().join(" "));
    }

    let elapsed = Utc::now() - started;
    println!(
        "started {}, {} games in {} ms",
        started.to_rfc3339(),
        games,
        elapsed.num_milliseconds()
    );
    Ok(())
}
