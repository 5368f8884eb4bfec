//! Console driver for the rules engine.
//!
//! Run with:
//! `cargo run --release`
//! `RUST_LOG=debug cargo run --release -- --policy auto --log-board`

use std::io;

use log::error;

use plum_board::console::console_top::run_stdio_loop;
use plum_board::controller::controller_config::{ControllerConfig, RestartPolicy};

/// Reads `--policy <manual|auto>`. A missing flag means the default; a
/// missing or unknown value is an error.
fn parse_policy(args: &[String]) -> Result<RestartPolicy, String> {
    let Some(idx) = args.iter().position(|arg| arg == "--policy") else {
        return Ok(RestartPolicy::default());
    };
    args.get(idx + 1)
        .ok_or_else(|| "--policy needs a value (manual or auto)".to_owned())?
        .parse::<RestartPolicy>()
}

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let restart_policy = parse_policy(&args).map_err(|err| {
        error!("{err}");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let config = ControllerConfig {
        restart_policy,
        log_board_after_move: args.iter().any(|arg| arg == "--log-board"),
    };

    run_stdio_loop(config)
}
