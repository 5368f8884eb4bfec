//! Controller policy knobs.

use std::str::FromStr;

/// What happens once a game reaches checkmate or stalemate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// The terminal state stays observable until the caller restarts.
    #[default]
    Manual,
    /// The terminal outcome is reported, then a fresh game replaces it.
    Automatic,
}

impl FromStr for RestartPolicy {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(RestartPolicy::Manual),
            "auto" | "automatic" => Ok(RestartPolicy::Automatic),
            other => Err(format!("unknown restart policy '{other}', expected manual or auto")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub restart_policy: RestartPolicy,
    /// Emit the rendered board at debug level after every completed move.
    pub log_board_after_move: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            restart_policy: RestartPolicy::Manual,
            log_board_after_move: false,
        }
    }
}
