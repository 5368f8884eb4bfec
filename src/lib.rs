//! Crate root module declarations for the Plum Board rules engine.
//!
//! Exposes the board model, per-piece move geometry, the legality layer
//! (attack detection, castling, check-safety), the turn controller and the
//! text front ends so binaries, tests and benches share one module tree.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod piece_rules;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod perft;
}

pub mod controller {
    pub mod controller_config;
    pub mod game_controller;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
