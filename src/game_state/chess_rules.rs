//! Canonical chess-rule constants.
//!
//! Starting layout, castling lanes and the FEN of the initial position used
//! to set up and validate a fresh game.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back rank contents from the a-file to the h-file.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_FILE: u8 = 4;

/// File distance the king travels when castling.
pub const CASTLING_KING_STEP: i8 = 2;

/// Geometry of one castling side, on the castling color's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub rook_file: u8,
    pub king_to_file: u8,
    pub rook_to_file: u8,
}

pub const KINGSIDE: CastlingLane = CastlingLane {
    rook_file: 7,
    king_to_file: 6,
    rook_to_file: 5,
};

pub const QUEENSIDE: CastlingLane = CastlingLane {
    rook_file: 0,
    king_to_file: 2,
    rook_to_file: 3,
};

pub const CASTLING_LANES: [CastlingLane; 2] = [KINGSIDE, QUEENSIDE];

/// Lane whose king destination is `king_to_file`, if any.
pub fn castling_lane_for(king_to_file: u8) -> Option<CastlingLane> {
    CASTLING_LANES
        .into_iter()
        .find(|lane| lane.king_to_file == king_to_file)
}
