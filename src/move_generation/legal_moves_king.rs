//! Castling.
//!
//! Castling depends on game history (moved flags) and on attacks against
//! the king's path, so it is produced here rather than by king geometry.

use crate::game_state::chess_rules::{castling_lane_for, CastlingLane, CASTLING_KING_STEP, CASTLING_LANES, KING_HOME_FILE};
use crate::game_state::chess_types::{Board, Piece, PieceKind, Square, SquareSet};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_descriptions::{Move, MoveKind};

/// Castling destinations whose pieces are in place. Still subject to
/// [`can_castle`] and the check-safety test of the validator.
pub fn castling_destinations(board: &Board, king: &Piece) -> SquareSet {
    CASTLING_LANES
        .into_iter()
        .filter_map(|lane| Square::new(lane.king_to_file, king.square.rank()))
        .filter(|&to| castle_move_to(board, king, to).is_some())
        .collect()
}

/// The castling move for `king` travelling to `to`, when `to` is a
/// castling destination and an unmoved rook of the same color waits in
/// that corner.
pub fn castle_move_to(board: &Board, king: &Piece, to: Square) -> Option<Move> {
    if !is_unmoved_king_at_home(king) || to.rank() != king.square.rank() {
        return None;
    }
    if (to.file() as i8 - king.square.file() as i8).abs() != CASTLING_KING_STEP {
        return None;
    }

    let lane = castling_lane_for(to.file())?;
    let rook_from = Square::new(lane.rook_file, king.square.rank())?;
    let rook = board
        .piece_at(rook_from)
        .filter(|rook| is_unmoved_rook_of(rook, king))?;
    let rook_to = Square::new(lane.rook_to_file, king.square.rank())?;

    Some(Move {
        from: king.square,
        to,
        mover: king.id,
        captured: None,
        kind: MoveKind::Castle {
            rook: rook.id,
            rook_from,
            rook_to,
        },
    })
}

/// Whether the king on `king_square` may castle with the rook on
/// `rook_square` right now.
///
/// Both pieces must be unmoved, every square strictly between them empty,
/// and no square the king stands on or crosses, destination included, may
/// be attacked. Each crossed square is tested with the king placed on it,
/// so pawns guarding an empty square count as attackers.
pub fn can_castle(board: &Board, king_square: Square, rook_square: Square) -> bool {
    let Some(king) = board.piece_at(king_square) else {
        return false;
    };
    let Some(rook) = board.piece_at(rook_square) else {
        return false;
    };
    if !is_unmoved_king_at_home(king) || !is_unmoved_rook_of(rook, king) {
        return false;
    }
    let Some(lane) = lane_for_rook(rook_square, king_square) else {
        return false;
    };

    if Board::squares_between(king_square, rook_square)
        .into_iter()
        .any(|square| !board.is_empty(square))
    {
        return false;
    }

    let enemy = king.color.opposite();
    if is_square_attacked(board, king_square, enemy) {
        return false;
    }

    king_path(king_square, lane).into_iter().all(|square| {
        let step = Move {
            from: king_square,
            to: square,
            mover: king.id,
            captured: None,
            kind: MoveKind::Normal,
        };
        board
            .apply(&step)
            .map(|trial| !is_square_attacked(&trial, square, enemy))
            .unwrap_or(false)
    })
}

/// Squares the king enters while castling along `lane`, destination last.
fn king_path(king_square: Square, lane: CastlingLane) -> Vec<Square> {
    let step = (lane.king_to_file as i8 - king_square.file() as i8).signum();
    (1..=CASTLING_KING_STEP)
        .filter_map(|distance| king_square.offset(step * distance, 0))
        .collect()
}

fn lane_for_rook(rook_square: Square, king_square: Square) -> Option<CastlingLane> {
    if rook_square.rank() != king_square.rank() {
        return None;
    }
    CASTLING_LANES
        .into_iter()
        .find(|lane| lane.rook_file == rook_square.file())
}

fn is_unmoved_king_at_home(king: &Piece) -> bool {
    king.kind == PieceKind::King
        && !king.has_moved
        && king.square.file() == KING_HOME_FILE
        && king.square.rank() == king.color.back_rank()
}

fn is_unmoved_rook_of(rook: &Piece, king: &Piece) -> bool {
    rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
}

#[cfg(test)]
mod tests {
    use super::{can_castle, castle_move_to, castling_destinations};
    use crate::game_state::chess_types::Square;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("valid square")
    }

    #[test]
    fn both_sides_available_with_clear_back_rank() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen parses");
        let king = game.board.piece_at(sq("e1")).expect("white king");

        assert!(can_castle(&game.board, sq("e1"), sq("h1")));
        assert!(can_castle(&game.board, sq("e1"), sq("a1")));
        let destinations = castling_destinations(&game.board, king);
        assert!(destinations.contains(sq("g1")));
        assert!(destinations.contains(sq("c1")));
    }

    #[test]
    fn castle_move_names_the_rook_and_its_landing_square() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("fen parses");
        let king = game.board.piece_at(sq("e8")).expect("black king");
        let rook = game.board.piece_at(sq("a8")).expect("black rook");

        let mv = castle_move_to(&game.board, king, sq("c8")).expect("queenside castle");
        match mv.kind {
            crate::moves::move_descriptions::MoveKind::Castle { rook: id, rook_from, rook_to } => {
                assert_eq!(id, rook.id);
                assert_eq!(rook_from, sq("a8"));
                assert_eq!(rook_to, sq("d8"));
            }
            other => panic!("expected a castle, got {other:?}"),
        }
        assert!(castle_move_to(&game.board, king, sq("f8")).is_none());
    }

    #[test]
    fn moved_rook_forbids_castling() {
        let game = parse_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").expect("fen parses");
        assert!(can_castle(&game.board, sq("e1"), sq("h1")));
        assert!(!can_castle(&game.board, sq("e1"), sq("a1")));
    }

    #[test]
    fn piece_between_king_and_rook_forbids_castling() {
        let game = parse_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").expect("fen parses");
        assert!(!can_castle(&game.board, sq("e1"), sq("h1")));
        assert!(!can_castle(&game.board, sq("e1"), sq("a1")));
    }

    #[test]
    fn king_in_check_cannot_castle() {
        let game = parse_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen parses");
        assert!(!can_castle(&game.board, sq("e1"), sq("h1")));
        assert!(!can_castle(&game.board, sq("e1"), sq("a1")));
    }

    #[test]
    fn king_cannot_pass_through_or_land_on_an_attacked_square() {
        let through = parse_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen parses");
        assert!(!can_castle(&through.board, sq("e1"), sq("h1")));
        assert!(can_castle(&through.board, sq("e1"), sq("a1")));

        let into = parse_fen("2r3k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen parses");
        assert!(!can_castle(&into.board, sq("e1"), sq("a1")));
        assert!(can_castle(&into.board, sq("e1"), sq("h1")));
    }

    #[test]
    fn pawn_guarding_the_path_forbids_castling() {
        let game = parse_fen("4k3/8/8/8/8/8/6p1/R3K2R w KQ - 0 1").expect("fen parses");
        assert!(!can_castle(&game.board, sq("e1"), sq("h1")));
    }

    #[test]
    fn attacked_b_file_square_does_not_matter() {
        let game = parse_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("fen parses");
        assert!(can_castle(&game.board, sq("e1"), sq("a1")));
    }
}
