//! Pseudo-legal destination dispatch over the closed set of piece kinds.
//!
//! Results honour movement geometry and path blocking only. They may leave
//! the mover's own king in check and never contain castling destinations.

use crate::game_state::chess_types::{Board, Piece, PieceKind, SquareSet};
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

pub fn pseudo_legal_destinations(piece: &Piece, board: &Board) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(piece, board),
        PieceKind::Knight => knight_destinations(piece, board),
        PieceKind::Bishop => bishop_destinations(piece, board),
        PieceKind::Rook => rook_destinations(piece, board),
        PieceKind::Queen => queen_destinations(piece, board),
        PieceKind::King => king_destinations(piece, board),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::pseudo_legal_destinations;
    use crate::game_state::chess_types::{Board, Color, PieceKind, Square};
    use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
    use crate::moves::rook_moves::ROOK_DIRECTIONS;

    /// Scatters up to `count` random pieces (plus one king per side) onto
    /// empty squares.
    fn random_board(rng: &mut StdRng, count: usize) -> Board {
        let mut board = Board::empty();
        for color in Color::BOTH {
            let king_square = loop {
                let candidate = Square::from_index(rng.random_range(0..64)).expect("index in range");
                if board.is_empty(candidate) {
                    break candidate;
                }
            };
            board.place_piece(color, PieceKind::King, king_square);
        }
        for _ in 0..count {
            let square = Square::from_index(rng.random_range(0..64)).expect("index in range");
            if !board.is_empty(square) {
                continue;
            }
            let kind = PieceKind::ALL[rng.random_range(0..5)];
            let color = if rng.random_bool(0.5) { Color::White } else { Color::Black };
            board.place_piece(color, kind, square);
        }
        board
    }

    #[test]
    fn destinations_never_contain_own_pieces_or_the_origin() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let board = random_board(&mut rng, 20);
            for piece in board.pieces() {
                let destinations = pseudo_legal_destinations(piece, &board);
                assert!(!destinations.contains(piece.square));
                assert!((destinations & board.occupancy(piece.color)).is_empty());
            }
        }
    }

    #[test]
    fn sliding_rays_stop_at_the_first_occupied_square() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let board = random_board(&mut rng, 24);
            for piece in board.pieces() {
                let directions: Vec<(i8, i8)> = match piece.kind {
                    PieceKind::Bishop => BISHOP_DIRECTIONS.to_vec(),
                    PieceKind::Rook => ROOK_DIRECTIONS.to_vec(),
                    PieceKind::Queen => BISHOP_DIRECTIONS
                        .iter()
                        .chain(ROOK_DIRECTIONS.iter())
                        .copied()
                        .collect(),
                    _ => continue,
                };
                let destinations = pseudo_legal_destinations(piece, &board);

                for (file_step, rank_step) in directions {
                    let mut blocked = false;
                    let mut current = piece.square.offset(file_step, rank_step);
                    while let Some(square) = current {
                        if blocked {
                            assert!(!destinations.contains(square));
                        } else if let Some(other) = board.piece_at(square) {
                            assert_eq!(destinations.contains(square), other.color != piece.color);
                            blocked = true;
                        } else {
                            assert!(destinations.contains(square));
                        }
                        current = square.offset(file_step, rank_step);
                    }
                }
            }
        }
    }
}
