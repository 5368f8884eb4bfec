//! King stepping geometry. Castling is not geometry alone and lives with
//! the legality checks in `move_generation::legal_moves_king`.

use crate::game_state::chess_types::{Board, Piece, Square, SquareSet};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> SquareSet {
    SquareSet(KING_ATTACKS[square.index() as usize])
}

pub fn king_destinations(piece: &Piece, board: &Board) -> SquareSet {
    king_attacks(piece.square) & !board.occupancy(piece.color)
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + (file as usize))
}

#[cfg(test)]
mod tests {
    use super::king_attacks;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        let a1 = algebraic_to_square("a1").expect("a1");
        let e4 = algebraic_to_square("e4").expect("e4");
        assert_eq!(king_attacks(a1).len(), 3);
        assert_eq!(king_attacks(e4).len(), 8);
    }
}
