use crate::game_state::chess_types::{Board, Piece, Square, SquareSet};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> SquareSet {
    SquareSet(KNIGHT_ATTACKS[square.index() as usize])
}

pub fn knight_destinations(piece: &Piece, board: &Board) -> SquareSet {
    knight_attacks(piece.square) & !board.occupancy(piece.color)
}

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file + 1, rank + 2);
        attacks |= set_if_valid(file + 2, rank + 1);
        attacks |= set_if_valid(file + 2, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 2);
        attacks |= set_if_valid(file - 1, rank - 2);
        attacks |= set_if_valid(file - 2, rank - 1);
        attacks |= set_if_valid(file - 2, rank + 1);
        attacks |= set_if_valid(file - 1, rank + 2);

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
