//! GameState-to-FEN serializer.
//!
//! Castling letters are derived from moved flags: a letter is written when
//! the king and the lane's corner rook both stand unmoved on their home
//! squares. En passant is never tracked, so that field is always `-`, and
//! the halfmove clock is always written as `0`.

use crate::game_state::chess_rules::{CastlingLane, KINGSIDE, KING_HOME_FILE, QUEENSIDE};
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.board);
    let side_to_move = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(&game_state.board);

    format!(
        "{} {} {} - 0 {}",
        board, side_to_move, castling, game_state.move_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in 0..8u8 {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|square| board.piece_at(square));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece.color, piece.kind));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank < 7 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(color: Color, kind: PieceKind) -> char {
    let base = kind.to_char();
    match color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for color in Color::BOTH {
        for lane in [KINGSIDE, QUEENSIDE] {
            if castling_available(board, color, lane) {
                let letter = if lane == KINGSIDE { 'k' } else { 'q' };
                out.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn castling_available(board: &Board, color: Color, lane: CastlingLane) -> bool {
    let unmoved = |file: u8, kind: PieceKind| {
        Square::new(file, color.back_rank())
            .and_then(|square| board.piece_at(square))
            .is_some_and(|piece| piece.color == color && piece.kind == kind && !piece.has_moved)
    };

    unmoved(KING_HOME_FILE, PieceKind::King) && unmoved(lane.rook_file, PieceKind::Rook)
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn start_position_round_trips() {
        assert_eq!(generate_fen(&GameState::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn partial_castling_rights_survive_parsing() {
        let fen = "r3k2r/1p4p1/8/3Pp3/8/8/6P1/R3K2R b Kq - 0 23";
        let game = parse_fen(fen).expect("fen parses");
        assert_eq!(game.get_fen(), fen);
    }

    #[test]
    fn moved_king_drops_every_letter_of_its_color() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R2K3R w kq - 0 5").expect("fen parses");
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R2K3R w kq - 0 5");
    }
}
