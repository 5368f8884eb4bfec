//! FEN-to-GameState parser.
//!
//! Builds a board and turn state from a Forsyth-Edwards Notation string.
//! Placement rows run from rank 8 down to rank 1, which is also the order
//! of internal ranks. Moved flags are derived: castling letters decide
//! whether kings and corner rooks count as unmoved, and pawns off their
//! home rank count as moved with the home-rank square of their file as
//! origin. The en passant field is read and ignored.
//!
//! Only playable positions are accepted: each side has exactly one king and
//! the side that just moved is not left in check.

use crate::errors::RuleError;
use crate::game_state::chess_rules::{KINGSIDE, KING_HOME_FILE, QUEENSIDE};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;

/// Castling letters present in the FEN, indexed by `[color][lane]` where
/// lane 0 is kingside and lane 1 queenside.
type CastlingRights = [[bool; 2]; 2];

pub fn parse_fen(fen: &str) -> Result<GameState, RuleError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let _en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state.board)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    let rights = parse_castling_rights(castling_part)?;
    derive_moved_flags(&mut game_state.board, &rights);

    halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.move_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid fullmove number: {fullmove_part}")))?
        .max(1);

    if is_king_in_check(&game_state.board, game_state.side_to_move.opposite()) {
        return Err(invalid("side not to move is in check"));
    }

    Ok(game_state)
}

fn invalid(message: &str) -> RuleError {
    RuleError::InvalidFen(message.to_owned())
}

fn parse_board(board_part: &str, board: &mut Board) -> Result<(), RuleError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut kings = [0usize; 2];

    for (rank, rank_str) in ranks.iter().enumerate() {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                file = file
                    .checked_add(empty_count as u8)
                    .filter(|&next| next <= 8)
                    .ok_or_else(|| invalid("board rank has too many files"))?;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}' in board layout")))?;
            let square = Square::new(file, rank as u8)
                .ok_or_else(|| invalid("board rank has too many files"))?;

            if kind == PieceKind::King {
                kings[color.index()] += 1;
            }
            board.place_piece(color, kind, square);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    if kings.iter().any(|&count| count != 1) {
        return Err(invalid("each side needs exactly one king"));
    }

    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let kind = PieceKind::from_char(ch)?;
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((color, kind))
}

fn parse_side_to_move(side_part: &str) -> Result<Color, RuleError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, RuleError> {
    let mut rights = [[false; 2]; 2];
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights[Color::White.index()][0] = true,
            'Q' => rights[Color::White.index()][1] = true,
            'k' => rights[Color::Black.index()][0] = true,
            'q' => rights[Color::Black.index()][1] = true,
            _ => return Err(invalid(&format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn derive_moved_flags(board: &mut Board, rights: &CastlingRights) {
    let squares: Vec<Square> = board.pieces().map(|piece| piece.square).collect();

    for square in squares {
        let Some(piece) = board.piece_at_mut(square) else {
            continue;
        };
        let color_rights = rights[piece.color.index()];
        let on_back_rank = square.rank() == piece.color.back_rank();

        match piece.kind {
            PieceKind::Pawn => {
                if square.rank() != piece.color.pawn_rank() {
                    piece.has_moved = true;
                    if let Some(home) = Square::new(square.file(), piece.color.pawn_rank()) {
                        piece.origin = home;
                    }
                }
            }
            PieceKind::King => {
                let at_home = on_back_rank && square.file() == KING_HOME_FILE;
                piece.has_moved = !(at_home && color_rights.iter().any(|&right| right));
            }
            PieceKind::Rook => {
                let keeps_right = on_back_rank
                    && [KINGSIDE, QUEENSIDE]
                        .iter()
                        .zip(color_rights)
                        .any(|(lane, right)| right && lane.rook_file == square.file());
                piece.has_moved = !keeps_right;
            }
            _ => {}
        }
    }
}
