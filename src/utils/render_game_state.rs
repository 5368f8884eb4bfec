//! Terminal-oriented Unicode board and history renderer.
//!
//! Produces the text views the console front end prints: the board with
//! file and rank labels, White at the bottom, and the move-history panel.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string for terminal output.
///
/// Internal rank 0 is printed first and labelled `8`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in 0..8u8 {
        let label = char::from(b'8' - rank);
        out.push(label);
        out.push(' ');

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|square| board.piece_at(square));
            match piece {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board of `game_state` plus a line naming the side to move.
pub fn render_game_state(game_state: &GameState) -> String {
    format!(
        "{}\n{} to move, move {} ({})",
        render_board(&game_state.board),
        game_state.side_to_move,
        game_state.move_number,
        game_state.status
    )
}

/// The history panel: a heading followed by one notation entry per line.
pub fn move_history_text(game_state: &GameState) -> String {
    let mut out = String::from("Move History:\n");
    out.push_str(&game_state.notation.join("\n"));
    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
