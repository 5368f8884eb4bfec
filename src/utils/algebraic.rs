//! Square notation.
//!
//! Files 0..=7 read 'a'..'h'. Ranks are displayed inverted: internal rank 0
//! (Black's back rank) is "8" and internal rank 7 is "1".

use crate::errors::RuleError;
use crate::game_state::chess_types::Square;

/// Convert a square to its algebraic text (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file());
    let rank_char = char::from(b'8' - square.rank());
    format!("{file_char}{rank_char}")
}

/// Parse algebraic text (for example: "e4") into a square.
pub fn algebraic_to_square(text: &str) -> Result<Square, RuleError> {
    let bytes = text.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(RuleError::InvalidAlgebraicString(text.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(RuleError::InvalidAlgebraicString(text.to_owned()));
    }

    Square::new(file - b'a', b'8' - rank)
        .ok_or_else(|| RuleError::InvalidAlgebraicString(text.to_owned()))
}
