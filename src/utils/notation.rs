//! Traditional square and move text.
//!
//! Squares are written file then rank, both `1..=9`, files counted from
//! the right as seen by Black: `"76"` is `Point { x: 2, y: 5 }`. Moves are
//! `"7776"` with an optional trailing `+` for promotion; drops are a piece
//! letter, `*` and the square, e.g. `"P*55"`.

use crate::game_state::shogi_types::{PieceType, Point};
use crate::moves::move_descriptions::Intent;
use crate::shogi_errors::{ShogiError, ShogiResult};

/// Convert a two-digit square (for example: "76") to a board point.
pub fn parse_square(square: &str) -> ShogiResult<Point> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(invalid(format!("invalid square: {square}")));
    }
    Point::from_notation(bytes[0] - b'0', bytes[1] - b'0')
}

/// Convert a board point to two-digit square notation.
pub fn square_to_notation(p: Point) -> ShogiResult<String> {
    let (file, rank) = p
        .to_notation()
        .ok_or_else(|| invalid(format!("point ({}, {}) is off the board", p.x, p.y)))?;
    Ok(format!("{file}{rank}"))
}

pub fn piece_letter(kind: PieceType) -> char {
    match kind {
        PieceType::Pawn => 'P',
        PieceType::Lance => 'L',
        PieceType::Knight => 'N',
        PieceType::Silver => 'S',
        PieceType::Gold => 'G',
        PieceType::Bishop => 'B',
        PieceType::Rook => 'R',
        PieceType::King => 'K',
    }
}

pub fn piece_from_letter(letter: char) -> Option<PieceType> {
    PieceType::ALL
        .into_iter()
        .find(|&kind| piece_letter(kind) == letter.to_ascii_uppercase())
}

/// Parse move or drop text into an intent. Legality, including whether the
/// mover holds the dropped kind, is not checked here.
pub fn parse_intent(text: &str) -> ShogiResult<Intent> {
    let text = text.trim();
    if let Some((letter, square)) = text.split_once('*') {
        let mut letters = letter.chars();
        let kind = match (letters.next(), letters.next()) {
            (Some(ch), None) => piece_from_letter(ch),
            _ => None,
        }
        .ok_or_else(|| invalid(format!("invalid drop piece in '{text}'")))?;
        if kind == PieceType::King {
            return Err(invalid(format!("a king cannot be dropped: '{text}'")));
        }
        return Ok(Intent::new_drop(kind, parse_square(square)?));
    }

    let (body, promote) = match text.strip_suffix('+') {
        Some(body) => (body, true),
        None => (text, false),
    };
    if body.len() != 4 || !body.is_ascii() {
        return Err(invalid(format!("invalid move: {text}")));
    }
    let from = parse_square(&body[..2])?;
    let to = parse_square(&body[2..])?;
    Ok(Intent::new_move(from, to, promote))
}

/// Render an intent as move text.
pub fn intent_to_notation(intent: &Intent) -> ShogiResult<String> {
    match intent {
        Intent::Move(mv) => {
            let mut out = square_to_notation(mv.from)?;
            out.push_str(&square_to_notation(mv.to)?);
            if mv.promote {
                out.push('+');
            }
            Ok(out)
        }
        Intent::Drop(drop) => Ok(format!(
            "{}*{}",
            piece_letter(drop.kind),
            square_to_notation(drop.to)?
        )),
    }
}

fn invalid(message: String) -> ShogiError {
    ShogiError::InvalidNotation(message)
}
