//! Canonical position string.
//!
//! `turn,blackHand,whiteHand,row0,...,row8`. The turn is a side digit, each
//! hand is its piece-type digits in ascending order, and each row is nine
//! `-`-separated cells, `{type}{owner}{promoted}` or `_` when empty. Piece
//! identities and history are not encoded, so equal strings mean equal
//! positions. This string is the repetition key and the persistence format.
//! Decoding numbers pieces afresh: board pieces in row-major order, then
//! Black's hand, then White's.

use crate::game_state::position::{Position, PositionBuilder};
use crate::game_state::shogi_rules::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game_state::shogi_types::{PieceType, PieceView, Point, Side};
use crate::shogi_errors::{ShogiError, ShogiResult};

const EMPTY_CELL: &str = "_";

pub fn encode_position(position: &Position) -> String {
    let mut fields: Vec<String> = Vec::with_capacity(3 + BOARD_HEIGHT);
    fields.push(position.side_to_move().digit().to_string());
    for side in Side::BOTH {
        fields.push(position.hand_kinds(side).into_iter().map(PieceType::digit).collect());
    }

    let snapshot = position.snapshot();
    for row in snapshot.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(view) => encode_cell(view),
                None => EMPTY_CELL.to_owned(),
            })
            .collect();
        fields.push(cells.join("-"));
    }

    fields.join(",")
}

fn encode_cell(view: &PieceView) -> String {
    let promoted = if view.promoted { '1' } else { '0' };
    [view.kind.digit(), view.owner.digit(), promoted].iter().collect()
}

pub fn decode_position(data: &str) -> ShogiResult<Position> {
    let fields: Vec<&str> = data.trim().split(',').collect();
    if fields.len() != 3 + BOARD_HEIGHT {
        return Err(invalid(format!(
            "expected {} comma-separated fields, found {}",
            3 + BOARD_HEIGHT,
            fields.len()
        )));
    }

    let turn = parse_single_digit(fields[0])
        .and_then(Side::from_digit)
        .ok_or_else(|| invalid(format!("invalid side to move '{}'", fields[0])))?;
    let mut builder = PositionBuilder::new().side_to_move(turn);

    for (side, field) in Side::BOTH.into_iter().zip(&fields[1..3]) {
        for ch in field.chars() {
            let kind = PieceType::from_digit(ch)
                .ok_or_else(|| invalid(format!("invalid {side} hand piece '{ch}'")))?;
            builder = builder.hand(side, kind);
        }
    }

    for (y, row) in fields[3..].iter().enumerate() {
        let cells: Vec<&str> = row.split('-').collect();
        if cells.len() != BOARD_WIDTH {
            return Err(invalid(format!(
                "row {y} has {} cells, expected {BOARD_WIDTH}",
                cells.len()
            )));
        }
        for (x, cell) in cells.into_iter().enumerate() {
            if cell == EMPTY_CELL {
                continue;
            }
            let view = decode_cell(cell)
                .ok_or_else(|| invalid(format!("invalid cell '{cell}' at ({x}, {y})")))?;
            let p = Point::new(x as i8, y as i8);
            builder = if view.promoted {
                builder.place_promoted(p, view.kind, view.owner)
            } else {
                builder.place(p, view.kind, view.owner)
            };
        }
    }

    builder.build()
}

fn decode_cell(cell: &str) -> Option<PieceView> {
    let mut chars = cell.chars();
    let kind = PieceType::from_digit(chars.next()?)?;
    let owner = Side::from_digit(chars.next()?)?;
    let promoted = match chars.next()? {
        '0' => false,
        '1' => true,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(PieceView {
        kind,
        owner,
        promoted,
    })
}

fn parse_single_digit(field: &str) -> Option<char> {
    let mut chars = field.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

fn invalid(message: String) -> ShogiError {
    ShogiError::InvalidPosition(message)
}

#[cfg(test)]
mod tests {
    use super::{decode_position, encode_position};
    use crate::game_state::position::{Position, PositionBuilder};
    use crate::game_state::shogi_rules::STARTING_POSITION;
    use crate::game_state::shogi_types::{PieceType, Point, Side};
    use crate::shogi_errors::ShogiError;

    #[test]
    fn opening_position_encodes_to_the_reference_string() {
        assert_eq!(encode_position(&Position::new_game()), STARTING_POSITION);
        let decoded = decode_position(STARTING_POSITION).expect("reference string");
        assert!(decoded.same_position(&Position::new_game()));
    }

    #[test]
    fn hands_are_sorted_and_promotion_is_kept() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .place_promoted(Point::new(7, 1), PieceType::Bishop, Side::Black)
            .hand(Side::Black, PieceType::Rook)
            .hand(Side::Black, PieceType::Pawn)
            .hand(Side::White, PieceType::Silver)
            .side_to_move(Side::White)
            .build()
            .expect("valid");
        let encoded = encode_position(&position);
        assert!(encoded.starts_with("1,06,3,"));
        assert!(encoded.contains("501"));

        let decoded = decode_position(&encoded).expect("round trip");
        assert!(decoded.same_position(&position));
        assert_eq!(encode_position(&decoded), encoded);
    }

    #[test]
    fn malformed_strings_are_rejected() {
        let too_few = "0,,,_";
        assert!(matches!(decode_position(too_few), Err(ShogiError::InvalidPosition(_))));

        let bad_cell = STARTING_POSITION.replacen("110", "190", 1);
        assert!(decode_position(&bad_cell).is_err());

        let short_row = STARTING_POSITION.replacen("110-", "", 1);
        assert!(decode_position(&short_row).is_err());

        let bad_turn = STARTING_POSITION.replacen('0', "2", 1);
        assert!(decode_position(&bad_turn).is_err());

        // builder invariants still apply: a king in hand
        let king_in_hand = STARTING_POSITION.replacen("0,,,", "0,7,,", 1);
        assert!(decode_position(&king_in_hand).is_err());
    }
}
