//! Terminal-oriented board renderer.
//!
//! Draws the board as Black sees it, files 9..1 left to right and ranks 1..9
//! top to bottom, with one kanji per piece. White's pieces are bracketed.
//! Hands are listed below the board.

use crate::game_state::position::Position;
use crate::game_state::shogi_types::{PieceType, PieceView, Side};

/// Render the position to a string for terminal output.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} hand: {}\n", Side::White, render_hand(position, Side::White)));
    out.push_str("  9  8  7  6  5  4  3  2  1\n");

    let snapshot = position.snapshot();
    for (y, row) in snapshot.rows().iter().enumerate() {
        out.push(' ');
        for cell in row {
            match cell {
                Some(view) if view.owner == Side::White => {
                    out.push('[');
                    out.push(piece_kanji(view));
                    out.push(']');
                }
                Some(view) => {
                    out.push(' ');
                    out.push(piece_kanji(view));
                    out.push(' ');
                }
                None => out.push_str(" ・ "),
            }
        }
        out.push(' ');
        out.push(char::from(b'1' + y as u8));
        out.push('\n');
    }

    out.push_str(&format!("{} hand: {}\n", Side::Black, render_hand(position, Side::Black)));
    out.push_str(&format!("{} to move", position.side_to_move()));
    out
}

fn render_hand(position: &Position, side: Side) -> String {
    let kinds = position.hand_kinds(side);
    if kinds.is_empty() {
        return "-".to_owned();
    }
    // strongest first, the way hands are usually read out
    kinds
        .iter()
        .rev()
        .map(|&kind| {
            piece_kanji(&PieceView {
                kind,
                owner: side,
                promoted: false,
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn piece_kanji(view: &PieceView) -> char {
    match (view.kind, view.promoted) {
        (PieceType::Pawn, false) => '歩',
        (PieceType::Pawn, true) => 'と',
        (PieceType::Lance, false) => '香',
        (PieceType::Lance, true) => '杏',
        (PieceType::Knight, false) => '桂',
        (PieceType::Knight, true) => '圭',
        (PieceType::Silver, false) => '銀',
        (PieceType::Silver, true) => '全',
        (PieceType::Gold, _) => '金',
        (PieceType::Bishop, false) => '角',
        (PieceType::Bishop, true) => '馬',
        (PieceType::Rook, false) => '飛',
        (PieceType::Rook, true) => '龍',
        (PieceType::King, _) => match view.owner {
            Side::Black => '王',
            Side::White => '玉',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::render_position;
    use crate::game_state::position::{Position, PositionBuilder};
    use crate::game_state::shogi_types::{PieceType, Point, Side};

    #[test]
    fn opening_board_has_both_camps() {
        let text = render_position(&Position::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[2].starts_with(" [香][桂][銀][金][玉][金][銀][桂][香]"));
        assert!(lines[10].starts_with("  香  桂  銀  金  王  金  銀  桂  香 "));
        assert!(lines[9].contains(" 角 "));
        assert!(lines[3].contains("[飛]"));
        assert_eq!(lines[11], "black hand: -");
        assert_eq!(lines[12], "black to move");
    }

    #[test]
    fn hands_and_promoted_pieces_render() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .place_promoted(Point::new(0, 4), PieceType::Rook, Side::White)
            .hand(Side::Black, PieceType::Pawn)
            .hand(Side::Black, PieceType::Bishop)
            .build()
            .expect("valid");
        let text = render_position(&position);
        assert!(text.contains("[龍]"));
        assert!(text.contains("black hand: 角 歩"));
        assert!(text.starts_with("white hand: -"));
    }
}
