//! Unchecked mutators. Callers validate first; these only move ids around
//! and hand the turn over.

use crate::game_state::position::Position;
use crate::game_state::shogi_types::{PieceId, Point};

/// Move the piece on `from` to `to` in place, capturing into the mover's
/// hand, and pass the turn. Returns the captured piece id, if any.
pub fn apply_move_in_place(
    position: &mut Position,
    from: Point,
    to: Point,
    promote: bool,
) -> Option<PieceId> {
    let captured = position.relocate(from, to, promote);
    position.pass_turn();
    captured
}

/// Drop `piece` from the side-to-move's hand onto `to` and pass the turn.
/// Returns false, leaving the position untouched, when the piece is not in
/// that hand.
pub fn apply_drop_in_place(position: &mut Position, piece: PieceId, to: Point) -> bool {
    if !position.place_from_hand(piece, to) {
        return false;
    }
    position.pass_turn();
    true
}

/// Copy-make variant used by the speculative legality checks.
pub fn apply_move(position: &Position, from: Point, to: Point, promote: bool) -> Position {
    let mut next = position.clone();
    apply_move_in_place(&mut next, from, to, promote);
    next
}

pub fn apply_drop(position: &Position, piece: PieceId, to: Point) -> Position {
    let mut next = position.clone();
    apply_drop_in_place(&mut next, piece, to);
    next
}
