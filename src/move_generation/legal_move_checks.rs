use tracing::error;

use crate::game_state::bit_board::BitBoard;
use crate::game_state::position::Position;
use crate::game_state::shogi_types::{Point, Side};
use crate::moves::movement_tables::directions;
use crate::shogi_errors::{ShogiError, ShogiResult};

/// Squares the piece on `from` attacks, tracing each ray one cell at a time
/// and stopping on the first occupied square (which is included). Squares
/// holding the attacker's own pieces are included too.
pub fn attack_mask(position: &Position, from: Point) -> BitBoard {
    let Some(piece) = position.piece_at(from) else {
        return BitBoard::EMPTY;
    };
    let owner = piece.owner();
    let local_from = from.viewed_by(owner);

    let mut mask = BitBoard::EMPTY;
    for d in directions(piece.kind(), piece.promoted()) {
        for n in 1..=d.max_steps as i8 {
            let local = local_from.offset(d.dx * n, d.dy * n);
            if !local.in_bounds() {
                break;
            }
            let square = local.viewed_by(owner);
            mask.assign(square, true);
            if position.is_occupied(square) {
                break;
            }
        }
    }
    mask
}

pub fn king_square(position: &Position, side: Side) -> ShogiResult<Point> {
    position.king_square(side).ok_or_else(|| {
        error!(%side, "king missing from the board, position is corrupted");
        ShogiError::MissingKing(side)
    })
}

/// True when any piece of `attacker` attacks `square`.
pub fn is_square_attacked(position: &Position, square: Point, attacker: Side) -> bool {
    position
        .pieces_of(attacker)
        .any(|(from, _)| attack_mask(position, from).contains(square))
}

/// True when `side`'s king is attacked by the opponent, regardless of whose
/// turn it is.
pub fn is_king_attacked(position: &Position, side: Side) -> ShogiResult<bool> {
    let king = king_square(position, side)?;
    Ok(is_square_attacked(position, king, side.opposite()))
}

pub fn attackers_to_square(position: &Position, square: Point, attacker: Side) -> Vec<Point> {
    position
        .pieces_of(attacker)
        .filter(|(from, _)| attack_mask(position, *from).contains(square))
        .map(|(from, _)| from)
        .collect()
}
