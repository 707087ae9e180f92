//! Static movement tables for every piece kind.
//!
//! Tables are authored from Black's seat: "forward" is `dy = -1`. White
//! reuses the same tables through the 180-degree rotation applied in
//! `restriction_masks`.

use crate::game_state::shogi_types::PieceType;

/// Sliding pieces never travel further than the board is long.
pub const UNBOUNDED: u8 = 8;

/// One movement ray: `max_steps` repetitions of `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
    pub max_steps: u8,
}

const fn step(dx: i8, dy: i8) -> Direction {
    Direction {
        dx,
        dy,
        max_steps: 1,
    }
}

const fn slide(dx: i8, dy: i8) -> Direction {
    Direction {
        dx,
        dy,
        max_steps: UNBOUNDED,
    }
}

const PAWN: &[Direction] = &[step(0, -1)];
const LANCE: &[Direction] = &[slide(0, -1)];
const KNIGHT: &[Direction] = &[step(-1, -2), step(1, -2)];
const SILVER: &[Direction] = &[
    step(-1, -1),
    step(0, -1),
    step(1, -1),
    step(-1, 1),
    step(1, 1),
];
const GOLD: &[Direction] = &[
    step(-1, -1),
    step(0, -1),
    step(1, -1),
    step(-1, 0),
    step(1, 0),
    step(0, 1),
];
const KING: &[Direction] = &[
    step(-1, -1),
    step(0, -1),
    step(1, -1),
    step(-1, 0),
    step(1, 0),
    step(-1, 1),
    step(0, 1),
    step(1, 1),
];
const ROOK: &[Direction] = &[slide(0, -1), slide(-1, 0), slide(1, 0), slide(0, 1)];
const BISHOP: &[Direction] = &[slide(-1, -1), slide(1, -1), slide(-1, 1), slide(1, 1)];
// Dragon and horse add the four neighbouring squares their slides miss.
const DRAGON: &[Direction] = &[
    slide(0, -1),
    slide(-1, 0),
    slide(1, 0),
    slide(0, 1),
    step(-1, -1),
    step(1, -1),
    step(-1, 1),
    step(1, 1),
];
const HORSE: &[Direction] = &[
    slide(-1, -1),
    slide(1, -1),
    slide(-1, 1),
    slide(1, 1),
    step(0, -1),
    step(-1, 0),
    step(1, 0),
    step(0, 1),
];
const NONE: &[Direction] = &[];

/// Movement table for a kind in its normal or promoted form. King and Gold
/// have no promoted table.
pub const fn directions(kind: PieceType, promoted: bool) -> &'static [Direction] {
    match (kind, promoted) {
        (PieceType::Pawn, false) => PAWN,
        (PieceType::Lance, false) => LANCE,
        (PieceType::Knight, false) => KNIGHT,
        (PieceType::Silver, false) => SILVER,
        (PieceType::Gold, false) => GOLD,
        (PieceType::Bishop, false) => BISHOP,
        (PieceType::Rook, false) => ROOK,
        (PieceType::King, false) => KING,
        (PieceType::Pawn | PieceType::Lance | PieceType::Knight | PieceType::Silver, true) => GOLD,
        (PieceType::Bishop, true) => HORSE,
        (PieceType::Rook, true) => DRAGON,
        (PieceType::Gold | PieceType::King, true) => NONE,
    }
}
