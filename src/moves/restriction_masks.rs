//! Occupancy-free reachability ("restriction masks") and path tracing.
//!
//! A restriction mask is every square a piece could reach from its table
//! alone. White's mask is computed in Black's frame and rotated back, so
//! the movement tables never need a second, per-side copy.

use crate::game_state::bit_board::BitBoard;
use crate::game_state::shogi_rules::PROMOTION_ZONE_DEPTH;
use crate::game_state::shogi_types::{Piece, PieceType, Point, Side};
use crate::moves::movement_tables::directions;

/// Squares reachable from `from` by table alone, ignoring other pieces.
pub fn restriction_mask(kind: PieceType, promoted: bool, owner: Side, from: Point) -> BitBoard {
    if !from.in_bounds() {
        return BitBoard::EMPTY;
    }
    match owner {
        Side::Black => black_restriction_mask(kind, promoted, from),
        Side::White => black_restriction_mask(kind, promoted, from.mirrored()).mirrored(),
    }
}

#[inline]
pub fn piece_restriction_mask(piece: &Piece, from: Point) -> BitBoard {
    restriction_mask(piece.kind(), piece.promoted(), piece.owner(), from)
}

fn black_restriction_mask(kind: PieceType, promoted: bool, from: Point) -> BitBoard {
    let mut mask = BitBoard::EMPTY;
    for d in directions(kind, promoted) {
        for n in 1..=d.max_steps as i8 {
            let p = from.offset(d.dx * n, d.dy * n);
            if !p.in_bounds() {
                break;
            }
            mask.assign(p, true);
        }
    }
    mask
}

/// Squares strictly between `from` and `to` along a rank, file or
/// diagonal. Empty for knight jumps, single steps and unaligned pairs.
pub fn squares_between(from: Point, to: Point) -> BitBoard {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let aligned = dx == 0 || dy == 0 || dx.abs() == dy.abs();
    if (dx == 0 && dy == 0) || !aligned {
        return BitBoard::EMPTY;
    }

    let (sx, sy) = (dx.signum(), dy.signum());
    let mut between = BitBoard::EMPTY;
    let mut p = from.offset(sx, sy);
    while p != to {
        between.assign(p, true);
        p = p.offset(sx, sy);
    }
    between
}

/// True for the far `PROMOTION_ZONE_DEPTH` ranks as seen by `side`.
pub fn in_promotion_zone(p: Point, side: Side) -> bool {
    p.in_bounds() && p.viewed_by(side).y < PROMOTION_ZONE_DEPTH
}
