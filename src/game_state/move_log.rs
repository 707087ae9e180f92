use serde::{Deserialize, Serialize};

use crate::game_state::shogi_types::{PieceType, Point, Side};

/// One accepted move or drop. The log is append-only and is the only input
/// to repetition detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    pub mover: Side,
    pub to: Point,
    pub kind: PieceType,
    /// The piece promoted on this move.
    pub promotion: bool,
    /// The piece is promoted after this move.
    pub promoted: bool,
    /// `None` for a drop.
    pub from: Option<Point>,
    /// Canonical position string after the move.
    pub position_id: String,
}
