//! Move and drop intents.
//!
//! These are the only two shapes the engine accepts, whether they come from
//! a local board or are relayed from a remote peer. Relayed intents are
//! re-validated in full before they touch the game state.
//!
//! A drop names the kind of held piece, not an arena id. Held pieces of one
//! kind are interchangeable, and ids differ between a live game and the same
//! position decoded from its canonical string, so intents stay valid across
//! records, relays and resumed games.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::shogi_types::{PieceType, Point};
use crate::utils::notation::piece_letter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    pub from: Point,
    pub to: Point,
    #[serde(default)]
    pub promote: bool,
}

/// Drop of any held piece of `kind` from the mover's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropIntent {
    pub kind: PieceType,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Intent {
    Move(MoveIntent),
    Drop(DropIntent),
}

impl Intent {
    pub fn new_move(from: Point, to: Point, promote: bool) -> Self {
        Intent::Move(MoveIntent { from, to, promote })
    }

    pub fn new_drop(kind: PieceType, to: Point) -> Self {
        Intent::Drop(DropIntent { kind, to })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let square = |p: Point| match p.to_notation() {
            Some((file, rank)) => format!("{file}{rank}"),
            None => format!("({},{})", p.x, p.y),
        };
        match self {
            Intent::Move(mv) => {
                write!(f, "{}{}", square(mv.from), square(mv.to))?;
                if mv.promote {
                    write!(f, "+")?;
                }
                Ok(())
            }
            Intent::Drop(drop) => write!(f, "{}*{}", piece_letter(drop.kind), square(drop.to)),
        }
    }
}
