//! Errors used throughout the shogi rule engine.
//!
//! Rejections of player input are ordinary outcomes: `MoveRejection` and
//! `DropRejection` carry exactly one reason each and are wrapped into
//! `ShogiError` so that every fallible operation in the crate can return a
//! single `ShogiResult`.
//!
//! Usage guidelines:
//! - Treat `IllegalMove` / `IllegalDrop` as expected results of user or peer
//!   input. The game state is untouched when one of them is returned.
//! - Treat `MissingKing` as a corrupted state. It is never produced by a
//!   state built through the public constructors and must not be recovered
//!   from silently.
//! - Parsing variants (`InvalidPosition`, `InvalidNotation`) are recoverable
//!   and suitable for showing to a user.

use thiserror::Error;

use crate::game_state::shogi_types::Side;

/// Why a proposed board move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveRejection {
    /// Source square is empty or off the board.
    #[error("there is no piece to move on the source square")]
    NoPiece,

    /// The piece on the source square belongs to the opponent.
    #[error("the piece belongs to the opponent")]
    NotOwned,

    /// Unreachable destination, blocked path, own piece on the destination,
    /// or a move that would strand an unpromoted piece.
    #[error("the piece cannot move to that square")]
    CannotMove,

    /// Promotion requested for a promoted or non-promotable piece, or
    /// outside the promotion zone when the zone is enforced.
    #[error("the piece cannot promote")]
    CannotPromote,

    /// The mover's own king would be attacked after the move.
    #[error("the move leaves the king in check")]
    SelfCheck,
}

/// Why a proposed drop from hand was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DropRejection {
    #[error("the destination is off the board")]
    OutOfBounds,

    #[error("the piece is not in the mover's hand")]
    NoPiece,

    #[error("the piece is held by the opponent")]
    NotOwned,

    #[error("the destination is already occupied")]
    DuplicateOccupant,

    /// The dropped piece could never move from the destination.
    #[error("the piece could never move from that square")]
    CannotMove,

    /// Second unpromoted pawn of the same side on one file (nifu).
    #[error("two unpromoted pawns on the same file")]
    DoublePawn,

    /// Pawn dropped in front of the enemy king (uchifuzume).
    #[error("pawn dropped in front of the enemy king")]
    PawnDropMate,

    #[error("the drop leaves the king in check")]
    SelfCheck,
}

/// Fouls detected after an accepted move, at turn-advance time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Foul {
    /// Sennichite: the same position occurred the configured number of times.
    FourfoldRepetition,
}

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum ShogiError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveRejection),

    #[error("illegal drop: {0}")]
    IllegalDrop(#[from] DropRejection),

    /// Corrupted state: a side has no king on the board.
    #[error("no {0} king on the board")]
    MissingKing(Side),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShogiError {
    /// True for errors that indicate a corrupted game state rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ShogiError::MissingKing(_))
    }

    pub fn move_rejection(&self) -> Option<MoveRejection> {
        match self {
            ShogiError::IllegalMove(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn drop_rejection(&self) -> Option<DropRejection> {
        match self {
            ShogiError::IllegalDrop(reason) => Some(*reason),
            _ => None,
        }
    }
}

pub type ShogiResult<T> = Result<T, ShogiError>;
