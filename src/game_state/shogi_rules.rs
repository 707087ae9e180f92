//! Canonical shogi rule constants.
//!
//! Board dimensions, promotion-zone depth, the default repetition limit and
//! the standard opening position in the canonical position-string format.

pub const BOARD_WIDTH: usize = 9;
pub const BOARD_HEIGHT: usize = 9;
pub const SQUARE_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Number of far ranks in which a piece may promote.
pub const PROMOTION_ZONE_DEPTH: i8 = 3;

/// Occurrences of one position that make a sennichite foul.
pub const DEFAULT_REPETITION_LIMIT: usize = 4;

/// Standard opening position, Black to move, empty hands.
pub const STARTING_POSITION: &str = "0,,,\
110-210-310-410-710-410-310-210-110,\
_-610-_-_-_-_-_-510-_,\
010-010-010-010-010-010-010-010-010,\
_-_-_-_-_-_-_-_-_,\
_-_-_-_-_-_-_-_-_,\
_-_-_-_-_-_-_-_-_,\
000-000-000-000-000-000-000-000-000,\
_-500-_-_-_-_-_-600-_,\
100-200-300-400-700-400-300-200-100";
