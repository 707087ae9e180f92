//! Fourfold repetition (sennichite) over the move log.
//!
//! Only the canonical position ids in the log are compared, so two
//! different move orders reaching the same board, hands and turn count as
//! the same position. Check-awareness is not modelled.

use crate::game_state::move_log::MoveLogEntry;
use crate::game_state::shogi_rules::DEFAULT_REPETITION_LIMIT;

/// Occurrences of the latest entry's position across the whole log,
/// including the latest entry itself. Zero for an empty log.
pub fn latest_position_count(log: &[MoveLogEntry]) -> usize {
    let Some(latest) = log.last() else {
        return 0;
    };
    log.iter()
        .filter(|entry| entry.position_id == latest.position_id)
        .count()
}

pub fn is_repeated(log: &[MoveLogEntry], limit: usize) -> bool {
    limit > 0 && latest_position_count(log) >= limit
}

pub fn is_repeated_fourfold(log: &[MoveLogEntry]) -> bool {
    is_repeated(log, DEFAULT_REPETITION_LIMIT)
}
