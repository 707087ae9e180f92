//! Exhaustive checkmate test.
//!
//! The side to move is mated when its king is attacked and no board move
//! and no drop leaves it unattacked. Candidate board moves come from each
//! piece's restriction mask; candidate drops cover one held piece per kind
//! on every empty square. The search stops on the first escape.

use tracing::trace;

use crate::game_state::grid::all_points;
use crate::game_state::position::Position;
use crate::game_state::rule_config::RuleConfig;
use crate::game_state::shogi_types::{PieceId, Point};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_validation::{
    accepted, check_drop_with, check_move, PawnDropCheck,
};
use crate::moves::restriction_masks::piece_restriction_mask;
use crate::shogi_errors::ShogiResult;

/// True when the side to move is checkmated.
pub fn is_checkmate(position: &Position, rules: &RuleConfig) -> ShogiResult<bool> {
    checkmate_search(position, rules, PawnDropCheck::AsConfigured)
}

/// Same test with the defender's pawn drops judged without the pawn-drop
/// foul. Used while judging that foul itself.
pub(crate) fn is_checkmate_ignoring_pawn_drop_rule(
    position: &Position,
    rules: &RuleConfig,
) -> ShogiResult<bool> {
    checkmate_search(position, rules, PawnDropCheck::Skip)
}

/// First legal reply found for the side to move, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Move { from: Point, to: Point, promote: bool },
    Drop { piece: PieceId, to: Point },
}

fn checkmate_search(
    position: &Position,
    rules: &RuleConfig,
    pawn_drop: PawnDropCheck,
) -> ShogiResult<bool> {
    let defender = position.side_to_move();
    if !is_king_attacked(position, defender)? {
        return Ok(false);
    }
    let escape = find_escape(position, rules, pawn_drop)?;
    trace!(%defender, ?escape, "checkmate search finished");
    Ok(escape.is_none())
}

pub(crate) fn find_escape(
    position: &Position,
    rules: &RuleConfig,
    pawn_drop: PawnDropCheck,
) -> ShogiResult<Option<Escape>> {
    let defender = position.side_to_move();
    let mut examined: usize = 0;

    for (from, piece) in position.pieces_of(defender) {
        for to in piece_restriction_mask(piece, from).iter() {
            for promote in [false, true] {
                examined += 1;
                if accepted(check_move(position, rules, from, to, promote, false))? {
                    trace!(examined, "escape by board move");
                    return Ok(Some(Escape::Move { from, to, promote }));
                }
            }
        }
    }

    let mut kinds_seen = Vec::new();
    for piece in position.hand_pieces(defender) {
        if kinds_seen.contains(&piece.kind()) {
            continue;
        }
        kinds_seen.push(piece.kind());
        for to in all_points().filter(|&p| !position.is_occupied(p)) {
            examined += 1;
            let verdict = check_drop_with(position, rules, piece.id(), to, false, pawn_drop);
            if accepted(verdict)? {
                trace!(examined, "escape by drop");
                return Ok(Some(Escape::Drop { piece: piece.id(), to }));
            }
        }
    }

    trace!(examined, "no escape");
    Ok(None)
}
