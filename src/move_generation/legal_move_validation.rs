//! Legality of a single proposed move or drop.
//!
//! Both checks are pure: they read the position, may build a private
//! speculative copy, and never touch the caller's state. A rejection carries
//! exactly one reason, the first one hit in the order below.

use tracing::trace;

use crate::game_state::position::Position;
use crate::game_state::rule_config::{PawnDropRule, RuleConfig};
use crate::game_state::shogi_types::{PieceId, PieceType, Point, Side};
use crate::move_generation::checkmate::is_checkmate_ignoring_pawn_drop_rule;
use crate::move_generation::legal_move_apply::{apply_drop, apply_move};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::moves::restriction_masks::{
    in_promotion_zone, piece_restriction_mask, restriction_mask, squares_between,
};
use crate::shogi_errors::{DropRejection, MoveRejection, ShogiError, ShogiResult};

/// Whether the pawn-drop foul is judged at all. Nested checkmate searches
/// run with it off so that judging one pawn drop never recurses into
/// judging another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PawnDropCheck {
    AsConfigured,
    Skip,
}

/// Validate moving the piece on `from` to `to` for the side to move.
///
/// Order of checks:
/// 1. both squares on the board, a piece on `from` (`NoPiece`)
/// 2. the piece belongs to the side to move (`NotOwned`)
/// 3. `to` is reachable by table, the path is clear and `to` is not held by
///    the mover (`CannotMove`)
/// 4. promotion is possible (`CannotPromote`), plus the promotion-zone
///    rules when enabled
/// 5. unless `skip_self_check`, the mover's king is safe afterwards
///    (`SelfCheck`)
pub fn check_move(
    position: &Position,
    rules: &RuleConfig,
    from: Point,
    to: Point,
    promote: bool,
    skip_self_check: bool,
) -> ShogiResult<()> {
    if !from.in_bounds() || !to.in_bounds() {
        return Err(MoveRejection::NoPiece.into());
    }
    let Some(piece) = position.piece_at(from) else {
        return Err(MoveRejection::NoPiece.into());
    };
    let mover = position.side_to_move();
    if piece.owner() != mover {
        return Err(MoveRejection::NotOwned.into());
    }

    if !piece_restriction_mask(piece, from).contains(to) {
        return Err(MoveRejection::CannotMove.into());
    }
    if squares_between(from, to).exists(|p| position.is_occupied(p)) {
        return Err(MoveRejection::CannotMove.into());
    }
    if position.piece_at(to).is_some_and(|target| target.owner() == mover) {
        return Err(MoveRejection::CannotMove.into());
    }

    if promote && (piece.promoted() || !piece.kind().is_promotable()) {
        return Err(MoveRejection::CannotPromote.into());
    }
    if rules.enforce_promotion_zone {
        if promote && !in_promotion_zone(from, mover) && !in_promotion_zone(to, mover) {
            return Err(MoveRejection::CannotPromote.into());
        }
        let stranded = !promote
            && !piece.promoted()
            && !restriction_mask(piece.kind(), false, mover, to).is_non_empty();
        if stranded {
            return Err(MoveRejection::CannotMove.into());
        }
    }

    if !skip_self_check {
        let next = apply_move(position, from, to, promote);
        if is_king_attacked(&next, mover)? {
            trace!(?from, ?to, "move rejected, king left in check");
            return Err(MoveRejection::SelfCheck.into());
        }
    }
    Ok(())
}

/// Validate dropping the held piece `piece` onto `to` for the side to move.
///
/// Order of checks: `OutOfBounds`, `NoPiece` / `NotOwned`,
/// `DuplicateOccupant`, `CannotMove` (the piece could never move again),
/// then unless `skip_self_check`: `DoublePawn`, `PawnDropMate`, `SelfCheck`.
pub fn check_drop(
    position: &Position,
    rules: &RuleConfig,
    piece: PieceId,
    to: Point,
    skip_self_check: bool,
) -> ShogiResult<()> {
    check_drop_with(
        position,
        rules,
        piece,
        to,
        skip_self_check,
        PawnDropCheck::AsConfigured,
    )
}

pub(crate) fn check_drop_with(
    position: &Position,
    rules: &RuleConfig,
    piece: PieceId,
    to: Point,
    skip_self_check: bool,
    pawn_drop: PawnDropCheck,
) -> ShogiResult<()> {
    if !to.in_bounds() {
        return Err(DropRejection::OutOfBounds.into());
    }
    let mover = position.side_to_move();
    if !position.hand(mover).contains(&piece) {
        let reason = if position.hand(mover.opposite()).contains(&piece) {
            DropRejection::NotOwned
        } else {
            DropRejection::NoPiece
        };
        return Err(reason.into());
    }
    let Some(held) = position.piece(piece) else {
        return Err(DropRejection::NoPiece.into());
    };
    if held.owner() != mover {
        return Err(DropRejection::NotOwned.into());
    }
    if position.is_occupied(to) {
        return Err(DropRejection::DuplicateOccupant.into());
    }
    let kind = held.kind();
    if !restriction_mask(kind, false, mover, to).is_non_empty() {
        return Err(DropRejection::CannotMove.into());
    }

    if skip_self_check {
        return Ok(());
    }

    if kind == PieceType::Pawn && has_unpromoted_pawn_on_file(position, mover, to.x) {
        return Err(DropRejection::DoublePawn.into());
    }

    let next = apply_drop(position, piece, to);
    if kind == PieceType::Pawn && pawn_drop == PawnDropCheck::AsConfigured {
        let fouled = faces_enemy_king(position, mover, to)
            && match rules.pawn_drop_rule {
                PawnDropRule::AdjacentToKing => true,
                PawnDropRule::OnlyWhenMate => is_checkmate_ignoring_pawn_drop_rule(&next, rules)?,
            };
        if fouled {
            return Err(DropRejection::PawnDropMate.into());
        }
    }

    if is_king_attacked(&next, mover)? {
        trace!(?to, "drop rejected, king left in check");
        return Err(DropRejection::SelfCheck.into());
    }
    Ok(())
}

/// Legality verdicts as booleans; corrupted-state errors still propagate.
pub(crate) fn accepted(verdict: ShogiResult<()>) -> ShogiResult<bool> {
    match verdict {
        Ok(()) => Ok(true),
        Err(ShogiError::IllegalMove(_) | ShogiError::IllegalDrop(_)) => Ok(false),
        Err(other) => Err(other),
    }
}

fn has_unpromoted_pawn_on_file(position: &Position, side: Side, file: i8) -> bool {
    position.pieces_of(side).any(|(p, piece)| {
        p.x == file && piece.kind() == PieceType::Pawn && !piece.promoted()
    })
}

/// The square one step forward of `to`, in `side`'s frame, holds the
/// opponent's king.
fn faces_enemy_king(position: &Position, side: Side, to: Point) -> bool {
    let ahead = to.viewed_by(side).offset(0, -1).viewed_by(side);
    position
        .piece_at(ahead)
        .is_some_and(|piece| piece.kind() == PieceType::King && piece.owner() != side)
}
