//! Enumeration of every legal move and drop for the side to move.
//!
//! Candidates are drawn from restriction masks (board moves, with and
//! without promotion) and from every empty square (drops, one held piece
//! per kind), then filtered through the full legality checks.

use crate::game_state::bit_board::BitBoard;
use crate::game_state::grid::all_points;
use crate::game_state::position::Position;
use crate::game_state::rule_config::RuleConfig;
use crate::game_state::shogi_types::{PieceId, Point};
use crate::move_generation::legal_move_apply::{apply_drop, apply_move};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_validation::{accepted, check_drop, check_move};
use crate::move_generation::move_generator::{GeneratedAction, MoveGenerator};
use crate::moves::move_descriptions::Intent;
use crate::moves::restriction_masks::piece_restriction_mask;
use crate::shogi_errors::{DropRejection, ShogiResult};

/// Squares the piece on `from` may legally move to, promoting or not.
/// Empty when `from` holds no piece of the side to move.
pub fn legal_destinations(
    position: &Position,
    rules: &RuleConfig,
    from: Point,
) -> ShogiResult<BitBoard> {
    let Some(piece) = position.piece_at(from) else {
        return Ok(BitBoard::EMPTY);
    };
    let mut legal = BitBoard::EMPTY;
    for to in piece_restriction_mask(piece, from).iter() {
        for promote in [false, true] {
            if accepted(check_move(position, rules, from, to, promote, false))? {
                legal.assign(to, true);
                break;
            }
        }
    }
    Ok(legal)
}

/// Squares the held piece may legally be dropped on.
pub fn legal_drop_squares(
    position: &Position,
    rules: &RuleConfig,
    piece: PieceId,
) -> ShogiResult<BitBoard> {
    let mut legal = BitBoard::EMPTY;
    for to in all_points() {
        if accepted(check_drop(position, rules, piece, to, false))? {
            legal.assign(to, true);
        }
    }
    Ok(legal)
}

/// Every legal intent for the side to move. Drops are listed once per held
/// kind.
pub fn legal_actions(position: &Position, rules: &RuleConfig) -> ShogiResult<Vec<Intent>> {
    let mover = position.side_to_move();
    let mut actions = Vec::with_capacity(128);

    for (from, piece) in position.pieces_of(mover) {
        for to in piece_restriction_mask(piece, from).iter() {
            for promote in [false, true] {
                if accepted(check_move(position, rules, from, to, promote, false))? {
                    actions.push(Intent::new_move(from, to, promote));
                }
            }
        }
    }

    let mut kinds_seen = Vec::new();
    for piece in position.hand_pieces(mover) {
        if kinds_seen.contains(&piece.kind()) {
            continue;
        }
        kinds_seen.push(piece.kind());
        for to in legal_drop_squares(position, rules, piece.id())?.iter() {
            actions.push(Intent::new_drop(piece.kind(), to));
        }
    }

    Ok(actions)
}

/// [`MoveGenerator`] over [`legal_actions`] for a fixed rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator {
    pub rules: RuleConfig,
}

impl LegalMoveGenerator {
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }
}

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_actions(&self, position: &Position) -> ShogiResult<Vec<GeneratedAction>> {
        let mover = position.side_to_move();
        let opponent = mover.opposite();
        legal_actions(position, &self.rules)?
            .into_iter()
            .map(|intent| {
                let (position_after, is_capture) = match intent {
                    Intent::Move(mv) => (
                        apply_move(position, mv.from, mv.to, mv.promote),
                        position.is_occupied(mv.to),
                    ),
                    Intent::Drop(drop) => {
                        let piece = position
                            .hand_piece_of_kind(mover, drop.kind)
                            .ok_or(DropRejection::NoPiece)?;
                        (apply_drop(position, piece, drop.to), false)
                    }
                };
                let gives_check = is_king_attacked(&position_after, opponent)?;
                Ok(GeneratedAction {
                    intent,
                    position_after,
                    is_capture,
                    gives_check,
                })
            })
            .collect()
    }
}
