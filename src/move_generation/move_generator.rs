use crate::game_state::position::Position;
use crate::moves::move_descriptions::Intent;
use crate::shogi_errors::ShogiResult;

/// One legal action together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedAction {
    pub intent: Intent,
    pub position_after: Position,
    pub is_capture: bool,
    pub gives_check: bool,
}

impl GeneratedAction {
    pub fn is_drop(&self) -> bool {
        matches!(self.intent, Intent::Drop(_))
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self.intent, Intent::Move(mv) if mv.promote)
    }
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_actions(&self, position: &Position) -> ShogiResult<Vec<GeneratedAction>>;
}
