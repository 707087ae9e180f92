//! Uniformly random playouts.
//!
//! Each ply picks one legal action at random. There is no evaluation; this
//! exists to drive the engine through many reachable positions for smoke
//! runs, property tests and benchmarks.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::game_state::game_state::{GameState, GameStatus};
use crate::moves::move_descriptions::Intent;
use crate::shogi_errors::ShogiResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutSummary {
    pub plies: usize,
    pub status: GameStatus,
    pub intents: Vec<Intent>,
}

/// Play up to `max_plies` random legal actions on `game`, stopping early on
/// checkmate, a foul, or a side with no legal action.
pub fn random_playout<R: Rng + ?Sized>(
    game: &mut GameState,
    rng: &mut R,
    max_plies: usize,
) -> ShogiResult<PlayoutSummary> {
    let mut status = game.status()?;
    let mut intents = Vec::new();

    while intents.len() < max_plies && !status.is_terminal() {
        let actions = game.legal_actions()?;
        let Some(&intent) = actions.choose(rng) else {
            break;
        };
        status = game.submit(intent)?;
        intents.push(intent);
    }

    debug!(plies = intents.len(), %status, "playout finished");
    Ok(PlayoutSummary {
        plies: intents.len(),
        status,
        intents,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::random_playout;
    use crate::game_state::game_state::GameState;

    #[test]
    fn playout_is_reproducible_for_a_seed() {
        let mut first = GameState::new_game();
        let mut second = GameState::new_game();
        let a = random_playout(&mut first, &mut StdRng::seed_from_u64(7), 40).expect("playout");
        let b = random_playout(&mut second, &mut StdRng::seed_from_u64(7), 40).expect("playout");
        assert_eq!(a, b);
        assert_eq!(first, second);
        assert_eq!(first.move_log().len(), a.plies);
        assert!(a.plies <= 40);
    }

    #[test]
    fn zero_plies_leaves_the_game_alone() {
        let mut game = GameState::new_game();
        let summary = random_playout(&mut game, &mut StdRng::seed_from_u64(1), 0).expect("playout");
        assert_eq!(summary.plies, 0);
        assert!(game.move_log().is_empty());
    }
}
