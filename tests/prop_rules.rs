//! Property-based tests for the rule engine.
//!
//! Each case drives a game through a seeded random playout and checks
//! properties that must hold in every reachable position.
//! Run with: cargo test --release prop_rules

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use plum_shogi::game_state::game_state::GameState;
use plum_shogi::game_state::position::Position;
use plum_shogi::game_state::shogi_types::Point;
use plum_shogi::move_generation::legal_move_checks::is_king_attacked;
use plum_shogi::moves::move_descriptions::Intent;
use plum_shogi::utils::game_record::GameRecord;
use plum_shogi::utils::playout::random_playout;
use plum_shogi::utils::position_codec::encode_position;

fn played_game(seed: u64, plies: usize) -> (GameState, Vec<Intent>) {
    let mut game = GameState::new_game();
    let summary = random_playout(&mut game, &mut StdRng::seed_from_u64(seed), plies).unwrap();
    (game, summary.intents)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Encoding then decoding any reachable position reproduces it.
    #[test]
    fn prop_position_string_round_trip(seed in any::<u64>(), plies in 0usize..40) {
        let (game, _) = played_game(seed, plies);
        let encoded = game.to_position_string();
        let decoded = Position::from_position_string(&encoded).unwrap();
        prop_assert!(decoded.same_position(game.position()));
        prop_assert_eq!(encode_position(&decoded), encoded);
    }

    /// No accepted action leaves the mover's own king attacked, and the
    /// turn passes after every one.
    #[test]
    fn prop_accepted_actions_are_safe_and_alternate(seed in any::<u64>(), plies in 1usize..40) {
        let (_, intents) = played_game(seed, plies);
        let mut game = GameState::new_game();
        for intent in intents {
            let mover = game.side_to_move();
            game.submit(intent).unwrap();
            prop_assert!(!is_king_attacked(game.position(), mover).unwrap());
            prop_assert_eq!(game.side_to_move(), mover.opposite());
        }
    }

    /// A rejected move changes nothing, log included.
    #[test]
    fn prop_rejected_move_leaves_state_untouched(
        seed in any::<u64>(),
        plies in 0usize..30,
        from in (0i8..9, 0i8..9),
        to in (0i8..9, 0i8..9),
        promote in any::<bool>()
    ) {
        let (mut game, _) = played_game(seed, plies);
        let before = game.clone();
        let from = Point::new(from.0, from.1);
        let to = Point::new(to.0, to.1);

        match game.apply_move(from, to, promote) {
            Ok(_) => prop_assert_eq!(game.move_log().len(), before.move_log().len() + 1),
            Err(err) => {
                prop_assert!(err.move_rejection().is_some());
                prop_assert_eq!(&game, &before);
            }
        }
    }

    /// Every generated action passes validation.
    #[test]
    fn prop_generated_actions_validate(seed in any::<u64>(), plies in 0usize..30) {
        let (game, _) = played_game(seed, plies);
        for intent in game.legal_actions().unwrap() {
            let verdict = game.check_intent(intent);
            prop_assert!(verdict.is_ok(), "{intent} was generated but rejected");
        }
    }

    /// A record started mid-game replays to the same position, drops
    /// included, even though decoding renumbers the pieces.
    #[test]
    fn prop_mid_game_record_replays(
        seed in any::<u64>(),
        opening in 0usize..40,
        rest in 1usize..30
    ) {
        let (mut game, _) = played_game(seed, opening);
        let mut record = GameRecord::new(&game);
        let summary = random_playout(&mut game, &mut StdRng::seed_from_u64(!seed), rest).unwrap();
        record.intents = summary.intents;

        // the record starts without history, so only the position is compared
        let (replayed, _) = record.replay().unwrap();
        prop_assert_eq!(replayed.move_log().len(), summary.plies);
        prop_assert_eq!(replayed.to_position_string(), game.to_position_string());
    }
}
