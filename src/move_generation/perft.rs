//! Node counting over the legal action tree, used to cross-check the move
//! generator against published shogi perft figures.

use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedAction, MoveGenerator};
use crate::shogi_errors::ShogiResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub drops: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn record(&mut self, action: &GeneratedAction) {
        self.nodes += 1;
        if action.is_capture {
            self.captures += 1;
        }
        if action.is_drop() {
            self.drops += 1;
        }
        if action.is_promotion() {
            self.promotions += 1;
        }
        if action.gives_check {
            self.checks += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> ShogiResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for action in generator.generate_legal_actions(position)? {
        perft_recurse(generator, &action, depth, 1, &mut total)?;
    }
    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    action: &GeneratedAction,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> ShogiResult<()> {
    if current_depth == search_depth {
        counts.record(action);
        return Ok(());
    }

    for child in generator.generate_legal_actions(&action.position_after)? {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{perft, PerftCounts};
    use crate::game_state::position::Position;
    use crate::game_state::rule_config::RuleConfig;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let generator = LegalMoveGenerator::default();
        let counts = perft(&generator, &Position::new_game(), 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_matches_published_opening_counts() {
        let generator = LegalMoveGenerator::new(RuleConfig::traditional());
        let start = Position::new_game();

        assert_eq!(perft(&generator, &start, 1).expect("depth 1").nodes, 30);
        assert_eq!(perft(&generator, &start, 2).expect("depth 2").nodes, 900);
    }

    #[test]
    #[ignore = "slow in debug builds"]
    fn perft_depth_three_from_opening() {
        let generator = LegalMoveGenerator::new(RuleConfig::traditional());
        let counts = perft(&generator, &Position::new_game(), 3).expect("depth 3");
        assert_eq!(counts.nodes, 25_470);
        assert_eq!(counts.drops, 0);
    }
}
