//! Crate root module declarations for the Plum Shogi rule engine.
//!
//! This file exposes the rule engine subsystems (game state, movement
//! tables, legality checking and utility helpers) so the command-line tool,
//! tests, benchmarks and embedding applications can import stable module
//! paths.

pub mod game_state {
    pub mod bit_board;
    pub mod game_state;
    pub mod grid;
    pub mod move_log;
    pub mod position;
    pub mod rule_config;
    pub mod shogi_rules;
    pub mod shogi_types;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod movement_tables;
    pub mod restriction_masks;
}

pub mod move_generation {
    pub mod checkmate;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_validation;
    pub mod move_generator;
    pub mod perft;
    pub mod repetition;
}

pub mod utils {
    pub mod game_record;
    pub mod notation;
    pub mod playout;
    pub mod position_codec;
    pub mod render_game_state;
}

pub mod shogi_errors;
