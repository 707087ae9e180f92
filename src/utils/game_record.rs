//! JSON game records for persistence and replay.
//!
//! A record holds the rules, the canonical starting position and the
//! intents played from it. Replaying re-validates every intent, so a record
//! edited by hand or received from a peer cannot smuggle in an illegal move.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game_state::game_state::{GameState, GameStatus};
use crate::game_state::rule_config::RuleConfig;
use crate::moves::move_descriptions::Intent;
use crate::shogi_errors::ShogiResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub rules: RuleConfig,
    pub initial_position: String,
    #[serde(default)]
    pub intents: Vec<Intent>,
}

impl GameRecord {
    /// Empty record starting from `game`'s current position and rules. The
    /// game's log is not carried over.
    pub fn new(game: &GameState) -> Self {
        Self {
            started_at: Utc::now(),
            rules: *game.rules(),
            initial_position: game.to_position_string(),
            intents: Vec::new(),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Submit `intent` to `game` and append it only when accepted.
    pub fn play(&mut self, game: &mut GameState, intent: Intent) -> ShogiResult<GameStatus> {
        let status = game.submit(intent)?;
        self.push(intent);
        Ok(status)
    }

    pub fn to_json(&self) -> ShogiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> ShogiResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ShogiResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> ShogiResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Rebuild the game, move log included, and report the final status.
    /// Stops at the first rejected intent.
    pub fn replay(&self) -> ShogiResult<(GameState, GameStatus)> {
        let mut game = GameState::from_position_string(&self.initial_position, self.rules)?;
        let mut status = game.status()?;
        for (ply, intent) in self.intents.iter().enumerate() {
            status = game.submit(*intent).inspect_err(|err| {
                debug!(ply = ply + 1, %intent, %err, "replay stopped");
            })?;
        }
        Ok((game, status))
    }
}
