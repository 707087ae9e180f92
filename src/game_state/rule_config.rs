//! Rule switches for a game.
//!
//! The defaults reproduce the house rules this engine has always played:
//! any pawn drop straight in front of the enemy king is a foul, promotion is
//! allowed anywhere, and a position seen four times is a drawing foul.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game_state::shogi_rules::DEFAULT_REPETITION_LIMIT;
use crate::shogi_errors::ShogiResult;

/// How the pawn-drop foul (uchifuzume) is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PawnDropRule {
    /// Any pawn drop directly in front of the enemy king is refused.
    #[default]
    AdjacentToKing,
    /// Refused only when the drop actually delivers checkmate.
    OnlyWhenMate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub repetition_limit: usize,
    pub pawn_drop_rule: PawnDropRule,
    /// Restrict promotion to moves touching the far three ranks and force
    /// promotion where an unpromoted piece would be stranded.
    pub enforce_promotion_zone: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            repetition_limit: DEFAULT_REPETITION_LIMIT,
            pawn_drop_rule: PawnDropRule::AdjacentToKing,
            enforce_promotion_zone: false,
        }
    }
}

impl RuleConfig {
    /// Traditional tournament rules.
    pub fn traditional() -> Self {
        Self {
            repetition_limit: DEFAULT_REPETITION_LIMIT,
            pawn_drop_rule: PawnDropRule::OnlyWhenMate,
            enforce_promotion_zone: true,
        }
    }

    pub fn from_json_str(data: &str) -> ShogiResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ShogiResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::{PawnDropRule, RuleConfig};

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = RuleConfig::from_json_str(r#"{"pawn_drop_rule":"only_when_mate"}"#)
            .expect("partial config should parse");
        assert_eq!(config.pawn_drop_rule, PawnDropRule::OnlyWhenMate);
        assert_eq!(config.repetition_limit, 4);
        assert!(!config.enforce_promotion_zone);
    }

    #[test]
    fn malformed_config_is_a_json_error() {
        let err = RuleConfig::from_json_str("{ not json").expect_err("should fail");
        assert!(err.to_string().starts_with("json error"));
    }

    #[test]
    fn config_file_loads() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rules.json");
        let json = serde_json::to_string(&RuleConfig::traditional()).expect("serialize");
        std::fs::write(&path, json).expect("write config");
        assert_eq!(
            RuleConfig::from_json_file(&path).expect("load"),
            RuleConfig::traditional()
        );
    }
}
