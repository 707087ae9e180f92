//! Authoritative game state.
//!
//! `GameState` owns the position, the append-only move log and the rule
//! switches. Every accepted move or drop mutates it in place, appends one
//! log entry and reports the resulting [`GameStatus`]; every rejected one
//! returns the reason and leaves it untouched. An accepted action is played
//! on a copy of the position and only kept once its status is known, so an
//! `Err` never follows a mutation.

use std::fmt;

use tracing::{debug, error, info};

use crate::game_state::bit_board::BitBoard;
use crate::game_state::move_log::MoveLogEntry;
use crate::game_state::position::Position;
use crate::game_state::rule_config::RuleConfig;
use crate::game_state::shogi_types::{PieceId, PieceType, Point, Side};
use crate::move_generation::checkmate::is_checkmate;
use crate::move_generation::legal_move_apply::{apply_drop_in_place, apply_move_in_place};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_generator::{
    legal_actions, legal_destinations, legal_drop_squares,
};
use crate::move_generation::legal_move_validation::{check_drop, check_move};
use crate::move_generation::repetition::is_repeated;
use crate::moves::move_descriptions::Intent;
use crate::shogi_errors::{DropRejection, Foul, MoveRejection, ShogiError, ShogiResult};
use crate::utils::position_codec::encode_position;

/// Outcome reported after each accepted move or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a legal reply.
    Check,
    Checkmate { winner: Side },
    Foul(Foul),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Foul(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Foul(Foul::FourfoldRepetition) => write!(f, "fourfold repetition"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    move_log: Vec<MoveLogEntry>,
    rules: RuleConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::with_rules(RuleConfig::default())
    }

    pub fn with_rules(rules: RuleConfig) -> Self {
        Self::from_position(Position::new_game(), rules)
    }

    /// Start from an arbitrary position with an empty log.
    pub fn from_position(position: Position, rules: RuleConfig) -> Self {
        Self {
            position,
            move_log: Vec::new(),
            rules,
        }
    }

    pub fn from_position_string(data: &str, rules: RuleConfig) -> ShogiResult<Self> {
        Ok(Self::from_position(Position::from_position_string(data)?, rules))
    }

    /// Canonical string of the current position. The log is not included.
    #[inline]
    pub fn to_position_string(&self) -> String {
        encode_position(&self.position)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn move_log(&self) -> &[MoveLogEntry] {
        &self.move_log
    }

    #[inline]
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }

    pub fn check_move(&self, from: Point, to: Point, promote: bool) -> ShogiResult<()> {
        check_move(&self.position, &self.rules, from, to, promote, false)
    }

    pub fn check_drop(&self, piece: PieceId, to: Point) -> ShogiResult<()> {
        check_drop(&self.position, &self.rules, piece, to, false)
    }

    /// Validate and play a board move.
    pub fn apply_move(&mut self, from: Point, to: Point, promote: bool) -> ShogiResult<GameStatus> {
        if let Err(err) = self.check_move(from, to, promote) {
            debug!(?from, ?to, promote, %err, "move rejected");
            return Err(err);
        }
        let mover = self.side_to_move();
        let kind = self
            .position
            .piece_at(from)
            .map(|piece| piece.kind())
            .ok_or(MoveRejection::NoPiece)?;

        let mut next = self.position.clone();
        apply_move_in_place(&mut next, from, to, promote);
        let promoted = next.piece_at(to).is_some_and(|piece| piece.promoted());
        let entry = MoveLogEntry {
            mover,
            to,
            kind,
            promotion: promote,
            promoted,
            from: Some(from),
            position_id: String::new(),
        };
        self.commit(next, entry)
    }

    /// Validate and play a drop of the held piece `piece`.
    pub fn apply_drop(&mut self, piece: PieceId, to: Point) -> ShogiResult<GameStatus> {
        if let Err(err) = self.check_drop(piece, to) {
            debug!(piece, ?to, %err, "drop rejected");
            return Err(err);
        }
        let mover = self.side_to_move();
        let kind = self
            .position
            .piece(piece)
            .map(|held| held.kind())
            .ok_or(DropRejection::NoPiece)?;

        let mut next = self.position.clone();
        if !apply_drop_in_place(&mut next, piece, to) {
            return Err(DropRejection::NoPiece.into());
        }
        let entry = MoveLogEntry {
            mover,
            to,
            kind,
            promotion: false,
            promoted: false,
            from: None,
            position_id: String::new(),
        };
        self.commit(next, entry)
    }

    /// Play an intent from a local board or a remote peer. Both go through
    /// the same validation. A drop uses any held piece of the named kind.
    pub fn submit(&mut self, intent: Intent) -> ShogiResult<GameStatus> {
        match intent {
            Intent::Move(mv) => self.apply_move(mv.from, mv.to, mv.promote),
            Intent::Drop(drop) => {
                let piece = self.held_piece(drop.kind)?;
                self.apply_drop(piece, drop.to)
            }
        }
    }

    /// Validate an intent without playing it.
    pub fn check_intent(&self, intent: Intent) -> ShogiResult<()> {
        match intent {
            Intent::Move(mv) => self.check_move(mv.from, mv.to, mv.promote),
            Intent::Drop(drop) => self.check_drop(self.held_piece(drop.kind)?, drop.to),
        }
    }

    /// Status of the current position, evaluated the same way as after a
    /// move: repetition first, then checkmate, then check.
    pub fn status(&self) -> ShogiResult<GameStatus> {
        if self.is_repeated() {
            return Ok(GameStatus::Foul(Foul::FourfoldRepetition));
        }
        if self.is_checkmate()? {
            return Ok(GameStatus::Checkmate {
                winner: self.side_to_move().opposite(),
            });
        }
        if self.is_in_check()? {
            return Ok(GameStatus::Check);
        }
        Ok(GameStatus::Ongoing)
    }

    pub fn is_checkmate(&self) -> ShogiResult<bool> {
        is_checkmate(&self.position, &self.rules)
    }

    /// The side to move is in check.
    pub fn is_in_check(&self) -> ShogiResult<bool> {
        is_king_attacked(&self.position, self.side_to_move())
    }

    pub fn is_repeated(&self) -> bool {
        is_repeated(&self.move_log, self.rules.repetition_limit)
    }

    pub fn legal_actions(&self) -> ShogiResult<Vec<Intent>> {
        legal_actions(&self.position, &self.rules)
    }

    pub fn legal_destinations(&self, from: Point) -> ShogiResult<BitBoard> {
        legal_destinations(&self.position, &self.rules, from)
    }

    pub fn legal_drop_squares(&self, piece: PieceId) -> ShogiResult<BitBoard> {
        legal_drop_squares(&self.position, &self.rules, piece)
    }

    /// A held piece of `kind` from the mover's hand.
    fn held_piece(&self, kind: PieceType) -> ShogiResult<PieceId> {
        let mover = self.side_to_move();
        if let Some(piece) = self.position.hand_piece_of_kind(mover, kind) {
            return Ok(piece);
        }
        let reason = if self.position.hand_piece_of_kind(mover.opposite(), kind).is_some() {
            DropRejection::NotOwned
        } else {
            DropRejection::NoPiece
        };
        debug!(?kind, %reason, "drop rejected");
        Err(reason.into())
    }

    /// Install `next` and its log entry, keeping them only if the status of
    /// the new position can be evaluated.
    fn commit(&mut self, next: Position, mut entry: MoveLogEntry) -> ShogiResult<GameStatus> {
        let mover = entry.mover;
        entry.position_id = encode_position(&next);
        let previous = std::mem::replace(&mut self.position, next);
        self.move_log.push(entry);

        match self.advance(mover) {
            Ok(status) => Ok(status),
            Err(err) => {
                error!(%err, "status evaluation failed, action rolled back");
                self.move_log.pop();
                self.position = previous;
                Err(err)
            }
        }
    }

    fn advance(&self, mover: Side) -> ShogiResult<GameStatus> {
        let status = self.status()?;
        match status {
            GameStatus::Foul(foul) => {
                info!(ply = self.move_log.len(), ?foul, "foul after move");
            }
            GameStatus::Checkmate { winner } => {
                info!(ply = self.move_log.len(), %winner, "checkmate");
            }
            GameStatus::Check | GameStatus::Ongoing => {
                debug!(ply = self.move_log.len(), %mover, %status, "move accepted");
            }
        }
        Ok(status)
    }
}

impl From<Position> for GameState {
    fn from(position: Position) -> Self {
        Self::from_position(position, RuleConfig::default())
    }
}

/// Parse helper for callers holding a position string and default rules.
impl std::str::FromStr for GameState {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_position_string(s, RuleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, GameStatus};
    use crate::game_state::position::PositionBuilder;
    use crate::game_state::rule_config::RuleConfig;
    use crate::game_state::shogi_types::{PieceType, Point, Side};
    use crate::shogi_errors::{DropRejection, Foul, MoveRejection, ShogiError};
    use crate::utils::notation::{parse_intent, parse_square};

    fn play(game: &mut GameState, text: &str) -> GameStatus {
        let intent = parse_intent(text).expect("valid notation");
        game.submit(intent).expect("legal move")
    }

    fn sq(text: &str) -> Point {
        parse_square(text).expect("valid square")
    }

    #[test]
    fn opening_pawn_push_passes_the_turn() {
        let mut game = GameState::new_game();
        assert_eq!(play(&mut game, "7776"), GameStatus::Ongoing);
        assert_eq!(game.side_to_move(), Side::White);

        let entry = &game.move_log()[0];
        assert_eq!(entry.mover, Side::Black);
        assert_eq!(entry.kind, PieceType::Pawn);
        assert_eq!(entry.from, Some(sq("77")));
        assert_eq!(entry.to, sq("76"));
        assert_eq!(entry.position_id, game.to_position_string());
    }

    #[test]
    fn moving_the_opponents_piece_is_rejected_without_side_effects() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let err = game
            .apply_move(sq("91"), sq("92"), false)
            .expect_err("white lance is not black's");
        assert_eq!(err.move_rejection(), Some(MoveRejection::NotOwned));
        assert_eq!(game, before);
    }

    #[test]
    fn bishop_exchange_promotes_and_fills_the_hand() {
        let mut game = GameState::new_game();
        play(&mut game, "7776");
        play(&mut game, "3334");
        assert_eq!(play(&mut game, "8822+"), GameStatus::Ongoing);

        let horse = game.position().piece_at(sq("22")).expect("black horse");
        assert_eq!((horse.kind(), horse.owner()), (PieceType::Bishop, Side::Black));
        assert!(horse.promoted());
        assert_eq!(game.position().hand_kinds(Side::Black), vec![PieceType::Bishop]);
        let captured = game.position().hand_pieces(Side::Black).next().expect("captured");
        assert_eq!(captured.owner(), Side::Black);
        assert!(!captured.promoted());
        assert!(game.position().hand(Side::White).is_empty());

        let entry = game.move_log().last().expect("logged");
        assert!(entry.promotion && entry.promoted);

        play(&mut game, "9394");
        let err = game
            .apply_move(sq("22"), sq("11"), true)
            .expect_err("already promoted");
        assert_eq!(err.move_rejection(), Some(MoveRejection::CannotPromote));
        let err = game
            .apply_move(sq("59"), sq("58"), true)
            .expect_err("kings never promote");
        assert_eq!(err.move_rejection(), Some(MoveRejection::CannotPromote));
    }

    #[test]
    fn second_pawn_on_a_file_cannot_be_dropped() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(0, 0), PieceType::King, Side::White)
            .place(Point::new(4, 6), PieceType::Pawn, Side::Black)
            .hand(Side::Black, PieceType::Pawn)
            .build()
            .expect("valid");
        let mut game = GameState::from(position);
        let pawn = game
            .position()
            .hand_piece_of_kind(Side::Black, PieceType::Pawn)
            .expect("held pawn");
        let before = game.clone();

        for y in [1, 2, 3, 4, 5, 7] {
            let err = game
                .apply_drop(pawn, Point::new(4, y))
                .expect_err("double pawn");
            assert_eq!(err.drop_rejection(), Some(DropRejection::DoublePawn));
        }
        assert_eq!(game, before);
        assert_eq!(game.apply_drop(pawn, Point::new(3, 4)).expect("legal"), GameStatus::Ongoing);
    }

    #[test]
    fn pawn_drop_in_front_of_the_king_is_a_foul() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .hand(Side::Black, PieceType::Pawn)
            .build()
            .expect("valid");
        let mut game = GameState::from(position);
        let intent = parse_intent("P*52").expect("valid");
        let err = game.submit(intent).expect_err("pawn drop foul");
        assert_eq!(err.drop_rejection(), Some(DropRejection::PawnDropMate));
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn drop_of_a_kind_not_in_hand_is_rejected() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .hand(Side::White, PieceType::Rook)
            .build()
            .expect("valid");
        let mut game = GameState::from(position);
        let before = game.clone();

        let err = game.submit(parse_intent("R*55").expect("valid")).expect_err("white's rook");
        assert_eq!(err.drop_rejection(), Some(DropRejection::NotOwned));
        let err = game.submit(parse_intent("G*55").expect("valid")).expect_err("no gold");
        assert_eq!(err.drop_rejection(), Some(DropRejection::NoPiece));
        assert_eq!(game, before);
    }

    #[test]
    fn drops_resolve_by_kind_after_resuming_from_a_string() {
        let mut game = GameState::new_game();
        for text in ["7776", "3334", "8822+", "3122"] {
            play(&mut game, text);
        }
        let mut resumed: GameState = game.to_position_string().parse().expect("decodes");
        let drop = parse_intent("B*45").expect("valid");
        assert_eq!(game.submit(drop).expect("legal"), GameStatus::Ongoing);
        assert_eq!(resumed.submit(drop).expect("legal"), GameStatus::Ongoing);
        assert!(resumed.position().same_position(game.position()));
    }

    #[test]
    fn failed_status_evaluation_rolls_the_move_back() {
        let position = PositionBuilder::new()
            .place(Point::new(0, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .place(Point::new(4, 8), PieceType::Rook, Side::Black)
            .build_with_exposed_king()
            .expect("kings present");
        let mut game = GameState::from(position);
        let before = game.clone();

        let err = game
            .apply_move(sq("59"), sq("51"), false)
            .expect_err("white king captured");
        assert!(matches!(err, ShogiError::MissingKing(Side::White)));
        assert!(err.is_internal());
        assert_eq!(game, before);
        assert!(game.position().hand(Side::Black).is_empty());
    }

    #[test]
    fn decoding_rejects_a_waiting_king_in_check() {
        let data = "0,,,\
            _-_-_-_-710-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            _-_-_-_-_-_-_-_-_,\
            700-_-_-_-600-_-_-_-_";
        let err = GameState::from_position_string(data, RuleConfig::default())
            .expect_err("white is in check on black's turn");
        assert!(matches!(err, ShogiError::InvalidPosition(_)));
    }

    #[test]
    fn gold_shuffle_repeats_on_the_thirteenth_move() {
        let mut game = GameState::new_game();
        let cycle = ["6968", "6162", "6869", "6261"];
        for ply in 1..=13 {
            let status = play(&mut game, cycle[(ply - 1) % cycle.len()]);
            if ply < 13 {
                assert_eq!(status, GameStatus::Ongoing, "ply {ply}");
                assert!(!game.is_repeated(), "ply {ply}");
            } else {
                assert_eq!(status, GameStatus::Foul(Foul::FourfoldRepetition));
                assert!(game.is_repeated());
            }
        }
    }

    #[test]
    fn gold_drop_delivers_mate() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(8, 0), PieceType::King, Side::White)
            .place(Point::new(7, 0), PieceType::Lance, Side::White)
            .place(Point::new(7, 1), PieceType::Knight, Side::White)
            .place(Point::new(7, 2), PieceType::Silver, Side::Black)
            .hand(Side::Black, PieceType::Gold)
            .build()
            .expect("valid");
        let mut game = GameState::from(position);
        assert_eq!(game.status().expect("kings present"), GameStatus::Ongoing);
        assert_eq!(play(&mut game, "G*12"), GameStatus::Checkmate { winner: Side::Black });
        assert!(game.is_checkmate().expect("kings present"));
        assert!(game.legal_actions().expect("kings present").is_empty());
    }

    #[test]
    fn check_is_reported_when_a_reply_exists() {
        let position = PositionBuilder::new()
            .place(Point::new(4, 8), PieceType::King, Side::Black)
            .place(Point::new(4, 0), PieceType::King, Side::White)
            .place(Point::new(0, 4), PieceType::Rook, Side::Black)
            .build()
            .expect("valid");
        let mut game = GameState::from(position);
        assert_eq!(play(&mut game, "9591"), GameStatus::Check);
        assert!(game.is_in_check().expect("kings present"));
    }

    #[test]
    fn position_string_round_trips_through_the_state() {
        let mut game = GameState::with_rules(RuleConfig::traditional());
        play(&mut game, "7776");
        let restored =
            GameState::from_position_string(&game.to_position_string(), RuleConfig::traditional())
                .expect("decodes");
        assert!(restored.position().same_position(game.position()));
        assert!(restored.move_log().is_empty());
    }
}
