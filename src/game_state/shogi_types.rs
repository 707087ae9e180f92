//! Core value types for the rule engine.
//!
//! Coordinates are zero-based with `(0, 0)` in the top-left corner as seen
//! by Black. Black advances toward decreasing `y`; White's moves are
//! evaluated in Black's frame by rotating the board 180 degrees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::shogi_rules::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::shogi_errors::{ShogiError, ShogiResult};

/// Side to move. Black moves first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Black,
    White,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Black, Side::White];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Digit used by the canonical position string.
    pub const fn digit(self) -> char {
        match self {
            Side::Black => '0',
            Side::White => '1',
        }
    }

    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Side::Black),
            '1' => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

/// Piece kind, promotion excluded. The declaration order is the digit
/// order used by the canonical position string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 8] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Lance => 1,
            PieceType::Knight => 2,
            PieceType::Silver => 3,
            PieceType::Gold => 4,
            PieceType::Bishop => 5,
            PieceType::Rook => 6,
            PieceType::King => 7,
        }
    }

    pub const fn digit(self) -> char {
        (b'0' + self.index() as u8) as char
    }

    pub fn from_digit(ch: char) -> Option<Self> {
        let digit = ch.to_digit(10)?;
        Self::ALL.get(digit as usize).copied()
    }

    /// King and Gold never promote.
    pub const fn is_promotable(self) -> bool {
        !matches!(self, PieceType::King | PieceType::Gold)
    }
}

/// Board coordinate. Values outside `0..9` are representable so that
/// offsets can be computed before a bounds test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }

    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// 180-degree rotation, `(x, y) -> (8 - x, 8 - y)`.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self::new(
            BOARD_WIDTH as i8 - 1 - self.x,
            BOARD_HEIGHT as i8 - 1 - self.y,
        )
    }

    /// The same square as seen from `side`'s seat. Involution.
    #[inline]
    pub const fn viewed_by(self, side: Side) -> Self {
        match side {
            Side::Black => self,
            Side::White => self.mirrored(),
        }
    }

    /// Row-major cell index, `None` when off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * BOARD_WIDTH + self.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::new((index % BOARD_WIDTH) as i8, (index / BOARD_WIDTH) as i8)
    }

    /// Traditional coordinates: files `1..=9` right to left, ranks `1..=9`
    /// top to bottom.
    pub fn from_notation(file: u8, rank: u8) -> ShogiResult<Self> {
        if !(1..=9).contains(&file) || !(1..=9).contains(&rank) {
            return Err(ShogiError::InvalidNotation(format!(
                "file {file} / rank {rank} is off the board"
            )));
        }
        Ok(Self::new(9 - file as i8, rank as i8 - 1))
    }

    /// Inverse of [`Point::from_notation`], `None` when off the board.
    pub fn to_notation(self) -> Option<(u8, u8)> {
        if !self.in_bounds() {
            return None;
        }
        Some(((9 - self.x) as u8, (self.y + 1) as u8))
    }
}

/// Stable identity assigned when a piece is created and carried through
/// capture, promotion and drop.
pub type PieceId = u16;

/// A physical piece. Only `owner` and `promoted` ever change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    kind: PieceType,
    owner: Side,
    promoted: bool,
}

impl Piece {
    pub const fn new(id: PieceId, kind: PieceType, owner: Side) -> Self {
        Self {
            id,
            kind,
            owner,
            promoted: false,
        }
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub const fn kind(&self) -> PieceType {
        self.kind
    }

    #[inline]
    pub const fn owner(&self) -> Side {
        self.owner
    }

    #[inline]
    pub const fn promoted(&self) -> bool {
        self.promoted
    }

    /// Returns false, leaving the piece unchanged, for King and Gold.
    pub fn promote(&mut self) -> bool {
        if !self.kind.is_promotable() {
            return false;
        }
        self.promoted = true;
        true
    }

    /// Ownership flips to the capturer and promotion is lost.
    pub(crate) fn capture_by(&mut self, side: Side) {
        self.owner = side;
        self.promoted = false;
    }

    pub const fn view(&self) -> PieceView {
        PieceView {
            kind: self.kind,
            owner: self.owner,
            promoted: self.promoted,
        }
    }
}

/// Identity-free description of a piece, used for comparisons and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceView {
    pub kind: PieceType,
    pub owner: Side,
    pub promoted: bool,
}

#[cfg(test)]
mod tests {
    use super::{Piece, PieceType, Point, Side};

    #[test]
    fn notation_maps_file_right_to_left_and_rank_top_to_bottom() {
        assert_eq!(Point::from_notation(9, 1).expect("on board"), Point::new(0, 0));
        assert_eq!(Point::from_notation(1, 9).expect("on board"), Point::new(8, 8));
        assert_eq!(Point::from_notation(7, 7).expect("on board"), Point::new(2, 6));
        assert!(Point::from_notation(0, 5).is_err());
        assert!(Point::from_notation(5, 10).is_err());
        assert_eq!(Point::new(2, 6).to_notation(), Some((7, 7)));
        assert_eq!(Point::new(-1, 6).to_notation(), None);
    }

    #[test]
    fn mirroring_is_an_involution() {
        let p = Point::new(1, 7);
        assert_eq!(p.mirrored(), Point::new(7, 1));
        assert_eq!(p.mirrored().mirrored(), p);
        assert_eq!(p.viewed_by(Side::Black), p);
        assert_eq!(p.viewed_by(Side::White), p.mirrored());
    }

    #[test]
    fn index_round_trips_and_rejects_off_board() {
        let p = Point::new(4, 6);
        let index = p.index().expect("in bounds");
        assert_eq!(index, 58);
        assert_eq!(Point::from_index(index), p);
        assert_eq!(Point::new(9, 0).index(), None);
    }

    #[test]
    fn king_and_gold_refuse_promotion_and_capture_resets_it() {
        let mut gold = Piece::new(0, PieceType::Gold, Side::Black);
        assert!(!gold.promote());
        assert!(!gold.promoted());

        let mut rook = Piece::new(1, PieceType::Rook, Side::White);
        assert!(rook.promote());
        rook.capture_by(Side::Black);
        assert_eq!(rook.owner(), Side::Black);
        assert!(!rook.promoted());
        assert_eq!(rook.id(), 1);
    }

    #[test]
    fn digits_follow_declaration_order() {
        for (i, kind) in PieceType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceType::from_digit(kind.digit()), Some(*kind));
        }
        assert_eq!(PieceType::from_digit('8'), None);
        assert_eq!(Side::from_digit(Side::White.digit()), Some(Side::White));
    }
}
