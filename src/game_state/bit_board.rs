//! Boolean board packed into the low 81 bits of a `u128`.
//!
//! Bit `y * 9 + x` represents square `(x, y)`, so iteration order matches
//! the row-major order of [`Grid`](crate::game_state::grid::Grid).

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use crate::game_state::grid::Grid;
use crate::game_state::shogi_rules::SQUARE_COUNT;
use crate::game_state::shogi_types::Point;

const FULL_MASK: u128 = (1u128 << SQUARE_COUNT) - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitBoard(u128);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);
    pub const FULL: BitBoard = BitBoard(FULL_MASK);

    pub fn single(p: Point) -> Self {
        let mut board = Self::EMPTY;
        board.assign(p, true);
        board
    }

    #[inline]
    pub fn at(self, p: Point) -> Option<bool> {
        p.index().map(|i| self.0 & (1u128 << i) != 0)
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        self.at(p).unwrap_or(false)
    }

    #[inline]
    pub fn assign(&mut self, p: Point, value: bool) -> bool {
        let Some(i) = p.index() else {
            return false;
        };
        if value {
            self.0 |= 1u128 << i;
        } else {
            self.0 &= !(1u128 << i);
        }
        true
    }

    #[inline]
    pub const fn and(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }

    #[inline]
    pub const fn or(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }

    #[inline]
    pub const fn is_non_empty(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn exists(self, pred: impl FnMut(Point) -> bool) -> bool {
        self.iter().any(pred)
    }

    /// First set square in row-major order.
    pub fn find_first(self) -> Option<Point> {
        self.iter().next()
    }

    pub fn iter(self) -> BitBoardIter {
        BitBoardIter(self.0)
    }

    /// 180-degree rotation: bit `i` moves to bit `80 - i`.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self(self.0.reverse_bits() >> (u128::BITS as usize - SQUARE_COUNT))
    }

    pub fn apply_mirrored<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        *self = self.mirrored();
        let result = f(self);
        *self = self.mirrored();
        result
    }

    pub fn to_grid(self) -> Grid<bool> {
        Grid::filled(false).map(|p, _| self.contains(p))
    }

    pub fn from_grid(grid: &Grid<bool>) -> Self {
        let mut board = Self::EMPTY;
        grid.for_each_cell(|p, value| {
            board.assign(p, value);
        });
        board
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitAndAssign for BitBoard {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.and(rhs);
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitOrAssign for BitBoard {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.or(rhs);
    }
}

impl FromIterator<Point> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut board = Self::EMPTY;
        for p in iter {
            board.assign(p, true);
        }
        board
    }
}

/// Set squares in ascending bit order.
#[derive(Debug, Clone)]
pub struct BitBoardIter(u128);

impl Iterator for BitBoardIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Point::from_index(index))
    }
}
