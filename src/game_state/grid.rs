//! Generic 9x9 matrix with coordinate-safe access.
//!
//! Out-of-bounds reads return `None` and out-of-bounds writes are ignored,
//! so callers can test offsets without pre-checking them.

use crate::game_state::shogi_rules::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game_state::shogi_types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: [[T; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(value: T) -> Self {
        Self {
            cells: [[value; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        if !p.in_bounds() {
            return None;
        }
        Some(self.cells[p.y as usize][p.x as usize])
    }

    /// Returns false, without writing, when `p` is off the board.
    #[inline]
    pub fn assign(&mut self, p: Point, value: T) -> bool {
        if !p.in_bounds() {
            return false;
        }
        self.cells[p.y as usize][p.x as usize] = value;
        true
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        all_points().map(move |p| (p, self.cells[p.y as usize][p.x as usize]))
    }

    pub fn for_each_cell(&self, mut f: impl FnMut(Point, T)) {
        for (p, value) in self.cells() {
            f(p, value);
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(Point, T) -> U) -> Grid<U> {
        Grid {
            cells: std::array::from_fn(|y| {
                std::array::from_fn(|x| f(Point::new(x as i8, y as i8), self.cells[y][x]))
            }),
        }
    }

    pub fn exists(&self, mut pred: impl FnMut(Point, T) -> bool) -> bool {
        self.cells().any(|(p, value)| pred(p, value))
    }

    pub fn find_first(&self, mut pred: impl FnMut(Point, T) -> bool) -> Option<Point> {
        self.cells()
            .find(|&(p, value)| pred(p, value))
            .map(|(p, _)| p)
    }

    pub fn rows(&self) -> &[[T; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    pub fn mirrored(&self) -> Self {
        let mut out = *self;
        for (p, value) in self.cells() {
            let m = p.mirrored();
            out.cells[m.y as usize][m.x as usize] = value;
        }
        out
    }

    /// Rotate 180 degrees, run `f`, rotate back. Lets code written from
    /// Black's seat operate on White's half of the board.
    pub fn apply_mirrored<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        *self = self.mirrored();
        let result = f(self);
        *self = self.mirrored();
        result
    }
}

/// Every board square in row-major order.
pub fn all_points() -> impl Iterator<Item = Point> {
    (0..BOARD_HEIGHT as i8).flat_map(|y| (0..BOARD_WIDTH as i8).map(move |x| Point::new(x, y)))
}
