//! Grid coordinates: [`Pos`] and the row-major [`PosIter`].
//!
//! Rows grow downward and columns grow rightward, so "down" is `row + 1`.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::GridError;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell coordinate `(row, col)`.
///
/// Coordinates are signed so that neighbour arithmetic can step outside the
/// grid and be rejected by a bounds check instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Unit steps in neighbour priority order: down, up, right, left.
    pub const STEPS: [Pos; 4] = [
        Pos::new(1, 0),
        Pos::new(-1, 0),
        Pos::new(0, 1),
        Pos::new(0, -1),
    ];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in priority order (down, up, right,
    /// left). Some of them may lie outside any given grid.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        Self::STEPS.map(|d| self + d)
    }

    /// Whether the position lies inside an `n`×`n` grid.
    #[inline]
    pub fn in_square(self, n: i32) -> bool {
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Parses `"row,col"`, with optional surrounding parentheses and spaces.
impl FromStr for Pos {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (r, c) = inner
            .split_once(',')
            .ok_or_else(|| GridError::InvalidPos(s.to_owned()))?;
        let row = r
            .trim()
            .parse()
            .map_err(|_| GridError::InvalidPos(s.to_owned()))?;
        let col = c
            .trim()
            .parse()
            .map_err(|_| GridError::InvalidPos(s.to_owned()))?;
        Ok(Self::new(row, col))
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// PosIter
// ---------------------------------------------------------------------------

/// Row-major iterator over every position of an `n`×`n` grid.
#[derive(Clone, Debug)]
pub struct PosIter {
    n: i32,
    cur: Pos,
}

impl PosIter {
    pub(crate) fn new(n: i32) -> Self {
        Self { n, cur: Pos::ZERO }
    }
}

impl Iterator for PosIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.n <= 0 || self.cur.row >= self.n {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.n {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.n <= 0 || self.cur.row >= self.n {
            return (0, Some(0));
        }
        let n = self.n as usize;
        let remaining_in_row = (self.n - self.cur.col) as usize;
        let remaining_rows = (self.n - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * n;
        (total, Some(total))
    }
}

impl ExactSizeIterator for PosIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(1, 2);
        let b = Pos::new(3, 4);
        assert_eq!(a + b, Pos::new(4, 6));
        assert_eq!(b - a, Pos::new(2, 2));
        assert_eq!(a.shift(-1, 1), Pos::new(0, 3));
    }

    #[test]
    fn neighbors_follow_down_up_right_left() {
        let p = Pos::new(5, 5);
        assert_eq!(
            p.neighbors_4(),
            [
                Pos::new(6, 5),
                Pos::new(4, 5),
                Pos::new(5, 6),
                Pos::new(5, 4)
            ]
        );
    }

    #[test]
    fn in_square_bounds() {
        assert!(Pos::new(0, 0).in_square(3));
        assert!(Pos::new(2, 2).in_square(3));
        assert!(!Pos::new(3, 0).in_square(3));
        assert!(!Pos::new(0, -1).in_square(3));
    }

    #[test]
    fn parse_pos() {
        assert_eq!("3,4".parse::<Pos>().unwrap(), Pos::new(3, 4));
        assert_eq!(" (10, 0) ".parse::<Pos>().unwrap(), Pos::new(10, 0));
        assert!("3".parse::<Pos>().is_err());
        assert!("a,b".parse::<Pos>().is_err());
    }

    #[test]
    fn pos_iter_is_row_major() {
        let pts: Vec<_> = PosIter::new(2).collect();
        assert_eq!(
            pts,
            vec![
                Pos::new(0, 0),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 1)
            ]
        );
    }

    #[test]
    fn pos_iter_size_hint() {
        let mut it = PosIter::new(3);
        assert_eq!(it.len(), 9);
        it.next();
        it.next();
        assert_eq!(it.len(), 7);
        assert_eq!(PosIter::new(0).len(), 0);
    }
}
