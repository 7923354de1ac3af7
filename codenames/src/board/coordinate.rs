use std::fmt;

use serde::{Deserialize, Serialize};

/// The coordinates of a [`Card`][crate::board::Card] on the board.
///
/// `x` selects the row and `y` the column, so `(1, 0)` is the first card of the second
/// row.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// Row of the cell.
    pub x: usize,
    /// Column of the cell.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Iterate every coordinate of a `side` x `side` board in row-major order.
    pub fn all(side: usize) -> impl Iterator<Item = Coordinate> {
        (0..side).flat_map(move |x| (0..side).map(move |y| Coordinate { x, y }))
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
