//! Defines the square grid shared by the card layout and the placement key.

use std::{
    convert::TryFrom,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Coordinate;

/// Square grid of cells stored in row-major order. Never empty.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    /// Length of one side of the grid.
    side: usize,
    /// Cells that make up this grid.
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    /// Build a grid with the given side, filling each cell from its coordinate.
    /// Returns `None` if `side` is 0 or `side * side` overflows.
    pub(crate) fn from_fn(side: usize, f: impl FnMut(Coordinate) -> T) -> Option<Self> {
        if side == 0 {
            return None;
        }
        side.checked_mul(side)?;
        let cells = Coordinate::all(side).map(f).collect();
        Some(Self { side, cells })
    }

    /// Build a grid from cells listed in row-major order. Returns `None` unless the cells
    /// exactly fill a non-empty square of the given side.
    pub(crate) fn from_cells(side: usize, cells: Vec<T>) -> Option<Self> {
        match side.checked_mul(side) {
            Some(total) if side > 0 && total == cells.len() => Some(Self {
                side,
                cells: cells.into_boxed_slice(),
            }),
            _ => None,
        }
    }

    /// Length of one side of the grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Convert a coordinate to a linear index. Returns `None` if out of bounds.
    fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        if coord.x < self.side && coord.y < self.side {
            Some(coord.x * self.side + coord.y)
        } else {
            None
        }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub fn get(&self, coord: &Coordinate) -> Option<&T> {
        self.try_linearize(coord).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(crate) fn get_mut(&mut self, coord: &Coordinate) -> Option<&mut T> {
        self.try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Whether the coordinate lies on this grid.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Get an iterator over rows of this grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.side)
    }

    /// Iterate every cell together with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        Coordinate::all(self.side).zip(self.cells.iter())
    }
}

impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        self.get(&coord).expect("coordinate out of bounds")
    }
}

impl<T> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        self.get_mut(&coord).expect("coordinate out of bounds")
    }
}

/// Unchecked serialized form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    side: usize,
    cells: Vec<T>,
}

/// Error returned when a deserialized grid is not a non-empty square.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("grid of side {side} cannot hold {cells} cells")]
pub struct GridShapeError {
    side: usize,
    cells: usize,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridShapeError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let error = GridShapeError {
            side: raw.side,
            cells: raw.cells.len(),
        };
        Grid::from_cells(raw.side, raw.cells).ok_or(error)
    }
}
