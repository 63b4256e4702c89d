//! Bounded N-dimensional cell storage
//!
//! A flat buffer addressed by integer coordinates relative to an origin.
//! Axis 0 varies fastest.

use core::ops::{Index, IndexMut};

use serde::Serialize;

use crate::coord::Coord;

/// Fixed-size grid of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<T, const N: usize> {
    size: Coord<N>,
    origin: Coord<N>,
    data: Vec<T>,
}

impl<T: Clone + Default, const N: usize> Grid<T, N> {
    /// Create a grid of `size` cells whose lowest corner is at `origin`,
    /// every cell set to `T::default()`
    pub fn new(size: Coord<N>, origin: Coord<N>) -> Self {
        Self {
            size,
            origin,
            data: vec![T::default(); size.volume()],
        }
    }
}

impl<T, const N: usize> Grid<T, N> {
    pub fn size(&self) -> Coord<N> {
        self.size
    }

    pub fn origin(&self) -> Coord<N> {
        self.origin
    }

    /// Whether `pos` addresses a cell of this grid
    pub fn in_bounds(&self, pos: Coord<N>) -> bool {
        (0..N).all(|axis| {
            let rel = pos[axis] - self.origin[axis];
            rel >= 0 && rel < self.size[axis]
        })
    }

    fn index_of(&self, pos: Coord<N>) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let mut index = 0usize;
        let mut stride = 1usize;
        for axis in 0..N {
            index += (pos[axis] - self.origin[axis]) as usize * stride;
            stride *= self.size[axis] as usize;
        }
        Some(index)
    }

    /// Checked access
    pub fn try_get(&self, pos: Coord<N>) -> Option<&T> {
        self.index_of(pos).map(|i| &self.data[i])
    }

    /// Store `value` at `pos`
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set(&mut self, pos: Coord<N>, value: T) {
        self[pos] = value;
    }

    /// All in-bounds positions, axis 0 fastest
    pub fn positions(&self) -> impl Iterator<Item = Coord<N>> + '_ {
        (0..self.data.len()).map(move |mut i| {
            let mut pos = self.origin;
            for axis in 0..N {
                let extent = self.size[axis] as usize;
                pos[axis] += (i % extent) as i32;
                i /= extent;
            }
            pos
        })
    }

    /// Positions paired with their values
    pub fn iter(&self) -> impl Iterator<Item = (Coord<N>, &T)> + '_ {
        self.positions().zip(self.data.iter())
    }
}

impl<T: Copy, const N: usize> Grid<T, N> {
    /// Value at `pos`
    ///
    /// Panics if `pos` is out of bounds.
    pub fn get(&self, pos: Coord<N>) -> T {
        self[pos]
    }
}

impl<T: PartialEq, const N: usize> Grid<T, N> {
    /// Number of cells equal to `value`
    pub fn count(&self, value: &T) -> usize {
        self.data.iter().filter(|v| *v == value).count()
    }
}

impl<T, const N: usize> Index<Coord<N>> for Grid<T, N> {
    type Output = T;

    fn index(&self, pos: Coord<N>) -> &T {
        match self.index_of(pos) {
            Some(i) => &self.data[i],
            None => panic!(
                "grid position {pos} out of bounds (origin {}, size {})",
                self.origin, self.size
            ),
        }
    }
}

impl<T, const N: usize> IndexMut<Coord<N>> for Grid<T, N> {
    fn index_mut(&mut self, pos: Coord<N>) -> &mut T {
        match self.index_of(pos) {
            Some(i) => &mut self.data[i],
            None => panic!(
                "grid position {pos} out of bounds (origin {}, size {})",
                self.origin, self.size
            ),
        }
    }
}
