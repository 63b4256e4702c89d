//! Axis-aligned room volumes

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// A box of cells: `position` is the lowest corner, `size` the extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room<const N: usize> {
    pub position: Coord<N>,
    pub size: Coord<N>,
}

impl<const N: usize> Room<N> {
    pub fn new(position: Coord<N>, size: Coord<N>) -> Self {
        Self { position, size }
    }

    /// One past the last cell on every axis
    pub fn max(&self) -> Coord<N> {
        self.position + self.size
    }

    /// Check if the two boxes share at least one cell
    pub fn intersects(&self, other: &Room<N>) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        (0..N).all(|axis| self.position[axis] < b_max[axis] && other.position[axis] < a_max[axis])
    }

    /// The box grown by `margin` cells on both sides of each axis
    pub fn buffered(&self, margin: Coord<N>) -> Room<N> {
        Room {
            position: self.position - margin,
            size: self.size + margin * 2,
        }
    }

    pub fn contains(&self, pos: Coord<N>) -> bool {
        let max = self.max();
        (0..N).all(|axis| pos[axis] >= self.position[axis] && pos[axis] < max[axis])
    }

    /// Check if the room lies strictly inside a grid of `extent` cells
    ///
    /// The last row of every axis stays free.
    pub fn fits_in(&self, extent: Coord<N>) -> bool {
        let max = self.max();
        (0..N).all(|axis| self.position[axis] >= 0 && max[axis] < extent[axis])
    }

    /// Geometric center
    pub fn center(&self) -> [f64; N] {
        let mut center = self.position.to_f64();
        for (c, s) in center.iter_mut().zip(self.size.0) {
            *c += f64::from(s) / 2.0;
        }
        center
    }

    /// The cell containing the center
    pub fn center_cell(&self) -> Coord<N> {
        self.position.zip_with(self.size, |p, s| p + s / 2)
    }

    /// Every cell of the room, axis 0 fastest
    pub fn cells(&self) -> impl Iterator<Item = Coord<N>> + '_ {
        (0..self.size.volume()).map(move |mut i| {
            let mut pos = self.position;
            for axis in 0..N {
                let extent = self.size[axis] as usize;
                pos[axis] += (i % extent) as i32;
                i /= extent;
            }
            pos
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room2(x: i32, y: i32, w: i32, h: i32) -> Room<2> {
        Room::new(Coord::new([x, y]), Coord::new([w, h]))
    }

    #[test]
    fn test_room_intersects() {
        let a = room2(0, 0, 3, 3);
        assert!(a.intersects(&room2(2, 2, 3, 3)));
        assert!(!a.intersects(&room2(3, 0, 2, 2)));
        assert!(!a.intersects(&room2(0, 3, 2, 2)));
        assert!(a.intersects(&room2(1, 1, 1, 1)));
    }

    #[test]
    fn test_buffered_touching_rooms_collide() {
        let a = room2(0, 0, 3, 3);
        let b = room2(3, 0, 2, 2);
        let margin = Coord::splat(1);
        assert!(a.buffered(margin).intersects(&b.buffered(margin)));
    }

    #[test]
    fn test_vertical_margin_zero_allows_stacking() {
        let margin = Coord::new([1, 0, 1]);
        let lower = Room::new(Coord::new([2, 0, 2]), Coord::new([3, 1, 3]));
        let upper = Room::new(Coord::new([2, 1, 2]), Coord::new([3, 1, 3]));
        assert!(!lower.buffered(margin).intersects(&upper.buffered(margin)));
        assert_eq!(lower.buffered(margin).size, Coord::new([5, 1, 5]));
    }

    #[test]
    fn test_fits_in_keeps_last_row_free() {
        let extent = Coord::new([10, 10]);
        assert!(room2(0, 0, 9, 9).fits_in(extent));
        assert!(!room2(0, 0, 10, 9).fits_in(extent));
        assert!(!room2(-1, 0, 2, 2).fits_in(extent));
    }

    #[test]
    fn test_center() {
        let room = room2(2, 4, 3, 2);
        assert_eq!(room.center(), [3.5, 5.0]);
        assert_eq!(room.center_cell(), Coord::new([3, 5]));
        assert!(room.contains(room.center_cell()));
    }

    #[test]
    fn test_cells() {
        let room = Room::new(Coord::new([1, 0, 1]), Coord::new([2, 2, 3]));
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Coord::new([1, 0, 1]));
        assert_eq!(cells[1], Coord::new([2, 0, 1]));
        assert!(cells.iter().all(|&c| room.contains(c)));
    }
}
