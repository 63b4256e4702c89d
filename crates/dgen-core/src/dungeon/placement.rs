//! Rejection-sampled room placement

use crate::config::DungeonConfig;
use crate::coord::Coord;
use crate::grid::Grid;
use crate::rng::DungeonRng;

use super::{CellType, Room};

/// Sample `config.room_count` candidate rooms and keep those that fit
///
/// Each candidate gets a uniform position in the grid and a uniform size in
/// `1..=room_max_size` per axis. A candidate is rejected when it does not lie
/// strictly inside the grid or when its bounds grown by `margin` touch the
/// grown bounds of a room already accepted. Accepted rooms are marked
/// [`CellType::Room`] in `grid` and returned in acceptance order.
pub fn place_rooms<const N: usize>(
    grid: &mut Grid<CellType, N>,
    config: &DungeonConfig<N>,
    margin: Coord<N>,
    rng: &mut DungeonRng,
) -> Vec<Room<N>> {
    let extent = grid.size();
    let origin = grid.origin();
    let mut rooms: Vec<Room<N>> = Vec::new();

    for _ in 0..config.room_count {
        let position = Coord::ZERO.zip_with(extent, |_, e| rng.range(0, e));
        let size = Coord::ZERO.zip_with(config.room_max_size, |_, m| rng.range(1, m + 1));
        let candidate = Room::new(position, size);

        if !candidate.fits_in(extent) {
            continue;
        }
        let buffer = candidate.buffered(margin);
        if rooms.iter().any(|r| r.buffered(margin).intersects(&buffer)) {
            continue;
        }

        for cell in candidate.cells() {
            grid[origin + cell] = CellType::Room;
        }
        log::debug!("placed room {} at {position} size {size}", rooms.len());
        rooms.push(candidate);
    }

    rooms
}
