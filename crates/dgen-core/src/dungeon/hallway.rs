//! Hallway pricing, carving and grouping
//!
//! The cost functions turn cell states into [`PathCost`]s for the
//! [`Pathfinder`](super::Pathfinder). Once a path is found, [`carve_path`]
//! writes it into the grid and records the doors and staircases it created.

use hashbrown::HashSet;
use serde::Serialize;

use crate::config::CostModel;
use crate::consts::VERTICAL_AXIS;
use crate::coord::Coord;
use crate::grid::Grid;

use super::{CellType, PathCost, StairStep};

/// Price a same-level step onto `to`
///
/// Staircase cells can only be used by the staircase that made them.
pub fn flat_cost<const N: usize>(
    grid: &Grid<CellType, N>,
    costs: &CostModel,
    to: Coord<N>,
) -> PathCost {
    match grid.try_get(to) {
        Some(CellType::Empty) => PathCost::step(costs.empty),
        Some(CellType::Room) => PathCost::step(costs.room),
        Some(CellType::Hallway | CellType::Door) => PathCost::step(costs.hallway),
        Some(CellType::Stairway) | None => PathCost::blocked(),
    }
}

/// Price a step on a layered grid, staircases included
///
/// A staircase needs both endpoints to be empty or hallway and its whole
/// footprint to be empty and inside the grid.
pub fn layered_cost(
    grid: &Grid<CellType, 3>,
    costs: &CostModel,
    from: Coord<3>,
    to: Coord<3>,
) -> PathCost {
    let Some(stairs) = StairStep::between(from, to) else {
        return flat_cost(grid, costs, to);
    };

    let open = |pos| matches!(grid.try_get(pos), Some(CellType::Empty | CellType::Hallway));
    if !open(from) || !open(to) {
        return PathCost::blocked();
    }

    let clear = stairs
        .footprint(from)
        .iter()
        .all(|&cell| grid.try_get(cell) == Some(&CellType::Empty));
    if !clear {
        return PathCost::blocked();
    }

    PathCost::stairs(costs.stairs)
}

/// A room cell turned into a door, and the hallway cell next to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorRecord<const N: usize> {
    pub door: Coord<N>,
    pub hallway: Coord<N>,
}

impl<const N: usize> DoorRecord<N> {
    /// Unit step from the door into the hallway
    pub fn facing(&self) -> Coord<N> {
        self.hallway - self.door
    }
}

/// Orientation of a carved staircase
///
/// The staircase occupies `anchor + h`, `anchor + 2h`, `anchor + v + h` and
/// `anchor + v + 2h`, where `direction = v + h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StairwayRecord<const N: usize> {
    pub direction: Coord<N>,
    pub anchor: Coord<N>,
}

impl StairwayRecord<3> {
    /// The four cells the staircase covers
    pub fn footprint(&self) -> [Coord<3>; 4] {
        let mut vertical = Coord::ZERO;
        vertical[VERTICAL_AXIS] = self.direction[VERTICAL_AXIS];
        let stairs = StairStep {
            vertical,
            horizontal: self.direction - vertical,
        };
        stairs.footprint(self.anchor)
    }
}

/// Everything carving has added to the grid so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carving<const N: usize> {
    /// Cells turned from empty into hallway, in carving order
    pub hallways: Vec<Coord<N>>,
    pub doors: Vec<DoorRecord<N>>,
    pub stairways: Vec<StairwayRecord<N>>,
}

/// Write `path` into `grid`
///
/// Empty cells on the path become hallway. Where the path crosses between a
/// room cell and a hallway or stairway cell, the room cell becomes a door.
/// Every change of level marks the empty cells of the staircase footprint
/// as stairway; nothing else is overwritten.
pub fn carve_path<const N: usize>(
    grid: &mut Grid<CellType, N>,
    path: &[Coord<N>],
    carving: &mut Carving<N>,
) {
    for (i, &current) in path.iter().enumerate() {
        if grid[current] == CellType::Empty {
            grid[current] = CellType::Hallway;
            carving.hallways.push(current);
        }

        if i == 0 {
            continue;
        }
        let prev = path[i - 1];

        if grid[prev] == CellType::Room && grid[current].is_carved() {
            grid[prev] = CellType::Door;
            carving.doors.push(DoorRecord {
                door: prev,
                hallway: current,
            });
        } else if grid[current] == CellType::Room && grid[prev].is_carved() {
            grid[current] = CellType::Door;
            carving.doors.push(DoorRecord {
                door: current,
                hallway: prev,
            });
        }

        if let Some(stairs) = StairStep::between(prev, current) {
            for cell in stairs.footprint(prev) {
                if grid.try_get(cell) == Some(&CellType::Empty) {
                    grid[cell] = CellType::Stairway;
                }
            }
            carving.stairways.push(StairwayRecord {
                direction: stairs.direction(),
                anchor: prev,
            });
        }
    }
}

/// Unit moves that stay on the same level
fn level_offsets<const N: usize>() -> Vec<Coord<N>> {
    (0..N)
        .filter(|&axis| N < 3 || axis != VERTICAL_AXIS)
        .flat_map(|axis| {
            [1, -1].map(|sign| {
                let mut offset = Coord::ZERO;
                offset[axis] = sign;
                offset
            })
        })
        .collect()
}

/// Group hallway cells into same-level connected components
///
/// Only cells still marked [`CellType::Hallway`] are grouped. Components are
/// ordered by their first cell in `cells`, each listed in traversal order.
pub fn hallway_components<const N: usize>(
    grid: &Grid<CellType, N>,
    cells: &[Coord<N>],
) -> Vec<Vec<Coord<N>>> {
    let offsets = level_offsets::<N>();
    let mut visited: HashSet<Coord<N>> = HashSet::new();
    let mut components = Vec::new();

    for &seed in cells {
        if grid.try_get(seed) != Some(&CellType::Hallway) || !visited.insert(seed) {
            continue;
        }

        // DFS
        let mut component = Vec::new();
        let mut stack = vec![seed];
        while let Some(cell) = stack.pop() {
            component.push(cell);
            for &offset in &offsets {
                let next = cell + offset;
                if grid.try_get(next) == Some(&CellType::Hallway) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Pathfinder, Room};

    fn grid2(w: i32, h: i32) -> Grid<CellType, 2> {
        Grid::new(Coord::new([w, h]), Coord::ZERO)
    }

    fn mark<const N: usize>(grid: &mut Grid<CellType, N>, room: &Room<N>) {
        for cell in room.cells() {
            grid[cell] = CellType::Room;
        }
    }

    #[test]
    fn test_flat_cost_weights() {
        let costs = CostModel::default();
        let mut grid = grid2(4, 1);
        grid[Coord::new([1, 0])] = CellType::Room;
        grid[Coord::new([2, 0])] = CellType::Hallway;
        grid[Coord::new([3, 0])] = CellType::Door;

        assert_eq!(flat_cost(&grid, &costs, Coord::new([0, 0])), PathCost::step(costs.empty));
        assert_eq!(flat_cost(&grid, &costs, Coord::new([1, 0])), PathCost::step(costs.room));
        assert_eq!(flat_cost(&grid, &costs, Coord::new([2, 0])), PathCost::step(costs.hallway));
        assert_eq!(flat_cost(&grid, &costs, Coord::new([3, 0])), PathCost::step(costs.hallway));
        assert!(!flat_cost(&grid, &costs, Coord::new([4, 0])).traversable);
    }

    #[test]
    fn test_two_rooms_joined_by_straight_hallway() {
        let mut grid = grid2(16, 7);
        let left = Room::new(Coord::new([1, 2]), Coord::new([3, 3]));
        let right = Room::new(Coord::new([10, 2]), Coord::new([3, 3]));
        mark(&mut grid, &left);
        mark(&mut grid, &right);

        let costs = CostModel::default();
        let (start, goal) = (left.center_cell(), right.center_cell());
        let path = Pathfinder::flat(grid.size())
            .find_path(start, goal, |_, to| flat_cost(&grid, &costs, to))
            .unwrap();
        assert_eq!(path.len() as i32, start.manhattan(&goal) + 1);

        let mut carving = Carving::default();
        carve_path(&mut grid, &path, &mut carving);

        // the gap between the rooms is x = 4..=9
        for x in 4..=9 {
            assert_eq!(grid[Coord::new([x, 3])], CellType::Hallway);
        }
        assert_eq!(carving.hallways.len(), 6);
        assert_eq!(
            carving.doors,
            vec![
                DoorRecord {
                    door: Coord::new([3, 3]),
                    hallway: Coord::new([4, 3]),
                },
                DoorRecord {
                    door: Coord::new([10, 3]),
                    hallway: Coord::new([9, 3]),
                },
            ]
        );
        assert_eq!(carving.doors[0].facing(), Coord::new([1, 0]));
        assert_eq!(grid.count(&CellType::Room), 16);
    }

    #[test]
    fn test_carving_reuses_hallways() {
        let mut grid = grid2(8, 3);
        let path: Vec<_> = (0..8).map(|x| Coord::new([x, 1])).collect();
        let mut carving = Carving::default();
        carve_path(&mut grid, &path, &mut carving);
        carve_path(&mut grid, &path[2..6], &mut carving);
        assert_eq!(carving.hallways.len(), 8);
        assert_eq!(grid.count(&CellType::Hallway), 8);
    }

    #[test]
    fn test_one_level_climb_marks_four_stairway_cells() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([12, 2, 3]), Coord::ZERO);
        let costs = CostModel::default();
        let start = Coord::new([0, 0, 1]);
        let goal = Coord::new([10, 1, 1]);

        let path = Pathfinder::layered(grid.size())
            .find_path(start, goal, |from, to| layered_cost(&grid, &costs, from, to))
            .unwrap();
        let climbs: Vec<_> = path
            .windows(2)
            .filter(|p| p[0].y() != p[1].y())
            .collect();
        assert_eq!(climbs.len(), 1);

        let mut carving = Carving::default();
        carve_path(&mut grid, &path, &mut carving);

        assert_eq!(grid.count(&CellType::Stairway), 4);
        assert_eq!(carving.stairways.len(), 1);
        let record = carving.stairways[0];
        assert_eq!(record.direction.y(), 1);
        assert_eq!(record.anchor, climbs[0][0]);
        for cell in record.footprint() {
            assert_eq!(grid[cell], CellType::Stairway);
        }
    }

    #[test]
    fn test_descending_staircase_direction() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([3, 2, 12]), Coord::ZERO);
        let costs = CostModel::default();
        let path = Pathfinder::layered(grid.size())
            .find_path(Coord::new([1, 1, 0]), Coord::new([1, 0, 10]), |from, to| {
                layered_cost(&grid, &costs, from, to)
            })
            .unwrap();

        let mut carving = Carving::default();
        carve_path(&mut grid, &path, &mut carving);
        assert_eq!(carving.stairways.len(), 1);
        assert_eq!(carving.stairways[0].direction.y(), -1);
        assert_eq!(carving.stairways[0].direction.z(), 1);
        assert_eq!(grid.count(&CellType::Stairway), 4);
    }

    #[test]
    fn test_staircase_refuses_rooms() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([8, 2, 3]), Coord::ZERO);
        let costs = CostModel::default();
        let from = Coord::new([0, 0, 1]);
        let to = Coord::new([3, 1, 1]);
        assert!(layered_cost(&grid, &costs, from, to).is_stairs);

        grid[Coord::new([2, 1, 1])] = CellType::Room;
        assert!(!layered_cost(&grid, &costs, from, to).traversable);

        grid[Coord::new([2, 1, 1])] = CellType::Empty;
        grid[to] = CellType::Room;
        assert!(!layered_cost(&grid, &costs, from, to).traversable);

        // landing outside the grid
        grid[to] = CellType::Empty;
        let edge = Coord::new([6, 0, 1]);
        assert!(!layered_cost(&grid, &costs, edge, edge + Coord::new([3, 1, 0])).traversable);
    }

    #[test]
    fn test_plain_level_change_leaves_rooms_alone() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([8, 2, 3]), Coord::ZERO);
        grid[Coord::new([1, 0, 1])] = CellType::Room;
        grid[Coord::new([2, 1, 1])] = CellType::Room;
        let (start, goal) = (Coord::new([0, 0, 1]), Coord::new([3, 1, 1]));

        let path =
            Pathfinder::layered(grid.size()).find_path(start, goal, |_, _| PathCost::step(1.0));
        assert_eq!(path, None);

        // carving a hand-made climb never stamps over a room
        let mut carving = Carving::default();
        carve_path(&mut grid, &[start, goal], &mut carving);
        assert_eq!(grid.count(&CellType::Room), 2);
        assert_eq!(grid[Coord::new([2, 0, 1])], CellType::Stairway);
        assert_eq!(grid[Coord::new([1, 1, 1])], CellType::Stairway);
        assert_eq!(grid.count(&CellType::Stairway), 2);
    }

    #[test]
    fn test_flat_step_into_stairway_is_blocked() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([4, 2, 4]), Coord::ZERO);
        grid[Coord::new([1, 0, 0])] = CellType::Stairway;
        let step = layered_cost(&grid, &CostModel::default(), Coord::ZERO, Coord::new([1, 0, 0]));
        assert!(!step.traversable);
    }

    #[test]
    fn test_components_split_by_level_and_gap() {
        let mut grid: Grid<CellType, 3> = Grid::new(Coord::new([6, 2, 3]), Coord::ZERO);
        let cells = [
            Coord::new([0, 0, 0]),
            Coord::new([1, 0, 0]),
            Coord::new([3, 0, 0]),
            Coord::new([1, 1, 0]),
            Coord::new([2, 0, 0]),
        ];
        for &c in &cells {
            grid[c] = CellType::Hallway;
        }
        let components = hallway_components(&grid, &cells);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 4);
        assert_eq!(components[1], vec![Coord::new([1, 1, 0])]);
    }
}
