//! A* hallway search with a caller-supplied step cost
//!
//! The search itself knows nothing about cell states. Every candidate step
//! is priced by a closure that reports whether the step is allowed, what it
//! costs, and whether it is a staircase. Staircases occupy a footprint of
//! four cells besides their two endpoints; a path never re-enters a cell it
//! already used, footprints included.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashSet;

use crate::consts::{STAIR_RUN, VERTICAL_AXIS};
use crate::coord::Coord;
use crate::grid::Grid;

/// Four-connected moves in the plane
pub const FLAT_NEIGHBORS: [Coord<2>; 4] = [
    Coord::new([1, 0]),
    Coord::new([-1, 0]),
    Coord::new([0, 1]),
    Coord::new([0, -1]),
];

/// Same-level moves followed by staircase moves
///
/// A staircase climbs or descends one level while running `STAIR_RUN` cells
/// along x or z.
pub const LAYERED_NEIGHBORS: [Coord<3>; 12] = [
    Coord::new([1, 0, 0]),
    Coord::new([-1, 0, 0]),
    Coord::new([0, 0, 1]),
    Coord::new([0, 0, -1]),
    Coord::new([STAIR_RUN, 1, 0]),
    Coord::new([-STAIR_RUN, 1, 0]),
    Coord::new([0, 1, STAIR_RUN]),
    Coord::new([0, 1, -STAIR_RUN]),
    Coord::new([STAIR_RUN, -1, 0]),
    Coord::new([-STAIR_RUN, -1, 0]),
    Coord::new([0, -1, STAIR_RUN]),
    Coord::new([0, -1, -STAIR_RUN]),
];

/// Price of one step, as reported by the cost function
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathCost {
    pub traversable: bool,
    pub cost: f32,
    pub is_stairs: bool,
}

impl PathCost {
    /// A step that may not be taken
    pub const fn blocked() -> Self {
        Self {
            traversable: false,
            cost: 0.0,
            is_stairs: false,
        }
    }

    /// A same-level step
    pub const fn step(cost: f32) -> Self {
        Self {
            traversable: true,
            cost,
            is_stairs: false,
        }
    }

    /// A staircase step
    pub const fn stairs(cost: f32) -> Self {
        Self {
            traversable: true,
            cost,
            is_stairs: true,
        }
    }
}

/// Shape of a staircase between two cells one level apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StairStep<const N: usize> {
    /// One level up or down
    pub vertical: Coord<N>,
    /// Unit run along the ground
    pub horizontal: Coord<N>,
}

impl<const N: usize> StairStep<N> {
    /// The staircase taking `from` to `to`, if the step changes level
    ///
    /// Only grids with a vertical axis (3D) have staircases.
    pub fn between(from: Coord<N>, to: Coord<N>) -> Option<Self> {
        if N < 3 {
            return None;
        }
        let delta = to - from;
        if delta[VERTICAL_AXIS] == 0 {
            return None;
        }
        let mut vertical = Coord::ZERO;
        vertical[VERTICAL_AXIS] = delta[VERTICAL_AXIS];
        let mut horizontal = delta.signum();
        horizontal[VERTICAL_AXIS] = 0;
        Some(Self {
            vertical,
            horizontal,
        })
    }

    /// Combined direction: the vertical offset plus the unit run
    pub fn direction(&self) -> Coord<N> {
        self.vertical + self.horizontal
    }

    /// The four cells the staircase occupies when entered from `anchor`
    pub fn footprint(&self, anchor: Coord<N>) -> [Coord<N>; 4] {
        let (v, h) = (self.vertical, self.horizontal);
        [anchor + h, anchor + h * 2, anchor + v + h, anchor + v + h * 2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Visit<const N: usize> {
    g_cost: f32,
    previous: Option<Coord<N>>,
    via_stairs: bool,
    closed: bool,
}

impl<const N: usize> Default for Visit<N> {
    fn default() -> Self {
        Self {
            g_cost: f32::INFINITY,
            previous: None,
            via_stairs: false,
            closed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AStarNode<const N: usize> {
    pos: Coord<N>,
    g_cost: f32, // Cost from start
    f_cost: f32, // g_cost + heuristic
}

impl<const N: usize> Eq for AStarNode<N> {}

impl<const N: usize> Ord for AStarNode<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.g_cost.total_cmp(&self.g_cost))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl<const N: usize> PartialOrd for AStarNode<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search over the cells of a fixed-size grid
#[derive(Debug, Clone)]
pub struct Pathfinder<const N: usize> {
    size: Coord<N>,
    origin: Coord<N>,
    neighbors: Vec<Coord<N>>,
}

impl Pathfinder<2> {
    /// Four-connected search in the plane
    pub fn flat(size: Coord<2>) -> Self {
        Self::new(size, Coord::ZERO, FLAT_NEIGHBORS.to_vec())
    }
}

impl Pathfinder<3> {
    /// Same-level moves plus staircases
    pub fn layered(size: Coord<3>) -> Self {
        Self::new(size, Coord::ZERO, LAYERED_NEIGHBORS.to_vec())
    }
}

impl<const N: usize> Pathfinder<N> {
    pub fn new(size: Coord<N>, origin: Coord<N>, neighbors: Vec<Coord<N>>) -> Self {
        Self {
            size,
            origin,
            neighbors,
        }
    }

    /// Find the cheapest path from `start` to `goal`, both inclusive
    ///
    /// `cost_fn(current, candidate)` prices every step considered. Returns
    /// `None` when the goal cannot be reached or either endpoint lies
    /// outside the grid.
    pub fn find_path<F>(
        &self,
        start: Coord<N>,
        goal: Coord<N>,
        mut cost_fn: F,
    ) -> Option<Vec<Coord<N>>>
    where
        F: FnMut(Coord<N>, Coord<N>) -> PathCost,
    {
        let mut visits: Grid<Visit<N>, N> = Grid::new(self.size, self.origin);
        if !visits.in_bounds(start) || !visits.in_bounds(goal) {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }

        let mut open_set = BinaryHeap::new();
        visits[start].g_cost = 0.0;
        open_set.push(AStarNode {
            pos: start,
            g_cost: 0.0,
            f_cost: start.distance(&goal),
        });

        while let Some(current) = open_set.pop() {
            let pos = current.pos;
            if pos == goal {
                return Some(reconstruct_path(&visits, goal));
            }
            if visits[pos].closed {
                continue;
            }
            visits[pos].closed = true;

            let g_current = visits[pos].g_cost;
            let used = used_cells(&visits, pos);

            for &offset in &self.neighbors {
                let next = pos + offset;
                if !visits.in_bounds(next) || visits[next].closed || used.contains(&next) {
                    continue;
                }

                let step = cost_fn(pos, next);
                if !step.traversable {
                    continue;
                }
                // a level change is only taken as a priced staircase
                let stairs = StairStep::between(pos, next);
                if stairs.is_some() != step.is_stairs {
                    continue;
                }
                if let Some(stairs) = stairs {
                    if stairs.footprint(pos).iter().any(|c| used.contains(c)) {
                        continue;
                    }
                }

                let g_cost = g_current + step.cost;
                if g_cost < visits[next].g_cost {
                    let visit = &mut visits[next];
                    visit.g_cost = g_cost;
                    visit.previous = Some(pos);
                    visit.via_stairs = step.is_stairs;
                    open_set.push(AStarNode {
                        pos: next,
                        g_cost,
                        f_cost: g_cost + next.distance(&goal),
                    });
                }
            }
        }

        None // No path found
    }
}

/// Cells on the path leading to `end`, staircase footprints included
fn used_cells<const N: usize>(visits: &Grid<Visit<N>, N>, end: Coord<N>) -> HashSet<Coord<N>> {
    let mut used = HashSet::new();
    let mut current = end;
    used.insert(current);
    while let Some(prev) = visits[current].previous {
        if visits[current].via_stairs {
            if let Some(stairs) = StairStep::between(prev, current) {
                used.extend(stairs.footprint(prev));
            }
        }
        used.insert(prev);
        current = prev;
    }
    used
}

/// Walk predecessor links back from `end`
fn reconstruct_path<const N: usize>(visits: &Grid<Visit<N>, N>, end: Coord<N>) -> Vec<Coord<N>> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(prev) = visits[current].previous {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}
