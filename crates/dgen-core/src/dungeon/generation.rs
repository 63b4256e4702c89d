//! Dungeon generation pipeline
//!
//! Places rooms, triangulates their centers, keeps a minimum spanning tree
//! plus some loop edges, and carves a hallway for every kept edge. The 2D
//! and 3D variants share the pipeline and differ only in their layout rules.

use serde::Serialize;

use crate::config::{CostModel, DungeonConfig};
use crate::coord::Coord;
use crate::error::{Diagnostic, GenerationError};
use crate::graph::{
    minimum_spanning_tree, select_edges, triangulate_2d, triangulate_3d, Edge, Vertex,
};
use crate::grid::Grid;
use crate::rng::DungeonRng;

use super::hallway::{carve_path, flat_cost, hallway_components, layered_cost, Carving};
use super::{place_rooms, CellType, DoorRecord, PathCost, Pathfinder, Room, StairwayRecord};

/// The hallway carved for one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord<const N: usize> {
    /// Room index at the start of the path
    pub from: usize,
    /// Room index at the end of the path
    pub to: usize,
    /// Cells from the center of `from` to the center of `to`, inclusive
    pub cells: Vec<Coord<N>>,
}

/// A generated layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dungeon<const N: usize> {
    /// Seed that reproduces this layout
    pub seed: u64,
    pub grid: Grid<CellType, N>,
    pub rooms: Vec<Room<N>>,
    /// Room pairs chosen for connection: spanning tree first, then loops
    pub connections: Vec<(usize, usize)>,
    pub paths: Vec<PathRecord<N>>,
    /// Hallway cells grouped into same-level connected pieces
    pub hallways: Vec<Vec<Coord<N>>>,
    pub doors: Vec<DoorRecord<N>>,
    pub stairways: Vec<StairwayRecord<N>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Dungeon<2> {
    /// One text row per grid row
    pub fn to_ascii(&self) -> String {
        let size = self.grid.size();
        let origin = self.grid.origin();
        let mut out = String::with_capacity(size.volume() + size.y() as usize);
        for y in 0..size.y() {
            for x in 0..size.x() {
                out.push(self.grid[origin + Coord::new([x, y])].symbol());
            }
            out.push('\n');
        }
        out
    }
}

impl Dungeon<3> {
    /// One level of the grid, one text row per z
    ///
    /// Returns an empty string for a level outside the grid.
    pub fn render_layer(&self, y: i32) -> String {
        let size = self.grid.size();
        let origin = self.grid.origin();
        if !(0..size.y()).contains(&y) {
            return String::new();
        }
        let mut out = String::with_capacity(((size.x() + 1) * size.z()) as usize);
        for z in 0..size.z() {
            for x in 0..size.x() {
                out.push(self.grid[origin + Coord::new([x, y, z])].symbol());
            }
            out.push('\n');
        }
        out
    }

    /// Every level, bottom first, each under a `y = n` header
    pub fn to_ascii(&self) -> String {
        (0..self.grid.size().y())
            .map(|y| format!("y = {y}\n{}", self.render_layer(y)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What sets the 2D and 3D pipelines apart
trait Layout<const N: usize> {
    /// Minimum gap kept around rooms, per axis
    const MARGIN: Coord<N>;

    /// Candidate edges over room centers, and whether the input was degenerate
    fn triangulate(vertices: &[Vertex<usize, N>]) -> (Vec<Edge>, bool);

    fn pathfinder(size: Coord<N>) -> Pathfinder<N>;

    fn step_cost(
        grid: &Grid<CellType, N>,
        costs: &CostModel,
        from: Coord<N>,
        to: Coord<N>,
    ) -> PathCost;
}

/// Single-level grid, four-connected hallways
struct Flat;

impl Layout<2> for Flat {
    const MARGIN: Coord<2> = Coord::new([1, 1]);

    fn triangulate(vertices: &[Vertex<usize, 2>]) -> (Vec<Edge>, bool) {
        let triangulation = triangulate_2d(vertices);
        let degenerate = triangulation.is_degenerate();
        (triangulation.edges, degenerate)
    }

    fn pathfinder(size: Coord<2>) -> Pathfinder<2> {
        Pathfinder::flat(size)
    }

    fn step_cost(
        grid: &Grid<CellType, 2>,
        costs: &CostModel,
        _from: Coord<2>,
        to: Coord<2>,
    ) -> PathCost {
        flat_cost(grid, costs, to)
    }
}

/// Stacked levels joined by staircases; rooms may sit directly on top of
/// each other
struct Layered;

impl Layout<3> for Layered {
    const MARGIN: Coord<3> = Coord::new([1, 0, 1]);

    fn triangulate(vertices: &[Vertex<usize, 3>]) -> (Vec<Edge>, bool) {
        let triangulation = triangulate_3d(vertices);
        let degenerate = triangulation.is_degenerate();
        (triangulation.edges, degenerate)
    }

    fn pathfinder(size: Coord<3>) -> Pathfinder<3> {
        Pathfinder::layered(size)
    }

    fn step_cost(
        grid: &Grid<CellType, 3>,
        costs: &CostModel,
        from: Coord<3>,
        to: Coord<3>,
    ) -> PathCost {
        layered_cost(grid, costs, from, to)
    }
}

/// Generate a single-level dungeon
pub fn generate_2d(config: &DungeonConfig<2>) -> Result<Dungeon<2>, GenerationError> {
    generate::<Flat, 2>(config)
}

/// Generate a multi-level dungeon with staircases
pub fn generate_3d(config: &DungeonConfig<3>) -> Result<Dungeon<3>, GenerationError> {
    generate::<Layered, 3>(config)
}

fn generate<L: Layout<N>, const N: usize>(
    config: &DungeonConfig<N>,
) -> Result<Dungeon<N>, GenerationError> {
    config.validate()?;

    let mut rng = DungeonRng::for_config_seed(config.seed);
    let seed = rng.seed();
    log::info!("generating {N}D dungeon of size {} with seed {seed}", config.size);

    let mut diagnostics = Vec::new();
    let (mut grid, rooms) = place_with_retry::<L, N>(config, &mut rng)?;
    if rooms.len() < config.room_count {
        record(
            &mut diagnostics,
            Diagnostic::RoomShortfall {
                requested: config.room_count,
                placed: rooms.len(),
            },
        );
    }

    let vertices: Vec<Vertex<usize, N>> = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| Vertex::new(room.center(), i))
        .collect();
    let (edges, degenerate) = L::triangulate(&vertices);
    if degenerate {
        record(
            &mut diagnostics,
            Diagnostic::DegenerateTriangulation {
                vertices: vertices.len(),
            },
        );
    }

    let start = edges.first().map_or(0, Edge::u);
    let tree = minimum_spanning_tree(vertices.len(), &edges, start);
    if !tree.is_complete() {
        record(
            &mut diagnostics,
            Diagnostic::Disconnected {
                unreached: tree.unreached.clone(),
            },
        );
    }
    let selected = select_edges(&edges, &tree.edges, config.effective_loop_rate(), &mut rng);
    log::debug!(
        "{} candidate edges, {} in spanning tree, {} selected",
        edges.len(),
        tree.edges.len(),
        selected.len()
    );

    let pathfinder = L::pathfinder(config.size);
    let mut carving = Carving::default();
    let paths = connect_rooms(
        &mut grid,
        &rooms,
        &selected,
        &pathfinder,
        |grid, from, to| L::step_cost(grid, &config.costs, from, to),
        &mut carving,
        &mut diagnostics,
    );

    let hallways = hallway_components(&grid, &carving.hallways);
    log::info!(
        "{} rooms, {} hallway cells in {} pieces, {} doors, {} stairways",
        rooms.len(),
        carving.hallways.len(),
        hallways.len(),
        carving.doors.len(),
        carving.stairways.len()
    );

    Ok(Dungeon {
        seed,
        grid,
        rooms,
        connections: selected.iter().map(Edge::endpoints).collect(),
        paths,
        hallways,
        doors: carving.doors,
        stairways: carving.stairways,
        diagnostics,
    })
}

/// Run placement until at least one room is accepted
///
/// Every attempt starts from a fresh grid and keeps drawing from the same
/// RNG stream.
fn place_with_retry<L: Layout<N>, const N: usize>(
    config: &DungeonConfig<N>,
    rng: &mut DungeonRng,
) -> Result<(Grid<CellType, N>, Vec<Room<N>>), GenerationError> {
    for attempt in 1..=config.max_attempts {
        let mut grid = Grid::new(config.size, Coord::ZERO);
        let rooms = place_rooms(&mut grid, config, L::MARGIN, rng);
        if !rooms.is_empty() {
            return Ok((grid, rooms));
        }
        log::warn!("placement attempt {attempt} accepted no rooms");
    }
    Err(GenerationError::NoRoomsPlaced {
        attempts: config.max_attempts,
    })
}

/// Search and carve a hallway for every edge, in order
///
/// An edge without a path is recorded as [`Diagnostic::NoPath`] and skipped.
fn connect_rooms<const N: usize, F>(
    grid: &mut Grid<CellType, N>,
    rooms: &[Room<N>],
    edges: &[Edge],
    pathfinder: &Pathfinder<N>,
    mut cost_fn: F,
    carving: &mut Carving<N>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<PathRecord<N>>
where
    F: FnMut(&Grid<CellType, N>, Coord<N>, Coord<N>) -> PathCost,
{
    let mut paths = Vec::with_capacity(edges.len());

    for edge in edges {
        let (from, to) = edge.endpoints();
        let start = rooms[from].center_cell();
        let goal = rooms[to].center_cell();

        let found = {
            let grid = &*grid;
            pathfinder.find_path(start, goal, |a, b| cost_fn(grid, a, b))
        };
        let Some(cells) = found else {
            record(diagnostics, Diagnostic::NoPath { from, to });
            continue;
        };

        carve_path(grid, &cells, carving);
        log::debug!("carved {} cells from room {from} to room {to}", cells.len());
        paths.push(PathRecord { from, to, cells });
    }

    paths
}

fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}
