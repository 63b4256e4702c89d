//! dgen-core: procedural dungeon layout generation
//!
//! Places rooms on a 2D or 3D grid, proposes connections with a Delaunay
//! triangulation over room centers, keeps a minimum spanning tree plus a
//! few loop edges, and carves hallways (and staircases in 3D) with a
//! constrained A* search.
//!
//! The crate performs no I/O. Generation is a single synchronous call that
//! returns a [`Dungeon`] for a renderer or any other consumer to read.

pub mod config;
pub mod coord;
pub mod dungeon;
pub mod error;
pub mod graph;
pub mod grid;

mod consts;
mod rng;

pub use config::{CostModel, DungeonConfig};
pub use consts::*;
pub use coord::{Coord, Coord2, Coord3};
pub use dungeon::{
    generate_2d, generate_3d, CellType, DoorRecord, Dungeon, PathRecord, Room, StairwayRecord,
};
pub use error::{ConfigError, Diagnostic, GenerationError};
pub use grid::Grid;
pub use rng::DungeonRng;
