//! Dungeon layout
//!
//! Cell states, rooms and their placement, hallway search and carving, and
//! the generation pipeline that ties them together.

mod cell;
mod generation;
mod hallway;
mod pathfind;
mod placement;
mod room;

pub use cell::CellType;
pub use generation::{generate_2d, generate_3d, Dungeon, PathRecord};
pub use hallway::{
    carve_path, flat_cost, hallway_components, layered_cost, Carving, DoorRecord, StairwayRecord,
};
pub use pathfind::{PathCost, Pathfinder, StairStep, FLAT_NEIGHBORS, LAYERED_NEIGHBORS};
pub use placement::place_rooms;
pub use room::Room;
