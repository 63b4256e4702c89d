//! Grid cell states

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What occupies a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellType {
    #[default]
    Empty = 0,
    Room = 1,
    Hallway = 2,
    Stairway = 3,
    /// Room cell where a hallway enters
    Door = 4,
}

impl CellType {
    /// Check if this cell was carved by the hallway search
    pub const fn is_carved(&self) -> bool {
        matches!(self, CellType::Hallway | CellType::Stairway)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Empty => ' ',
            CellType::Room => '.',
            CellType::Hallway => '#',
            CellType::Door => '+',
            CellType::Stairway => '>',
        }
    }
}
