//! Generation constants and configuration defaults

/// Probability of re-admitting a non-tree edge when the configured rate is unset
pub const DEFAULT_LOOP_RATE: f64 = 0.125;

/// Placement passes allowed before giving up on a run that placed no rooms
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Default grid extents
pub const DEFAULT_SIZE_2D: [i32; 2] = [30, 30];
pub const DEFAULT_SIZE_3D: [i32; 3] = [30, 5, 30];

/// Default room counts (sampling attempts, not guaranteed placements)
pub const DEFAULT_ROOM_COUNT_2D: usize = 12;
pub const DEFAULT_ROOM_COUNT_3D: usize = 24;

/// Default maximum room size per axis
pub const DEFAULT_ROOM_MAX_2D: [i32; 2] = [6, 6];
pub const DEFAULT_ROOM_MAX_3D: [i32; 3] = [6, 2, 6];

/// Step costs used by the hallway cost model
pub const HALLWAY_STEP_COST: f32 = 1.0;
pub const EMPTY_STEP_COST: f32 = 5.0;
pub const ROOM_STEP_COST: f32 = 10.0;
pub const STAIRS_STEP_COST: f32 = 100.0;

/// Horizontal run of a staircase move, in cells
pub const STAIR_RUN: i32 = 3;

/// Index of the vertical axis in 3D coordinates
pub const VERTICAL_AXIS: usize = 1;
