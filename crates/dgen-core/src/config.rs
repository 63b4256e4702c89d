//! Generation options

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::coord::Coord;
use crate::error::ConfigError;

/// Step costs that bias the hallway search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Entering an existing hallway or door cell
    pub hallway: f32,
    /// Entering an empty cell
    pub empty: f32,
    /// Entering a room interior cell
    pub room: f32,
    /// A staircase move (3D only)
    pub stairs: f32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            hallway: HALLWAY_STEP_COST,
            empty: EMPTY_STEP_COST,
            room: ROOM_STEP_COST,
            stairs: STAIRS_STEP_COST,
        }
    }
}

impl CostModel {
    fn is_valid(&self) -> bool {
        [self.hallway, self.empty, self.room, self.stairs]
            .iter()
            .all(|c| c.is_finite() && *c >= 0.0)
    }
}

/// Options for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "DungeonConfig<N>: Default"))]
pub struct DungeonConfig<const N: usize> {
    /// Grid extent
    pub size: Coord<N>,
    /// Number of placement samples; each one may be rejected
    pub room_count: usize,
    /// Largest room extent per axis
    pub room_max_size: Coord<N>,
    /// RNG seed; 0 picks a fresh one, reported in the output
    pub seed: u64,
    /// Probability of keeping each non-tree triangulation edge
    pub loop_rate: f64,
    /// Placement passes allowed when no room at all could be placed
    pub max_attempts: u32,
    pub costs: CostModel,
}

impl Default for DungeonConfig<2> {
    fn default() -> Self {
        Self {
            size: Coord::new(DEFAULT_SIZE_2D),
            room_count: DEFAULT_ROOM_COUNT_2D,
            room_max_size: Coord::new(DEFAULT_ROOM_MAX_2D),
            seed: 0,
            loop_rate: DEFAULT_LOOP_RATE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            costs: CostModel::default(),
        }
    }
}

impl Default for DungeonConfig<3> {
    fn default() -> Self {
        Self {
            size: Coord::new(DEFAULT_SIZE_3D),
            room_count: DEFAULT_ROOM_COUNT_3D,
            room_max_size: Coord::new(DEFAULT_ROOM_MAX_3D),
            seed: 0,
            loop_rate: DEFAULT_LOOP_RATE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            costs: CostModel::default(),
        }
    }
}

impl<const N: usize> DungeonConfig<N> {
    /// Loop rate actually used: unset or non-positive rates fall back to the default
    pub fn effective_loop_rate(&self) -> f64 {
        if self.loop_rate > 0.0 {
            self.loop_rate
        } else {
            DEFAULT_LOOP_RATE
        }
    }

    /// Check the options before any RNG draw happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.0.iter().any(|&c| c <= 0) {
            return Err(ConfigError::EmptyGrid {
                size: self.size.to_string(),
            });
        }
        if self.room_max_size.0.iter().any(|&c| c < 1) {
            return Err(ConfigError::EmptyRoomSize {
                size: self.room_max_size.to_string(),
            });
        }
        // NaN fails both comparisons and so reaches the default instead
        let rate = self.effective_loop_rate();
        if !(rate.is_finite() && rate <= 1.0) {
            return Err(ConfigError::InvalidLoopRate { rate: self.loop_rate });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if !self.costs.is_valid() {
            return Err(ConfigError::InvalidCosts);
        }
        Ok(())
    }
}
