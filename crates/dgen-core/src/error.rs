//! Generation errors and non-fatal diagnostics

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// Configuration rejected before generation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid extent must be positive on every axis, got {size}")]
    EmptyGrid { size: String },

    #[error("maximum room size must be at least 1 on every axis, got {size}")]
    EmptyRoomSize { size: String },

    #[error("loop rate must be a number between 0 and 1, got {rate}")]
    InvalidLoopRate { rate: f64 },

    #[error("attempt cap must be at least 1")]
    NoAttempts,

    #[error("cost model values must be finite and non-negative")]
    InvalidCosts,
}

/// Fatal generation failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no room could be placed after {attempts} attempts")]
    NoRoomsPlaced { attempts: u32 },
}

/// A non-fatal condition recorded during generation
///
/// The dungeon is still produced; callers decide whether a degraded layout
/// is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Fewer rooms were accepted than requested
    RoomShortfall { requested: usize, placed: usize },
    /// The spanning tree could not reach these rooms
    Disconnected { unreached: Vec<usize> },
    /// No hallway could be carved between two rooms
    NoPath { from: usize, to: usize },
    /// Triangulation input had too few points or no volume
    DegenerateTriangulation { vertices: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RoomShortfall { requested, placed } => {
                write!(f, "placed {placed} of {requested} requested rooms")
            }
            Diagnostic::Disconnected { unreached } => {
                write!(f, "spanning tree could not reach rooms {unreached:?}")
            }
            Diagnostic::NoPath { from, to } => {
                write!(f, "no hallway path from room {from} to room {to}")
            }
            Diagnostic::DegenerateTriangulation { vertices } => {
                write!(f, "degenerate triangulation over {vertices} room centers")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: GenerationError = ConfigError::NoAttempts.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: attempt cap must be at least 1"
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::NoPath { from: 2, to: 5 };
        assert_eq!(d.to_string(), "no hallway path from room 2 to room 5");
    }

    #[test]
    fn test_diagnostic_serializes_with_kind() {
        let d = Diagnostic::RoomShortfall {
            requested: 10,
            placed: 4,
        };
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"kind":"room_shortfall","requested":10,"placed":4}"#);
    }
}
