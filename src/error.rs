//! Construction-time configuration errors
//!
//! The simulation itself never fails at runtime; everything here is reported
//! once, while a board or session is being set up.

use std::path::PathBuf;

/// A malformed board/session configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board must have at least one lane and one column (got {width}x{height})")]
    EmptyBoard { width: usize, height: usize },

    #[error("lane {lane} has {len} cells, expected {width}")]
    RaggedLane { lane: usize, len: usize, width: usize },

    #[error("lane {lane} column {column}: unknown layout character {found:?}")]
    UnknownCell { lane: usize, column: usize, found: char },

    #[error("speed table has {speeds} entries for {lanes} lanes")]
    SpeedCountMismatch { speeds: usize, lanes: usize },

    #[error("scroll period must be positive")]
    ZeroScrollPeriod,

    #[error("start cell ({x}, {y}) is a hazard")]
    StartOnHazard { x: usize, y: usize },

    #[error("snapshot is inconsistent: {0}")]
    BadSnapshot(&'static str),

    #[error("failed to access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
