//! Error types for isofield-rs.

use thiserror::Error;

/// The main error type for isofield-rs operations.
#[derive(Error, Debug)]
pub enum IsofieldError {
    /// A grid needs at least two rows and two columns to contain a cell.
    #[error("grid too small: {rows}x{cols} nodes, need at least 2x2")]
    GridTooSmall { rows: usize, cols: usize },

    /// A row of samples does not have the same length as the first row.
    #[error("ragged grid: row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Two samples of one grid share a node index.
    #[error("duplicate grid node index {index}")]
    DuplicateIndex { index: u32 },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The viewport has a zero dimension.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// A grid layout was requested with zero cells along an axis.
    #[error("invalid cell count {cols}x{rows}")]
    InvalidCellCount { cols: u32, rows: u32 },

    /// An option value is out of its accepted range.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for isofield-rs operations.
pub type Result<T> = std::result::Result<T, IsofieldError>;
