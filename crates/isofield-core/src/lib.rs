//! Core algorithms for isofield-rs.
//!
//! This crate provides the data model and kernels behind the visualizer:
//! - [`GridLayout`] places a node lattice in a [`Viewport`]
//! - [`ScalarField`] values are sampled on it into a [`Grid`]
//! - [`IsolineExtractor`] turns a grid and a set of levels into line segments
//! - [`Options`] holds the persisted configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod field;
pub mod grid;
pub mod levels;
pub mod marching_squares;
pub mod options;
pub mod viewport;

pub use error::{IsofieldError, Result};
pub use field::{grayscale_colors, PerlinField, ScalarField};
pub use grid::{Grid, GridLayout, GridSample};
pub use levels::evenly_spaced_levels;
pub use marching_squares::{
    extract_isolines, EdgeKey, IsolineExtractor, IsolineMesh, IsolineVertex,
    DEFAULT_ISOLINE_COLOR,
};
pub use options::{Options, CELL_COUNT_LIMIT, ISOLINE_COUNT_LIMIT};
pub use viewport::Viewport;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2};
