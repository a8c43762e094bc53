//! isofield: an animated scalar-field grid visualizer with marching-squares isolines.
//!
//! A square grid of nodes is fitted into a viewport, an animated noise field
//! is sampled at every node, and isolines are extracted for a set of evenly
//! spaced levels. The crate produces GPU-ready buffers; drawing them is left
//! to the caller's renderer.
//!
//! # Quick Start
//!
//! ```no_run
//! use isofield::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut scene = Scene::new(Options::default(), 800, 600)?;
//!     scene.increase_isolines();
//!
//!     scene.advance(1.0 / 60.0);
//!     let frame = scene.frame();
//!     let vertices = frame.isolines.vertex_data();
//!     println!("{} isoline vertices", vertices.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! The extraction kernel can also be used on its own:
//!
//! ```
//! use isofield::{extract_isolines, Grid};
//!
//! let grid = Grid::from_values(2, 2, &[0.0, 1.0, 0.0, 1.0]).unwrap();
//! let mesh = extract_isolines(&grid, &[0.5]);
//! assert_eq!(mesh.num_segments(), 2);
//! ```

mod init;
mod scene;

pub use init::init_logging;
pub use scene::{Frame, Scene};

// Re-export core types
pub use isofield_core::{
    error::{IsofieldError, Result},
    evenly_spaced_levels, extract_isolines, grayscale_colors, EdgeKey, Grid, GridLayout,
    GridSample, IsolineExtractor, IsolineMesh, IsolineVertex, Mat4, Options, PerlinField,
    ScalarField, Vec2, Viewport, CELL_COUNT_LIMIT, DEFAULT_ISOLINE_COLOR, ISOLINE_COUNT_LIMIT,
};
