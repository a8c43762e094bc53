//! Marching squares isoline extraction.
//!
//! Every grid cell is split into two triangles along its top-left to
//! bottom-right diagonal. A triangle whose corners straddle a level has
//! exactly one corner on the minority side; the isoline crosses the two edges
//! leaving that corner, and the crossings are joined into one line segment.
//!
//! Crossings are keyed by their grid edge, so a crossing reached from both
//! triangles that share an edge produces a single vertex.

#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use glam::Vec2;

use crate::grid::{Grid, GridSample};

/// Opaque red, the default isoline color.
pub const DEFAULT_ISOLINE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// A grid edge identified by its two node indices, smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    lo: u32,
    hi: u32,
}

impl EdgeKey {
    /// Creates the key for the edge between nodes `a` and `b`, in either order.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Returns the endpoint indices, smaller first.
    #[must_use]
    pub fn endpoints(&self) -> (u32, u32) {
        (self.lo, self.hi)
    }
}

/// GPU-compatible isoline vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct IsolineVertex {
    /// Position in grid space.
    pub position: [f32; 2],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Output of isoline extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolineMesh {
    /// Crossing positions, in first-seen order.
    pub positions: Vec<Vec2>,
    /// Grid edge each crossing lies on (parallel to `positions`).
    pub edges: Vec<EdgeKey>,
    /// Line segment indices (every 2 consecutive indices form a segment).
    pub indices: Vec<u32>,
    /// Color shared by every vertex.
    pub color: [f32; 4],
}

impl Default for IsolineMesh {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            edges: Vec::new(),
            indices: Vec::new(),
            color: DEFAULT_ISOLINE_COLOR,
        }
    }
}

impl IsolineMesh {
    /// Returns the number of line segments in the mesh.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.indices.len() / 2
    }

    /// Returns the number of vertices in the mesh.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the mesh has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over segments as pairs of vertex indices.
    pub fn segments(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.indices.chunks_exact(2).map(|s| [s[0], s[1]])
    }

    /// Interleaved position + color vertices, ready for upload.
    #[must_use]
    pub fn vertex_data(&self) -> Vec<IsolineVertex> {
        self.positions
            .iter()
            .map(|p| IsolineVertex {
                position: p.to_array(),
                color: self.color,
            })
            .collect()
    }
}

/// Extracts isolines from scalar grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolineExtractor {
    color: [f32; 4],
}

impl Default for IsolineExtractor {
    fn default() -> Self {
        Self {
            color: DEFAULT_ISOLINE_COLOR,
        }
    }
}

impl IsolineExtractor {
    /// Creates an extractor emitting [`DEFAULT_ISOLINE_COLOR`] vertices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vertex color.
    #[must_use]
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Returns the vertex color.
    #[must_use]
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Extracts the isolines of every level in `constants` into one mesh.
    ///
    /// A node whose value equals a level counts as at-or-above it. Levels
    /// outside the grid's value range contribute nothing.
    ///
    /// Vertices are shared per level: crossings of the same grid edge by
    /// different levels are distinct vertices.
    #[must_use]
    pub fn extract(&self, grid: &Grid, constants: &[f32]) -> IsolineMesh {
        let mut builder = MeshBuilder::new(self.color);
        let samples = grid.samples();
        let cols = grid.cols();

        for row in 0..grid.rows() - 1 {
            for col in 0..cols - 1 {
                let lu = &samples[row * cols + col];
                let ru = &samples[row * cols + col + 1];
                let ld = &samples[(row + 1) * cols + col];
                let rd = &samples[(row + 1) * cols + col + 1];

                for (level, &constant) in constants.iter().enumerate() {
                    builder.add_triangle(level, [lu, ld, rd], constant);
                    builder.add_triangle(level, [lu, rd, ru], constant);
                }
            }
        }

        let mesh = builder.finish();
        log::trace!(
            "extracted {} isoline segments ({} vertices) for {} levels on {}x{} grid",
            mesh.num_segments(),
            mesh.num_vertices(),
            constants.len(),
            grid.rows(),
            grid.cols()
        );
        mesh
    }

    /// Extracts the isoline of a single level.
    #[must_use]
    pub fn extract_level(&self, grid: &Grid, constant: f32) -> IsolineMesh {
        self.extract(grid, &[constant])
    }
}

/// Extracts isolines with the default color.
#[must_use]
pub fn extract_isolines(grid: &Grid, constants: &[f32]) -> IsolineMesh {
    IsolineExtractor::new().extract(grid, constants)
}

/// Accumulates segments, sharing one vertex per (level, edge).
struct MeshBuilder {
    mesh: IsolineMesh,
    edge_vertices: HashMap<(usize, EdgeKey), u32>,
}

impl MeshBuilder {
    fn new(color: [f32; 4]) -> Self {
        Self {
            mesh: IsolineMesh {
                color,
                ..IsolineMesh::default()
            },
            edge_vertices: HashMap::new(),
        }
    }

    /// Emits the segment of `tri` at `constant`, if the triangle straddles it.
    fn add_triangle(&mut self, level: usize, tri: [&GridSample; 3], constant: f32) {
        let below = tri.iter().filter(|v| v.value < constant).count();
        let minority_below = match below {
            0 | 3 => return,
            1 => true,
            _ => false,
        };
        let Some(m) = tri.iter().position(|v| (v.value < constant) == minority_below) else {
            return;
        };
        let majority = match m {
            0 => [1, 2],
            1 => [0, 2],
            _ => [0, 1],
        };

        for j in majority {
            self.insert_crossing(level, tri[m], tri[j], constant);
        }
    }

    fn insert_crossing(&mut self, level: usize, a: &GridSample, b: &GridSample, constant: f32) {
        let key = EdgeKey::new(a.index, b.index);
        let mesh = &mut self.mesh;
        let index = *self.edge_vertices.entry((level, key)).or_insert_with(|| {
            let index = mesh.positions.len() as u32;
            mesh.positions.push(crossing_point(a, b, constant));
            mesh.edges.push(key);
            index
        });
        mesh.indices.push(index);
    }

    fn finish(self) -> IsolineMesh {
        self.mesh
    }
}

/// Point on edge `(a, b)` where the linear interpolant equals `constant`.
///
/// Endpoints are ordered by node index so the result does not depend on the
/// direction the edge was reached from.
#[inline]
fn crossing_point(a: &GridSample, b: &GridSample, constant: f32) -> Vec2 {
    let (v1, v2) = if a.index <= b.index { (a, b) } else { (b, a) };
    let alpha = (constant - v2.value) / (v1.value - v2.value);
    alpha * v1.position + (1.0 - alpha) * v2.position
}
