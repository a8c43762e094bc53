//! Scalar grids and the node layout they are sampled on.
//!
//! A [`GridLayout`] places a lattice of nodes inside a [`Viewport`] and owns
//! the triangle index buffer used to draw the filled grid. Sampling a layout
//! with a [`ScalarField`] at a point in time produces a [`Grid`], the input
//! of isoline extraction.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::collections::HashSet;

use glam::Vec2;

use crate::error::{IsofieldError, Result};
use crate::field::ScalarField;
use crate::viewport::Viewport;

/// A single grid node: where it is, which node it is, and the field value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    /// Node position (pixel space for laid-out grids).
    pub position: Vec2,
    /// Index of the node, unique within its grid.
    pub index: u32,
    /// Field value at the node.
    pub value: f32,
}

impl GridSample {
    /// Creates a new sample.
    #[must_use]
    pub fn new(position: Vec2, index: u32, value: f32) -> Self {
        Self {
            position,
            index,
            value,
        }
    }
}

/// A rectangular, row-major array of samples with at least 2x2 nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    samples: Vec<GridSample>,
}

impl Grid {
    /// Creates a grid from row-major samples.
    ///
    /// Node indices are taken as given; a repeated index is rejected.
    pub fn new(rows: usize, cols: usize, samples: Vec<GridSample>) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(IsofieldError::GridTooSmall { rows, cols });
        }
        let expected = rows * cols;
        if samples.len() != expected {
            return Err(IsofieldError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        let mut seen = HashSet::with_capacity(samples.len());
        if let Some(s) = samples.iter().find(|s| !seen.insert(s.index)) {
            return Err(IsofieldError::DuplicateIndex { index: s.index });
        }
        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    /// Creates a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<GridSample>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_cols)
        {
            return Err(IsofieldError::RaggedRows {
                row,
                expected: n_cols,
                actual,
            });
        }
        Self::new(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// Creates a grid on the unit lattice: node `(row, col)` sits at
    /// `(col, row)` and has index `row * cols + col`.
    pub fn from_values(rows: usize, cols: usize, values: &[f32]) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(IsofieldError::SizeMismatch {
                expected: rows * cols,
                actual: values.len(),
            });
        }
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let position = Vec2::new((i % cols) as f32, (i / cols) as f32);
                GridSample::new(position, i as u32, value)
            })
            .collect();
        Self::new(rows, cols, samples)
    }

    /// Number of node rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of node columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[GridSample] {
        &self.samples
    }

    /// Returns the sample at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &GridSample {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of range");
        &self.samples[row * self.cols + col]
    }

    /// Smallest and largest sample value.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), s| {
                (lo.min(s.value), hi.max(s.value))
            })
    }
}

/// Node lattice fitted into a viewport.
///
/// The lattice fills a centered square whose side is a fraction of the
/// viewport's shorter side. Node `(y, x)` has index `y * (cols + 1) + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    cells_x: u32,
    cells_y: u32,
    positions: Vec<Vec2>,
}

impl GridLayout {
    /// Lays out `cells_x * cells_y` cells inside `viewport`.
    ///
    /// `fill` is the fraction of each viewport dimension the square may use,
    /// in `(0, 1]`. Node indices must fit in `u32`.
    pub fn fit(viewport: Viewport, cells_x: u32, cells_y: u32, fill: f32) -> Result<Self> {
        let invalid = || IsofieldError::InvalidCellCount {
            cols: cells_x,
            rows: cells_y,
        };
        if cells_x == 0 || cells_y == 0 {
            return Err(invalid());
        }
        let node_count = (cells_x as usize + 1)
            .checked_mul(cells_y as usize + 1)
            .filter(|&n| u32::try_from(n).is_ok())
            .ok_or_else(invalid)?;
        (cells_x as usize)
            .checked_mul(cells_y as usize)
            .and_then(|n| n.checked_mul(6))
            .ok_or_else(invalid)?;
        if !(fill > 0.0 && fill <= 1.0) {
            return Err(IsofieldError::InvalidOption {
                name: "viewport_fill",
                reason: format!("must be in (0, 1], got {fill}"),
            });
        }

        let width = viewport.width as f32;
        let height = viewport.height as f32;
        let img_width = (fill * width) as u32;
        let img_height = (fill * height) as u32;
        let side = img_width.min(img_height) as f32;

        let bottom = 0.5 * (height - side);
        let up = 0.5 * (height + side);
        let left = 0.5 * (width - side);
        let right = 0.5 * (width + side);

        let mut positions = Vec::with_capacity(node_count);
        for y in 0..=cells_y {
            for x in 0..=cells_x {
                positions.push(Vec2::new(
                    left + x as f32 * (right - left) / cells_x as f32,
                    bottom + y as f32 * (up - bottom) / cells_y as f32,
                ));
            }
        }

        log::debug!(
            "grid layout {cells_x}x{cells_y} cells in {}x{} viewport",
            viewport.width,
            viewport.height
        );

        Ok(Self {
            cells_x,
            cells_y,
            positions,
        })
    }

    /// Number of cells along x.
    #[must_use]
    pub fn cells_x(&self) -> u32 {
        self.cells_x
    }

    /// Number of cells along y.
    #[must_use]
    pub fn cells_y(&self) -> u32 {
        self.cells_y
    }

    /// Number of node rows (`cells_y + 1`).
    #[must_use]
    pub fn node_rows(&self) -> usize {
        self.cells_y as usize + 1
    }

    /// Number of node columns (`cells_x + 1`).
    #[must_use]
    pub fn node_cols(&self) -> usize {
        self.cells_x as usize + 1
    }

    /// Node positions in row-major order.
    #[must_use]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Index of node `(y, x)`.
    #[must_use]
    pub fn node_index(&self, y: u32, x: u32) -> u32 {
        y * (self.cells_x + 1) + x
    }

    /// Triangle list covering every cell, two triangles per cell split along
    /// the top-left to bottom-right diagonal.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.cells_x as usize * self.cells_y as usize * 6);
        for y in 0..self.cells_y {
            for x in 0..self.cells_x {
                indices.extend_from_slice(&[
                    self.node_index(y, x),
                    self.node_index(y + 1, x),
                    self.node_index(y + 1, x + 1),
                    self.node_index(y + 1, x + 1),
                    self.node_index(y, x + 1),
                    self.node_index(y, x),
                ]);
            }
        }
        indices
    }

    /// Evaluates `field` at every node at time `time`.
    pub fn sample<F: ScalarField + ?Sized>(&self, field: &F, time: f32) -> Grid {
        let samples = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                GridSample::new(position, i as u32, field.value_at(position, time))
            })
            .collect();
        // Shape is guaranteed by construction: at least one cell per axis.
        Grid {
            rows: self.node_rows(),
            cols: self.node_cols(),
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: u32) -> GridSample {
        GridSample::new(Vec2::ZERO, index, 0.0)
    }

    #[test]
    fn test_grid_too_small() {
        let err = Grid::from_values(1, 3, &[0.0; 3]).unwrap_err();
        assert!(matches!(err, IsofieldError::GridTooSmall { rows: 1, cols: 3 }));
        assert!(Grid::from_values(2, 1, &[0.0; 2]).is_err());
        assert!(Grid::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![
            vec![sample(0), sample(1)],
            vec![sample(2), sample(3), sample(4)],
        ];
        let err = Grid::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            IsofieldError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_duplicate_indices_rejected() {
        // Same shape and values as a valid grid, but every node claims index 0.
        let samples = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| GridSample::new(Vec2::new((i % 3) as f32, (i / 3) as f32), 0, v))
            .collect();
        let err = Grid::new(2, 3, samples).unwrap_err();
        assert!(matches!(err, IsofieldError::DuplicateIndex { index: 0 }));

        let rows = vec![
            vec![sample(0), sample(1)],
            vec![sample(2), sample(1)],
        ];
        let err = Grid::from_rows(rows).unwrap_err();
        assert!(matches!(err, IsofieldError::DuplicateIndex { index: 1 }));
    }

    #[test]
    fn test_size_mismatch() {
        let err = Grid::from_values(2, 2, &[0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            IsofieldError::SizeMismatch {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_from_values_lattice() {
        let grid = Grid::from_values(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let s = grid.get(1, 2);
        assert_eq!(s.index, 5);
        assert_eq!(s.position, Vec2::new(2.0, 1.0));
        assert_eq!(s.value, 5.0);
        assert_eq!(grid.value_range(), (0.0, 5.0));
    }

    #[test]
    fn test_layout_square_centered() {
        let viewport = Viewport::new(1000, 500).unwrap();
        let layout = GridLayout::fit(viewport, 4, 4, 0.8).unwrap();

        assert_eq!(layout.positions().len(), 25);
        let first = layout.positions()[0];
        let last = *layout.positions().last().unwrap();
        // Side is 0.8 * 500 = 400, centered in 1000x500.
        assert_eq!(first, Vec2::new(300.0, 50.0));
        assert_eq!(last, Vec2::new(700.0, 450.0));
        assert_eq!(layout.positions()[1], Vec2::new(400.0, 50.0));
    }

    #[test]
    fn test_layout_rejects_zero_cells() {
        let viewport = Viewport::new(100, 100).unwrap();
        assert!(GridLayout::fit(viewport, 0, 4, 0.8).is_err());
    }

    #[test]
    fn test_layout_rejects_index_overflow() {
        let viewport = Viewport::new(100, 100).unwrap();
        // 70001^2 nodes do not fit in u32 indices.
        assert!(matches!(
            GridLayout::fit(viewport, 70_000, 70_000, 0.8),
            Err(IsofieldError::InvalidCellCount {
                cols: 70_000,
                rows: 70_000
            })
        ));
        assert!(GridLayout::fit(viewport, u32::MAX, 1, 0.8).is_err());
    }

    #[test]
    fn test_layout_rejects_bad_fill() {
        let viewport = Viewport::new(100, 100).unwrap();
        for fill in [0.0, -0.5, 1.5, f32::NAN] {
            assert!(matches!(
                GridLayout::fit(viewport, 4, 4, fill),
                Err(IsofieldError::InvalidOption {
                    name: "viewport_fill",
                    ..
                })
            ));
        }
        assert!(GridLayout::fit(viewport, 4, 4, 1.0).is_ok());
    }

    #[test]
    fn test_triangle_indices() {
        let viewport = Viewport::new(100, 100).unwrap();
        let layout = GridLayout::fit(viewport, 2, 1, 0.8).unwrap();
        let indices = layout.triangle_indices();

        assert_eq!(indices.len(), 2 * 6);
        assert_eq!(&indices[..6], &[0, 3, 4, 4, 1, 0]);
        assert_eq!(&indices[6..], &[1, 4, 5, 5, 2, 1]);
        assert!(indices.iter().all(|&i| (i as usize) < layout.positions().len()));
    }

    #[test]
    fn test_sample_uses_node_positions() {
        let viewport = Viewport::new(200, 200).unwrap();
        let layout = GridLayout::fit(viewport, 3, 2, 1.0).unwrap();
        let grid = layout.sample(&|p: Vec2, t: f32| p.x + t, 10.0);

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        for (i, s) in grid.samples().iter().enumerate() {
            assert_eq!(s.index as usize, i);
            assert_eq!(s.position, layout.positions()[i]);
            assert_eq!(s.value, s.position.x + 10.0);
        }
    }
}
