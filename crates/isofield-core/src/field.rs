//! Scalar fields sampled at grid nodes.

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// A time-varying scalar function of the plane.
pub trait ScalarField {
    /// Returns the field value at `position` and `time`.
    fn value_at(&self, position: Vec2, time: f32) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(Vec2, f32) -> f32,
{
    fn value_at(&self, position: Vec2, time: f32) -> f32 {
        self(position, time)
    }
}

/// Animated gradient noise with values in `[0, 1]`.
///
/// Each integer lattice corner gets a pseudo-random gradient direction from
/// a hash of its coordinates; time rotates every gradient, so the pattern
/// drifts smoothly without any random state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerlinField {
    /// World units per noise lattice cell.
    pub scale: f32,
}

impl Default for PerlinField {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

impl PerlinField {
    /// Creates a noise field with the given lattice scale.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Evaluates raw noise at lattice coordinates, remapped to `[0, 1]`.
    #[must_use]
    pub fn noise(x: f32, y: f32, time: f32) -> f32 {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        let sx = x - x0 as f32;
        let sy = y - y0 as f32;

        let n0 = dot_grid_gradient(x0, y0, x, y, time);
        let n1 = dot_grid_gradient(x1, y0, x, y, time);
        let ix0 = smooth_interpolate(n0, n1, sx);

        let n0 = dot_grid_gradient(x0, y1, x, y, time);
        let n1 = dot_grid_gradient(x1, y1, x, y, time);
        let ix1 = smooth_interpolate(n0, n1, sx);

        (smooth_interpolate(ix0, ix1, sy) + 1.0) / 2.0
    }
}

impl ScalarField for PerlinField {
    fn value_at(&self, position: Vec2, time: f32) -> f32 {
        let p = position / self.scale;
        Self::noise(p.x, p.y, time)
    }
}

/// Interpolates with the quintic smoothstep `6w^5 - 15w^4 + 10w^3`.
#[inline]
fn smooth_interpolate(a0: f32, a1: f32, w: f32) -> f32 {
    (a1 - a0) * ((w * (w * 6.0 - 15.0) + 10.0) * w * w * w) + a0
}

/// Unit gradient for lattice corner `(ix, iy)`, rotated by `time` radians.
#[inline]
#[allow(clippy::cast_sign_loss)]
fn random_gradient(ix: i32, iy: i32, time: f32) -> Vec2 {
    let mut a = ix as u32;
    let mut b = iy as u32;
    a = a.wrapping_mul(3_284_157_443);
    b ^= a.rotate_left(16);
    b = b.wrapping_mul(1_911_520_717);
    a ^= b.rotate_left(16);
    a = a.wrapping_mul(2_048_419_325);
    // Maps the full u32 range onto [0, 2*pi).
    let angle = a as f32 * (PI / 2_147_483_648.0);
    Vec2::new((angle + time).cos(), (angle + time).sin())
}

#[inline]
fn dot_grid_gradient(ix: i32, iy: i32, x: f32, y: f32, time: f32) -> f32 {
    let gradient = random_gradient(ix, iy, time);
    let offset = Vec2::new(x - ix as f32, y - iy as f32);
    offset.dot(gradient)
}

/// Per-node grayscale colors `[v, v, v, 1]` for drawing the filled grid.
#[must_use]
pub fn grayscale_colors(grid: &Grid) -> Vec<[f32; 4]> {
    grid.samples()
        .iter()
        .map(|s| [s.value, s.value, s.value, 1.0])
        .collect()
}
