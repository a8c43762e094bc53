//! Pixel viewport and its projection to normalized device coordinates.

use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{IsofieldError, Result};

/// The drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(IsofieldError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Length of the shorter side in pixels.
    #[must_use]
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Returns the matrix mapping pixel coordinates to NDC.
    ///
    /// Pixel `(0, 0)` is the top-left corner and maps to `(-1, 1)`;
    /// `(width, height)` maps to `(1, -1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn view_matrix(&self) -> Mat4 {
        let w = self.width as f32;
        let h = self.height as f32;
        Mat4::from_cols(
            Vec4::new(2.0 / w, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -2.0 / h, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-1.0, 1.0, 0.0, 1.0),
        )
    }
}
