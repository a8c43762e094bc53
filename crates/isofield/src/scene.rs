//! Per-frame driver for the scalar-field visualizer.
//!
//! A [`Scene`] owns the viewport, the current grid layout, the isoline levels
//! and the animation clock. Each call to [`Scene::frame`] samples the field at
//! the current time and extracts isolines, producing everything a renderer
//! needs to upload for that frame.

use glam::Mat4;
use isofield_core::{
    evenly_spaced_levels, grayscale_colors, GridLayout, IsolineExtractor, IsolineMesh, Options,
    PerlinField, Result, ScalarField, Viewport,
};

/// Buffers produced for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// True when the grid layout changed since the previous frame, so grid
    /// positions and triangle indices must be uploaded again.
    pub grid_changed: bool,
    /// Grayscale color per grid node, row-major.
    pub colors: Vec<[f32; 4]>,
    /// Isolines for every active level.
    pub isolines: IsolineMesh,
}

/// Animated scalar-field scene.
pub struct Scene<F = PerlinField> {
    options: Options,
    field: F,
    viewport: Viewport,
    layout: GridLayout,
    cell_count: u32,
    isoline_count: u32,
    levels: Vec<f32>,
    extractor: IsolineExtractor,
    time: f32,
    layout_dirty: bool,
}

impl Scene<PerlinField> {
    /// Creates a scene sampling animated noise with `options.noise_scale`.
    pub fn new(options: Options, width: u32, height: u32) -> Result<Self> {
        let field = PerlinField::new(options.noise_scale);
        Self::with_field(options, field, width, height)
    }
}

impl<F: ScalarField> Scene<F> {
    /// Creates a scene sampling `field`.
    pub fn with_field(options: Options, field: F, width: u32, height: u32) -> Result<Self> {
        options.validate()?;
        let viewport = Viewport::new(width, height)?;
        let cell_count = options.cell_count;
        let layout = GridLayout::fit(viewport, cell_count, cell_count, options.viewport_fill)?;
        let isoline_count = options.isoline_count;
        let extractor = IsolineExtractor::new().with_color(options.isoline_color);

        log::debug!(
            "scene created: {width}x{height}, {cell_count} cells, {isoline_count} isolines"
        );

        Ok(Self {
            options,
            field,
            viewport,
            layout,
            cell_count,
            isoline_count,
            levels: evenly_spaced_levels(isoline_count),
            extractor,
            time: 0.0,
            layout_dirty: true,
        })
    }

    /// Resizes the viewport and refits the grid into it.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = Viewport::new(width, height)?;
        self.relayout()
    }

    /// Adds one isoline, up to the configured maximum.
    pub fn increase_isolines(&mut self) {
        if self.isoline_count < self.options.max_isolines {
            self.set_isoline_count(self.isoline_count + 1);
        }
    }

    /// Removes one isoline, down to none.
    pub fn decrease_isolines(&mut self) {
        if self.isoline_count > 0 {
            self.set_isoline_count(self.isoline_count - 1);
        }
    }

    /// Increases the grid resolution by one step, up to the maximum.
    pub fn refine_grid(&mut self) -> Result<()> {
        let next = self
            .cell_count
            .saturating_add(self.options.cell_step)
            .min(self.options.max_cells);
        self.set_cell_count(next)
    }

    /// Decreases the grid resolution by one step, down to the minimum.
    pub fn coarsen_grid(&mut self) -> Result<()> {
        let next = self
            .cell_count
            .saturating_sub(self.options.cell_step)
            .max(self.options.min_cells);
        self.set_cell_count(next)
    }

    /// Advances the animation clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Samples the field at the current time and extracts isolines.
    pub fn frame(&mut self) -> Frame {
        let grid = self.layout.sample(&self.field, self.time);
        let isolines = self.extractor.extract(&grid, &self.levels);
        let grid_changed = std::mem::take(&mut self.layout_dirty);

        Frame {
            grid_changed,
            colors: grayscale_colors(&grid),
            isolines,
        }
    }

    /// Matrix mapping pixel coordinates to NDC for the current viewport.
    pub fn view_matrix(&self) -> Mat4 {
        self.viewport.view_matrix()
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current grid layout.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Active isoline levels.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// Number of grid cells along each axis.
    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Number of active isolines.
    pub fn isoline_count(&self) -> u32 {
        self.isoline_count
    }

    /// Animation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// The options the scene was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn set_isoline_count(&mut self, count: u32) {
        self.isoline_count = count;
        self.levels = evenly_spaced_levels(count);
        log::debug!("isoline count set to {count}");
    }

    fn set_cell_count(&mut self, count: u32) -> Result<()> {
        if count == self.cell_count {
            return Ok(());
        }
        self.cell_count = count;
        log::debug!("cell count set to {count}");
        self.relayout()
    }

    fn relayout(&mut self) -> Result<()> {
        self.layout = GridLayout::fit(
            self.viewport,
            self.cell_count,
            self.cell_count,
            self.options.viewport_fill,
        )?;
        self.layout_dirty = true;
        Ok(())
    }
}
