//! Configuration options for isofield.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IsofieldError, Result};
use crate::marching_squares::DEFAULT_ISOLINE_COLOR;

/// Largest accepted `max_cells`.
pub const CELL_COUNT_LIMIT: u32 = 4096;

/// Largest accepted `max_isolines`.
pub const ISOLINE_COUNT_LIMIT: u32 = 256;

/// Visualizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Initial number of grid cells along each axis.
    pub cell_count: u32,

    /// Lower bound for the cell count.
    pub min_cells: u32,

    /// Upper bound for the cell count.
    pub max_cells: u32,

    /// Amount the cell count changes per refine/coarsen step.
    pub cell_step: u32,

    /// Initial number of isolines.
    pub isoline_count: u32,

    /// Upper bound for the isoline count.
    pub max_isolines: u32,

    /// Fraction of the viewport's shorter side covered by the grid.
    pub viewport_fill: f32,

    /// Pixels per noise lattice cell.
    pub noise_scale: f32,

    /// RGBA color of isoline vertices.
    pub isoline_color: [f32; 4],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cell_count: 100,
            min_cells: 50,
            max_cells: 500,
            cell_step: 50,
            isoline_count: 1,
            max_isolines: 10,
            viewport_fill: 0.8,
            noise_scale: 100.0,
            isoline_color: DEFAULT_ISOLINE_COLOR,
        }
    }
}

impl Options {
    /// Checks that every value is within its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.max_cells > CELL_COUNT_LIMIT {
            return Err(IsofieldError::InvalidOption {
                name: "max_cells",
                reason: format!(
                    "must be at most {CELL_COUNT_LIMIT}, got {}",
                    self.max_cells
                ),
            });
        }
        if self.min_cells == 0 || self.min_cells > self.max_cells {
            return Err(IsofieldError::InvalidOption {
                name: "min_cells",
                reason: format!(
                    "must be in 1..={}, got {}",
                    self.max_cells, self.min_cells
                ),
            });
        }
        if !(self.min_cells..=self.max_cells).contains(&self.cell_count) {
            return Err(IsofieldError::InvalidOption {
                name: "cell_count",
                reason: format!(
                    "must be in {}..={}, got {}",
                    self.min_cells, self.max_cells, self.cell_count
                ),
            });
        }
        if self.max_isolines > ISOLINE_COUNT_LIMIT {
            return Err(IsofieldError::InvalidOption {
                name: "max_isolines",
                reason: format!(
                    "must be at most {ISOLINE_COUNT_LIMIT}, got {}",
                    self.max_isolines
                ),
            });
        }
        if self.isoline_count > self.max_isolines {
            return Err(IsofieldError::InvalidOption {
                name: "isoline_count",
                reason: format!(
                    "must be at most {}, got {}",
                    self.max_isolines, self.isoline_count
                ),
            });
        }
        if !(self.viewport_fill > 0.0 && self.viewport_fill <= 1.0) {
            return Err(IsofieldError::InvalidOption {
                name: "viewport_fill",
                reason: format!("must be in (0, 1], got {}", self.viewport_fill),
            });
        }
        if !(self.noise_scale > 0.0 && self.noise_scale.is_finite()) {
            return Err(IsofieldError::InvalidOption {
                name: "noise_scale",
                reason: format!("must be positive, got {}", self.noise_scale),
            });
        }
        Ok(())
    }

    /// Loads options from a JSON file and validates them.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        log::info!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Saves options to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let options = Options {
            cell_count: 10,
            ..Options::default()
        };
        assert!(matches!(
            options.validate(),
            Err(IsofieldError::InvalidOption {
                name: "cell_count",
                ..
            })
        ));

        let options = Options {
            isoline_count: 11,
            ..Options::default()
        };
        assert!(options.validate().is_err());

        let options = Options {
            viewport_fill: 0.0,
            ..Options::default()
        };
        assert!(options.validate().is_err());

        let options = Options {
            min_cells: 600,
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_limits() {
        let options: Options = serde_json::from_str(
            r#"{ "isoline_count": 4294967295, "max_isolines": 4294967295 }"#,
        )
        .unwrap();
        assert!(matches!(
            options.validate(),
            Err(IsofieldError::InvalidOption {
                name: "max_isolines",
                ..
            })
        ));

        let options: Options =
            serde_json::from_str(r#"{ "cell_count": 70000, "max_cells": 70000 }"#).unwrap();
        assert!(matches!(
            options.validate(),
            Err(IsofieldError::InvalidOption {
                name: "max_cells",
                ..
            })
        ));

        let options = Options {
            cell_count: CELL_COUNT_LIMIT,
            max_cells: CELL_COUNT_LIMIT,
            max_isolines: ISOLINE_COUNT_LIMIT,
            ..Options::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_unbounded_limits() {
        let path = std::env::temp_dir().join(format!(
            "isofield-options-limits-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "cell_count": 70000, "max_cells": 70000 }"#).unwrap();
        let result = Options::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(IsofieldError::InvalidOption { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: Options = serde_json::from_str(r#"{ "isoline_count": 4 }"#).unwrap();
        assert_eq!(options.isoline_count, 4);
        assert_eq!(options.cell_count, 100);
        assert_eq!(options.isoline_color, DEFAULT_ISOLINE_COLOR);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("isofield-options-{}.json", std::process::id()));
        let options = Options {
            cell_count: 150,
            isoline_count: 3,
            ..Options::default()
        };
        options.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Options::load("/nonexistent/isofield/options.json").unwrap_err();
        assert!(matches!(err, IsofieldError::IoError(_)));
    }
}
