//! GridConfig - build options for a sparse grid.
//!
//! Loadable from TOML:
//!
//! ```toml
//! resolution = [16, 16, 16]
//! cell_width = 0.0
//! fill_weighted = true
//! only_inside_cells = false
//! num_virtual_finer_levels = 1
//! voxel_smoothing_kernel_size = 0
//!
//! [bounding_box]
//! min = [0.0, 0.0, 0.0]
//! max = [10.0, 10.0, 10.0]
//! ```

use std::path::Path;

use glam::DVec3;
use serde::Deserialize;

use crate::bounds::BoundingBox;
use crate::error::{GridError, GridResult};
use crate::lattice::RegularLattice;
use crate::types::Resolution;

/// Upper bound on internally built finer levels (each one multiplies the
/// cell count by 8).
pub const MAX_VIRTUAL_FINER_LEVELS: u32 = 6;

/// Serialized form of a bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundsConfig {
  pub min: [f64; 3],
  pub max: [f64; 3],
}

impl From<BoundsConfig> for BoundingBox {
  fn from(value: BoundsConfig) -> Self {
    BoundingBox::from_arrays(value.min, value.max)
  }
}

impl From<BoundingBox> for BoundsConfig {
  fn from(value: BoundingBox) -> Self {
    Self {
      min: value.min.to_array(),
      max: value.max.to_array(),
    }
  }
}

/// Configuration for building a sparse grid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
  /// Lattice cell counts of the exposed level. Ignored when `cell_width > 0`.
  pub resolution: Resolution,

  /// Region covered by the lattice. Derived from the mesh vertices when
  /// absent. Voxel sources always use their own extent.
  pub bounding_box: Option<BoundsConfig>,

  /// If > 0, resolution = round(box size / cell_width).
  pub cell_width: f64,

  /// BOUNDARY cells get a reduced stiffness/mass coefficient.
  pub fill_weighted: bool,

  /// Drop BOUNDARY cells from the exposed level.
  pub only_inside_cells: bool,

  /// Extra finer levels built internally to refine classification and
  /// coefficients.
  pub num_virtual_finer_levels: u32,

  /// Box kernel size for smoothing voxel masks (0 or 1 = no smoothing).
  /// The window radius is `size / 2`, so an even size behaves like the
  /// next odd size (2 acts as 3).
  pub voxel_smoothing_kernel_size: usize,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      resolution: Resolution::splat(8),
      bounding_box: None,
      cell_width: 0.0,
      fill_weighted: true,
      only_inside_cells: false,
      num_virtual_finer_levels: 0,
      voxel_smoothing_kernel_size: 0,
    }
  }
}

impl GridConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_resolution(mut self, resolution: Resolution) -> Self {
    self.resolution = resolution;
    self
  }

  pub fn with_bounding_box(mut self, bounds: BoundingBox) -> Self {
    self.bounding_box = Some(bounds.into());
    self
  }

  pub fn with_cell_width(mut self, width: f64) -> Self {
    self.cell_width = width;
    self
  }

  pub fn with_fill_weighted(mut self, fill_weighted: bool) -> Self {
    self.fill_weighted = fill_weighted;
    self
  }

  pub fn with_only_inside_cells(mut self, only_inside: bool) -> Self {
    self.only_inside_cells = only_inside;
    self
  }

  pub fn with_virtual_finer_levels(mut self, levels: u32) -> Self {
    self.num_virtual_finer_levels = levels;
    self
  }

  pub fn with_voxel_smoothing(mut self, kernel_size: usize) -> Self {
    self.voxel_smoothing_kernel_size = kernel_size;
    self
  }

  /// Configured bounding box, if any.
  pub fn bounds(&self) -> Option<BoundingBox> {
    self.bounding_box.map(BoundingBox::from)
  }

  /// Parse a TOML document. Missing keys take their defaults.
  pub fn from_toml_str(content: &str) -> GridResult<Self> {
    toml::from_str(content).map_err(|err| GridError::ConfigParse(err.to_string()))
  }

  /// Load and parse a TOML file.
  pub fn load(path: &Path) -> GridResult<Self> {
    let content = std::fs::read_to_string(path).map_err(|err| GridError::ConfigIo {
      path: path.display().to_string(),
      message: err.to_string(),
    })?;
    Self::from_toml_str(&content)
  }

  /// Check the options that do not depend on the source.
  ///
  /// Too many virtual levels is a hierarchy error; everything else is a
  /// configuration error.
  pub fn validate(&self) -> GridResult<()> {
    if self.cell_width > 0.0 {
      if !self.cell_width.is_finite() {
        return Err(GridError::InvalidCellWidth(self.cell_width));
      }
    } else {
      self.resolution.validate()?;
    }
    if let Some(bounds) = self.bounds() {
      bounds.validate()?;
    }
    if self.num_virtual_finer_levels > MAX_VIRTUAL_FINER_LEVELS {
      return Err(GridError::incompatible(format!(
        "{} virtual finer levels requested, at most {} supported",
        self.num_virtual_finer_levels, MAX_VIRTUAL_FINER_LEVELS
      )));
    }
    Ok(())
  }

  /// Lattice of the exposed level.
  ///
  /// Uses the configured box, falling back to `source_bounds`.
  pub fn lattice(&self, source_bounds: Option<BoundingBox>) -> GridResult<RegularLattice> {
    let bounds = self
      .bounds()
      .or(source_bounds)
      .ok_or(GridError::DegenerateBounds {
        min: DVec3::ZERO.to_array(),
        max: DVec3::ZERO.to_array(),
      })?;
    if self.cell_width > 0.0 {
      RegularLattice::from_cell_width(bounds, self.cell_width)
    } else {
      RegularLattice::new(bounds, self.resolution)
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
