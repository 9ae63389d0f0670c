//! SparseGridBuilder - explicit build entry point.
//!
//! ```text
//! GridConfig + GridSource
//!        │
//!        ▼  lattice at res · 2^k (k virtual finer levels)
//! classify (mesh | voxels) ──► extract finest level
//!        │
//!        ▼  aggregate k times
//! exposed top level (only_inside applied here)
//! ```
//!
//! A [`GridSource::Finer`] source skips classification: the external grid
//! becomes the finest level and is aggregated once into the top level.

use std::sync::Arc;

use tracing::{debug, info_span, warn};
use web_time::Instant;

use crate::bounds::BoundingBox;
use crate::classify::{classify_mesh, classify_voxels};
use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use crate::hierarchy::{aggregate, GridHierarchy, LevelKind, LevelStorage};
use crate::lattice::RegularLattice;
use crate::source::{GridSource, SurfaceMesh, VoxelMask};
use crate::sparse::{ExtractOptions, SparseGrid};
use crate::stats::BuildStats;
use crate::types::CellType;

/// Relative tolerance when matching an external grid's box.
const BOUNDS_MATCH_TOLERANCE: f64 = 1e-6;

/// Builds sparse grid hierarchies from a configuration.
#[derive(Clone, Debug, Default)]
pub struct SparseGridBuilder {
  config: GridConfig,
}

impl SparseGridBuilder {
  pub fn new(config: GridConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &GridConfig {
    &self.config
  }

  /// Build the hierarchy for `source`.
  ///
  /// Invalid input is logged and yields an empty hierarchy. Hierarchy
  /// inconsistencies are returned as errors.
  pub fn build(&self, source: &GridSource) -> GridResult<GridHierarchy> {
    let _span = info_span!("build_sparse_grid").entered();
    match self.try_build(source) {
      Ok(hierarchy) => Ok(hierarchy),
      Err(err) if err.is_configuration() => {
        warn!(%err, "invalid grid input, building an empty grid");
        Ok(GridHierarchy::empty())
      }
      Err(err) => Err(err),
    }
  }

  /// [`build`](Self::build) plus counters and timing.
  pub fn build_with_stats(&self, source: &GridSource) -> GridResult<(GridHierarchy, BuildStats)> {
    let start = Instant::now();
    let hierarchy = self.build(source)?;
    let stats = BuildStats::from_hierarchy(&hierarchy, start.elapsed());
    debug!(%stats, "sparse grid built");
    Ok((hierarchy, stats))
  }

  fn try_build(&self, source: &GridSource) -> GridResult<GridHierarchy> {
    self.config.validate()?;
    match source {
      GridSource::SurfaceMesh(mesh) => self.build_from_mesh(mesh),
      GridSource::VoxelMask(mask) => self.build_from_voxels(mask),
      GridSource::Finer(grid) => self.build_from_finer(grid),
    }
  }

  fn build_from_mesh(&self, mesh: &SurfaceMesh) -> GridResult<GridHierarchy> {
    if mesh.is_empty() {
      return Err(GridError::EmptyMesh);
    }
    let lattice = self.config.lattice(mesh.bounds())?;
    let finest = lattice.refined(self.config.num_virtual_finer_levels)?;
    let types = classify_mesh(&finest, mesh)?;
    self.build_levels(finest, &types)
  }

  fn build_from_voxels(&self, mask: &VoxelMask) -> GridResult<GridHierarchy> {
    mask.validate()?;
    let lattice = mask.lattice()?;
    let finest = lattice.refined(self.config.num_virtual_finer_levels)?;
    let types = classify_voxels(&finest, mask, self.config.voxel_smoothing_kernel_size)?;
    self.build_levels(finest, &types)
  }

  /// Extract the finest level, then aggregate up to the exposed level.
  fn build_levels(&self, finest: RegularLattice, types: &[CellType]) -> GridResult<GridHierarchy> {
    let virtual_levels = self.config.num_virtual_finer_levels;
    let options = |exposed: bool| ExtractOptions {
      fill_weighted: self.config.fill_weighted,
      only_inside: exposed && self.config.only_inside_cells,
    };
    let kind = |exposed: bool| {
      if exposed {
        LevelKind::Exposed
      } else {
        LevelKind::Virtual
      }
    };

    let grid = SparseGrid::extract(finest, types, &options(virtual_levels == 0));
    let mut hierarchy = GridHierarchy::new(LevelStorage::Owned(grid), kind(virtual_levels == 0));
    for level in 1..=virtual_levels {
      let exposed = level == virtual_levels;
      let (coarse, link) = aggregate(hierarchy.top_grid(), &options(exposed))?;
      hierarchy.push_coarser(coarse, link, kind(exposed));
    }
    Ok(hierarchy)
  }

  /// Aggregate an external finer grid into the exposed level.
  ///
  /// The configured box, when set, must match the external grid's box.
  fn build_from_finer(&self, finer: &Arc<SparseGrid>) -> GridResult<GridHierarchy> {
    let lattice = finer
      .lattice()
      .ok_or_else(|| GridError::incompatible("external finer grid has no lattice"))?;
    if let Some(bounds) = self.config.bounds() {
      check_bounds_match(&bounds, lattice.bounds())?;
    }
    if self.config.num_virtual_finer_levels > 0 {
      debug!("virtual finer levels are ignored for an external finer grid");
    }

    let options = ExtractOptions {
      fill_weighted: self.config.fill_weighted,
      only_inside: self.config.only_inside_cells,
    };
    let (coarse, link) = aggregate(finer, &options)?;
    let mut hierarchy = GridHierarchy::new(LevelStorage::Shared(finer.clone()), LevelKind::External);
    hierarchy.push_coarser(coarse, link, LevelKind::Exposed);
    Ok(hierarchy)
  }
}

fn check_bounds_match(expected: &BoundingBox, actual: &BoundingBox) -> GridResult<()> {
  let epsilon = expected.size().max_element() * BOUNDS_MATCH_TOLERANCE;
  if expected.approx_eq(actual, epsilon) {
    Ok(())
  } else {
    Err(GridError::incompatible(format!(
      "external finer grid box {:?}..{:?} does not match {:?}..{:?}",
      actual.min, actual.max, expected.min, expected.max
    )))
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
