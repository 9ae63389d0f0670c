//! Build statistics for a finished hierarchy.

use std::fmt;
use std::time::Duration;

use crate::hierarchy::{GridHierarchy, LevelKind};

/// Counters collected after a build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildStats {
  // Exposed level
  /// Lattice cells discarded as OUTSIDE.
  pub outside_cells: usize,
  /// Retained INSIDE cells.
  pub inside_cells: usize,
  /// Retained BOUNDARY cells.
  pub boundary_cells: usize,
  /// Sparse points.
  pub points: usize,

  // Hierarchy
  /// Total number of levels, including virtual and external ones.
  pub levels: usize,
  /// Internally built finer levels.
  pub virtual_levels: usize,
  /// Cells summed over every level.
  pub total_cells: usize,

  // Timing
  /// Wall time of the build.
  pub duration: Duration,
}

impl BuildStats {
  /// Collect counters from a hierarchy.
  pub fn from_hierarchy(hierarchy: &GridHierarchy, duration: Duration) -> Self {
    let top = hierarchy.top_grid();
    let [inside_cells, boundary_cells] = top.type_counts();
    let lattice_cells = top.lattice().map_or(0, |l| l.cell_count());
    Self {
      outside_cells: lattice_cells - top.cell_count(),
      inside_cells,
      boundary_cells,
      points: top.point_count(),
      levels: hierarchy.level_count(),
      virtual_levels: hierarchy
        .levels()
        .filter(|level| level.kind() == LevelKind::Virtual)
        .count(),
      total_cells: hierarchy.levels().map(|level| level.grid().cell_count()).sum(),
      duration,
    }
  }

  /// Retained cells of the exposed level.
  pub fn retained_cells(&self) -> usize {
    self.inside_cells + self.boundary_cells
  }

  /// Build time in microseconds.
  pub fn duration_us(&self) -> u64 {
    self.duration.as_micros() as u64
  }
}

impl fmt::Display for BuildStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} inside, {} boundary, {} outside cells; {} points; {} levels ({} virtual); {} µs",
      self.inside_cells,
      self.boundary_cells,
      self.outside_cells,
      self.points,
      self.levels,
      self.virtual_levels,
      self.duration_us()
    )
  }
}
