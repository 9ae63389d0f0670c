//! Sparse extraction: compact the retained lattice cells into hexahedra.
//!
//! ```text
//! lattice cells ──(drop OUTSIDE [+ BOUNDARY])──► sparse cells
//!       │                                             │
//!       │ regular_to_sparse: Vec<Option<usize>>       │ sparse_to_regular
//!       ▼                                             ▼
//! lattice points ──(only corners of kept cells)──► sparse points
//! ```
//!
//! Points are deduplicated through their lattice point index, which
//! encodes the corner position exactly. Cells sharing a corner share the
//! point index, and points used only by dropped cells are never emitted.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use glam::DVec3;
use tracing::{debug, info_span};

use crate::adjacency::{Adjacency, FaceNeighbors};
use crate::constants::{BOUNDARY_FILL_COEF, EDGE_CORNERS, FACE_CORNERS};
use crate::coord::CellCoord;
use crate::lattice::RegularLattice;
use crate::types::{CellIndex, CellType, Edge, Hexahedron, PointIndex, Quad};

/// Options applied while extracting a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
  /// BOUNDARY cells get [`BOUNDARY_FILL_COEF`] instead of 1.0.
  pub fill_weighted: bool,
  /// Drop BOUNDARY cells.
  pub only_inside: bool,
}

impl Default for ExtractOptions {
  fn default() -> Self {
    Self {
      fill_weighted: true,
      only_inside: false,
    }
  }
}

impl ExtractOptions {
  /// Coefficient of a freshly classified cell.
  #[inline]
  pub fn coefficient(&self, cell_type: CellType) -> f32 {
    match cell_type {
      CellType::Boundary if self.fill_weighted => BOUNDARY_FILL_COEF,
      _ => 1.0,
    }
  }
}

/// One level of hexahedral cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseGrid {
  lattice: Option<RegularLattice>,
  points: Vec<DVec3>,
  point_to_lattice: Vec<usize>,
  lattice_to_point: HashMap<usize, PointIndex>,
  hexahedra: Vec<Hexahedron>,
  types: Vec<CellType>,
  stiffness: Vec<f32>,
  mass: Vec<f32>,
  regular_to_sparse: Vec<Option<CellIndex>>,
  sparse_to_regular: Vec<usize>,
  adjacency: Adjacency,
  edges: Vec<Edge>,
  quads: Vec<Quad>,
}

impl SparseGrid {
  /// Grid with no lattice, cells or points.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Extract retained cells from classified lattice cells.
  pub fn extract(lattice: RegularLattice, types: &[CellType], options: &ExtractOptions) -> Self {
    let coefficient = |_: usize, t: CellType| {
      let c = options.coefficient(t);
      (c, c)
    };
    Self::extract_with(lattice, types, options.only_inside, coefficient)
  }

  /// Extract retained cells with per-cell `(stiffness, mass)` coefficients.
  ///
  /// `coefficient` receives the regular cell index and its type.
  pub fn extract_with(
    lattice: RegularLattice,
    types: &[CellType],
    only_inside: bool,
    coefficient: impl Fn(usize, CellType) -> (f32, f32),
  ) -> Self {
    let _span = info_span!("extract", cells = lattice.cell_count()).entered();
    debug_assert_eq!(types.len(), lattice.cell_count());

    let keep = |t: CellType| match t {
      CellType::Inside => true,
      CellType::Boundary => !only_inside,
      CellType::Outside => false,
    };

    let mut grid = Self {
      regular_to_sparse: vec![None; lattice.cell_count()],
      ..Self::default()
    };

    for (regular, &cell_type) in types.iter().enumerate() {
      if !keep(cell_type) {
        continue;
      }
      let sparse = grid.hexahedra.len();
      let coord = lattice.cell_coord(regular);
      let hex = lattice.cell_corner_points(coord).map(|lattice_point| {
        match grid.lattice_to_point.entry(lattice_point) {
          Entry::Occupied(e) => *e.get(),
          Entry::Vacant(e) => {
            let point = grid.points.len();
            grid
              .points
              .push(lattice.point_position(lattice.point_coord(lattice_point)));
            grid.point_to_lattice.push(lattice_point);
            e.insert(point);
            point
          }
        }
      });
      let (stiffness, mass) = coefficient(regular, cell_type);

      grid.hexahedra.push(hex);
      grid.types.push(cell_type);
      grid.stiffness.push(stiffness);
      grid.mass.push(mass);
      grid.sparse_to_regular.push(regular);
      grid.regular_to_sparse[regular] = Some(sparse);
    }

    grid.adjacency = Adjacency::build(
      &lattice,
      &grid.regular_to_sparse,
      &grid.sparse_to_regular,
      &grid.hexahedra,
      grid.points.len(),
    );
    grid.edges = unique_edges(&grid.hexahedra);
    grid.quads = unique_quads(&grid.hexahedra);
    grid.lattice = Some(lattice);

    debug!(
      cells = grid.cell_count(),
      points = grid.point_count(),
      edges = grid.edges.len(),
      quads = grid.quads.len(),
      "extracted sparse grid"
    );
    grid
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  /// Lattice the cells were extracted from (`None` for an empty grid
  /// built from invalid input).
  pub fn lattice(&self) -> Option<&RegularLattice> {
    self.lattice.as_ref()
  }

  pub fn is_empty(&self) -> bool {
    self.hexahedra.is_empty()
  }

  pub fn cell_count(&self) -> usize {
    self.hexahedra.len()
  }

  pub fn point_count(&self) -> usize {
    self.points.len()
  }

  pub fn points(&self) -> &[DVec3] {
    &self.points
  }

  pub fn hexahedra(&self) -> &[Hexahedron] {
    &self.hexahedra
  }

  pub fn cell_types(&self) -> &[CellType] {
    &self.types
  }

  pub fn cell_type(&self, cell: CellIndex) -> CellType {
    self.types[cell]
  }

  pub fn stiffness_coefficients(&self) -> &[f32] {
    &self.stiffness
  }

  pub fn mass_coefficients(&self) -> &[f32] {
    &self.mass
  }

  /// Lattice cell → sparse cell, `None` for dropped cells.
  pub fn regular_to_sparse(&self) -> &[Option<CellIndex>] {
    &self.regular_to_sparse
  }

  /// Sparse cell → lattice cell.
  pub fn sparse_to_regular(&self) -> &[usize] {
    &self.sparse_to_regular
  }

  pub fn adjacency(&self) -> &Adjacency {
    &self.adjacency
  }

  /// Unique edges, lower point index first.
  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// Unique quad faces in the corner order of their first hexahedron.
  pub fn quads(&self) -> &[Quad] {
    &self.quads
  }

  /// Lattice coordinate of a sparse cell.
  pub fn cell_coord(&self, cell: CellIndex) -> Option<CellCoord> {
    let lattice = self.lattice.as_ref()?;
    Some(lattice.cell_coord(*self.sparse_to_regular.get(cell)?))
  }

  /// Lattice point index of a sparse point.
  pub fn lattice_point(&self, point: PointIndex) -> usize {
    self.point_to_lattice[point]
  }

  /// Sparse point at a lattice point index, if any retained cell uses it.
  pub fn point_at_lattice(&self, lattice_point: usize) -> Option<PointIndex> {
    self.lattice_to_point.get(&lattice_point).copied()
  }

  /// Cell counts by type: `[inside, boundary]`.
  pub fn type_counts(&self) -> [usize; 2] {
    self.types.iter().fold([0; 2], |mut acc, t| {
      match t {
        CellType::Inside => acc[0] += 1,
        CellType::Boundary => acc[1] += 1,
        CellType::Outside => {}
      }
      acc
    })
  }

  // ===========================================================================
  // Queries
  // ===========================================================================

  /// Sparse cell containing `pos` and the fractional offsets of `pos`
  /// inside it, or `None` when `pos` is outside every retained cell.
  pub fn find_cell(&self, pos: DVec3) -> Option<(CellIndex, DVec3)> {
    let lattice = self.lattice.as_ref()?;
    let (coord, frac) = lattice.cell_containing(pos)?;
    let sparse = self.regular_to_sparse[lattice.cell_index(coord)]?;
    Some((sparse, frac))
  }

  /// Sparse cell whose center is nearest to `pos`, with offsets clamped
  /// to `[0, 1]`. Falls back to [`find_cell`](Self::find_cell) when `pos`
  /// lies in a retained cell. `None` only for an empty grid.
  pub fn find_nearest_cell(&self, pos: DVec3) -> Option<(CellIndex, DVec3)> {
    if let Some(found) = self.find_cell(pos) {
      return Some(found);
    }
    let lattice = self.lattice.as_ref()?;

    let mut best: Option<(CellIndex, f64)> = None;
    for (sparse, &regular) in self.sparse_to_regular.iter().enumerate() {
      let center = lattice.cell_center(lattice.cell_coord(regular));
      let dist = center.distance_squared(pos);
      if best.map_or(true, |(_, d)| dist < d) {
        best = Some((sparse, dist));
      }
    }

    let (sparse, _) = best?;
    let bounds = lattice.cell_bounds(lattice.cell_coord(self.sparse_to_regular[sparse]));
    let frac = ((pos - bounds.min) / bounds.size()).clamp(DVec3::ZERO, DVec3::ONE);
    Some((sparse, frac))
  }

  /// The 6 face neighbors of a sparse cell.
  pub fn find_neighbor_cells(&self, cell: CellIndex) -> &FaceNeighbors {
    self.adjacency.cell_neighbors(cell)
  }
}

/// 12 edges per hexahedron, deduplicated, in first-seen order.
fn unique_edges(hexahedra: &[Hexahedron]) -> Vec<Edge> {
  let mut seen = HashSet::new();
  let mut edges = Vec::new();
  for hex in hexahedra {
    for [a, b] in EDGE_CORNERS {
      let edge = [hex[a].min(hex[b]), hex[a].max(hex[b])];
      if seen.insert(edge) {
        edges.push(edge);
      }
    }
  }
  edges
}

/// 6 faces per hexahedron, deduplicated, in first-seen order.
fn unique_quads(hexahedra: &[Hexahedron]) -> Vec<Quad> {
  let mut seen = HashSet::new();
  let mut quads = Vec::new();
  for hex in hexahedra {
    for corners in FACE_CORNERS {
      let quad = corners.map(|c| hex[c]);
      let mut key = quad;
      key.sort_unstable();
      if seen.insert(key) {
        quads.push(quad);
      }
    }
  }
  quads
}

#[cfg(test)]
#[path = "sparse_test.rs"]
mod sparse_test;
