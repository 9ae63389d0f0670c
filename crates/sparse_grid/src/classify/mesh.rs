//! Mesh mode: mark lattice cells crossed by surface triangles as BOUNDARY.
//!
//! For each triangle, the candidate cells are those overlapped by the
//! triangle's bounding box; each candidate is confirmed with a separating
//! axis test (box face normals, triangle normal, 9 edge cross products).

use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::Marks;
use crate::coord::CellCoord;
use crate::lattice::RegularLattice;
use crate::source::SurfaceMesh;
use crate::types::CellType;

/// Relative slack added to cell extents so that triangles lying exactly on
/// a shared cell face mark both cells.
const CONTACT_EPSILON: f64 = 1e-9;

/// Squared sine below which two crossed vectors count as parallel.
const PARALLEL_EPSILON: f64 = 1e-24;

/// Counters reported by [`mark_surface_cells`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceMarkStats {
  /// Triangles tested against the lattice.
  pub triangles: usize,
  /// Triangles skipped because of out-of-range vertex indices.
  pub skipped_triangles: usize,
  /// Distinct cells marked BOUNDARY.
  pub boundary_cells: usize,
}

/// Mark every cell intersecting a triangle of `mesh` as BOUNDARY.
///
/// Candidate gathering runs in parallel; marking is idempotent, so the
/// result does not depend on triangle order.
pub fn mark_surface_cells(
  lattice: &RegularLattice,
  mesh: &SurfaceMesh,
  marks: &mut Marks,
) -> SurfaceMarkStats {
  let slack = lattice.cell_size().max_element() * CONTACT_EPSILON;

  let per_triangle: Vec<Option<Vec<usize>>> = (0..mesh.triangles.len())
    .into_par_iter()
    .map(|index| {
      mesh
        .triangle(index)
        .map(|tri| intersected_cells(lattice, &tri, slack))
    })
    .collect();

  let mut stats = SurfaceMarkStats {
    triangles: mesh.triangles.len(),
    ..Default::default()
  };
  for (index, cells) in per_triangle.into_iter().enumerate() {
    let Some(cells) = cells else {
      warn!(
        triangle = index,
        "skipping triangle with out-of-range vertex index"
      );
      stats.skipped_triangles += 1;
      continue;
    };
    for cell in cells {
      if marks[cell].is_none() {
        stats.boundary_cells += 1;
      }
      marks[cell] = Some(CellType::Boundary);
    }
  }

  debug!(
    triangles = stats.triangles,
    skipped = stats.skipped_triangles,
    boundary = stats.boundary_cells,
    "marked surface cells"
  );
  stats
}

/// Flat indices of the lattice cells a triangle intersects.
fn intersected_cells(lattice: &RegularLattice, tri: &[DVec3; 3], slack: f64) -> Vec<usize> {
  let lo = tri[0].min(tri[1]).min(tri[2]) - DVec3::splat(slack);
  let hi = tri[0].max(tri[1]).max(tri[2]) + DVec3::splat(slack);

  let (Some(rx), Some(ry), Some(rz)) = (
    lattice.cell_range(0, lo.x, hi.x),
    lattice.cell_range(1, lo.y, hi.y),
    lattice.cell_range(2, lo.z, hi.z),
  ) else {
    return Vec::new();
  };

  let mut cells = Vec::new();
  for k in rz.0..=rz.1 {
    for j in ry.0..=ry.1 {
      for i in rx.0..=rx.1 {
        let cell = CellCoord::new(i, j, k);
        let bounds = lattice.cell_bounds(cell);
        let half = bounds.size() * 0.5 + DVec3::splat(slack);
        if triangle_intersects_box(tri, bounds.center(), half) {
          cells.push(lattice.cell_index(cell));
        }
      }
    }
  }
  cells
}

/// Separating axis test between a triangle and an axis-aligned box.
///
/// Degenerate axes (zero-area triangle normal, edge parallel to a box axis)
/// are skipped, so degenerate triangles still report the cells they touch.
pub fn triangle_intersects_box(tri: &[DVec3; 3], center: DVec3, half_extents: DVec3) -> bool {
  let v0 = tri[0] - center;
  let v1 = tri[1] - center;
  let v2 = tri[2] - center;

  // Box face normals: compare triangle AABB against box
  let tri_min = v0.min(v1).min(v2);
  let tri_max = v0.max(v1).max(v2);
  if tri_min.cmpgt(half_extents).any() || tri_max.cmplt(-half_extents).any() {
    return false;
  }

  let edges = [v1 - v0, v2 - v1, v0 - v2];

  // Triangle normal, then box axes × triangle edges
  let box_axes = [DVec3::X, DVec3::Y, DVec3::Z];
  let crossed = std::iter::once((edges[0], edges[1])).chain(
    box_axes
      .into_iter()
      .flat_map(|axis| edges.map(|edge| (axis, edge))),
  );
  for (a, b) in crossed {
    let Some(axis) = separating_axis(a, b) else {
      continue;
    };
    if !axis_overlaps(axis, &half_extents, v0, v1, v2) {
      return false;
    }
  }

  true
}

/// `a × b`, or `None` when the vectors are (nearly) parallel or zero.
///
/// The cutoff is relative to `|a|² |b|²`, so it does not depend on the
/// mesh's scale.
#[inline]
fn separating_axis(a: DVec3, b: DVec3) -> Option<DVec3> {
  let axis = a.cross(b);
  let scale = a.length_squared() * b.length_squared();
  (axis.length_squared() > PARALLEL_EPSILON * scale).then_some(axis)
}

/// Projections of the triangle and the box overlap on `axis`.
fn axis_overlaps(axis: DVec3, half_extents: &DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
  let p0 = axis.dot(v0);
  let p1 = axis.dot(v1);
  let p2 = axis.dot(v2);
  let radius = half_extents.dot(axis.abs());
  p0.min(p1).min(p2) <= radius && p0.max(p1).max(p2) >= -radius
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
