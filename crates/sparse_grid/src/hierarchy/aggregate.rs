//! 2×2×2 aggregation of a fine sparse grid into the next coarser level.
//!
//! A coarse cell at `(i, j, k)` groups the fine cells `(2i + ox, 2j + oy,
//! 2k + oz)`. Its 3×3×3 block of fine points is numbered `x + 3y + 9z`:
//!
//! ```text
//!   z = 0          z = 1          z = 2
//!   6  7  8        15 16 17       24 25 26
//!   3  4  5        12 13 14       21 22 23
//!   0  1  2         9 10 11       18 19 20
//! ```
//!
//! Point weights come from [`WEIGHT27`] through [`FINE_CORNER_IN_BLOCK`],
//! so no geometry is evaluated.

use std::collections::BTreeMap;

use tracing::{debug, info_span};

use super::HierarchyLink;
use crate::constants::{coarse_corner_in_block, CORNER_COUNT, FINE_CORNER_IN_BLOCK, WEIGHT27};
use crate::error::{GridError, GridResult};
use crate::sparse::{ExtractOptions, SparseGrid};
use crate::types::CellType;

/// Build the coarser level of `fine` and the link between the two.
///
/// - coarse resolution = fine resolution / 2 (every axis must be even)
/// - a coarse cell is kept if any child is kept
/// - INSIDE if all 8 children exist and are INSIDE, else BOUNDARY
/// - coefficients are the child mean (absent children count 0) when fill
///   weighting is on, else 1.0
///
/// With `only_inside`, BOUNDARY coarse cells are dropped; their children
/// then have no parent and their fine points no coarse weights.
pub fn aggregate(
  fine: &SparseGrid,
  options: &ExtractOptions,
) -> GridResult<(SparseGrid, HierarchyLink)> {
  let fine_lattice = fine
    .lattice()
    .ok_or_else(|| GridError::incompatible("finer grid has no lattice to aggregate"))?;
  let coarse_lattice = fine_lattice.coarsened()?;
  let _span = info_span!(
    "aggregate",
    fine_cells = fine.cell_count(),
    coarse_cells = coarse_lattice.cell_count()
  )
  .entered();

  let fine_map = fine.regular_to_sparse();
  let children_of = |regular: usize| -> [Option<usize>; CORNER_COUNT] {
    let coord = coarse_lattice.cell_coord(regular);
    std::array::from_fn(|octant| fine_map[fine_lattice.cell_index(coord.child(octant))])
  };

  let mut types = vec![CellType::Outside; coarse_lattice.cell_count()];
  let mut coefficients = vec![(1.0f32, 1.0f32); coarse_lattice.cell_count()];
  for (regular, cell_type) in types.iter_mut().enumerate() {
    let children = children_of(regular);
    if children.iter().all(Option::is_none) {
      continue;
    }
    let all_inside = children
      .iter()
      .all(|c| c.is_some_and(|f| fine.cell_type(f) == CellType::Inside));
    *cell_type = if all_inside {
      CellType::Inside
    } else if options.only_inside {
      CellType::Outside
    } else {
      CellType::Boundary
    };

    if options.fill_weighted {
      let (stiffness, mass) = children.iter().flatten().fold((0.0, 0.0), |(s, m), &f| {
        (
          s + fine.stiffness_coefficients()[f],
          m + fine.mass_coefficients()[f],
        )
      });
      coefficients[regular] = (stiffness / 8.0, mass / 8.0);
    }
  }

  let coarse = SparseGrid::extract_with(coarse_lattice.clone(), &types, false, |regular, _| {
    coefficients[regular]
  });

  let mut link = HierarchyLink {
    cube_map: Vec::with_capacity(coarse.cell_count()),
    inverse_cube_map: vec![None; fine.cell_count()],
    point_weights: vec![BTreeMap::new(); coarse.point_count()],
    inverse_point_weights: vec![BTreeMap::new(); fine.point_count()],
    coincident_points: vec![None; coarse.point_count()],
    inverse_coincident_points: vec![None; fine.point_count()],
  };

  for (coarse_cell, &regular) in coarse.sparse_to_regular().iter().enumerate() {
    let children = children_of(regular);
    let coarse_hex = coarse.hexahedra()[coarse_cell];

    for (octant, child) in children.iter().enumerate() {
      let Some(fine_cell) = *child else {
        continue;
      };
      link.inverse_cube_map[fine_cell] = Some(coarse_cell);
      let fine_hex = fine.hexahedra()[fine_cell];

      for (fine_corner, &fine_point) in fine_hex.iter().enumerate() {
        let block = FINE_CORNER_IN_BLOCK[octant][fine_corner];
        for (coarse_corner, &coarse_point) in coarse_hex.iter().enumerate() {
          let weight = WEIGHT27[coarse_corner][block];
          if weight > 0.0 {
            link.point_weights[coarse_point].insert(fine_point, weight);
            link.inverse_point_weights[fine_point].insert(coarse_point, weight);
          }
          if coarse_corner_in_block(coarse_corner) == block {
            link.coincident_points[coarse_point] = Some(fine_point);
            link.inverse_coincident_points[fine_point] = Some(coarse_point);
          }
        }
      }
    }
    link.cube_map.push(children);
  }

  debug!(
    coarse_cells = coarse.cell_count(),
    coarse_points = coarse.point_count(),
    "aggregated level"
  );
  Ok((coarse, link))
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod aggregate_test;
