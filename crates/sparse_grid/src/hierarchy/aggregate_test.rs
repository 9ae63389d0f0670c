use glam::DVec3;

use super::*;
use crate::sparse::ExtractOptions;
use crate::test_utils::*;

fn extract(n: usize, types: &[CellType], fill_weighted: bool) -> SparseGrid {
  SparseGrid::extract(
    cube_lattice(n, n as f64),
    types,
    &ExtractOptions {
      fill_weighted,
      only_inside: false,
    },
  )
}

fn options(fill_weighted: bool, only_inside: bool) -> ExtractOptions {
  ExtractOptions {
    fill_weighted,
    only_inside,
  }
}

fn scattered_types(n: usize, seed: u64) -> Vec<CellType> {
  let lattice = cube_lattice(n, n as f64);
  let boundary = scattered_marks(&lattice, seed, 35);
  let inside = scattered_marks(&lattice, seed + 77, 40);
  boundary
    .iter()
    .zip(&inside)
    .map(|(b, i)| match (b, i) {
      (Some(_), _) => CellType::Boundary,
      (None, Some(_)) => CellType::Inside,
      (None, None) => CellType::Outside,
    })
    .collect()
}

// =============================================================================
// Cell aggregation
// =============================================================================

#[test]
fn test_full_block_aggregates_to_inside() {
  let fine = extract(4, &vec![CellType::Inside; 64], true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();

  assert_eq!(coarse.lattice().unwrap().resolution().as_array(), [2, 2, 2]);
  assert_eq!(coarse.cell_count(), 8);
  assert_eq!(coarse.point_count(), 27);
  assert_eq!(coarse.type_counts(), [8, 0]);
  assert!(coarse.stiffness_coefficients().iter().all(|&c| c == 1.0));
  assert!(link.cube_map.iter().all(|children| children.iter().all(Option::is_some)));
  assert!(link.inverse_cube_map.iter().all(Option::is_some));
}

/// One missing child makes the parent BOUNDARY with a 7/8 coefficient.
#[test]
fn test_missing_child_gives_boundary_parent() {
  let mut types = vec![CellType::Inside; 64];
  types[0] = CellType::Outside;
  let fine = extract(4, &types, true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();

  let parent = coarse.regular_to_sparse()[0].unwrap();
  assert_eq!(coarse.cell_type(parent), CellType::Boundary);
  assert_eq!(link.cube_map[parent][0], None);
  assert_eq!(link.cube_map[parent].iter().flatten().count(), 7);
  assert!((coarse.stiffness_coefficients()[parent] - 0.875).abs() < 1e-6);
  assert!((coarse.mass_coefficients()[parent] - 0.875).abs() < 1e-6);
  assert_eq!(coarse.type_counts(), [7, 1]);
}

#[test]
fn test_unweighted_coefficients_are_one() {
  let fine = extract(4, &scattered_types(4, 3), false);
  let (coarse, _) = aggregate(&fine, &options(false, false)).unwrap();
  assert!(coarse.stiffness_coefficients().iter().all(|&c| c == 1.0));
  assert!(coarse.mass_coefficients().iter().all(|&c| c == 1.0));
}

/// Weighted coefficients are the mean over 8 slots of the child values.
#[test]
fn test_weighted_coefficients_are_child_mean() {
  let fine = extract(4, &scattered_types(4, 9), true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();
  for cell in 0..coarse.cell_count() {
    let sum: f32 = link
      .children(cell)
      .map(|f| fine.stiffness_coefficients()[f])
      .sum();
    assert!((coarse.stiffness_coefficients()[cell] - sum / 8.0).abs() < 1e-6);
  }
}

#[test]
fn test_odd_resolution_is_rejected() {
  let fine = extract(3, &vec![CellType::Inside; 27], true);
  let err = aggregate(&fine, &options(true, false)).unwrap_err();
  assert!(matches!(err, GridError::IncompatibleHierarchy { .. }));
  assert!(!err.is_configuration());
}

#[test]
fn test_grid_without_lattice_is_rejected() {
  let err = aggregate(&SparseGrid::empty(), &options(true, false)).unwrap_err();
  assert!(matches!(err, GridError::IncompatibleHierarchy { .. }));
}

#[test]
fn test_only_inside_drops_boundary_parents() {
  let mut types = vec![CellType::Inside; 64];
  types[0] = CellType::Outside;
  let fine = extract(4, &types, true);
  let (coarse, link) = aggregate(&fine, &options(true, true)).unwrap();

  assert_eq!(coarse.cell_count(), 7);
  assert_eq!(coarse.type_counts(), [7, 0]);
  // Children of the dropped parent have no parent.
  let orphan = fine.regular_to_sparse()[1].unwrap();
  assert_eq!(link.parent(orphan), None);
}

// =============================================================================
// Point maps
// =============================================================================

/// Every fine point under a kept coarse cell has weights summing to 1.
#[test]
fn test_point_weights_are_normalized() {
  for seed in 0..6 {
    let fine = extract(6, &scattered_types(6, seed), true);
    let (_, link) = aggregate(&fine, &options(true, false)).unwrap();
    for point in 0..fine.point_count() {
      let sum = link.weight_sum(point);
      assert!((sum - 1.0).abs() < 1e-5, "seed {} point {}: {}", seed, point, sum);
    }
  }
}

/// Forward and inverse weight maps hold the same entries.
#[test]
fn test_point_maps_agree() {
  let fine = extract(4, &scattered_types(4, 21), true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();
  for coarse_point in 0..coarse.point_count() {
    for (&fine_point, &w) in &link.point_weights[coarse_point] {
      assert_eq!(link.inverse_point_weights[fine_point].get(&coarse_point), Some(&w));
    }
  }
}

/// Weights reproduce positions: a fine point is the weighted sum of its
/// coarse points.
#[test]
fn test_weights_interpolate_positions() {
  let fine = extract(4, &vec![CellType::Boundary; 64], true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();
  for fine_point in 0..fine.point_count() {
    let interpolated = link.inverse_point_weights[fine_point]
      .iter()
      .fold(DVec3::ZERO, |acc, (&c, &w)| acc + coarse.points()[c] * w as f64);
    assert!(interpolated.distance(fine.points()[fine_point]) < 1e-9);
  }
}

#[test]
fn test_coincident_points_share_positions() {
  let fine = extract(4, &scattered_types(4, 13), true);
  let (coarse, link) = aggregate(&fine, &options(true, false)).unwrap();

  let mut found = 0;
  for (coarse_point, fine_point) in link.coincident_points.iter().enumerate() {
    if let Some(fine_point) = *fine_point {
      found += 1;
      assert!(coarse.points()[coarse_point].distance(fine.points()[fine_point]) < 1e-12);
      assert_eq!(link.inverse_coincident_points[fine_point], Some(coarse_point));
      assert_eq!(link.point_weights[coarse_point].get(&fine_point), Some(&1.0));
    }
  }
  assert!(found > 0);

  // Fine points at odd lattice coordinates never coincide with a coarse point.
  let lattice = fine.lattice().unwrap();
  for fine_point in 0..fine.point_count() {
    let coord = lattice.point_coord(fine.lattice_point(fine_point));
    if coord.iter().any(|c| c % 2 == 1) {
      assert_eq!(link.inverse_coincident_points[fine_point], None);
    }
  }
}
