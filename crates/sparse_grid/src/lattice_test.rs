use super::*;

fn unit_lattice(n: usize) -> RegularLattice {
  RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::splat(n as f64)),
    Resolution::splat(n),
  )
  .unwrap()
}

// =========================================================================
// Construction paths
// =========================================================================

#[test]
fn test_new_computes_cell_size() {
  let lattice = RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::new(10.0, 20.0, 30.0)),
    Resolution::new(2, 4, 3),
  )
  .unwrap();
  assert_eq!(lattice.cell_size(), DVec3::new(5.0, 5.0, 10.0));
  assert_eq!(lattice.cell_count(), 24);
  assert_eq!(lattice.point_count(), 3 * 5 * 4);
}

#[test]
fn test_new_rejects_zero_resolution() {
  let err = RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::ONE),
    Resolution::new(0, 1, 1),
  )
  .unwrap_err();
  assert_eq!(err, GridError::InvalidResolution([0, 1, 1]));
}

#[test]
fn test_new_rejects_degenerate_box() {
  let err = RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0)),
    Resolution::splat(2),
  )
  .unwrap_err();
  assert!(matches!(err, GridError::DegenerateBounds { .. }));
}

#[test]
fn test_from_cell_width_rounds_resolution() {
  let bounds = BoundingBox::new(DVec3::ZERO, DVec3::new(10.0, 4.4, 0.2));
  let lattice = RegularLattice::from_cell_width(bounds, 2.0).unwrap();
  // 5.0 -> 5, 2.2 -> 2, 0.1 -> clamped to 1
  assert_eq!(lattice.resolution(), Resolution::new(5, 2, 1));
}

#[test]
fn test_from_cell_width_rejects_non_positive() {
  let bounds = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
  assert_eq!(
    RegularLattice::from_cell_width(bounds, 0.0).unwrap_err(),
    GridError::InvalidCellWidth(0.0)
  );
  assert!(RegularLattice::from_cell_width(bounds, -1.0).is_err());
}

#[test]
fn test_from_voxel_dims() {
  let lattice = RegularLattice::from_voxel_dims(
    Resolution::new(4, 2, 3),
    DVec3::new(0.5, 1.0, 2.0),
    DVec3::new(1.0, 1.0, 1.0),
  )
  .unwrap();
  assert_eq!(lattice.resolution(), Resolution::new(4, 2, 3));
  assert_eq!(lattice.bounds().min, DVec3::ONE);
  assert_eq!(lattice.bounds().max, DVec3::new(3.0, 3.0, 7.0));
}

#[test]
fn test_from_voxel_dims_rejects_bad_voxel_size() {
  let err = RegularLattice::from_voxel_dims(
    Resolution::splat(2),
    DVec3::new(1.0, 0.0, 1.0),
    DVec3::ZERO,
  )
  .unwrap_err();
  assert!(matches!(err, GridError::InvalidVoxelSize(_)));
}

// =========================================================================
// Indexing
// =========================================================================

#[test]
fn test_cell_index_roundtrip() {
  let lattice = RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::ONE),
    Resolution::new(3, 4, 5),
  )
  .unwrap();
  for index in 0..lattice.cell_count() {
    let cell = lattice.cell_coord(index);
    assert_eq!(lattice.cell_index(cell), index);
  }
  // X is the fastest axis
  assert_eq!(lattice.cell_index(CellCoord::new(1, 0, 0)), 1);
  assert_eq!(lattice.cell_index(CellCoord::new(0, 1, 0)), 3);
  assert_eq!(lattice.cell_index(CellCoord::new(0, 0, 1)), 12);
}

#[test]
fn test_point_index_roundtrip() {
  let lattice = unit_lattice(3);
  for index in 0..lattice.point_count() {
    assert_eq!(lattice.point_index(lattice.point_coord(index)), index);
  }
}

#[test]
fn test_point_position_hits_max_exactly() {
  let lattice = RegularLattice::new(
    BoundingBox::new(DVec3::splat(0.1), DVec3::splat(0.7)),
    Resolution::splat(3),
  )
  .unwrap();
  assert_eq!(lattice.point_position([3, 3, 3]), DVec3::splat(0.7));
  assert_eq!(lattice.point_position([0, 0, 0]), DVec3::splat(0.1));
}

#[test]
fn test_cell_corner_points_share_with_neighbor() {
  let lattice = unit_lattice(2);
  let a = lattice.cell_corner_points(CellCoord::new(0, 0, 0));
  let b = lattice.cell_corner_points(CellCoord::new(1, 0, 0));
  // +X face of a is the -X face of b
  assert_eq!(a[1], b[0]);
  assert_eq!(a[3], b[2]);
  assert_eq!(a[5], b[4]);
  assert_eq!(a[7], b[6]);
}

#[test]
fn test_cell_containing() {
  let lattice = unit_lattice(4);
  let (cell, frac) = lattice.cell_containing(DVec3::new(1.5, 2.25, 0.0)).unwrap();
  assert_eq!(cell, CellCoord::new(1, 2, 0));
  assert_eq!(frac, DVec3::new(0.5, 0.25, 0.0));

  // Max corner belongs to the last cell
  let (cell, frac) = lattice.cell_containing(DVec3::splat(4.0)).unwrap();
  assert_eq!(cell, CellCoord::new(3, 3, 3));
  assert_eq!(frac, DVec3::ONE);

  assert!(lattice.cell_containing(DVec3::splat(-0.1)).is_none());
}

#[test]
fn test_cell_range_clamps() {
  let lattice = unit_lattice(4);
  assert_eq!(lattice.cell_range(0, -3.0, 1.5), Some((0, 1)));
  assert_eq!(lattice.cell_range(1, 3.5, 9.0), Some((3, 3)));
  assert_eq!(lattice.cell_range(2, 5.0, 9.0), None);
}

#[test]
fn test_shell_cells_count() {
  let lattice = unit_lattice(4);
  // 4³ - 2³ interior cells
  assert_eq!(lattice.shell_cells().count(), 64 - 8);
}

#[test]
fn test_refined_and_coarsened() {
  let lattice = unit_lattice(2);
  let fine = lattice.refined(2).unwrap();
  assert_eq!(fine.resolution(), Resolution::splat(8));
  assert_eq!(fine.bounds(), lattice.bounds());
  let back = fine.coarsened().unwrap().coarsened().unwrap();
  assert_eq!(back, lattice);
}
