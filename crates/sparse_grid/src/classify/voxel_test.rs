use super::*;
use crate::test_utils::*;

// =============================================================================
// Smoothing
// =============================================================================

#[test]
fn test_no_smoothing_returns_raw_occupancy() {
  let mask = ball_mask(6, 2.0);
  let raw: Vec<bool> = mask.data.iter().map(|&v| v != 0).collect();
  assert_eq!(smooth_occupancy(&mask, 0), raw);
  assert_eq!(smooth_occupancy(&mask, 1), raw);
}

/// An isolated voxel is removed by a 3³ kernel.
#[test]
fn test_smoothing_removes_speck() {
  let mask = VoxelMask::from_fn(Resolution::splat(5), |x, y, z| (x, y, z) == (2, 2, 2));
  let smoothed = smooth_occupancy(&mask, 3);
  assert!(smoothed.iter().all(|&v| !v));
}

/// A single empty voxel inside a solid block is filled by a 3³ kernel.
#[test]
fn test_smoothing_closes_pinhole() {
  let mask = VoxelMask::from_fn(Resolution::splat(5), |x, y, z| (x, y, z) != (2, 2, 2));
  let smoothed = smooth_occupancy(&mask, 3);
  assert!(smoothed[mask.index(2, 2, 2)]);
}

/// Even kernel sizes use the window of the next odd size.
#[test]
fn test_even_kernel_rounds_up() {
  let mask = VoxelMask::from_fn(Resolution::splat(7), |x, y, z| (x * 3 + y * 5 + z) % 4 < 2);
  assert_eq!(smooth_occupancy(&mask, 2), smooth_occupancy(&mask, 3));
  assert_eq!(smooth_occupancy(&mask, 4), smooth_occupancy(&mask, 5));
  assert_ne!(smooth_occupancy(&mask, 3), smooth_occupancy(&mask, 5));
}

// =============================================================================
// Marking
// =============================================================================

#[test]
fn test_all_zero_mask_marks_nothing() {
  let mask = VoxelMask::new(Resolution::splat(3), vec![0; 27]);
  let lattice = mask.lattice().unwrap();
  let occupancy = smooth_occupancy(&mask, 0);
  let mut marks = vec![None; lattice.cell_count()];
  mark_voxel_cells(&lattice, mask.dims, &occupancy, &mut marks);
  assert!(marks.iter().all(Option::is_none));
}

/// Solid 3³ block: the center is enclosed, everything else touches the
/// lattice edge.
#[test]
fn test_solid_block_marks_center_inside() {
  let mask = VoxelMask::new(Resolution::splat(3), vec![1; 27]);
  let lattice = mask.lattice().unwrap();
  let occupancy = smooth_occupancy(&mask, 0);
  let mut marks = vec![None; lattice.cell_count()];
  mark_voxel_cells(&lattice, mask.dims, &occupancy, &mut marks);

  assert_eq!(marks[13], Some(CellType::Inside));
  let boundary = marks
    .iter()
    .filter(|m| **m == Some(CellType::Boundary))
    .count();
  assert_eq!(boundary, 26);
}

/// A lattice finer than the mask samples the voxel under each cell center.
#[test]
fn test_finer_lattice_samples_voxel_centers() {
  let mask = VoxelMask::new(Resolution::splat(2), vec![1; 8]);
  let lattice = mask.lattice().unwrap().refined(1).unwrap();
  let occupancy = smooth_occupancy(&mask, 0);
  let mut marks = vec![None; lattice.cell_count()];
  mark_voxel_cells(&lattice, mask.dims, &occupancy, &mut marks);

  let inside = marks.iter().filter(|m| **m == Some(CellType::Inside)).count();
  let boundary = marks
    .iter()
    .filter(|m| **m == Some(CellType::Boundary))
    .count();
  assert_eq!(inside, 8);
  assert_eq!(boundary, 56);
}

#[test]
fn test_voxel_under_maps_cell_centers() {
  assert_eq!(voxel_under(0, 4, 2), 0);
  assert_eq!(voxel_under(1, 4, 2), 0);
  assert_eq!(voxel_under(2, 4, 2), 1);
  assert_eq!(voxel_under(3, 4, 2), 1);
  // Coarser lattice than mask
  assert_eq!(voxel_under(0, 2, 6), 1);
  assert_eq!(voxel_under(1, 2, 6), 4);
}
