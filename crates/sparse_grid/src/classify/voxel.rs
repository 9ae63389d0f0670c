//! Voxel mode: mark lattice cells from a binary occupancy mask.
//!
//! A filled cell whose 6 face neighbors are all filled (and inside the
//! lattice) is INSIDE; any other filled cell is BOUNDARY. Empty cells stay
//! unmarked for the flood fill, so enclosed cavities end up INSIDE.

use rayon::prelude::*;
use tracing::debug;

use super::Marks;
use crate::constants::FACE_COUNT;
use crate::coord::CellCoord;
use crate::lattice::RegularLattice;
use crate::source::VoxelMask;
use crate::types::{CellType, Resolution};

/// Occupancy of every voxel, optionally smoothed with a box kernel.
///
/// `kernel_size` 0 or 1 returns the raw occupancy. Larger sizes average a
/// cube of radius `kernel_size / 2` (clipped to the mask) and keep voxels
/// where at least half of the window is filled. Even sizes round up to the
/// next odd window.
pub fn smooth_occupancy(mask: &VoxelMask, kernel_size: usize) -> Vec<bool> {
  if kernel_size <= 1 {
    return mask.data.iter().map(|&v| v != 0).collect();
  }
  let radius = kernel_size / 2;
  let dims = mask.dims;

  (0..dims.cell_count())
    .into_par_iter()
    .map(|index| {
      let x = index % dims.nx;
      let y = (index / dims.nx) % dims.ny;
      let z = index / (dims.nx * dims.ny);
      let (x0, x1) = window(x, radius, dims.nx);
      let (y0, y1) = window(y, radius, dims.ny);
      let (z0, z1) = window(z, radius, dims.nz);

      let mut filled = 0usize;
      let mut total = 0usize;
      for wz in z0..=z1 {
        for wy in y0..=y1 {
          for wx in x0..=x1 {
            total += 1;
            if mask.is_filled(wx, wy, wz) {
              filled += 1;
            }
          }
        }
      }
      filled * 2 >= total
    })
    .collect()
}

#[inline]
fn window(center: usize, radius: usize, len: usize) -> (usize, usize) {
  (center.saturating_sub(radius), (center + radius).min(len - 1))
}

/// Voxel under the center of lattice cell `cell` on one axis.
#[inline]
fn voxel_under(cell: usize, cells: usize, voxels: usize) -> usize {
  ((2 * cell + 1) * voxels / (2 * cells)).min(voxels - 1)
}

/// Mark lattice cells from per-voxel occupancy (see module docs).
///
/// `occupancy` is ordered like the mask data, with dimensions `dims`.
pub fn mark_voxel_cells(
  lattice: &RegularLattice,
  dims: Resolution,
  occupancy: &[bool],
  marks: &mut Marks,
) {
  let res = lattice.resolution();
  let filled = |cell: CellCoord| -> bool {
    let x = voxel_under(cell.i, res.nx, dims.nx);
    let y = voxel_under(cell.j, res.ny, dims.ny);
    let z = voxel_under(cell.k, res.nz, dims.nz);
    occupancy[x + dims.nx * (y + dims.ny * z)]
  };

  let mut inside = 0usize;
  let mut boundary = 0usize;
  for cell in lattice.cells() {
    if !filled(cell) {
      continue;
    }
    let enclosed = (0..FACE_COUNT).all(|dir| {
      cell
        .face_neighbor(dir, &res)
        .is_some_and(|neighbor| filled(neighbor))
    });
    let index = lattice.cell_index(cell);
    if enclosed {
      marks[index] = Some(CellType::Inside);
      inside += 1;
    } else {
      marks[index] = Some(CellType::Boundary);
      boundary += 1;
    }
  }

  debug!(inside, boundary, "marked voxel cells");
}

#[cfg(test)]
#[path = "voxel_test.rs"]
mod voxel_test;
