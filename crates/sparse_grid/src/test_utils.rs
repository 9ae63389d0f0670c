//! Test utilities shared by the unit tests.
//!
//! Provides lattice fixtures, procedural meshes and voxel masks, and
//! deterministic pseudo-random marks for order-independence tests.

use glam::DVec3;

use crate::bounds::BoundingBox;
use crate::classify::Marks;
use crate::lattice::RegularLattice;
use crate::source::{SurfaceMesh, VoxelMask};
use crate::types::{CellType, Resolution};

/// Lattice over `[0, size]³` with `n` cells per axis.
pub fn cube_lattice(n: usize, size: f64) -> RegularLattice {
  RegularLattice::new(
    BoundingBox::new(DVec3::ZERO, DVec3::splat(size)),
    Resolution::splat(n),
  )
  .expect("valid test lattice")
}

/// Closed box mesh over `[min, max]³`.
pub fn box_mesh(min: f64, max: f64) -> SurfaceMesh {
  SurfaceMesh::cuboid(DVec3::splat(min), DVec3::splat(max))
}

/// Bounding box over `[min, max]³`.
pub fn cube_bounds(min: f64, max: f64) -> BoundingBox {
  BoundingBox::new(DVec3::splat(min), DVec3::splat(max))
}

/// Voxel ball centered in an `n³` mask.
pub fn ball_mask(n: usize, radius: f64) -> VoxelMask {
  let c = n as f64 * 0.5;
  VoxelMask::from_fn(Resolution::splat(n), |x, y, z| {
    let p = DVec3::new(x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5);
    p.distance(DVec3::splat(c)) <= radius
  })
}

/// One-voxel-thick hollow box spanning voxels `1..n-1`, with an empty
/// cavity inside.
pub fn hollow_box_mask(n: usize) -> VoxelMask {
  VoxelMask::from_fn(Resolution::splat(n), |x, y, z| {
    let inside_outer = [x, y, z].iter().all(|&v| v >= 1 && v <= n - 2);
    let inside_cavity = [x, y, z].iter().all(|&v| v >= 2 && v <= n - 3);
    inside_outer && !inside_cavity
  })
}

/// Integer hash for reproducible scattering.
fn hash(mut x: u64) -> u64 {
  x ^= x >> 33;
  x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
  x ^= x >> 33;
  x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
  x ^ (x >> 33)
}

/// Scatter BOUNDARY marks over a lattice with roughly `percent`% density.
pub fn scattered_marks(lattice: &RegularLattice, seed: u64, percent: u64) -> Marks {
  (0..lattice.cell_count())
    .map(|i| {
      if hash(seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ i as u64) % 100 < percent {
        Some(CellType::Boundary)
      } else {
        None
      }
    })
    .collect()
}
