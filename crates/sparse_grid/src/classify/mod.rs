//! Region classification of lattice cells.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ Surface mesh │   │  Voxel mask  │
//! └──────┬───────┘   └──────┬───────┘
//!        │ triangle × cell   │ sample + smooth
//!        ▼                   ▼
//! ┌─────────────────────────────────────┐
//! │ Marks: BOUNDARY / INSIDE / unmarked │
//! └──────────────────┬──────────────────┘
//!                    │ flood fill from the outer shell
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │ reached → OUTSIDE                   │
//! │ unmarked, unreached → INSIDE        │
//! └─────────────────────────────────────┘
//! ```

pub mod flood;
pub mod mesh;
pub mod voxel;

use tracing::info_span;

pub use flood::{flood_outside, flood_outside_with, Worklist};
pub use mesh::{mark_surface_cells, triangle_intersects_box, SurfaceMarkStats};
pub use voxel::{mark_voxel_cells, smooth_occupancy};

use crate::error::{GridError, GridResult};
use crate::lattice::RegularLattice;
use crate::source::{SurfaceMesh, VoxelMask};
use crate::types::CellType;

/// Per-cell marks before the flood fill. `None` = unmarked.
pub type Marks = Vec<Option<CellType>>;

/// Classify every lattice cell against a closed surface mesh.
pub fn classify_mesh(lattice: &RegularLattice, mesh: &SurfaceMesh) -> GridResult<Vec<CellType>> {
  let _span = info_span!("classify_mesh", cells = lattice.cell_count()).entered();
  if mesh.is_empty() {
    return Err(GridError::EmptyMesh);
  }
  let mut marks: Marks = vec![None; lattice.cell_count()];
  mark_surface_cells(lattice, mesh, &mut marks);
  Ok(flood_outside(lattice, &marks))
}

/// Classify every lattice cell from a voxel occupancy mask.
///
/// The mask may have a different resolution than the lattice; each cell
/// samples the voxel under its center.
pub fn classify_voxels(
  lattice: &RegularLattice,
  mask: &VoxelMask,
  smoothing_kernel_size: usize,
) -> GridResult<Vec<CellType>> {
  let _span = info_span!("classify_voxels", cells = lattice.cell_count()).entered();
  mask.validate()?;
  let occupancy = smooth_occupancy(mask, smoothing_kernel_size);
  let mut marks: Marks = vec![None; lattice.cell_count()];
  mark_voxel_cells(lattice, mask.dims, &occupancy, &mut marks);
  Ok(flood_outside(lattice, &marks))
}

/// Count cells of each type: `[outside, inside, boundary]`.
pub fn type_counts(types: &[CellType]) -> [usize; 3] {
  types.iter().fold([0; 3], |mut acc, t| {
    match t {
      CellType::Outside => acc[0] += 1,
      CellType::Inside => acc[1] += 1,
      CellType::Boundary => acc[2] += 1,
    }
    acc
  })
}
