//! Build inputs: surface meshes, voxel masks and finer grids.
//!
//! Parsing mesh or voxel files is left to the caller; these types hold the
//! already decoded data.

use std::sync::Arc;

use glam::DVec3;

use crate::bounds::BoundingBox;
use crate::constants::{CORNER_OFFSETS, FACE_CORNERS};
use crate::error::{GridError, GridResult};
use crate::lattice::RegularLattice;
use crate::sparse::SparseGrid;
use crate::types::Resolution;

/// What a grid is built from.
#[derive(Clone, Debug)]
pub enum GridSource {
  /// Closed boundary surface; cells crossed by triangles become BOUNDARY.
  SurfaceMesh(SurfaceMesh),
  /// Binary occupancy volume.
  VoxelMask(VoxelMask),
  /// Externally owned finer grid, aggregated 2×2×2 into the new level.
  Finer(Arc<SparseGrid>),
}

impl From<SurfaceMesh> for GridSource {
  fn from(mesh: SurfaceMesh) -> Self {
    Self::SurfaceMesh(mesh)
  }
}

impl From<VoxelMask> for GridSource {
  fn from(mask: VoxelMask) -> Self {
    Self::VoxelMask(mask)
  }
}

impl From<Arc<SparseGrid>> for GridSource {
  fn from(grid: Arc<SparseGrid>) -> Self {
    Self::Finer(grid)
  }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceMesh {
  pub vertices: Vec<DVec3>,
  pub triangles: Vec<[usize; 3]>,
}

impl SurfaceMesh {
  pub fn new(vertices: Vec<DVec3>, triangles: Vec<[usize; 3]>) -> Self {
    Self {
      vertices,
      triangles,
    }
  }

  /// Closed axis-aligned box made of 12 triangles.
  pub fn cuboid(min: DVec3, max: DVec3) -> Self {
    let vertices = CORNER_OFFSETS
      .iter()
      .map(|&[x, y, z]| {
        DVec3::new(
          if x == 0 { min.x } else { max.x },
          if y == 0 { min.y } else { max.y },
          if z == 0 { min.z } else { max.z },
        )
      })
      .collect();
    let triangles = FACE_CORNERS
      .iter()
      .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
      .collect();
    Self::new(vertices, triangles)
  }

  /// True when there is nothing to voxelize.
  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  /// Bounding box of the vertices.
  pub fn bounds(&self) -> Option<BoundingBox> {
    BoundingBox::from_points(&self.vertices)
  }

  /// Corner positions of a triangle, or `None` if an index is out of range.
  pub fn triangle(&self, index: usize) -> Option<[DVec3; 3]> {
    let [a, b, c] = *self.triangles.get(index)?;
    Some([
      *self.vertices.get(a)?,
      *self.vertices.get(b)?,
      *self.vertices.get(c)?,
    ])
  }
}

/// Binary occupancy volume.
///
/// `data` is ordered X fastest, then Y, then Z. Non-zero values are filled.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelMask {
  /// Voxels per axis.
  pub dims: Resolution,
  /// Physical size of one voxel.
  pub voxel_size: DVec3,
  /// World position of the mask's min corner.
  pub origin: DVec3,
  /// Occupancy values, one per voxel.
  pub data: Vec<u8>,
}

impl VoxelMask {
  /// Mask with unit voxels at the origin.
  pub fn new(dims: Resolution, data: Vec<u8>) -> Self {
    Self {
      dims,
      voxel_size: DVec3::ONE,
      origin: DVec3::ZERO,
      data,
    }
  }

  /// Mask where `filled(x, y, z)` decides each voxel.
  pub fn from_fn(dims: Resolution, filled: impl Fn(usize, usize, usize) -> bool) -> Self {
    let mut data = Vec::with_capacity(dims.cell_count());
    for z in 0..dims.nz {
      for y in 0..dims.ny {
        for x in 0..dims.nx {
          data.push(u8::from(filled(x, y, z)));
        }
      }
    }
    Self::new(dims, data)
  }

  pub fn with_voxel_size(mut self, voxel_size: DVec3) -> Self {
    self.voxel_size = voxel_size;
    self
  }

  pub fn with_origin(mut self, origin: DVec3) -> Self {
    self.origin = origin;
    self
  }

  /// Check dimensions against the data length.
  pub fn validate(&self) -> GridResult<()> {
    self.dims.validate()?;
    let expected = self.dims.cell_count();
    if self.data.len() != expected {
      return Err(GridError::VoxelMaskSize {
        dims: self.dims.as_array(),
        expected,
        actual: self.data.len(),
      });
    }
    Ok(())
  }

  /// Flat index of a voxel.
  #[inline]
  pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
    x + self.dims.nx * (y + self.dims.ny * z)
  }

  /// True when the voxel is filled. Out-of-range voxels are empty.
  #[inline]
  pub fn is_filled(&self, x: usize, y: usize, z: usize) -> bool {
    if x >= self.dims.nx || y >= self.dims.ny || z >= self.dims.nz {
      return false;
    }
    self.data.get(self.index(x, y, z)).is_some_and(|&v| v != 0)
  }

  /// Number of filled voxels.
  pub fn filled_count(&self) -> usize {
    self.data.iter().filter(|&&v| v != 0).count()
  }

  /// Lattice with one cell per voxel.
  pub fn lattice(&self) -> GridResult<RegularLattice> {
    RegularLattice::from_voxel_dims(self.dims, self.voxel_size, self.origin)
  }
}
