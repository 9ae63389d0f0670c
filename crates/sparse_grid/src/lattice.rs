//! Dense regular lattice of candidate cells and corner points.
//!
//! # Memory Layout
//!
//! ```text
//! Flat index (X fastest, then Y, then Z):
//!
//!   cell  = i + nx * (j + ny * k)
//!   point = x + (nx + 1) * (y + (ny + 1) * z)
//!
//! Address:  0      1      ...  nx-1     nx      ...
//! Content: [0,0,0][1,0,0]...[nx-1,0,0][0,1,0]...
//! ```
//!
//! Voxel masks use the same ordering, so a mask of the lattice's own
//! resolution maps 1:1 onto cell indices.

use glam::DVec3;

use crate::bounds::BoundingBox;
use crate::constants::CORNER_OFFSETS;
use crate::coord::CellCoord;
use crate::error::{GridError, GridResult};
use crate::types::Resolution;

/// Uniform axis-aligned lattice over a bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularLattice {
  bounds: BoundingBox,
  resolution: Resolution,
  cell_size: DVec3,
}

impl RegularLattice {
  /// Build from an explicit box and resolution.
  pub fn new(bounds: BoundingBox, resolution: Resolution) -> GridResult<Self> {
    resolution.validate()?;
    bounds.validate()?;
    let dims = DVec3::new(
      resolution.nx as f64,
      resolution.ny as f64,
      resolution.nz as f64,
    );
    Ok(Self {
      bounds,
      resolution,
      cell_size: bounds.size() / dims,
    })
  }

  /// Build from a box and a fixed cell width.
  ///
  /// Resolution per axis = round(size / width), at least 1.
  pub fn from_cell_width(bounds: BoundingBox, cell_width: f64) -> GridResult<Self> {
    if !(cell_width.is_finite() && cell_width > 0.0) {
      return Err(GridError::InvalidCellWidth(cell_width));
    }
    bounds.validate()?;
    let cells = (bounds.size() / cell_width).round().max(DVec3::ONE);
    Self::new(
      bounds,
      Resolution::new(cells.x as usize, cells.y as usize, cells.z as usize),
    )
  }

  /// Build from voxel dimensions and the physical size of one voxel.
  ///
  /// The lattice spans `origin .. origin + dims * voxel_size`.
  pub fn from_voxel_dims(dims: Resolution, voxel_size: DVec3, origin: DVec3) -> GridResult<Self> {
    if !(voxel_size.is_finite() && voxel_size.cmpgt(DVec3::ZERO).all()) {
      return Err(GridError::InvalidVoxelSize(voxel_size.to_array()));
    }
    dims.validate()?;
    let extent = DVec3::new(dims.nx as f64, dims.ny as f64, dims.nz as f64) * voxel_size;
    Self::new(BoundingBox::new(origin, origin + extent), dims)
  }

  /// Same box, each axis subdivided `levels` more times.
  pub fn refined(&self, levels: u32) -> GridResult<Self> {
    let resolution = self.resolution.refined(levels).ok_or_else(|| {
      GridError::incompatible(format!(
        "resolution {:?} overflows after {} refinements",
        self.resolution.as_array(),
        levels
      ))
    })?;
    Self::new(self.bounds, resolution)
  }

  /// Same box at half the resolution.
  pub fn coarsened(&self) -> GridResult<Self> {
    Self::new(self.bounds, self.resolution.coarsened()?)
  }

  #[inline]
  pub fn bounds(&self) -> &BoundingBox {
    &self.bounds
  }

  #[inline]
  pub fn resolution(&self) -> Resolution {
    self.resolution
  }

  /// Size of one cell.
  #[inline]
  pub fn cell_size(&self) -> DVec3 {
    self.cell_size
  }

  #[inline]
  pub fn cell_count(&self) -> usize {
    self.resolution.cell_count()
  }

  #[inline]
  pub fn point_count(&self) -> usize {
    self.resolution.point_count()
  }

  /// Flat cell index of a cell coordinate.
  #[inline]
  pub fn cell_index(&self, cell: CellCoord) -> usize {
    let r = &self.resolution;
    cell.i + r.nx * (cell.j + r.ny * cell.k)
  }

  /// Cell coordinate of a flat cell index.
  #[inline]
  pub fn cell_coord(&self, index: usize) -> CellCoord {
    let r = &self.resolution;
    CellCoord::new(index % r.nx, (index / r.nx) % r.ny, index / (r.nx * r.ny))
  }

  /// Flat index of a lattice point.
  #[inline]
  pub fn point_index(&self, point: [usize; 3]) -> usize {
    let [px, py, _] = self.resolution.point_dims();
    point[0] + px * (point[1] + py * point[2])
  }

  /// Lattice coordinate of a flat point index.
  #[inline]
  pub fn point_coord(&self, index: usize) -> [usize; 3] {
    let [px, py, _] = self.resolution.point_dims();
    [index % px, (index / px) % py, index / (px * py)]
  }

  /// World position of a lattice point.
  ///
  /// Interpolates between min and max so the last point lands exactly on
  /// `max`.
  pub fn point_position(&self, point: [usize; 3]) -> DVec3 {
    let dims = self.resolution.as_array();
    let min = self.bounds.min.to_array();
    let max = self.bounds.max.to_array();
    let mut out = [0.0; 3];
    for axis in 0..3 {
      let t = point[axis] as f64 / dims[axis] as f64;
      out[axis] = min[axis] * (1.0 - t) + max[axis] * t;
    }
    DVec3::from_array(out)
  }

  /// Lattice point indices of the 8 corners of a cell.
  pub fn cell_corner_points(&self, cell: CellCoord) -> [usize; 8] {
    CORNER_OFFSETS.map(|[dx, dy, dz]| self.point_index([cell.i + dx, cell.j + dy, cell.k + dz]))
  }

  /// Axis-aligned box of a cell.
  pub fn cell_bounds(&self, cell: CellCoord) -> BoundingBox {
    BoundingBox::new(
      self.point_position(cell.as_array()),
      self.point_position([cell.i + 1, cell.j + 1, cell.k + 1]),
    )
  }

  /// Center of a cell.
  #[inline]
  pub fn cell_center(&self, cell: CellCoord) -> DVec3 {
    self.cell_bounds(cell).center()
  }

  /// Cell containing `pos` and the fractional offsets of `pos` inside it.
  ///
  /// Positions exactly on the max faces belong to the last cell. Returns
  /// `None` outside the box.
  pub fn cell_containing(&self, pos: DVec3) -> Option<(CellCoord, DVec3)> {
    if !self.bounds.contains_point(pos) {
      return None;
    }
    let local = (pos - self.bounds.min) / self.cell_size;
    let dims = self.resolution.as_array();
    let mut cell = [0usize; 3];
    let mut frac = [0.0; 3];
    for axis in 0..3 {
      let c = (local[axis].floor().max(0.0) as usize).min(dims[axis] - 1);
      cell[axis] = c;
      frac[axis] = (local[axis] - c as f64).clamp(0.0, 1.0);
    }
    Some((
      CellCoord::new(cell[0], cell[1], cell[2]),
      DVec3::from_array(frac),
    ))
  }

  /// Inclusive range of cells on one axis overlapped by `[lo, hi]`, or
  /// `None` when the interval misses the lattice.
  pub fn cell_range(&self, axis: usize, lo: f64, hi: f64) -> Option<(usize, usize)> {
    let min = self.bounds.min[axis];
    let max = self.bounds.max[axis];
    if hi < min || lo > max {
      return None;
    }
    let n = self.resolution.as_array()[axis];
    let size = self.cell_size[axis];
    let first = ((lo - min) / size).floor().max(0.0) as usize;
    let last = ((hi - min) / size).floor().max(0.0) as usize;
    Some((first.min(n - 1), last.min(n - 1)))
  }

  /// All cell coordinates in flat index order.
  pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
    (0..self.cell_count()).map(move |index| self.cell_coord(index))
  }

  /// Cells touching the lattice's outer faces, in flat index order.
  pub fn shell_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
    let res = self.resolution;
    self.cells().filter(move |cell| cell.is_on_shell(&res))
  }
}

#[cfg(test)]
#[path = "lattice_test.rs"]
mod lattice_test;
