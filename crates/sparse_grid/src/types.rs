//! Core data types shared by every build stage.

use serde::Deserialize;

use crate::error::{GridError, GridResult};

/// Sparse point index.
pub type PointIndex = usize;

/// Sparse cell index.
pub type CellIndex = usize;

/// 8 corner point indices of a hexahedron (binary ZYX corner order).
pub type Hexahedron = [PointIndex; 8];

/// Edge between two sparse points (lower index first).
pub type Edge = [PointIndex; 2];

/// Quad face of a hexahedron (cyclic corner order).
pub type Quad = [PointIndex; 4];

/// Lattice cell counts per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[usize; 3]")]
pub struct Resolution {
  pub nx: usize,
  pub ny: usize,
  pub nz: usize,
}

impl Resolution {
  pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
    Self { nx, ny, nz }
  }

  /// Same cell count on every axis.
  pub const fn splat(n: usize) -> Self {
    Self::new(n, n, n)
  }

  #[inline]
  pub const fn as_array(&self) -> [usize; 3] {
    [self.nx, self.ny, self.nz]
  }

  /// Total number of lattice cells.
  #[inline]
  pub const fn cell_count(&self) -> usize {
    self.nx * self.ny * self.nz
  }

  /// Lattice points per axis (one more than cells).
  #[inline]
  pub const fn point_dims(&self) -> [usize; 3] {
    [self.nx + 1, self.ny + 1, self.nz + 1]
  }

  /// Total number of lattice corner points.
  #[inline]
  pub const fn point_count(&self) -> usize {
    (self.nx + 1) * (self.ny + 1) * (self.nz + 1)
  }

  /// Point count, or `None` when it does not fit in `usize`.
  ///
  /// Bounds the cell count too, since there are more points than cells.
  pub fn checked_point_count(&self) -> Option<usize> {
    let [px, py, pz] = [
      self.nx.checked_add(1)?,
      self.ny.checked_add(1)?,
      self.nz.checked_add(1)?,
    ];
    px.checked_mul(py)?.checked_mul(pz)
  }

  /// Reject resolutions with a zero component or an unaddressable count.
  pub fn validate(&self) -> GridResult<()> {
    let empty = self.nx == 0 || self.ny == 0 || self.nz == 0;
    if empty || self.checked_point_count().is_none() {
      return Err(GridError::InvalidResolution(self.as_array()));
    }
    Ok(())
  }

  /// Resolution after `levels` subdivisions (each axis × 2^levels), or
  /// `None` when the refined point count overflows.
  pub fn refined(&self, levels: u32) -> Option<Self> {
    let factor = 1usize.checked_shl(levels)?;
    let refined = Self::new(
      self.nx.checked_mul(factor)?,
      self.ny.checked_mul(factor)?,
      self.nz.checked_mul(factor)?,
    );
    refined.checked_point_count().map(|_| refined)
  }

  /// Resolution after one 2×2×2 aggregation.
  ///
  /// Fails when an axis is odd, since the fine cells would not pair up.
  pub fn coarsened(&self) -> GridResult<Self> {
    let odd = self.as_array().iter().any(|n| n % 2 != 0);
    if odd {
      return Err(GridError::incompatible(format!(
        "resolution {:?} is not divisible by 2 on every axis",
        self.as_array()
      )));
    }
    Ok(Self::new(self.nx / 2, self.ny / 2, self.nz / 2))
  }
}

impl From<[usize; 3]> for Resolution {
  fn from([nx, ny, nz]: [usize; 3]) -> Self {
    Self::new(nx, ny, nz)
  }
}

/// Classification of a lattice cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellType {
  /// Not part of the object; discarded by the sparse extractor.
  #[default]
  Outside,
  /// Completely filled with material.
  Inside,
  /// Crossed by the object's surface (partially filled).
  Boundary,
}

impl CellType {
  /// True for cells kept in a sparse grid (INSIDE or BOUNDARY).
  #[inline]
  pub fn is_retained(self) -> bool {
    self != CellType::Outside
  }
}

/// One corner slot of one sparse cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerRef {
  /// Sparse cell index.
  pub cell: CellIndex,
  /// Corner slot within the cell (0-7, binary ZYX).
  pub corner: u8,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
