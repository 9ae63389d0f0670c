//! CellCoord - immutable value type for a cell position in a regular lattice.
//!
//! Coordinates are in cells at the lattice's own resolution. A coarse cell
//! at `(i, j, k)` covers the fine cells `(2i + ox, 2j + oy, 2k + oz)` of the
//! next finer level, where `(ox, oy, oz)` is the child octant.

use crate::constants::{CORNER_OFFSETS, FACE_OFFSETS};
use crate::types::Resolution;

/// Lattice cell coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct CellCoord {
  pub i: usize,
  pub j: usize,
  pub k: usize,
}

impl CellCoord {
  pub const fn new(i: usize, j: usize, k: usize) -> Self {
    Self { i, j, k }
  }

  #[inline]
  pub const fn as_array(&self) -> [usize; 3] {
    [self.i, self.j, self.k]
  }

  /// Child cell in the next finer lattice.
  ///
  /// Octant bits: bit 0 = +X, bit 1 = +Y, bit 2 = +Z.
  #[inline]
  pub fn child(&self, octant: usize) -> Self {
    let [ox, oy, oz] = CORNER_OFFSETS[octant & 7];
    Self::new(self.i * 2 + ox, self.j * 2 + oy, self.k * 2 + oz)
  }

  /// Parent cell in the next coarser lattice.
  #[inline]
  pub fn parent(&self) -> Self {
    Self::new(self.i / 2, self.j / 2, self.k / 2)
  }

  /// Octant of this cell inside its parent.
  #[inline]
  pub fn octant(&self) -> usize {
    (self.i & 1) | ((self.j & 1) << 1) | ((self.k & 1) << 2)
  }

  /// Face neighbor in `direction` (see [`FACE_OFFSETS`]), or `None` when
  /// it would leave the lattice.
  pub fn face_neighbor(&self, direction: usize, res: &Resolution) -> Option<Self> {
    let offset = FACE_OFFSETS[direction];
    let dims = res.as_array();
    let mut out = [0usize; 3];
    for axis in 0..3 {
      let moved = self.as_array()[axis] as i64 + offset[axis];
      if moved < 0 || moved >= dims[axis] as i64 {
        return None;
      }
      out[axis] = moved as usize;
    }
    Some(Self::new(out[0], out[1], out[2]))
  }

  /// True when the cell touches the outer faces of the lattice.
  #[inline]
  pub fn is_on_shell(&self, res: &Resolution) -> bool {
    self.i == 0
      || self.j == 0
      || self.k == 0
      || self.i + 1 == res.nx
      || self.j + 1 == res.ny
      || self.k + 1 == res.nz
  }
}

#[cfg(test)]
#[path = "coord_test.rs"]
mod coord_test;
