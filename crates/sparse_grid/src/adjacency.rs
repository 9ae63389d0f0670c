//! Cell and node adjacency of a sparse grid.
//!
//! Face directions follow [`FACE_OFFSETS`](crate::constants::FACE_OFFSETS):
//! `-X, +X, -Y, +Y, -Z, +Z`, and the opposite of `d` is `d ^ 1`.
//!
//! ```text
//!          +Y (3)
//!            │   +Z (5)
//!            │  ╱
//!  -X (0) ───●─── +X (1)
//!          ╱ │
//!   -Z (4)   │
//!          -Y (2)
//! ```

use smallvec::SmallVec;

use crate::constants::{opposite_face, CORNER_COUNT, FACE_COUNT};
use crate::lattice::RegularLattice;
use crate::types::{CellIndex, CornerRef, Hexahedron, PointIndex};

/// Neighbor slots in the 6 face directions.
pub type FaceNeighbors = [Option<usize>; FACE_COUNT];

/// Adjacency tables of one sparse grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjacency {
  cell_neighbors: Vec<FaceNeighbors>,
  node_cells: Vec<SmallVec<[CellIndex; 8]>>,
  node_corners: Vec<SmallVec<[CornerRef; 8]>>,
  node_neighbors: Vec<FaceNeighbors>,
}

impl Adjacency {
  /// Build every table from the extracted cells.
  ///
  /// `regular_to_sparse` maps lattice cells to sparse cells; `hexahedra` and
  /// `sparse_to_regular` are indexed by sparse cell.
  pub fn build(
    lattice: &RegularLattice,
    regular_to_sparse: &[Option<CellIndex>],
    sparse_to_regular: &[usize],
    hexahedra: &[Hexahedron],
    point_count: usize,
  ) -> Self {
    let res = lattice.resolution();

    let cell_neighbors: Vec<FaceNeighbors> = sparse_to_regular
      .iter()
      .map(|&regular| {
        let cell = lattice.cell_coord(regular);
        std::array::from_fn(|dir| {
          cell
            .face_neighbor(dir, &res)
            .and_then(|n| regular_to_sparse[lattice.cell_index(n)])
        })
      })
      .collect();

    let mut node_cells = vec![SmallVec::new(); point_count];
    let mut node_corners = vec![SmallVec::new(); point_count];
    let mut node_neighbors = vec![[None; FACE_COUNT]; point_count];

    for (cell, hex) in hexahedra.iter().enumerate() {
      for corner in 0..CORNER_COUNT {
        let point = hex[corner];
        node_cells[point].push(cell);
        node_corners[point].push(CornerRef {
          cell,
          corner: corner as u8,
        });

        // Cell edges leaving this corner, one per axis
        for axis in 0..3 {
          let other = corner ^ (1 << axis);
          let dir = if corner & (1 << axis) == 0 {
            2 * axis + 1
          } else {
            2 * axis
          };
          node_neighbors[point][dir] = Some(hex[other]);
        }
      }
    }

    Self {
      cell_neighbors,
      node_cells,
      node_corners,
      node_neighbors,
    }
  }

  /// Face neighbors of a sparse cell.
  #[inline]
  pub fn cell_neighbors(&self, cell: CellIndex) -> &FaceNeighbors {
    &self.cell_neighbors[cell]
  }

  /// Face neighbor of a sparse cell in one direction.
  #[inline]
  pub fn cell_neighbor(&self, cell: CellIndex, direction: usize) -> Option<CellIndex> {
    self.cell_neighbors[cell][direction]
  }

  /// Sparse cells using a point as a corner, in cell order.
  #[inline]
  pub fn node_cells(&self, point: PointIndex) -> &[CellIndex] {
    &self.node_cells[point]
  }

  /// (cell, corner slot) pairs referencing a point.
  #[inline]
  pub fn node_corners(&self, point: PointIndex) -> &[CornerRef] {
    &self.node_corners[point]
  }

  /// Neighbor points along the 6 axis directions, where a retained cell
  /// has the connecting edge.
  #[inline]
  pub fn node_neighbors(&self, point: PointIndex) -> &FaceNeighbors {
    &self.node_neighbors[point]
  }

  pub fn cell_count(&self) -> usize {
    self.cell_neighbors.len()
  }

  pub fn point_count(&self) -> usize {
    self.node_cells.len()
  }

  /// True when every cell link `a -d-> b` has the reverse link `b -> a`.
  pub fn is_symmetric(&self) -> bool {
    self.cell_neighbors.iter().enumerate().all(|(cell, neighbors)| {
      neighbors.iter().enumerate().all(|(dir, n)| match n {
        Some(other) => self.cell_neighbors[*other][opposite_face(dir)] == Some(cell),
        None => true,
      })
    })
  }
}

#[cfg(test)]
#[path = "adjacency_test.rs"]
mod adjacency_test;
