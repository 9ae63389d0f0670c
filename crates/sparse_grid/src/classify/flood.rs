//! Outside flood fill over the regular lattice.
//!
//! Seeds are the unmarked cells on the outer shell. OUTSIDE spreads through
//! face-adjacent unmarked cells and stops at any marked cell. Every cell is
//! visited at most once, so the partition only depends on reachability and
//! not on the worklist's visiting order.

use std::collections::VecDeque;

use tracing::debug;

use crate::constants::FACE_COUNT;
use crate::lattice::RegularLattice;
use crate::types::CellType;

/// Pending cells of the flood fill.
pub trait Worklist {
  fn push(&mut self, cell: usize);
  fn pop(&mut self) -> Option<usize>;
}

/// Depth-first (LIFO) order.
impl Worklist for Vec<usize> {
  #[inline]
  fn push(&mut self, cell: usize) {
    Vec::push(self, cell);
  }

  #[inline]
  fn pop(&mut self) -> Option<usize> {
    Vec::pop(self)
  }
}

/// Breadth-first (FIFO) order.
impl Worklist for VecDeque<usize> {
  #[inline]
  fn push(&mut self, cell: usize) {
    self.push_back(cell);
  }

  #[inline]
  fn pop(&mut self) -> Option<usize> {
    self.pop_front()
  }
}

/// Resolve marks into final cell types using a depth-first worklist.
pub fn flood_outside(lattice: &RegularLattice, marks: &[Option<CellType>]) -> Vec<CellType> {
  flood_outside_with(lattice, marks, Vec::new())
}

/// Resolve marks into final cell types with the given worklist.
///
/// - marked cells keep their mark
/// - unmarked cells reachable from the shell become OUTSIDE
/// - remaining unmarked cells become INSIDE
pub fn flood_outside_with<W: Worklist>(
  lattice: &RegularLattice,
  marks: &[Option<CellType>],
  mut worklist: W,
) -> Vec<CellType> {
  debug_assert_eq!(marks.len(), lattice.cell_count());
  let res = lattice.resolution();
  let mut visited = vec![false; lattice.cell_count()];

  for cell in lattice.shell_cells() {
    let index = lattice.cell_index(cell);
    if marks[index].is_none() && !visited[index] {
      visited[index] = true;
      worklist.push(index);
    }
  }

  let mut reached = 0usize;
  while let Some(index) = worklist.pop() {
    reached += 1;
    let cell = lattice.cell_coord(index);
    for dir in 0..FACE_COUNT {
      let Some(neighbor) = cell.face_neighbor(dir, &res) else {
        continue;
      };
      let n = lattice.cell_index(neighbor);
      if marks[n].is_none() && !visited[n] {
        visited[n] = true;
        worklist.push(n);
      }
    }
  }

  debug!(
    reached,
    total = lattice.cell_count(),
    "outside flood fill done"
  );

  marks
    .iter()
    .zip(&visited)
    .map(|(mark, &outside)| match mark {
      Some(t) => *t,
      None if outside => CellType::Outside,
      None => CellType::Inside,
    })
    .collect()
}

#[cfg(test)]
#[path = "flood_test.rs"]
mod flood_test;
