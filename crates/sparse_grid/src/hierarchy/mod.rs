//! Multi-resolution hierarchy of sparse grids.
//!
//! Levels live in an arena and refer to each other through [`LevelId`]
//! handles, ordered from finest (index 0) to coarsest (the exposed top
//! level).
//!
//! ```text
//!  LevelId(0)  finest    virtual (owned) or external (shared Arc)
//!      │  ▲
//!      ▼  │  HierarchyLink stored on the coarser level
//!  LevelId(1)
//!      │  ▲
//!      ▼  │
//!  LevelId(n)  top       exposed level returned to the caller
//! ```

pub mod aggregate;

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

pub use aggregate::aggregate;

use crate::sparse::SparseGrid;
use crate::types::{CellIndex, PointIndex};

/// Handle of a level inside a [`GridHierarchy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(usize);

impl LevelId {
  #[inline]
  pub fn index(self) -> usize {
    self.0
  }
}

/// Role of a level in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelKind {
  /// The level the build was asked for.
  Exposed,
  /// Internally built finer level.
  Virtual,
  /// Finer grid supplied by the caller.
  External,
}

/// Owned or shared storage of a level's grid.
#[derive(Clone, Debug)]
pub enum LevelStorage {
  Owned(SparseGrid),
  Shared(Arc<SparseGrid>),
}

impl Deref for LevelStorage {
  type Target = SparseGrid;

  fn deref(&self) -> &SparseGrid {
    match self {
      Self::Owned(grid) => grid,
      Self::Shared(grid) => grid.as_ref(),
    }
  }
}

/// Mapping between a coarse level and the next finer level.
///
/// Point weights are the trilinear coefficients of coarse corners at the
/// fine points of each coarse cell; per fine point they sum to 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchyLink {
  /// Coarse cell → its 8 fine children by octant.
  pub cube_map: Vec<[Option<CellIndex>; 8]>,
  /// Fine cell → coarse parent.
  pub inverse_cube_map: Vec<Option<CellIndex>>,
  /// Coarse point → (fine point → weight).
  pub point_weights: Vec<BTreeMap<PointIndex, f32>>,
  /// Fine point → (coarse point → weight).
  pub inverse_point_weights: Vec<BTreeMap<PointIndex, f32>>,
  /// Coarse point → fine point at the same position.
  pub coincident_points: Vec<Option<PointIndex>>,
  /// Fine point → coarse point at the same position.
  pub inverse_coincident_points: Vec<Option<PointIndex>>,
}

impl HierarchyLink {
  /// Children of a coarse cell that exist in the finer level.
  pub fn children(&self, coarse_cell: CellIndex) -> impl Iterator<Item = CellIndex> + '_ {
    self.cube_map[coarse_cell].iter().flatten().copied()
  }

  /// Parent of a fine cell.
  #[inline]
  pub fn parent(&self, fine_cell: CellIndex) -> Option<CellIndex> {
    self.inverse_cube_map[fine_cell]
  }

  /// Sum of the coarse weights of a fine point.
  pub fn weight_sum(&self, fine_point: PointIndex) -> f32 {
    self.inverse_point_weights[fine_point].values().sum()
  }
}

/// One level of the arena.
#[derive(Clone, Debug)]
pub struct Level {
  grid: LevelStorage,
  kind: LevelKind,
  finer: Option<LevelId>,
  coarser: Option<LevelId>,
  link: Option<HierarchyLink>,
}

impl Level {
  pub fn grid(&self) -> &SparseGrid {
    &self.grid
  }

  pub fn kind(&self) -> LevelKind {
    self.kind
  }

  /// True when the grid is owned by the arena.
  pub fn is_owned(&self) -> bool {
    matches!(self.grid, LevelStorage::Owned(_))
  }

  pub fn finer(&self) -> Option<LevelId> {
    self.finer
  }

  pub fn coarser(&self) -> Option<LevelId> {
    self.coarser
  }

  /// Link to the finer level, if there is one.
  pub fn link(&self) -> Option<&HierarchyLink> {
    self.link.as_ref()
  }
}

/// Arena of levels, finest first.
#[derive(Clone, Debug)]
pub struct GridHierarchy {
  levels: Vec<Level>,
}

impl GridHierarchy {
  /// Hierarchy starting at `grid` as its finest level.
  pub fn new(grid: LevelStorage, kind: LevelKind) -> Self {
    Self {
      levels: vec![Level {
        grid,
        kind,
        finer: None,
        coarser: None,
        link: None,
      }],
    }
  }

  /// Single empty exposed level.
  pub fn empty() -> Self {
    Self::new(LevelStorage::Owned(SparseGrid::empty()), LevelKind::Exposed)
  }

  /// Append a coarser level linked to the current top.
  pub fn push_coarser(&mut self, grid: SparseGrid, link: HierarchyLink, kind: LevelKind) -> LevelId {
    let finer = self.top();
    let id = LevelId(self.levels.len());
    self.levels[finer.0].coarser = Some(id);
    self.levels.push(Level {
      grid: LevelStorage::Owned(grid),
      kind,
      finer: Some(finer),
      coarser: None,
      link: Some(link),
    });
    id
  }

  /// Coarsest level.
  pub fn top(&self) -> LevelId {
    LevelId(self.levels.len() - 1)
  }

  pub fn finest(&self) -> LevelId {
    LevelId(0)
  }

  /// Grid of the exposed top level.
  pub fn top_grid(&self) -> &SparseGrid {
    self.grid(self.top())
  }

  pub fn level(&self, id: LevelId) -> &Level {
    &self.levels[id.0]
  }

  pub fn grid(&self, id: LevelId) -> &SparseGrid {
    self.levels[id.0].grid()
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  /// Level ids from finest to coarsest.
  pub fn ids(&self) -> impl Iterator<Item = LevelId> {
    (0..self.levels.len()).map(LevelId)
  }

  /// Levels from finest to coarsest.
  pub fn levels(&self) -> impl Iterator<Item = &Level> {
    self.levels.iter()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
