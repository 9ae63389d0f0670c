use std::sync::Arc;

use super::*;
use crate::sparse::ExtractOptions;
use crate::test_utils::*;
use crate::types::CellType;

fn block(n: usize) -> SparseGrid {
  SparseGrid::extract(
    cube_lattice(n, n as f64),
    &vec![CellType::Inside; n * n * n],
    &ExtractOptions::default(),
  )
}

#[test]
fn test_empty_hierarchy() {
  let hierarchy = GridHierarchy::empty();
  assert_eq!(hierarchy.level_count(), 1);
  assert_eq!(hierarchy.top(), hierarchy.finest());
  assert!(hierarchy.top_grid().is_empty());
  assert_eq!(hierarchy.level(hierarchy.top()).kind(), LevelKind::Exposed);
  assert!(hierarchy.level(hierarchy.top()).link().is_none());
}

#[test]
fn test_push_coarser_links_levels() {
  let mut hierarchy = GridHierarchy::new(LevelStorage::Owned(block(4)), LevelKind::Virtual);
  let (coarse, link) = aggregate(hierarchy.top_grid(), &ExtractOptions::default()).unwrap();
  let top = hierarchy.push_coarser(coarse, link, LevelKind::Exposed);

  assert_eq!(hierarchy.level_count(), 2);
  assert_eq!(hierarchy.top(), top);
  assert_eq!(top.index(), 1);
  assert_eq!(hierarchy.level(top).finer(), Some(hierarchy.finest()));
  assert_eq!(hierarchy.level(hierarchy.finest()).coarser(), Some(top));
  assert!(hierarchy.level(top).link().is_some());
  assert_eq!(hierarchy.top_grid().cell_count(), 8);

  let ids: Vec<LevelId> = hierarchy.ids().collect();
  assert_eq!(ids, vec![hierarchy.finest(), top]);
  let kinds: Vec<LevelKind> = hierarchy.levels().map(Level::kind).collect();
  assert_eq!(kinds, vec![LevelKind::Virtual, LevelKind::Exposed]);
}

/// An external finer grid stays shared with the caller.
#[test]
fn test_shared_level_is_not_owned() {
  let external = Arc::new(block(2));
  let hierarchy = GridHierarchy::new(LevelStorage::Shared(external.clone()), LevelKind::External);
  let level = hierarchy.level(hierarchy.finest());
  assert!(!level.is_owned());
  assert_eq!(level.grid().cell_count(), 8);
  assert_eq!(Arc::strong_count(&external), 2);
}
