//! sparse_grid - Hierarchical sparse hexahedral grids
//!
//! This crate converts a closed surface mesh or a binary voxel volume into a
//! multi-resolution hexahedral lattice usable as a discretization for
//! deformable-body mechanics.
//!
//! # Features
//!
//! - **Region classification**: triangle/box separating axis test for
//!   meshes, center sampling with optional smoothing for voxel masks, and an
//!   outside flood fill from the lattice shell
//! - **Sparse extraction**: only INSIDE and BOUNDARY cells are kept, with
//!   deduplicated corner points, edges and quads
//! - **Hierarchy**: 2×2×2 aggregation with cube maps and trilinear point
//!   weights between levels, including virtual finer levels
//! - **Adjacency**: face neighbors per cell, incident cells/corners and
//!   edge neighbors per node
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use sparse_grid::{GridConfig, Resolution, SparseGridBuilder, SurfaceMesh};
//!
//! let mesh = SurfaceMesh::cuboid(DVec3::ZERO, DVec3::splat(10.0));
//! let config = GridConfig::new()
//!   .with_resolution(Resolution::splat(8))
//!   .with_virtual_finer_levels(1);
//!
//! let hierarchy = SparseGridBuilder::new(config).build(&mesh.into())?;
//! let grid = hierarchy.top_grid();
//! println!("{} hexahedra, {} points", grid.cell_count(), grid.point_count());
//! ```

pub mod adjacency;
pub mod bounds;
pub mod builder;
pub mod classify;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod hierarchy;
pub mod lattice;
pub mod source;
pub mod sparse;
pub mod stats;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used items
pub use adjacency::Adjacency;
pub use bounds::BoundingBox;
pub use builder::SparseGridBuilder;
pub use classify::{classify_mesh, classify_voxels};
pub use config::{BoundsConfig, GridConfig};
pub use coord::CellCoord;
pub use error::{GridError, GridResult};
pub use hierarchy::{GridHierarchy, HierarchyLink, Level, LevelId, LevelKind, LevelStorage};
pub use lattice::RegularLattice;
pub use source::{GridSource, SurfaceMesh, VoxelMask};
pub use sparse::{ExtractOptions, SparseGrid};
pub use stats::BuildStats;
pub use types::{CellIndex, CellType, CornerRef, Edge, Hexahedron, PointIndex, Quad, Resolution};
