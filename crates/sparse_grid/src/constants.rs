//! Hexahedron topology tables and hierarchy interpolation constants.
//!
//! # Corner Numbering
//!
//! Every hexahedron in this crate (regular lattice cells, sparse cells,
//! coarse and fine levels) numbers its corners with the binary ZYX scheme:
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Fine Point Block
//!
//! A coarse cell covers 2×2×2 fine cells, i.e. a 3×3×3 block of fine points.
//! Block positions are numbered `x + 3 * y + 9 * z` with `x, y, z ∈ {0, 1, 2}`:
//!
//! ```text
//!  z = 0 layer        z = 1 layer        z = 2 layer
//!  6 ─ 7 ─ 8          15 ─ 16 ─ 17       24 ─ 25 ─ 26
//!  │   │   │          │    │    │        │    │    │
//!  3 ─ 4 ─ 5          12 ─ 13 ─ 14       21 ─ 22 ─ 23
//!  │   │   │          │    │    │        │    │    │
//!  0 ─ 1 ─ 2          9 ─ 10 ─ 11        18 ─ 19 ─ 20
//! ```

/// Corners per hexahedron.
pub const CORNER_COUNT: usize = 8;

/// Faces (and face directions) per hexahedron.
pub const FACE_COUNT: usize = 6;

/// Fine points inside one coarse cell (3×3×3).
pub const BLOCK_POINTS: usize = 27;

/// Lattice offsets of the 8 corners relative to the cell origin.
pub const CORNER_OFFSETS: [[usize; 3]; CORNER_COUNT] = [
  [0, 0, 0],
  [1, 0, 0],
  [0, 1, 0],
  [1, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [0, 1, 1],
  [1, 1, 1],
];

/// Face direction offsets: -X, +X, -Y, +Y, -Z, +Z.
///
/// Direction `d` and `d ^ 1` are opposite.
pub const FACE_OFFSETS: [[i64; 3]; FACE_COUNT] = [
  [-1, 0, 0], // -X
  [1, 0, 0],  // +X
  [0, -1, 0], // -Y
  [0, 1, 0],  // +Y
  [0, 0, -1], // -Z
  [0, 0, 1],  // +Z
];

/// Corner indices of each face, in the same order as [`FACE_OFFSETS`].
/// Corners are listed in cyclic order around the face.
pub const FACE_CORNERS: [[usize; 4]; FACE_COUNT] = [
  [0, 4, 6, 2], // -X
  [1, 3, 7, 5], // +X
  [0, 1, 5, 4], // -Y
  [2, 6, 7, 3], // +Y
  [0, 2, 3, 1], // -Z
  [4, 5, 7, 6], // +Z
];

/// Corner pairs of the 12 hexahedron edges.
///
/// Edges 0-3 run along X, 4-7 along Y, 8-11 along Z. The first corner is
/// always the one on the negative side.
pub const EDGE_CORNERS: [[usize; 2]; 12] = [
  [0, 1],
  [2, 3],
  [4, 5],
  [6, 7],
  [0, 2],
  [1, 3],
  [4, 6],
  [5, 7],
  [0, 4],
  [1, 5],
  [2, 6],
  [3, 7],
];

/// Stiffness and mass coefficient given to BOUNDARY cells when fill
/// weighting is enabled. INSIDE cells always get 1.0.
pub const BOUNDARY_FILL_COEF: f32 = 0.5;

/// Trilinear weight of each coarse corner at each of the 27 fine points of
/// the coarse cell's fine point block.
///
/// `WEIGHT27[corner][block_position]`. Every column sums to 1.
#[rustfmt::skip]
pub const WEIGHT27: [[f32; BLOCK_POINTS]; CORNER_COUNT] = [
  [
    1.0, 0.5, 0.0,  0.5, 0.25, 0.0,  0.0, 0.0, 0.0,
    0.5, 0.25, 0.0,  0.25, 0.125, 0.0,  0.0, 0.0, 0.0,
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.5, 1.0,  0.0, 0.25, 0.5,  0.0, 0.0, 0.0,
    0.0, 0.25, 0.5,  0.0, 0.125, 0.25,  0.0, 0.0, 0.0,
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.5, 0.25, 0.0,  1.0, 0.5, 0.0,
    0.0, 0.0, 0.0,  0.25, 0.125, 0.0,  0.5, 0.25, 0.0,
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.0, 0.25, 0.5,  0.0, 0.5, 1.0,
    0.0, 0.0, 0.0,  0.0, 0.125, 0.25,  0.0, 0.25, 0.5,
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
    0.5, 0.25, 0.0,  0.25, 0.125, 0.0,  0.0, 0.0, 0.0,
    1.0, 0.5, 0.0,  0.5, 0.25, 0.0,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
    0.0, 0.25, 0.5,  0.0, 0.125, 0.25,  0.0, 0.0, 0.0,
    0.0, 0.5, 1.0,  0.0, 0.25, 0.5,  0.0, 0.0, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
    0.0, 0.0, 0.0,  0.25, 0.125, 0.0,  0.5, 0.25, 0.0,
    0.0, 0.0, 0.0,  0.5, 0.25, 0.0,  1.0, 0.5, 0.0,
  ],
  [
    0.0, 0.0, 0.0,  0.0, 0.0, 0.0,  0.0, 0.0, 0.0,
    0.0, 0.0, 0.0,  0.0, 0.125, 0.25,  0.0, 0.25, 0.5,
    0.0, 0.0, 0.0,  0.0, 0.25, 0.5,  0.0, 0.5, 1.0,
  ],
];

/// Block position of each corner of each fine child cell.
///
/// `FINE_CORNER_IN_BLOCK[octant][corner]`, where `octant` uses the same
/// binary ZYX numbering as corners. Corner `c` of child `c` coincides with
/// coarse corner `c`.
pub const FINE_CORNER_IN_BLOCK: [[usize; CORNER_COUNT]; CORNER_COUNT] = [
  [0, 1, 3, 4, 9, 10, 12, 13],
  [1, 2, 4, 5, 10, 11, 13, 14],
  [3, 4, 6, 7, 12, 13, 15, 16],
  [4, 5, 7, 8, 13, 14, 16, 17],
  [9, 10, 12, 13, 18, 19, 21, 22],
  [10, 11, 13, 14, 19, 20, 22, 23],
  [12, 13, 15, 16, 21, 22, 24, 25],
  [13, 14, 16, 17, 22, 23, 25, 26],
];

/// Block position of coarse corner `c` (where its weight is 1).
#[inline]
pub const fn coarse_corner_in_block(corner: usize) -> usize {
  FINE_CORNER_IN_BLOCK[corner][corner]
}

/// Opposite face direction.
#[inline(always)]
pub const fn opposite_face(direction: usize) -> usize {
  direction ^ 1
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
