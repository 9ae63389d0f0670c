//! Error types for grid construction.

use thiserror::Error;

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while building a sparse grid.
///
/// Configuration errors ([`GridError::is_configuration`]) are recoverable: the
/// builder logs them and produces an empty grid. Hierarchy errors are returned
/// to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GridError {
  /// A resolution component is zero, or the lattice is too large to index.
  #[error("invalid resolution {0:?}: every component must be > 0 and the point count must fit in usize")]
  InvalidResolution([usize; 3]),

  /// The bounding box has zero volume or min > max on some axis.
  #[error("degenerate bounding box: min {min:?}, max {max:?}")]
  DegenerateBounds {
    /// Minimum corner.
    min: [f64; 3],
    /// Maximum corner.
    max: [f64; 3],
  },

  /// Cell width is non-positive or not finite.
  #[error("cell width must be positive, got {0}")]
  InvalidCellWidth(f64),

  /// Voxel size is non-positive on some axis.
  #[error("voxel size must be positive on every axis, got {0:?}")]
  InvalidVoxelSize([f64; 3]),

  /// The surface mesh has no triangles (and there is no voxel alternative).
  #[error("surface mesh is empty")]
  EmptyMesh,

  /// Voxel mask length does not match its declared dimensions.
  #[error("voxel mask holds {actual} values, dimensions {dims:?} need {expected}")]
  VoxelMaskSize {
    /// Declared mask dimensions.
    dims: [usize; 3],
    /// Expected value count.
    expected: usize,
    /// Actual value count.
    actual: usize,
  },

  /// Levels cannot be linked by 2×2×2 aggregation.
  #[error("incompatible hierarchy: {reason}")]
  IncompatibleHierarchy {
    /// Human readable explanation.
    reason: String,
  },

  /// Failed to parse a configuration document.
  #[error("failed to parse grid config: {0}")]
  ConfigParse(String),

  /// Failed to read a configuration file.
  #[error("failed to read grid config {path}: {message}")]
  ConfigIo {
    /// Path that was read.
    path: String,
    /// Underlying I/O error message.
    message: String,
  },
}

impl GridError {
  /// Shorthand for [`GridError::IncompatibleHierarchy`].
  pub fn incompatible(reason: impl Into<String>) -> Self {
    Self::IncompatibleHierarchy {
      reason: reason.into(),
    }
  }

  /// True for invalid-input errors that degrade to an empty grid.
  pub fn is_configuration(&self) -> bool {
    !matches!(
      self,
      Self::IncompatibleHierarchy { .. } | Self::ConfigParse(_) | Self::ConfigIo { .. }
    )
  }
}
