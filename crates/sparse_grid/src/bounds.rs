//! Axis-aligned bounding box for the regular lattice.

use glam::DVec3;

use crate::error::{GridError, GridResult};

/// Double-precision axis-aligned bounding box.
///
/// Defines the region covered by a regular lattice. A usable box has
/// `min < max` on every axis; zero-volume boxes are rejected by
/// [`BoundingBox::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl BoundingBox {
  /// Create a new box from min and max corners.
  ///
  /// No validation happens here; call [`BoundingBox::validate`] before
  /// building a lattice from it.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    Self { min, max }
  }

  /// Create a box from min/max arrays.
  pub fn from_arrays(min: [f64; 3], max: [f64; 3]) -> Self {
    Self::new(DVec3::from_array(min), DVec3::from_array(max))
  }

  /// Smallest box enclosing all points, or `None` for an empty slice.
  pub fn from_points(points: &[DVec3]) -> Option<Self> {
    let first = *points.first()?;
    let (min, max) = points
      .iter()
      .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    Some(Self { min, max })
  }

  /// Check that the box is finite with `min < max` on every axis.
  pub fn validate(&self) -> GridResult<()> {
    let finite = self.min.is_finite() && self.max.is_finite();
    if !finite || self.min.cmpge(self.max).any() {
      return Err(GridError::DegenerateBounds {
        min: self.min.to_array(),
        max: self.max.to_array(),
      });
    }
    Ok(())
  }

  /// True when the box encloses no volume.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.validate().is_err()
  }

  /// Check if this box overlaps with another (touching counts).
  #[inline]
  pub fn overlaps(&self, other: &BoundingBox) -> bool {
    self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
  }

  /// Check if this box contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Get the size of the box (max - min).
  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  /// Get the center of the box.
  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Approximate equality used when matching levels of a hierarchy.
  pub fn approx_eq(&self, other: &BoundingBox, epsilon: f64) -> bool {
    self.min.abs_diff_eq(other.min, epsilon) && self.max.abs_diff_eq(other.max, epsilon)
  }
}
