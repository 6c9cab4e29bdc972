use crate::error::{check_dimension, KdIndexError, Result};
use crate::geometry::Point;
use crate::r#type::Coordinate;

/// A k-dimensional axis-aligned bounding box.
///
/// `Clone` is a deep copy: the clone owns its own corners and can be narrowed without affecting the
/// original. The narrowing methods ([`split`][Self::split], [`with_min`][Self::with_min],
/// [`with_max`][Self::with_max]) never mutate `self`.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperRect<N: Coordinate> {
    min: Point<N>,
    max: Point<N>,
}

impl<N: Coordinate> HyperRect<N> {
    /// Create a box from its two corners.
    ///
    /// The corners must have the same, non-zero, number of coordinates and `min[i] <= max[i]` must
    /// hold on every axis.
    pub fn new(min: impl Into<Point<N>>, max: impl Into<Point<N>>) -> Result<Self> {
        let min = min.into();
        let max = max.into();
        check_dimension(min.dim(), max.dim())?;
        if min.dim() == 0 {
            return Err(KdIndexError::General(
                "Bounding box must have at least one dimension.".to_string(),
            ));
        }
        for (axis, (lo, hi)) in min.iter().zip(max.iter()).enumerate() {
            // also rejects NaN on either side
            if !(lo <= hi) {
                return Err(KdIndexError::General(format!(
                    "Invalid bounding box on axis {}: min {:?} is not <= max {:?}.",
                    axis, lo, hi
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// The smallest box enclosing all `points`, or `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [N]>) -> Result<Option<Self>> {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Ok(None);
        };
        let mut min = first.to_vec();
        let mut max = first.to_vec();
        for point in points {
            check_dimension(min.len(), point.len())?;
            for (axis, &c) in point.iter().enumerate() {
                if c < min[axis] {
                    min[axis] = c;
                }
                if c > max[axis] {
                    max[axis] = c;
                }
            }
        }
        Self::new(min, max).map(Some)
    }

    /// The number of dimensions of this box.
    #[inline]
    pub fn dim(&self) -> usize {
        self.min.dim()
    }

    /// The lower corner of this box.
    #[inline]
    pub fn min(&self) -> &Point<N> {
        &self.min
    }

    /// The upper corner of this box.
    #[inline]
    pub fn max(&self) -> &Point<N> {
        &self.max
    }

    /// Returns `true` if `point` lies inside this box, boundary included.
    ///
    /// A point of the wrong dimension is never contained.
    pub fn contains(&self, point: &[N]) -> bool {
        point.len() == self.dim()
            && point
                .iter()
                .zip(self.min.iter().zip(self.max.iter()))
                .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }

    /// A copy of this box with the lower bound on `axis` replaced by `value`.
    pub fn with_min(&self, axis: usize, value: N) -> Self {
        let mut narrowed = self.clone();
        narrowed.min.0[axis] = value;
        narrowed
    }

    /// A copy of this box with the upper bound on `axis` replaced by `value`.
    pub fn with_max(&self, axis: usize, value: N) -> Self {
        let mut narrowed = self.clone();
        narrowed.max.0[axis] = value;
        narrowed
    }

    /// Split this box by the hyperplane `[axis] == value`.
    ///
    /// Returns the `(left, right)` halves: the left half ends at `value` and the right half starts
    /// at `value`. Both are independent copies.
    pub fn split(&self, axis: usize, value: N) -> (Self, Self) {
        (self.with_max(axis, value), self.with_min(axis, value))
    }
}
