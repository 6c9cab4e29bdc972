use std::ops::Deref;

use geo_traits::CoordTrait;

use crate::error::{check_dimension, Result};
use crate::r#type::Coordinate;

/// A k-dimensional point.
///
/// The coordinates are owned, so cloning a `Point` always yields independent storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: Coordinate>(pub(crate) Vec<N>);

impl<N: Coordinate> Point<N> {
    /// Create a point from its coordinates.
    pub fn new(coords: Vec<N>) -> Self {
        Self(coords)
    }

    /// Copy the coordinates out of any [`CoordTrait`] implementation.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        let dim = coord.dim().size();
        Self((0..dim).map(|n| coord.nth_or_panic(n)).collect())
    }

    /// The number of coordinates of this point.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// The coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.0
    }

    /// Consume this point, returning its coordinates.
    pub fn into_inner(self) -> Vec<N> {
        self.0
    }

    /// The squared euclidean distance to `other`.
    pub fn squared_distance(&self, other: &[N]) -> Result<N> {
        squared_distance(&self.0, other)
    }

    pub(crate) fn has_nan(&self) -> bool {
        self.0.iter().any(|c| c.is_nan())
    }
}

impl<N: Coordinate> Deref for Point<N> {
    type Target = [N];

    fn deref(&self) -> &[N] {
        &self.0
    }
}

impl<N: Coordinate> AsRef<[N]> for Point<N> {
    fn as_ref(&self) -> &[N] {
        &self.0
    }
}

impl<N: Coordinate> From<Vec<N>> for Point<N> {
    fn from(value: Vec<N>) -> Self {
        Self(value)
    }
}

impl<N: Coordinate> From<&[N]> for Point<N> {
    fn from(value: &[N]) -> Self {
        Self(value.to_vec())
    }
}

impl<N: Coordinate, const D: usize> From<[N; D]> for Point<N> {
    fn from(value: [N; D]) -> Self {
        Self(value.to_vec())
    }
}

/// Returns the square of the euclidean distance between `p` and `q`.
///
/// Fails with [`InvalidDimension`][crate::KdIndexError::InvalidDimension] if the two points do not
/// have the same number of coordinates.
pub fn squared_distance<N: Coordinate>(p: &[N], q: &[N]) -> Result<N> {
    check_dimension(p.len(), q.len())?;
    Ok(sq_dist(p, q))
}

/// Squared distance without the dimension check. Callers must have validated the lengths.
#[inline]
pub(crate) fn sq_dist<N: Coordinate>(p: &[N], q: &[N]) -> N {
    debug_assert_eq!(p.len(), q.len());
    p.iter().zip(q).fold(N::zero(), |sum, (&a, &b)| {
        let d = a - b;
        sum + d * d
    })
}
