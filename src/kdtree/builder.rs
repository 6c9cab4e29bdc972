use std::cmp::Ordering;

use geo_traits::CoordTrait;

use crate::error::{check_dimension, KdIndexError, Result};
use crate::geometry::{HyperRect, Point};
use crate::kdtree::index::{KDTree, KdNode};
use crate::r#type::Coordinate;

/// How the builder treats the bounding box the tree is searched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Use the supplied box as is.
    ///
    /// If some point lies outside of it, the regions reported by traversal are wrong for that
    /// point's subtree.
    Trust,
    /// Check that every point lies inside the supplied box, failing with
    /// [`KdIndexError::BoundsViolation`] otherwise.
    Validate,
    /// Ignore any supplied box and use the smallest box enclosing the points.
    Compute,
}

/// A builder to create a [`KDTree`].
///
/// ```
/// use kd_index::kdtree::KDTreeBuilder;
/// use kd_index::HyperRect;
///
/// let bounds = HyperRect::<f64>::new([0., 0.], [10., 10.]).unwrap();
/// let mut builder = KDTreeBuilder::<f64>::with_bounds(bounds);
/// builder.add([2., 3.]).unwrap();
/// builder.add([5., 4.]).unwrap();
/// builder.add([9., 6.]).unwrap();
/// let tree = builder.finish().unwrap();
///
/// let result = tree.nearest(&[8., 5.]).unwrap();
/// assert_eq!(result.neighbor.unwrap().index, 2);
/// assert_eq!(result.distance_squared, 2.);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: Coordinate> {
    points: Vec<Point<N>>,
    bounds: Option<HyperRect<N>>,
    policy: BoundsPolicy,
    dim: Option<usize>,
}

impl<N: Coordinate> KDTreeBuilder<N> {
    /// Create a new builder whose bounding box is computed from the added points.
    pub fn new() -> Self {
        Self {
            points: vec![],
            bounds: None,
            policy: BoundsPolicy::Compute,
            dim: None,
        }
    }

    /// Create a new builder searching from the provided bounding box.
    ///
    /// Every added point is checked against `bounds` in [`finish`][Self::finish] unless another
    /// [`BoundsPolicy`] is set.
    pub fn with_bounds(bounds: HyperRect<N>) -> Self {
        Self {
            points: vec![],
            dim: Some(bounds.dim()),
            bounds: Some(bounds),
            policy: BoundsPolicy::Validate,
        }
    }

    /// Set how the bounding box is treated.
    pub fn bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the tree.
    ///
    /// This returns the insertion index, which provides a lookup back into the original data.
    /// [`KDTree::nearest`] reports this same index.
    ///
    /// The first point (or the bounding box, if one was given) fixes the dimension of the tree;
    /// later points of another dimension fail with [`KdIndexError::InvalidDimension`].
    pub fn add(&mut self, point: impl Into<Point<N>>) -> Result<usize> {
        let point = point.into();
        match self.dim {
            Some(dim) => check_dimension(dim, point.dim())?,
            None if point.dim() == 0 => {
                return Err(KdIndexError::General(
                    "Points must have at least one dimension.".to_string(),
                ))
            }
            None => {}
        }
        if point.has_nan() {
            return Err(KdIndexError::General(format!(
                "Point at insertion index {} has a NaN coordinate.",
                self.points.len()
            )));
        }

        self.dim = Some(point.dim());
        let index = self.points.len();
        self.points.push(point);
        Ok(index)
    }

    /// Add a point given by any [`CoordTrait`] implementation.
    #[inline]
    pub fn add_coord(&mut self, coord: &impl CoordTrait<T = N>) -> Result<usize> {
        self.add(Point::from_coord(coord))
    }

    /// Add points from a flat buffer of interleaved coordinates `[x0, y0, ..., x1, y1, ...]`.
    ///
    /// The stride is the dimension of the tree, so it must already be known from the bounding box
    /// or a previously added point.
    pub fn add_interleaved(&mut self, coords: &[N]) -> Result<()> {
        let dim = self.dim.ok_or_else(|| {
            KdIndexError::General(
                "Cannot add interleaved coordinates before the dimension is known.".to_string(),
            )
        })?;
        if coords.len() % dim != 0 {
            return Err(KdIndexError::General(format!(
                "Interleaved buffer of length {} is not a multiple of dimension {}.",
                coords.len(),
                dim
            )));
        }
        for point in coords.chunks_exact(dim) {
            self.add(point)?;
        }
        Ok(())
    }

    /// Consume this builder, partitioning the points into a [`KDTree`] ready for queries.
    pub fn finish(self) -> Result<KDTree<N>> {
        // without a supplied box there is nothing to trust or validate
        let bounds = match (self.policy, self.bounds) {
            (BoundsPolicy::Compute, bounds) | (_, bounds @ None) => {
                HyperRect::from_points(self.points.iter().map(|p| p.coords()))?.or(bounds)
            }
            (BoundsPolicy::Validate, Some(bounds)) => {
                if let Some(index) = self.points.iter().position(|p| !bounds.contains(p)) {
                    return Err(KdIndexError::BoundsViolation { index });
                }
                Some(bounds)
            }
            (BoundsPolicy::Trust, Some(bounds)) => Some(bounds),
        };

        let entries = self.points.into_iter().enumerate().collect();
        let nodes = match self.dim {
            Some(dim) => build(entries, dim),
            None => vec![],
        };

        Ok(KDTree {
            nodes,
            bounds,
            dim: self.dim,
        })
    }
}

impl<N: Coordinate> Default for KDTreeBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Coordinate> KDTree<N> {
    /// Build a tree from `points`, searched from `bounds`.
    ///
    /// Every point must lie inside `bounds`; use [`KDTreeBuilder`] for other
    /// [`BoundsPolicy`] choices.
    pub fn build<P: Into<Point<N>>>(
        points: impl IntoIterator<Item = P>,
        bounds: HyperRect<N>,
    ) -> Result<Self> {
        let mut builder = KDTreeBuilder::with_bounds(bounds);
        for point in points {
            builder.add(point)?;
        }
        builder.finish()
    }
}

/// Where a newly created node gets linked into its parent.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Left(usize),
    Right(usize),
}

/// Partition `entries` of `(insertion index, point)` into nodes laid out in pre-order, splitting
/// the root on axis 0 and cycling through the `dim` axes below it.
///
/// This uses an explicit stack of `(subset, split axis, parent slot)` so that degenerate inputs,
/// whose height grows with the number of points, cannot exhaust the call stack.
fn build<N: Coordinate>(entries: Vec<(usize, Point<N>)>, dim: usize) -> Vec<KdNode<N>> {
    let mut nodes = Vec::with_capacity(entries.len());
    let mut stack = vec![(entries, 0, Slot::Root)];

    while let Some((mut entries, split, slot)) = stack.pop() {
        if entries.is_empty() {
            continue;
        }

        // NaN coordinates are rejected on insertion
        entries
            .sort_by(|(_, a), (_, b)| a[split].partial_cmp(&b[split]).unwrap_or(Ordering::Equal));

        let m = median_index(&entries, split);
        let right = entries.split_off(m + 1);
        let Some((index, point)) = entries.pop() else {
            continue;
        };

        let id = push_node(&mut nodes, slot, point, index, split);
        let next = (split + 1) % dim;

        // Every remaining point equal to the pivot: each level would pick the last one as the
        // pivot and pass the rest on to the left, so lay out that chain without re-sorting.
        if right.is_empty() && entries.iter().all(|(_, p)| p == &nodes[id].point) {
            let mut parent = id;
            let mut split = next;
            while let Some((index, point)) = entries.pop() {
                parent = push_node(&mut nodes, Slot::Left(parent), point, index, split);
                split = (split + 1) % dim;
            }
            continue;
        }

        // Note: pushed in backwards order to what gets popped
        if !right.is_empty() {
            stack.push((right, next, Slot::Right(id)));
        }
        if !entries.is_empty() {
            stack.push((entries, next, Slot::Left(id)));
        }
    }

    nodes
}

/// Append a node and link it into `slot`, returning its position.
fn push_node<N: Coordinate>(
    nodes: &mut Vec<KdNode<N>>,
    slot: Slot,
    point: Point<N>,
    index: usize,
    split: usize,
) -> usize {
    let id = nodes.len();
    match slot {
        Slot::Root => {}
        Slot::Left(parent) => nodes[parent].left = Some(id),
        Slot::Right(parent) => nodes[parent].right = Some(id),
    }
    nodes.push(KdNode {
        point,
        index,
        split,
        left: None,
        right: None,
    });
    id
}

/// The middle index of sorted `entries`, moved forward past every following entry with the same
/// coordinate on `split`. Entries after the returned index are then all strictly greater.
fn median_index<N: Coordinate>(entries: &[(usize, Point<N>)], split: usize) -> usize {
    let m = entries.len() / 2;
    let d = entries[m].1[split];
    // entries are sorted, so the run equal to `d` ends where the first greater coordinate starts
    m + entries[m + 1..].partition_point(|(_, p)| p[split] == d)
}
