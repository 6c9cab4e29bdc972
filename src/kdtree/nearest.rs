//! Branch-and-bound nearest-neighbor search.

use geo_traits::CoordTrait;

use crate::error::{check_dimension, KdIndexError, Result};
use crate::geometry::{sq_dist, Point};
use crate::kdtree::traversal::Node;
use crate::kdtree::KDTree;
use crate::r#type::Coordinate;

/// A point found in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, N: Coordinate> {
    /// The insertion index of the point, i.e. the value returned by
    /// [`KDTreeBuilder::add`][crate::kdtree::KDTreeBuilder::add].
    pub index: usize,
    /// The point itself, as stored in the tree.
    pub point: &'a Point<N>,
}

/// The outcome of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestResult<'a, N: Coordinate> {
    /// The point of the tree closest to the target, or `None` for an empty tree.
    pub neighbor: Option<Neighbor<'a, N>>,
    /// Squared euclidean distance from the target to `neighbor`; infinite when there is none.
    pub distance_squared: N,
    /// The number of tree nodes examined by the search.
    pub nodes_visited: usize,
}

impl<N: Coordinate> NearestResult<'_, N> {
    fn none() -> Self {
        Self {
            neighbor: None,
            distance_squared: N::infinity(),
            nodes_visited: 0,
        }
    }
}

impl<N: Coordinate> KDTree<N> {
    /// Find the point in the tree nearest to `target`.
    ///
    /// Ties are resolved in favor of the point found first: at every node the nearer subtree is
    /// searched before the pivot, and the pivot before the farther subtree.
    ///
    /// Fails with [`KdIndexError::InvalidDimension`] if `target` does not match the dimension of
    /// the tree. Querying an empty tree is not an error: it returns no neighbor, an infinite
    /// distance and zero visited nodes.
    pub fn nearest(&self, target: &[N]) -> Result<NearestResult<'_, N>> {
        if let Some(dim) = self.dim {
            check_dimension(dim, target.len())?;
        }
        if target.iter().any(|c| c.is_nan()) {
            return Err(KdIndexError::General(
                "Query target has a NaN coordinate.".to_string(),
            ));
        }
        Ok(search(self.root(), target))
    }

    /// Find the point in the tree nearest to `coord`.
    ///
    /// See [`nearest`][Self::nearest].
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<NearestResult<'_, N>> {
        self.nearest(&Point::from_coord(coord))
    }
}

/// A pending step of the search.
enum Step<'a, N: Coordinate> {
    /// Count the node and descend into the child on the target's side of the pivot.
    Enter(Node<'a, N>),
    /// The nearer child has been searched: check the pivot, then the farther child unless the
    /// splitting hyperplane is beyond the best distance.
    Leave(Node<'a, N>),
}

/// Search the tree below `root`, nearer side first.
///
/// A child's region is only narrowed from its parent's once the search descends into it.
fn search<'a, N: Coordinate>(root: Option<Node<'a, N>>, target: &[N]) -> NearestResult<'a, N> {
    let mut best = NearestResult::none();
    let mut stack: Vec<Step<'a, N>> = root.into_iter().map(Step::Enter).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                best.nodes_visited += 1;
                let nearer = if target[node.split()] <= node.split_value() {
                    node.left_child()
                } else {
                    node.right_child()
                };
                // Note: pushed in backwards order to what gets popped
                stack.push(Step::Leave(node));
                stack.extend(nearer.map(Step::Enter));
            }
            Step::Leave(node) => {
                // the pivot is a candidate whether or not the far side gets pruned. The first
                // candidate is always taken, even when its distance overflows to infinity.
                let pivot_dist_sq = sq_dist(node.point(), target);
                if best.neighbor.is_none() || pivot_dist_sq < best.distance_squared {
                    best.neighbor = Some(Neighbor {
                        index: node.index(),
                        point: node.point(),
                    });
                    best.distance_squared = pivot_dist_sq;
                }

                // squared distance from the target to the splitting hyperplane
                let split = node.split();
                let pivot = node.split_value();
                let d = pivot - target[split];
                if d * d <= best.distance_squared {
                    let further = if target[split] <= pivot {
                        node.right_child()
                    } else {
                        node.left_child()
                    };
                    stack.extend(further.map(Step::Enter));
                }
            }
        }
    }

    best
}
