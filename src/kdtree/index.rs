use crate::geometry::{HyperRect, Point};
use crate::kdtree::traversal::Node;
use crate::r#type::Coordinate;

/// A node of the tree: a pivot point, the axis it was split on, and the positions of its two
/// optional subtrees in the tree's node list.
///
/// Every point in `left` has `[split] <= pivot[split]` and every point in `right` has
/// `[split] >= pivot[split]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KdNode<N: Coordinate> {
    pub(crate) point: Point<N>,
    /// Insertion index of `point`
    pub(crate) index: usize,
    pub(crate) split: usize,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

/// An immutable k-d tree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or [`KDTree::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: Coordinate> {
    /// All nodes in pre-order; the root, if any, is at position 0.
    pub(crate) nodes: Vec<KdNode<N>>,
    pub(crate) bounds: Option<HyperRect<N>>,
    pub(crate) dim: Option<usize>,
}

impl<N: Coordinate> KDTree<N> {
    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The dimension of this tree.
    ///
    /// This is `None` only for an empty tree built without a bounding box.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// The bounding box the search starts from.
    pub fn bounds(&self) -> Option<&HyperRect<N>> {
        self.bounds.as_ref()
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, N>> {
        if self.nodes.is_empty() {
            return None;
        }
        let region = self.bounds.clone()?;
        Some(Node::new(&self.nodes, 0, region))
    }

    /// The number of levels in the tree. An empty tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = if self.nodes.is_empty() {
            vec![]
        } else {
            vec![(0, 1)]
        };
        while let Some((id, level)) = stack.pop() {
            depth = depth.max(level);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|left| (left, level + 1)));
            stack.extend(node.right.map(|right| (right, level + 1)));
        }
        depth
    }

    /// Iterate over `(insertion index, point)` pairs in pre-order.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            nodes: self.nodes.iter(),
        }
    }
}

/// Pre-order iterator over the points of a [`KDTree`].
#[derive(Debug, Clone)]
pub struct Iter<'a, N: Coordinate> {
    nodes: std::slice::Iter<'a, KdNode<N>>,
}

impl<'a, N: Coordinate> Iterator for Iter<'a, N> {
    type Item = (usize, &'a Point<N>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        Some((node.index, &node.point))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<N: Coordinate> ExactSizeIterator for Iter<'_, N> {}

impl<'a, N: Coordinate> IntoIterator for &'a KDTree<N> {
    type Item = (usize, &'a Point<N>);
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
