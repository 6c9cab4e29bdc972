//! Utilities to traverse the KDTree structure.

use std::fmt;

use crate::geometry::{HyperRect, Point};
use crate::kdtree::index::KdNode;
use crate::r#type::Coordinate;

/// A view onto a node of a [`KDTree`][crate::kdtree::KDTree], together with the region of space
/// it covers.
///
/// The region of the root is the tree's bounding box. Each child's region is the parent's region
/// clipped at the parent's pivot along the parent's split axis. Every child owns its own copy of the
/// region, so narrowing one never affects its parent or sibling.
#[derive(Clone)]
pub struct Node<'a, N: Coordinate> {
    nodes: &'a [KdNode<N>],
    id: usize,
    region: HyperRect<N>,
}

impl<N: Coordinate> fmt::Debug for Node<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("index", &self.index())
            .field("point", self.point())
            .field("split", &self.split())
            .field("region", &self.region)
            .finish()
    }
}

impl<'a, N: Coordinate> Node<'a, N> {
    pub(crate) fn new(nodes: &'a [KdNode<N>], id: usize, region: HyperRect<N>) -> Self {
        Self { nodes, id, region }
    }

    #[inline]
    fn node(&self) -> &'a KdNode<N> {
        &self.nodes[self.id]
    }

    /// The pivot point stored at this node.
    #[inline]
    pub fn point(&self) -> &'a Point<N> {
        &self.node().point
    }

    /// The insertion index of the pivot point.
    #[inline]
    pub fn index(&self) -> usize {
        self.node().index
    }

    /// The axis this node partitions its subtree on.
    #[inline]
    pub fn split(&self) -> usize {
        self.node().split
    }

    /// The pivot coordinate along [`split`][Self::split].
    #[inline]
    pub fn split_value(&self) -> N {
        let node = self.node();
        node.point[node.split]
    }

    /// The region of space this node's subtree lies in.
    #[inline]
    pub fn region(&self) -> &HyperRect<N> {
        &self.region
    }

    /// Split this node's region at the pivot into the `(left, right)` child regions.
    #[inline]
    pub fn child_regions(&self) -> (HyperRect<N>, HyperRect<N>) {
        self.region.split(self.split(), self.split_value())
    }

    /// The child node holding points with `[split] <= pivot[split]`.
    ///
    /// Note that this **does not include** the pivot of the current node.
    pub fn left_child(&self) -> Option<Node<'a, N>> {
        let left = self.node().left?;
        Some(Node::new(
            self.nodes,
            left,
            self.region.with_max(self.split(), self.split_value()),
        ))
    }

    /// The child node holding points with `[split] >= pivot[split]`.
    ///
    /// Note that this **does not include** the pivot of the current node.
    pub fn right_child(&self) -> Option<Node<'a, N>> {
        let right = self.node().right?;
        Some(Node::new(
            self.nodes,
            right,
            self.region.with_min(self.split(), self.split_value()),
        ))
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
