//! An implementation of an immutable k-dimensional K-D Tree with nearest-neighbor search.

#![warn(missing_docs)]

mod builder;
mod index;
mod nearest;
pub mod traversal;

pub use builder::{BoundsPolicy, KDTreeBuilder};
pub use index::{Iter, KDTree};
pub use nearest::{NearestResult, Neighbor};
pub use traversal::Node;
