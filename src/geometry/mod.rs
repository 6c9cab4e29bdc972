//! Geometric primitives shared by the index: points, distances and bounding boxes.

mod point;
mod rect;

pub use point::{squared_distance, Point};
pub(crate) use point::sq_dist;
pub use rect::HyperRect;
