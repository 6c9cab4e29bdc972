#![doc = include_str!("../README.md")]

mod error;
pub mod geometry;
pub mod kdtree;
mod r#type;

pub use error::{KdIndexError, Result};
pub use geometry::{squared_distance, HyperRect, Point};
pub use kdtree::{KDTree, KDTreeBuilder};
pub use r#type::Coordinate;

#[cfg(test)]
pub(crate) mod test;
