//! An implementation of an immutable, balanced 3-D k-d tree.

#![warn(missing_docs)]

mod builder;
mod index;
mod search;
mod r#trait;
pub mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDNode, KDTree};
pub use r#trait::IndexablePoint;
pub use search::Neighbor;
