#![doc = include_str!("../README.md")]

mod error;
pub mod geonames;
pub mod kdtree;
pub mod projection;
mod r#type;

pub use error::{GeoNamesError, Result};
pub use geonames::{FeatureClass, GeoName, GeoNamesIndex};
pub use r#type::{Axis, IndexableNum};
