//! GeoNames records and a latitude/longitude nearest-neighbor index over them.

mod index;
mod record;

pub use index::GeoNamesIndex;
pub use record::{validate, FeatureClass, GeoName, NUM_FIELDS};
