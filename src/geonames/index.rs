use geo_traits::CoordTrait;

use crate::error::Result;
use crate::geonames::GeoName;
use crate::kdtree::{KDTree, KDTreeBuilder};
use crate::projection::km_to_squared_chord;

/// A nearest-neighbor index over [`GeoName`] records, queried by latitude and longitude.
///
/// The index is immutable. To pick up new records, build a new index and swap it in, e.g. behind
/// an `Arc`.
#[derive(Debug, Clone)]
pub struct GeoNamesIndex {
    tree: KDTree<GeoName>,
}

impl GeoNamesIndex {
    /// Build an index from already validated records.
    pub fn new(records: impl IntoIterator<Item = GeoName>) -> Self {
        let builder: KDTreeBuilder<GeoName> = records.into_iter().collect();
        Self {
            tree: builder.finish(),
        }
    }

    /// Parse tab-delimited GeoNames lines and build an index from them.
    ///
    /// Blank lines are ignored. When `lenient` is set, malformed records are logged and skipped;
    /// otherwise the first malformed record is returned as an error.
    pub fn from_records<'a>(lines: impl IntoIterator<Item = &'a str>, lenient: bool) -> Result<Self> {
        let mut builder = KDTreeBuilder::new();
        let mut rejected = 0usize;

        for (line_number, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<GeoName>() {
                Ok(record) => {
                    builder.add(record);
                }
                Err(err) if lenient => {
                    log::warn!("skipping record on line {}: {}", line_number + 1, err);
                    rejected += 1;
                }
                Err(err) => return Err(err),
            }
        }

        log::debug!(
            "parsed {} GeoNames records, rejected {}",
            builder.len(),
            rejected
        );

        Ok(Self {
            tree: builder.finish(),
        })
    }

    /// The number of records in this index.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if this index holds no records.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying k-d tree.
    pub fn tree(&self) -> &KDTree<GeoName> {
        &self.tree
    }

    /// The record closest to the given location.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&GeoName> {
        let query = GeoName::unchecked(latitude, longitude);
        self.tree.nearest(&query).map(|found| found.point)
    }

    /// The record closest to the given coordinate, read as `x = longitude, y = latitude`.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = f64>) -> Option<&GeoName> {
        self.nearest(coord.y(), coord.x())
    }

    /// The `k` records closest to the given location, nearest first.
    pub fn nearest_k(&self, latitude: f64, longitude: f64, k: usize) -> Vec<&GeoName> {
        let query = GeoName::unchecked(latitude, longitude);
        self.tree
            .nearest_k(&query, k)
            .into_iter()
            .map(|found| found.point)
            .collect()
    }

    /// All records within `km` kilometres great-circle distance of the given location, nearest
    /// first. A negative or NaN radius matches nothing.
    pub fn within_km(&self, latitude: f64, longitude: f64, km: f64) -> Vec<&GeoName> {
        if !(km >= 0.0) {
            return vec![];
        }
        let query = GeoName::unchecked(latitude, longitude);
        self.tree
            .within(&query, km_to_squared_chord(km))
            .into_iter()
            .map(|found| found.point)
            .collect()
    }
}

impl From<KDTree<GeoName>> for GeoNamesIndex {
    fn from(tree: KDTree<GeoName>) -> Self {
        Self { tree }
    }
}
