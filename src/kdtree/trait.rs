use std::cmp::Ordering;

use num_traits::Zero;

use crate::projection;
use crate::r#type::{Axis, IndexableNum};

/// A point that can be stored in a [`KDTree`][crate::kdtree::KDTree].
///
/// Implementors expose one coordinate per [`Axis`]. The tree only ever compares points through
/// these methods, so any payload may ride along with the coordinates.
pub trait IndexablePoint: Send + Sync {
    /// The scalar type of each coordinate.
    type Num: IndexableNum;

    /// The coordinate of this point on the given axis.
    fn axis_value(&self, axis: Axis) -> Self::Num;

    /// Squared distance between two points measured along one axis only.
    ///
    /// This is the squared distance from `other` to the splitting plane through `self`.
    #[inline]
    fn axis_squared_distance(&self, other: &Self, axis: Axis) -> Self::Num {
        let d = self.axis_value(axis) - other.axis_value(axis);
        d * d
    }

    /// Full squared Euclidean distance between two points.
    #[inline]
    fn squared_distance(&self, other: &Self) -> Self::Num {
        Axis::ALL
            .iter()
            .fold(<Self::Num as Zero>::zero(), |acc, &axis| {
                acc + self.axis_squared_distance(other, axis)
            })
    }

    /// Order two points by their coordinate on the given axis.
    ///
    /// NaN coordinates compare as equal; they must be rejected before points enter a tree.
    #[inline]
    fn axis_cmp(&self, other: &Self, axis: Axis) -> Ordering {
        self.axis_value(axis)
            .partial_cmp(&other.axis_value(axis))
            .unwrap_or(Ordering::Equal)
    }
}

impl<N: IndexableNum> IndexablePoint for [N; 3] {
    type Num = N;

    #[inline]
    fn axis_value(&self, axis: Axis) -> N {
        self[axis.index()]
    }

    #[inline]
    fn squared_distance(&self, other: &Self) -> N {
        projection::squared_distance(self, other)
    }
}
