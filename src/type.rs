use std::fmt::Debug;

use num_traits::{Float, FromPrimitive};

use crate::GeoNamesError;

/// A trait for scalar types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only `f32` and `f64` are
/// supported, since points are projected onto the unit sphere.
pub trait IndexableNum:
    private::Sealed + Float + FromPrimitive + Debug + Default + Send + Sync + 'static
{
}

impl IndexableNum for f32 {}

impl IndexableNum for f64 {}

/// One of the three Cartesian axes used to split the k-d tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in splitting order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The splitting axis used at a given tree depth.
    #[inline]
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }

    /// Convert an axis selector into an [`Axis`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is not 0, 1 or 2. Use [`Axis::try_from`] for a fallible conversion.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match Self::try_from(index) {
            Ok(axis) => axis,
            Err(err) => panic!("{err}"),
        }
    }

    /// The position of this axis in a `[x, y, z]` triple.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The axis used one level further down the tree.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = GeoNamesError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(GeoNamesError::InvalidAxis(other)),
        }
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
