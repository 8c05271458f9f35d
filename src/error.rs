use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoNamesError {
    #[error("Invalid GeoNames record: expected {expected} fields, found {found}")]
    InvalidRecord { expected: usize, found: usize },

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid feature class code: {0:?}")]
    InvalidFeatureClass(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Axis selector {0} out of range, expected 0, 1 or 2")]
    InvalidAxis(usize),
}

pub type Result<T> = std::result::Result<T, GeoNamesError>;
