use std::fmt;
use std::str::FromStr;

use crate::error::{GeoNamesError, Result};
use crate::kdtree::IndexablePoint;
use crate::projection::{self, project};
use crate::r#type::Axis;

/// Number of tab-delimited fields in a GeoNames dump record.
pub const NUM_FIELDS: usize = 19;

// Field positions within a record.
const GEONAME_ID: usize = 0;
const NAME: usize = 1;
const ASCII_NAME: usize = 2;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const FEATURE_CLASS: usize = 6;
const FEATURE_CODE: usize = 7;
const COUNTRY_CODE: usize = 8;
const POPULATION: usize = 14;
const TIMEZONE: usize = 17;

/// GeoNames feature classes. See <http://www.geonames.org/export/codes.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureClass {
    /// Country, state, region (`A`)
    Country,
    /// City, village (`P`)
    City,
    /// Stream, lake (`H`)
    WaterBody,
    /// Park, area (`L`)
    LandArea,
    /// Road, railroad (`R`)
    TransportRoute,
    /// Spot, building, farm (`S`)
    Facility,
    /// Mountain, hill, rock (`T`)
    GeographicLandmark,
    /// Undersea (`U`)
    UnderseaLandmark,
    /// Forest, heath (`V`)
    Vegetation,
}

impl FeatureClass {
    /// Parse a single-letter feature class code.
    pub fn from_code(code: &str) -> Result<Self> {
        let mut chars = code.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(GeoNamesError::InvalidFeatureClass(code.to_string()));
        };
        let class = match c {
            'A' => FeatureClass::Country,
            'P' => FeatureClass::City,
            'H' => FeatureClass::WaterBody,
            'L' => FeatureClass::LandArea,
            'R' => FeatureClass::TransportRoute,
            'S' => FeatureClass::Facility,
            'T' => FeatureClass::GeographicLandmark,
            'U' => FeatureClass::UnderseaLandmark,
            'V' => FeatureClass::Vegetation,
            _ => return Err(GeoNamesError::InvalidFeatureClass(code.to_string())),
        };
        Ok(class)
    }

    /// The single-letter code of this feature class.
    pub fn code(self) -> char {
        match self {
            FeatureClass::Country => 'A',
            FeatureClass::City => 'P',
            FeatureClass::WaterBody => 'H',
            FeatureClass::LandArea => 'L',
            FeatureClass::TransportRoute => 'R',
            FeatureClass::Facility => 'S',
            FeatureClass::GeographicLandmark => 'T',
            FeatureClass::UnderseaLandmark => 'U',
            FeatureClass::Vegetation => 'V',
        }
    }
}

impl fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One geographic record from the GeoNames database.
///
/// The unit-sphere position is computed once at construction. Only the position takes part in
/// indexing; the remaining attributes are carried along for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoName {
    geoname_id: u64,
    name: String,
    ascii_name: String,
    latitude: f64,
    longitude: f64,
    feature_class: Option<FeatureClass>,
    feature_code: String,
    country_code: String,
    population: u64,
    timezone: String,
    position: [f64; 3],
}

impl GeoName {
    /// Create a named location from a coordinate pair in decimal degrees.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        validate(latitude, longitude)?;
        let name = name.into();
        Ok(Self {
            ascii_name: name.clone(),
            name,
            ..Self::unchecked(latitude, longitude)
        })
    }

    /// Create an unnamed location from a coordinate pair in decimal degrees.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Result<Self> {
        validate(latitude, longitude)?;
        Ok(Self::unchecked(latitude, longitude))
    }

    /// A query location. Out-of-range coordinates are projected as-is.
    pub(crate) fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            geoname_id: 0,
            name: String::new(),
            ascii_name: String::new(),
            latitude,
            longitude,
            feature_class: None,
            feature_code: String::new(),
            country_code: String::new(),
            population: 0,
            timezone: String::new(),
            position: project(latitude, longitude),
        }
    }

    /// Set the ISO-3166 two-letter country code.
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    /// Set the feature class.
    pub fn with_feature_class(mut self, feature_class: FeatureClass) -> Self {
        self.feature_class = Some(feature_class);
        self
    }

    pub fn geoname_id(&self) -> u64 {
        self.geoname_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ascii_name(&self) -> &str {
        &self.ascii_name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn feature_class(&self) -> Option<FeatureClass> {
        self.feature_class
    }

    pub fn feature_code(&self) -> &str {
        &self.feature_code
    }

    /// ISO-3166 two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The location projected onto the unit sphere.
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Great-circle distance to another location in kilometres, on a spherical Earth.
    pub fn distance_km(&self, other: &GeoName) -> f64 {
        projection::squared_chord_to_km(self.squared_distance(other))
    }
}

impl fmt::Display for GeoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl IndexablePoint for GeoName {
    type Num = f64;

    #[inline]
    fn axis_value(&self, axis: Axis) -> f64 {
        self.position[axis.index()]
    }

    #[inline]
    fn squared_distance(&self, other: &Self) -> f64 {
        projection::squared_distance(&self.position, &other.position)
    }
}

impl FromStr for GeoName {
    type Err = GeoNamesError;

    /// Parse one tab-delimited line of a GeoNames dump.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() != NUM_FIELDS {
            return Err(GeoNamesError::InvalidRecord {
                expected: NUM_FIELDS,
                found: fields.len(),
            });
        }

        let latitude = parse_number::<f64>("latitude", fields[LATITUDE])?;
        let longitude = parse_number::<f64>("longitude", fields[LONGITUDE])?;
        validate(latitude, longitude)?;

        let population = match fields[POPULATION] {
            "" => 0,
            value => parse_number::<u64>("population", value)?,
        };

        Ok(Self {
            geoname_id: parse_number("geonameid", fields[GEONAME_ID])?,
            name: fields[NAME].to_string(),
            ascii_name: fields[ASCII_NAME].to_string(),
            latitude,
            longitude,
            feature_class: Some(FeatureClass::from_code(fields[FEATURE_CLASS])?),
            feature_code: fields[FEATURE_CODE].to_string(),
            country_code: fields[COUNTRY_CODE].to_string(),
            population,
            timezone: fields[TIMEZONE].to_string(),
            position: project(latitude, longitude),
        })
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| GeoNamesError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Reject coordinates that are not finite or lie outside the valid degree ranges.
pub fn validate(latitude: f64, longitude: f64) -> Result<()> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);
    if valid {
        Ok(())
    } else {
        Err(GeoNamesError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}

#[cfg(feature = "use-geo_0_31")]
mod geo_interop {
    use geo_0_31::algorithm::{Distance, Haversine};
    use geo_0_31::Point;

    use super::GeoName;

    impl From<&GeoName> for Point<f64> {
        fn from(value: &GeoName) -> Self {
            Point::new(value.longitude, value.latitude)
        }
    }

    impl GeoName {
        /// Haversine distance to another location in metres.
        pub fn haversine_distance(&self, other: &GeoName) -> f64 {
            Haversine.distance(Point::from(self), Point::from(other))
        }
    }
}
