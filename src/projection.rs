//! Projection of latitude/longitude onto the unit sphere.
//!
//! Euclidean distance between projected points is the chord length through the sphere, which
//! grows monotonically with great-circle distance. Unlike a flat lat/lon metric it has no seam at
//! the antimeridian and no distortion near the poles.

use crate::r#type::IndexableNum;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Project a latitude/longitude pair, in decimal degrees, onto the unit sphere.
///
/// No range checking is performed. Out-of-range degrees still produce a point on the sphere.
#[inline]
pub fn project<N: IndexableNum>(latitude: N, longitude: N) -> [N; 3] {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

/// Squared Euclidean distance between two points in 3-D.
#[inline]
pub fn squared_distance<N: IndexableNum>(a: &[N; 3], b: &[N; 3]) -> N {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Convert a squared chord length on the unit sphere into a great-circle distance in kilometres.
pub fn squared_chord_to_km(squared_chord: f64) -> f64 {
    // Chord c = 2 sin(theta / 2). Clamp rounding noise just above the antipodal chord.
    let half_chord = (squared_chord.max(0.0).sqrt() / 2.0).min(1.0);
    2.0 * half_chord.asin() * EARTH_RADIUS_KM
}

/// Convert a great-circle distance in kilometres into a squared chord length on the unit sphere.
///
/// Distances of half the circumference or more cover the whole sphere and return infinity, since
/// the computed squared chord of an antipodal pair may round above 4.
pub fn km_to_squared_chord(km: f64) -> f64 {
    let theta = km.max(0.0) / EARTH_RADIUS_KM;
    if theta >= std::f64::consts::PI {
        return f64::INFINITY;
    }
    let chord = 2.0 * (theta / 2.0).sin();
    chord * chord
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn projected_points_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let lat: f64 = rng.gen_range(-90.0..=90.0);
            let lon: f64 = rng.gen_range(-180.0..=180.0);
            let p = project(lat, lon);
            let norm = squared_distance(&p, &[0.0, 0.0, 0.0]);
            assert!((norm - 1.0).abs() < 1e-12, "{lat} {lon} -> {norm}");
        }
    }

    #[test]
    fn cardinal_points() {
        let origin = project(0.0f64, 0.0);
        assert!((origin[0] - 1.0).abs() < 1e-15);
        assert!(origin[1].abs() < 1e-15);
        assert!(origin[2].abs() < 1e-15);

        let north = project(90.0f64, 123.0);
        assert!((north[2] - 1.0).abs() < 1e-15);

        let east = project(0.0f32, 90.0);
        assert!((east[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn antimeridian_neighbours_are_close() {
        let west = project(10.0f64, 179.9);
        let east = project(10.0f64, -179.9);
        let d2 = squared_distance(&west, &east);
        assert!(d2 < 1e-5, "{d2}");

        let km = squared_chord_to_km(d2);
        assert!(km > 21.0 && km < 23.0, "{km}");
    }

    #[test]
    fn poles_collapse_longitude() {
        let a = project(89.999f64, -170.0);
        let b = project(89.999f64, 10.0);
        assert!(squared_chord_to_km(squared_distance(&a, &b)) < 0.5);
    }

    #[test]
    fn chord_km_conversions_round_trip() {
        for km in [0.0, 1.0, 150.0, 5000.0, 15000.0] {
            let back = squared_chord_to_km(km_to_squared_chord(km));
            assert!((back - km).abs() < 1e-6, "{km} -> {back}");
        }
        assert_eq!(km_to_squared_chord(1e9), f64::INFINITY);
        assert_eq!(km_to_squared_chord(20_016.0), f64::INFINITY);
        assert!(km_to_squared_chord(20_000.0) < 4.0);
        assert!(squared_chord_to_km(4.0 + 1e-12).is_finite());
    }
}
