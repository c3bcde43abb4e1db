//! Pure-Rust WGS84 ↔ Web Mercator (EPSG:3857) conversion.
//!
//! Spherical Mercator as used by web map tiles. Zone data arrives as
//! lon/lat and is reprojected once at fetch time; position fixes are
//! reprojected at ingest. No external C dependencies (no libproj).

/// Sphere radius used by the Web Mercator projection (m)
const R: f64 = 6_378_137.0;

/// Latitude bound of the square Web Mercator world.
///
/// Latitudes beyond this are clamped; the projection diverges at the
/// poles.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Easting/northing extent of the projected world (m)
pub const WORLD_EXTENT: f64 = R * std::f64::consts::PI;

/// Project WGS84 (longitude, latitude) in degrees to EPSG:3857 (x, y)
/// in meters.
pub fn from_lon_lat(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = R * lon.to_radians();
    let y = R * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
        .tan()
        .ln();
    (x, y)
}

/// Unproject EPSG:3857 (x, y) in meters back to WGS84 (longitude,
/// latitude) in degrees.
pub fn to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / R).to_degrees();
    let lat = (2.0 * (y / R).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let (x, y) = from_lon_lat(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian_extent() {
        let (x, _) = from_lon_lat(180.0, 0.0);
        assert!((x - WORLD_EXTENT).abs() < 1e-6);
        let (x, _) = from_lon_lat(-180.0, 0.0);
        assert!((x + WORLD_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        // Paris
        let (lon, lat) = (2.3488, 48.8534);
        let (x, y) = from_lon_lat(lon, lat);
        let (lon2, lat2) = to_lon_lat(x, y);
        assert!((lon - lon2).abs() < 1e-9);
        assert!((lat - lat2).abs() < 1e-9);
    }

    #[test]
    fn test_polar_latitude_clamped() {
        let clamped = from_lon_lat(0.0, 90.0);
        let bound = from_lon_lat(0.0, MAX_LATITUDE);
        assert_eq!(clamped, bound);
        assert!(clamped.1.is_finite());
    }

    #[test]
    fn test_northern_hemisphere_positive_y() {
        let (_, y) = from_lon_lat(2.3488, 48.8534);
        assert!(y > 0.0);
        let (_, y) = from_lon_lat(2.3488, -48.8534);
        assert!(y < 0.0);
    }
}
