//! Geographic to planar-metric conversion.
//!
//! Real-world lengths are measured in spherical Web Mercator (EPSG:3857),
//! a fixed planar coordinate system with meter units.

use geo::{Coord, Euclidean, Length, LineString};

pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Convert lon/lat (EPSG:4326) degrees to Web Mercator meters
pub fn lng_lat_to_web_mercator(coord: Coord<f64>) -> Coord<f64> {
    let x = EARTH_RADIUS * coord.x.to_radians();
    let y = EARTH_RADIUS
        * ((std::f64::consts::FRAC_PI_4 + coord.y.to_radians() / 2.0).tan()).ln();
    Coord { x, y }
}

/// Reproject a geographic linestring into the metric plane
pub fn to_web_mercator(line: &LineString<f64>) -> LineString<f64> {
    line.0.iter().map(|&c| lng_lat_to_web_mercator(c)).collect()
}

/// Planar length in meters of a geographic linestring
pub fn metric_length(line: &LineString<f64>) -> f64 {
    Euclidean.length(&to_web_mercator(line))
}
