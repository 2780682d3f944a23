//! Unit-sphere geometry for the neighbor prefilter.
//!
//! Great-circle distances themselves come from [`geo::Haversine`]; this
//! module only maps coordinates into the 3-D space the R-tree indexes.

use conflict_map_hotspot_models::Coordinate;
use geo::Point;

/// `geo` point for `coord`, with x = longitude and y = latitude.
#[must_use]
pub fn to_point(coord: Coordinate) -> Point<f64> {
    Point::new(coord.longitude, coord.latitude)
}

/// Maps a coordinate onto the unit sphere.
///
/// Euclidean (chord) distance between unit vectors grows monotonically
/// with angular distance, so it can prefilter neighbors in an R-tree.
#[must_use]
pub fn unit_vector(coord: Coordinate) -> [f64; 3] {
    let (lat, lon) = coord.to_radians();
    let cos_lat = lat.cos();
    [cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin()]
}

/// Chord length subtending `angle` radians on the unit sphere.
#[must_use]
pub fn chord_length(angle: f64) -> f64 {
    if angle >= std::f64::consts::PI {
        2.0
    } else {
        2.0 * (angle / 2.0).sin()
    }
}
