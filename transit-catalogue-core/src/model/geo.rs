//! Great-circle distance between geographic points.

use geo::Point;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance in meters between two points on the sphere, by the spherical
/// law of cosines.
///
/// Points are `(x = longitude, y = latitude)` in degrees. Identical points
/// short-circuit to exactly `0.0`.
pub fn great_circle_distance(from: Point<f64>, to: Point<f64>) -> f64 {
    if from == to {
        return 0.0;
    }
    let (from_lat, from_lng) = (from.y().to_radians(), from.x().to_radians());
    let (to_lat, to_lng) = (to.y().to_radians(), to.x().to_radians());

    let cos_angle = from_lat.sin() * to_lat.sin()
        + from_lat.cos() * to_lat.cos() * (from_lng - to_lng).abs().cos();
    // rounding can push the cosine marginally outside [-1, 1]
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}
