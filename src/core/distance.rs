use crate::models::Coordinates;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two profile locations, in kilometers
#[inline]
pub fn distance_between(a: &Coordinates, b: &Coordinates) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Great-circle distance when both sides carry coordinates
pub fn optional_distance(a: Option<&Coordinates>, b: Option<&Coordinates>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(distance_between(a, b)),
        _ => None,
    }
}
