//! Distance helpers on the WGS84 sphere.

use crate::kml_types::{BoundingBox, GeoPoint};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Length of one degree of latitude, in kilometres.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Great-circle distance between two points in kilometres (haversine).
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    EARTH_RADIUS_KM * 2.0 * h.sqrt().min(1.0).asin()
}

/// Sum of consecutive great-circle distances along a polyline.
pub fn polyline_length_km(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}

/// Approximate diagonal of a bounding box in kilometres.
///
/// Longitudinal extent is scaled by the cosine of the mid latitude. Good
/// enough for boxes up to a couple of hundred kilometres across.
pub fn span_km(bbox: &BoundingBox) -> f64 {
    let dlat_km = (bbox.max_lat - bbox.min_lat) * KM_PER_DEGREE;
    let mid_lat = (bbox.max_lat + bbox.min_lat) / 2.0;
    let dlon_km = (bbox.max_lon - bbox.min_lon) * KM_PER_DEGREE * mid_lat.to_radians().cos();
    dlat_km.hypot(dlon_km)
}
