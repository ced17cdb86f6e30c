use serde::Serialize;

/// A single coordinate sample from a `<coordinates>` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    /// `None` when the tuple carried no elevation field.
    pub ele: Option<f64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, ele: Option<f64>) -> Self {
        Self { lat, lon, ele }
    }
}

/// One continuous line recovered from a `<LineString>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackSegment {
    pub points: Vec<GeoPoint>,
}

impl TrackSegment {
    /// Elevation samples of the points that carry one, in track order.
    pub fn elevations(&self) -> Vec<f64> {
        self.points.iter().filter_map(|pt| pt.ele).collect()
    }
}

/// A named single-point placemark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Latitude/longitude extent of every coordinate seen in a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn from_point(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        }
    }

    pub fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }
}

/// Extend an optional box, creating it on the first point.
pub fn extend_bbox(bbox: &mut Option<BoundingBox>, lat: f64, lon: f64) {
    match bbox {
        Some(b) => b.extend(lat, lon),
        None => *bbox = Some(BoundingBox::from_point(lat, lon)),
    }
}

/// Route statistics at full precision.
///
/// Rounding for presentation happens in the catalog layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteStats {
    pub track_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_min_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_max_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climb_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descent_m: Option<f64>,
}

impl RouteStats {
    pub fn has_elevation(&self) -> bool {
        self.elevation_min_m.is_some()
            || self.elevation_max_m.is_some()
            || self.climb_m.is_some()
            || self.descent_m.is_some()
    }
}

/// Everything extracted from one KML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    pub name: String,
    pub description: String,
    pub stats: RouteStats,
    pub points_of_interest: Vec<PointOfInterest>,
    pub segments: Vec<TrackSegment>,
    pub bbox: Option<BoundingBox>,
}

impl RouteMetadata {
    pub fn poi_count(&self) -> usize {
        self.points_of_interest.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
