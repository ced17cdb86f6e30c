//! Placemark visitor.
//!
//! Authoring tools wrap geometry in arbitrarily deep `Folder`/`Document`
//! groups, so every `Placemark` in the tree is visited regardless of depth.
//! Findings go into a [`WalkResult`] filled in as the walk proceeds.

use crate::coords::parse_coordinates;
use crate::elevation::ElevationProfile;
use crate::geo::polyline_length_km;
use crate::kml_types::{BoundingBox, PointOfInterest, TrackSegment, extend_bbox};
use crate::legacy::{LegacyStats, extract_legacy_stats};
use crate::xml_tree::{Element, NodeKind};

/// Accumulated findings of one walk over a document.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub points_of_interest: Vec<PointOfInterest>,
    pub segments: Vec<TrackSegment>,
    pub track_km: f64,
    pub bbox: Option<BoundingBox>,
    pub profile: ElevationProfile,
    /// First non-empty statistics block found in a track description.
    pub legacy: Option<LegacyStats>,
}

/// Visit every placemark below (and including) `root`.
pub fn walk(root: &Element) -> WalkResult {
    let mut result = WalkResult::default();
    visit(root, &mut result);
    log::debug!(
        "walk found {} segments, {} points of interest",
        result.segments.len(),
        result.points_of_interest.len()
    );
    result
}

/// Pre-order walk over an explicit stack.
fn visit(root: &Element, acc: &mut WalkResult) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if node.kind == NodeKind::Placemark {
            visit_placemark(node, acc);
        }
        pending.extend(node.children.iter().rev());
    }
}

/// Geometry a placemark carries, in classification precedence.
enum PlacemarkGeometry<'a> {
    Point(&'a Element),
    Multi(&'a Element),
    Line(&'a Element),
}

impl<'a> PlacemarkGeometry<'a> {
    fn of(placemark: &'a Element) -> Option<Self> {
        if let Some(point) = placemark.child(NodeKind::Point) {
            Some(Self::Point(point))
        } else if let Some(multi) = placemark.child(NodeKind::MultiGeometry) {
            Some(Self::Multi(multi))
        } else {
            placemark.child(NodeKind::LineString).map(Self::Line)
        }
    }
}

fn visit_placemark(placemark: &Element, acc: &mut WalkResult) {
    match PlacemarkGeometry::of(placemark) {
        Some(PlacemarkGeometry::Point(point)) => add_point_of_interest(placemark, point, acc),
        Some(PlacemarkGeometry::Multi(multi)) => {
            for line in multi.descendants(NodeKind::LineString) {
                add_segment(line, acc);
            }
            capture_legacy_stats(placemark, acc);
        }
        Some(PlacemarkGeometry::Line(line)) => {
            add_segment(line, acc);
            capture_legacy_stats(placemark, acc);
        }
        None => log::debug!("placemark without supported geometry skipped"),
    }
}

fn add_point_of_interest(placemark: &Element, point: &Element, acc: &mut WalkResult) {
    let Some(coords) = point.child_text(NodeKind::Coordinates) else {
        return;
    };
    let Some(first) = parse_coordinates(coords).into_iter().next() else {
        return;
    };

    acc.points_of_interest.push(PointOfInterest {
        name: placemark
            .child_text(NodeKind::Name)
            .unwrap_or_default()
            .to_string(),
        lat: first.lat,
        lon: first.lon,
    });
    extend_bbox(&mut acc.bbox, first.lat, first.lon);
}

fn add_segment(line: &Element, acc: &mut WalkResult) {
    let Some(coords) = line.child_text(NodeKind::Coordinates) else {
        return;
    };
    let points = parse_coordinates(coords);
    if points.is_empty() {
        return;
    }

    let segment = TrackSegment { points };
    acc.track_km += polyline_length_km(&segment.points);
    for pt in &segment.points {
        extend_bbox(&mut acc.bbox, pt.lat, pt.lon);
    }
    acc.profile.add_series(&segment.elevations());
    acc.segments.push(segment);
}

fn capture_legacy_stats(placemark: &Element, acc: &mut WalkResult) {
    if acc.legacy.is_some() {
        return;
    }
    if let Some(description) = placemark.child_text(NodeKind::Description) {
        let stats = extract_legacy_stats(description);
        if !stats.is_empty() {
            acc.legacy = Some(stats);
        }
    }
}
