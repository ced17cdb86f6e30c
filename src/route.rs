use crate::error::Result;
use crate::geo::span_km;
use crate::kml_types::{RouteMetadata, RouteStats};
use crate::legacy::{LegacyStats, strip_markup};
use crate::walker::walk;
use crate::xml_tree::{NodeKind, parse_document};

/// Parse a KML document string into route metadata.
///
/// The only error is a document that cannot be parsed as markup at all;
/// every other defect degrades to empty or absent fields.
pub fn parse_route(kml: &str) -> Result<RouteMetadata> {
    let root = parse_document(kml)?;
    let document = root.child(NodeKind::Document).unwrap_or(&root);

    let name = document
        .child_text(NodeKind::Name)
        .unwrap_or_default()
        .to_string();
    let description = document
        .child_text(NodeKind::Description)
        .map(strip_markup)
        .unwrap_or_default();

    let walked = walk(&root);
    let elevation = walked.profile.finish();

    let mut stats = walked.legacy.map(stats_from_legacy).unwrap_or_default();
    if !walked.segments.is_empty() {
        stats.track_km = walked.track_km;
    }
    stats.span_km = walked.bbox.as_ref().map(span_km);
    if let Some(ele) = elevation {
        stats.elevation_min_m = Some(ele.min_m);
        stats.elevation_max_m = Some(ele.max_m);
        stats.climb_m = Some(ele.climb_m);
        stats.descent_m = Some(ele.descent_m);
    }

    Ok(RouteMetadata {
        name,
        description,
        stats,
        points_of_interest: walked.points_of_interest,
        segments: walked.segments,
        bbox: walked.bbox,
    })
}

fn stats_from_legacy(legacy: LegacyStats) -> RouteStats {
    RouteStats {
        track_km: legacy.distance_km.unwrap_or(0.0),
        span_km: None,
        elevation_min_m: legacy.elevation_min_m,
        elevation_max_m: legacy.elevation_max_m,
        climb_m: legacy.climb_m,
        descent_m: legacy.descent_m,
    }
}
