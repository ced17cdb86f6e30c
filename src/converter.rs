use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::kml_types::*;
use crate::options::ExportOptions;

/// Convert route metadata to a GeoJSON FeatureCollection.
pub fn to_feature_collection(meta: &RouteMetadata, opts: &ExportOptions) -> FeatureCollection {
    let mut features = Vec::new();

    if opts.include_points {
        for poi in &meta.points_of_interest {
            features.push(poi_to_feature(poi));
        }
    }

    if opts.include_tracks {
        for (index, seg) in meta.segments.iter().enumerate() {
            if seg.points.len() >= 2 {
                features.push(segment_to_feature(seg, index, opts));
            }
        }
    }

    FeatureCollection {
        bbox: meta.bbox.as_ref().map(bbox_array),
        features,
        foreign_members: None,
    }
}

fn poi_to_feature(poi: &PointOfInterest) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![poi.lon, poi.lat]));

    let mut props = Map::new();
    props.insert("kind".to_string(), JsonValue::String("poi".to_string()));
    props.insert("name".to_string(), JsonValue::String(poi.name.clone()));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn segment_to_feature(seg: &TrackSegment, index: usize, opts: &ExportOptions) -> Feature {
    let coords: Vec<Vec<f64>> = seg
        .points
        .iter()
        .map(|pt| point_coords(pt, opts.include_elevation))
        .collect();

    let geometry = Geometry::new(Value::LineString(coords));

    let mut props = Map::new();
    props.insert("kind".to_string(), JsonValue::String("track".to_string()));
    props.insert("segment".to_string(), JsonValue::Number(index.into()));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Build [lon, lat] or [lon, lat, ele] coordinate array.
fn point_coords(pt: &GeoPoint, include_elevation: bool) -> Vec<f64> {
    match (include_elevation, pt.ele) {
        (true, Some(ele)) => vec![pt.lon, pt.lat, ele],
        _ => vec![pt.lon, pt.lat],
    }
}

/// GeoJSON bbox order: [west, south, east, north].
fn bbox_array(bbox: &BoundingBox) -> Vec<f64> {
    vec![bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat]
}
