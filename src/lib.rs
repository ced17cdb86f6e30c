//! Route metadata extraction for KML/KMZ track files.
//!
//! [`parse_route`] turns a KML document into a [`RouteMetadata`]: track
//! length, bounding box and span, smoothed climb/descent, and points of
//! interest. The native build adds KMZ reading and the directory catalog
//! behind the `route-catalog` binary.

#[cfg(not(target_arch = "wasm32"))]
pub mod archive;
#[cfg(not(target_arch = "wasm32"))]
pub mod catalog;
pub mod converter;
pub mod coords;
pub mod elevation;
pub mod error;
pub mod geo;
pub mod kml_types;
pub mod legacy;
pub mod options;
pub mod route;
pub mod walker;
pub mod xml_tree;

use wasm_bindgen::prelude::*;

pub use crate::error::{Result, RouteError};
pub use crate::kml_types::{
    BoundingBox, GeoPoint, PointOfInterest, RouteMetadata, RouteStats, TrackSegment,
};
pub use crate::options::{CatalogOptions, ExportOptions};
pub use crate::route::parse_route;

/// Extract route metadata from a KML string, returned as a JS object.
#[wasm_bindgen(js_name = kmlToRouteMetadata)]
pub fn kml_to_route_metadata(kml_string: &str) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let meta = route::parse_route(kml_string)?;
    serde_wasm_bindgen::to_value(&meta).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a KML route to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = kmlToGeoJson)]
pub fn kml_to_geojson(kml_string: &str, options: JsValue) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let meta = route::parse_route(kml_string)?;
    let fc = converter::to_feature_collection(&meta, &opts);
    serde_wasm_bindgen::to_value(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a KML route to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = kmlToGeoJsonString)]
pub fn kml_to_geojson_string(
    kml_string: &str,
    options: JsValue,
) -> std::result::Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let meta = route::parse_route(kml_string)?;
    let fc = converter::to_feature_collection(&meta, &opts);
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> std::result::Result<ExportOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ExportOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
