//! Route catalog: one entry per KML/KMZ file, grouped by section directory.
//!
//! ```text
//! routes/
//!   Day trips/        <- section
//!     river-loop.kml  <- entry "Day trips/river-loop.kml"
//!     hills.kmz
//!   index.json        <- written catalog
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::archive::read_kmz_document;
use crate::error::{Result, RouteError};
use crate::kml_types::{BoundingBox, RouteMetadata, RouteStats};
use crate::options::CatalogOptions;
use crate::route::parse_route;

const ROUTE_EXTENSIONS: [&str; 2] = ["kml", "kmz"];

/// Route statistics as published in the catalog, rounded for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_min_m: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_max_m: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climb_m: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descent_m: Option<i64>,
}

impl From<&RouteStats> for CatalogStats {
    fn from(stats: &RouteStats) -> Self {
        Self {
            track_km: Some(round_tenths(stats.track_km)),
            span_km: stats.span_km.map(round_tenths),
            elevation_min_m: stats.elevation_min_m.map(round_meters),
            elevation_max_m: stats.elevation_max_m.map(round_meters),
            climb_m: stats.climb_m.map(round_meters),
            descent_m: stats.descent_m.map(round_meters),
        }
    }
}

fn round_tenths(km: f64) -> f64 {
    (km * 10.0).round_ties_even() / 10.0
}

fn round_meters(m: f64) -> i64 {
    m.round_ties_even() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub filename: String,
    pub name: String,
    pub description: String,
    pub stats: CatalogStats,
    pub poi_count: usize,
    pub segment_count: usize,
    pub bbox: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CatalogEntry {
    fn from_metadata(
        filename: String,
        path: &Path,
        meta: &RouteMetadata,
        opts: &CatalogOptions,
    ) -> Self {
        let name = if meta.name.is_empty() {
            display_name(path)
        } else {
            meta.name.clone()
        };
        let description = if opts.include_descriptions {
            meta.description.clone()
        } else {
            String::new()
        };
        Self {
            filename,
            name,
            description,
            stats: CatalogStats::from(&meta.stats),
            poi_count: meta.poi_count(),
            segment_count: meta.segment_count(),
            bbox: meta.bbox,
            error: None,
        }
    }

    /// Placeholder kept in the catalog for a file that could not be read.
    fn failed(filename: String, path: &Path, error: &RouteError) -> Self {
        Self {
            filename,
            name: display_name(path),
            description: String::new(),
            stats: CatalogStats::default(),
            poi_count: 0,
            segment_count: 0,
            bbox: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub routes: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// UTC build time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub generated: String,
    pub sections: Vec<Section>,
}

impl Catalog {
    pub fn route_count(&self) -> usize {
        self.sections.iter().map(|s| s.routes.len()).sum()
    }
}

/// A section directory and the route files found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDir {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// File stem with `-` and `_` turned into spaces.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_default()
}

fn is_route_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ROUTE_EXTENSIONS.iter().any(|r| ext.eq_ignore_ascii_case(r)))
}

/// Read a `.kml` or `.kmz` file and extract its route metadata.
pub fn load_route_file(path: &Path) -> Result<RouteMetadata> {
    let is_kmz = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("kmz"));

    let text = if is_kmz {
        read_kmz_document(path)?
    } else {
        String::from_utf8(fs::read(path)?)?
    };
    parse_route(&text)
}

/// Sorted section directories under `routes_dir`, each with its sorted route
/// files. Sections without route files are left out, as are sections that
/// cannot be listed.
pub fn scan_sections(routes_dir: &Path) -> Result<Vec<SectionDir>> {
    Ok(sorted_children(routes_dir)?
        .into_iter()
        .filter(|dir| dir.is_dir())
        .filter_map(|dir| section_dir(&dir))
        .collect())
}

fn section_dir(dir: &Path) -> Option<SectionDir> {
    let files: Vec<PathBuf> = match sorted_children(dir) {
        Ok(children) => children
            .into_iter()
            .filter(|f| f.is_file() && is_route_file(f))
            .collect(),
        Err(e) => {
            log::warn!("skipping section {}: {e}", dir.display());
            return None;
        }
    };
    if files.is_empty() {
        return None;
    }
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Some(SectionDir { name, files })
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(|e| e.into_path())
                .map_err(|e| RouteError::Io(e.into()))
        })
        .collect()
}

/// Build the catalog entry for one file. Never fails: errors become a stub entry.
pub fn catalog_entry(section: &str, path: &Path, opts: &CatalogOptions) -> CatalogEntry {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = format!("{section}/{file_name}");

    match load_route_file(path) {
        Ok(meta) => {
            let entry = CatalogEntry::from_metadata(filename, path, &meta, opts);
            log::info!(
                "{}: OK (track {} km, span {} km, {} POI)",
                entry.filename,
                fmt_km(entry.stats.track_km),
                fmt_km(entry.stats.span_km),
                entry.poi_count
            );
            entry
        }
        Err(e) => {
            log::warn!("{filename}: {e}");
            CatalogEntry::failed(filename, path, &e)
        }
    }
}

fn fmt_km(km: Option<f64>) -> String {
    km.map_or_else(|| "?".to_string(), |km| km.to_string())
}

/// Scan the routes directory and process every route file.
pub fn build_catalog(opts: &CatalogOptions) -> Result<Catalog> {
    if !opts.routes_dir.is_dir() {
        return Err(RouteError::MissingRoutesDir(opts.routes_dir.clone()));
    }

    let dirs = scan_sections(&opts.routes_dir)?;
    if dirs.is_empty() {
        log::warn!("no route sections found in {}", opts.routes_dir.display());
    }

    let sections = dirs
        .into_iter()
        .map(|dir| {
            log::info!("[{}] {} files", dir.name, dir.files.len());
            let routes: Vec<CatalogEntry> = if opts.parallel {
                dir.files
                    .par_iter()
                    .map(|path| catalog_entry(&dir.name, path, opts))
                    .collect()
            } else {
                dir.files
                    .iter()
                    .map(|path| catalog_entry(&dir.name, path, opts))
                    .collect()
            };
            Section {
                name: dir.name,
                routes,
            }
        })
        .collect();

    Ok(Catalog {
        generated: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        sections,
    })
}

/// Write the catalog as pretty-printed UTF-8 JSON.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("a/river-loop_2024.kml")), "river loop 2024");
        assert_eq!(display_name(Path::new("plain.kmz")), "plain");
    }

    #[test]
    fn test_route_file_extensions() {
        assert!(is_route_file(Path::new("x.kml")));
        assert!(is_route_file(Path::new("x.KMZ")));
        assert!(!is_route_file(Path::new("x.gpx")));
        assert!(!is_route_file(Path::new("kml")));
    }

    #[test]
    fn test_unreadable_section_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let section = tmp.path().join("Day trips");
        fs::create_dir(&section).unwrap();
        fs::write(section.join("loop.kml"), "<kml/>").unwrap();

        let found = section_dir(&section).unwrap();
        assert_eq!(found.name, "Day trips");
        assert_eq!(found.files, vec![section.join("loop.kml")]);

        // Removed between the top-level listing and reading the section.
        assert!(section_dir(&tmp.path().join("Gone")).is_none());
    }

    #[test]
    fn test_stats_rounding() {
        let stats = RouteStats {
            track_km: 42.46,
            span_km: Some(10.04),
            elevation_min_m: Some(119.6),
            elevation_max_m: Some(285.2),
            climb_m: Some(640.5),
            descent_m: None,
        };
        let rounded = CatalogStats::from(&stats);
        assert_eq!(rounded.track_km, Some(42.5));
        assert_eq!(rounded.span_km, Some(10.0));
        assert_eq!(rounded.elevation_min_m, Some(120));
        assert_eq!(rounded.elevation_max_m, Some(285));
        assert_eq!(rounded.climb_m, Some(640));
        assert_eq!(rounded.descent_m, None);
    }

    #[test]
    fn test_stub_entry_json() {
        let err = RouteError::NoDocumentInArchive;
        let entry = CatalogEntry::failed(
            "S/broken-file.kmz".to_string(),
            Path::new("broken-file.kmz"),
            &err,
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "broken file");
        assert_eq!(json["stats"], serde_json::json!({}));
        assert_eq!(json["poiCount"], 0);
        assert_eq!(json["segmentCount"], 0);
        assert!(json["bbox"].is_null());
        assert_eq!(json["error"], err.to_string());
    }

    #[test]
    fn test_successful_entry_has_no_error_key() {
        let meta = RouteMetadata {
            name: "Named".to_string(),
            description: "Text".to_string(),
            ..Default::default()
        };
        let entry = CatalogEntry::from_metadata(
            "S/x.kml".to_string(),
            Path::new("x.kml"),
            &meta,
            &CatalogOptions::default(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["name"], "Named");
        assert_eq!(json["description"], "");
        assert_eq!(json["stats"], serde_json::json!({"track_km": 0.0}));
    }
}
