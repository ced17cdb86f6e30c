use std::path::PathBuf;

use serde::Deserialize;

/// Options for GeoJSON export of a parsed route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Include elevation as the 3rd coordinate value (default: true)
    #[serde(default = "default_true")]
    pub include_elevation: bool,

    /// Emit a Point feature per point of interest (default: true)
    #[serde(default = "default_true")]
    pub include_points: bool,

    /// Emit a LineString feature per track segment (default: true)
    #[serde(default = "default_true")]
    pub include_tracks: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_elevation: true,
            include_points: true,
            include_tracks: true,
        }
    }
}

/// Settings for building a route catalog from a directory tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptions {
    /// Directory whose sub-directories are catalog sections (default: `routes`)
    #[serde(default = "default_routes_dir")]
    pub routes_dir: PathBuf,

    /// Catalog file to write (default: `<routes_dir>/index.json`)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Copy document descriptions into catalog entries (default: false)
    #[serde(default)]
    pub include_descriptions: bool,

    /// Process the files of a section on the rayon pool (default: true)
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            output: None,
            include_descriptions: false,
            parallel: true,
        }
    }
}

impl CatalogOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.routes_dir.join("index.json"))
    }
}

fn default_true() -> bool {
    true
}

fn default_routes_dir() -> PathBuf {
    PathBuf::from("routes")
}
