use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive is corrupt or not a KMZ file: {0}")]
    Archive(String),

    #[error("No KML document found inside KMZ archive")]
    NoDocumentInArchive,

    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Routes directory not found: {}", .0.display())]
    MissingRoutesDir(PathBuf),
}

impl RouteError {
    /// True when the document text itself could not be parsed as markup.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::XmlParse(_) | Self::Malformed(_))
    }
}

impl From<RouteError> for JsValue {
    fn from(e: RouteError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
