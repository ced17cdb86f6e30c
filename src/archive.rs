//! KMZ support: a KMZ file is a zip archive around one KML document.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Result, RouteError};

/// Conventional name of the main document inside a KMZ.
pub const CANONICAL_DOCUMENT: &str = "doc.kml";

/// Pick the document entry: `doc.kml` if present, else the first `.kml` entry.
pub fn select_document_entry<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first = None;
    for name in names {
        if name == CANONICAL_DOCUMENT {
            return Some(name);
        }
        if first.is_none() && name.to_lowercase().ends_with(".kml") {
            first = Some(name);
        }
    }
    first
}

/// Open a KMZ file and return the decoded text of its KML document.
pub fn read_kmz_document(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    read_kmz_from(file)
}

/// Same as [`read_kmz_document`] for any seekable reader.
pub fn read_kmz_from<R: Read + Seek>(reader: R) -> Result<String> {
    let mut zip = zip::ZipArchive::new(reader).map_err(|e| RouteError::Archive(e.to_string()))?;

    let entry_name = select_document_entry(zip.file_names())
        .ok_or(RouteError::NoDocumentInArchive)?
        .to_string();
    log::debug!("reading KMZ entry {entry_name}");

    let mut entry = zip
        .by_name(&entry_name)
        .map_err(|e| RouteError::Archive(e.to_string()))?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn kmz(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_select_prefers_canonical_name() {
        let names = ["files/a.kml", "doc.kml", "b.KML"];
        assert_eq!(select_document_entry(names), Some("doc.kml"));
    }

    #[test]
    fn test_select_first_suffix_match() {
        let names = ["images/icon.png", "Track.KML", "other.kml"];
        assert_eq!(select_document_entry(names), Some("Track.KML"));
        assert_eq!(select_document_entry(["icon.png"]), None);
    }

    #[test]
    fn test_read_canonical_document() {
        let archive = kmz(&[
            ("first.kml", &b"<kml><name>first</name></kml>"[..]),
            ("doc.kml", &b"<kml><name>main</name></kml>"[..]),
        ]);
        let text = read_kmz_from(archive).unwrap();
        assert!(text.contains("main"));
    }

    #[test]
    fn test_no_document_inside() {
        let archive = kmz(&[("icon.png", &b"\x89PNG"[..])]);
        assert!(matches!(
            read_kmz_from(archive),
            Err(RouteError::NoDocumentInArchive)
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let err = read_kmz_from(Cursor::new(b"<kml/>".to_vec())).unwrap_err();
        assert!(matches!(err, RouteError::Archive(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let archive = kmz(&[("doc.kml", &b"<kml>\xff\xfe</kml>"[..])]);
        assert!(matches!(read_kmz_from(archive), Err(RouteError::Utf8(_))));
    }
}
