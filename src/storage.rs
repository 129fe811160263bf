//! Document persistence: JSON load/save plus photo file resolution.
//!
//! Loading never rejects a document for missing or unknown fields; the data
//! model's serde defaults fill in whatever is absent, and unknown keys are
//! ignored. Oversized inputs only produce a warning, the export still runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::CvDocument;

pub const SCHEMA_VERSION: u32 = 1;

/// Documents above this size are suspicious (likely an embedded payload).
const DOCUMENT_WARN_BYTES: u64 = 5 * 1024 * 1024;
/// Photos above this size bloat the PDF noticeably.
const PHOTO_WARN_BYTES: u64 = 2 * 1024 * 1024;

/// Load a CV document from a JSON file. Partial or older documents
/// deserialize into a fully defaulted model.
pub fn load(path: &Path) -> Result<CvDocument, Error> {
    if let Ok(meta) = fs::metadata(path) {
        if meta.len() > DOCUMENT_WARN_BYTES {
            log::warn!(
                "document {} is {} bytes, expected well under {DOCUMENT_WARN_BYTES}",
                path.display(),
                meta.len()
            );
        }
    }
    let raw = fs::read_to_string(path)?;
    let doc: CvDocument = serde_json::from_str(&raw)?;
    if doc.schema_version > SCHEMA_VERSION {
        log::warn!(
            "document schema version {} is newer than supported {SCHEMA_VERSION}",
            doc.schema_version
        );
    }
    Ok(doc)
}

pub fn save(doc: &CvDocument, path: &Path) -> Result<(), Error> {
    let mut doc = doc.clone();
    doc.schema_version = SCHEMA_VERSION;
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json)?;
    Ok(())
}

/// Resolve the document's photo path relative to the document file and read
/// it. A missing or unreadable photo is not fatal: the export proceeds
/// without it.
pub fn load_photo(doc_path: &Path, doc: &CvDocument) -> Option<Vec<u8>> {
    let rel = doc.personal.photo_path.as_deref()?;
    if !doc.personal.photo_visible || rel.trim().is_empty() {
        return None;
    }
    let path = resolve_photo(doc_path, rel);
    match fs::read(&path) {
        Ok(bytes) => {
            if bytes.len() as u64 > PHOTO_WARN_BYTES {
                log::warn!(
                    "photo {} is {} bytes, expected well under {PHOTO_WARN_BYTES}",
                    path.display(),
                    bytes.len()
                );
            }
            Some(bytes)
        }
        Err(e) => {
            log::warn!("could not read photo {}: {e}", path.display());
            None
        }
    }
}

/// A relative photo path is resolved against the document's directory.
pub fn resolve_photo(doc_path: &Path, photo_path: &str) -> PathBuf {
    let photo = Path::new(photo_path);
    if photo.is_absolute() {
        photo.to_path_buf()
    } else {
        doc_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(photo)
    }
}

/// Derived output filename: `CV_<Name>.pdf` with the name reduced to a safe
/// character set, or `CV.pdf` when the name is blank.
pub fn default_output_name(doc: &CvDocument) -> String {
    let safe = sanitize_filename(&doc.personal.name);
    if safe.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("CV_{safe}.pdf")
    }
}

fn sanitize_filename(name: &str) -> String {
    let mut out = String::new();
    let mut last_sep = true;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            out.push(c);
            last_sep = false;
        } else if !last_sep {
            out.push('_');
            last_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
