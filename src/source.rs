//! Turning paths on disk into upload candidates.

use std::path::Path;

use crate::error::MaestroError;
use crate::upload::{CandidateFile, PDF_MEDIA_TYPE};

/// Media type a browser would report for a file with this extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "xml" => "text/xml",
        "yaml" | "yml" => "text/yaml",
        "html" | "htm" => "text/html",
        "pdf" => PDF_MEDIA_TYPE,
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Read name and size of a local file. The contents are never opened.
pub fn candidate_from_path(path: &Path) -> Result<CandidateFile, MaestroError> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(MaestroError::InvalidPath(path.display().to_string()));
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MaestroError::InvalidPath(path.display().to_string()))?;

    let media_type = media_type_for(path);
    Ok(CandidateFile::new(name, metadata.len(), media_type))
}
