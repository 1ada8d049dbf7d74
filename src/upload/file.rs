use std::fmt;

use serde::{Deserialize, Serialize};

use super::size::format_size;

/// Identifies a file inside the tracker.
///
/// Ids are never reused within a tracker, so a completion timer that outlives
/// a reset cannot touch a file from a later session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Processing status of a single uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Completed,
    Errored,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Pending => write!(f, "Pending"),
            FileStatus::Completed => write!(f, "Completed"),
            FileStatus::Errored => write!(f, "Error"),
        }
    }
}

/// A file as the user selected it, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
        }
    }
}

/// A file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

impl UploadedFile {
    pub fn pending(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            status: FileStatus::Pending,
            error_reason: None,
        }
    }

    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }

    pub fn is_pending(&self) -> bool {
        self.status == FileStatus::Pending
    }
}

impl From<&CandidateFile> for UploadedFile {
    fn from(candidate: &CandidateFile) -> Self {
        Self::pending(candidate.name.clone(), candidate.size_bytes)
    }
}

/// One row of the upload list as it is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub name: String,
    pub size: String,
    pub status: FileStatus,
}

impl From<&UploadedFile> for FileRow {
    fn from(file: &UploadedFile) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size_label(),
            status: file.status,
        }
    }
}
