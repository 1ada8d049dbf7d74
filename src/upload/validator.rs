use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file::{CandidateFile, UploadedFile};

/// Default cap on the number of files a session may hold.
pub const MAX_FILES: usize = 5;

/// Media type accepted alongside every `text/*` type.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Extensions advertised to the user. Display only; the media type decides.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".pdf", ".json", ".csv", ".log", ".xml", ".yaml", ".yml",
];

/// Why a file or batch was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RejectionKind {
    /// The batch would push the session past the file cap.
    #[error("Maximum {max} files allowed")]
    CapacityExceeded { max: usize },
    /// The file is neither text nor PDF.
    #[error("{name} is not a text or PDF file")]
    UnsupportedType { name: String },
}

/// A single refused entry of a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Empty for capacity rejections, which cover the whole batch.
    pub file_name: String,
    pub reason: RejectionKind,
}

impl Rejection {
    pub fn new(file_name: impl Into<String>, reason: RejectionKind) -> Self {
        Self {
            file_name: file_name.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub accepted: Vec<UploadedFile>,
    pub rejected: Vec<Rejection>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Checks candidate batches against the file cap and the media-type
/// allow-list.
#[derive(Debug, Clone, Copy)]
pub struct FileValidator {
    max_files: usize,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(MAX_FILES)
    }
}

impl FileValidator {
    pub fn new(max_files: usize) -> Self {
        Self { max_files }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Validate `candidates` given that `already_accepted` files are tracked.
    ///
    /// A batch that would exceed the cap is refused as a whole with one
    /// capacity rejection. Otherwise each candidate is judged on its own.
    pub fn validate(
        &self,
        candidates: &[CandidateFile],
        already_accepted: usize,
    ) -> ValidationResult {
        if already_accepted + candidates.len() > self.max_files {
            return ValidationResult {
                accepted: Vec::new(),
                rejected: vec![Rejection::new(
                    "",
                    RejectionKind::CapacityExceeded {
                        max: self.max_files,
                    },
                )],
            };
        }

        let mut result = ValidationResult::default();
        for candidate in candidates {
            if is_supported_type(&candidate.media_type) {
                result.accepted.push(UploadedFile::from(candidate));
            } else {
                result.rejected.push(Rejection::new(
                    candidate.name.clone(),
                    RejectionKind::UnsupportedType {
                        name: candidate.name.clone(),
                    },
                ));
            }
        }
        result
    }
}

fn is_supported_type(media_type: &str) -> bool {
    media_type.starts_with("text/") || media_type == PDF_MEDIA_TYPE
}
