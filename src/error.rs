use thiserror::Error;

use crate::upload::Rejection;

#[derive(Debug, Error)]
pub enum MaestroError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Upload rejected: {0}")]
    Rejected(#[from] UploadError),

    #[error("Unsupported path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A batch refused at submission time.
///
/// Carries every rejection the validator produced. Nothing from the batch
/// reaches the tracker when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_reasons(.rejections))]
pub struct UploadError {
    pub rejections: Vec<Rejection>,
}

impl UploadError {
    pub fn new(rejections: Vec<Rejection>) -> Self {
        Self { rejections }
    }
}

/// All rejection messages joined into the single line shown to the user.
fn join_reasons(rejections: &[Rejection]) -> String {
    rejections
        .iter()
        .map(|r| r.reason.to_string())
        .collect::<Vec<_>>()
        .join(". ")
}
