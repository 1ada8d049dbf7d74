mod file;
mod size;
mod tracker;
mod validator;

pub use file::{CandidateFile, FileId, FileRow, FileStatus, UploadedFile};
pub use size::format_size;
pub use tracker::{CompletionTiming, TrackedFile, UploadStatusTracker};
pub use validator::{
    ACCEPTED_EXTENSIONS, FileValidator, MAX_FILES, PDF_MEDIA_TYPE, Rejection, RejectionKind,
    ValidationResult,
};
