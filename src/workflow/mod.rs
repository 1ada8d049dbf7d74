mod report;
mod state;
mod summary;

pub use report::{ProcessedFile, SummaryReport, combined_files};
pub use state::{Signal, Transition, WorkflowState};
pub use summary::SummaryWorkflow;
