use std::fmt;

use serde::{Deserialize, Serialize};

use crate::upload::FileId;

/// The five states of the upload/summarize workflow.
///
/// A session flows: COLLECTING → AWAITING_COMPLETION → READY_TO_SUMMARIZE →
/// SUMMARIZING → DONE, and only DONE may go back to COLLECTING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    Collecting,
    AwaitingCompletion,
    ReadyToSummarize,
    Summarizing,
    Done,
}

impl WorkflowState {
    fn rank(self) -> u8 {
        match self {
            WorkflowState::Collecting => 0,
            WorkflowState::AwaitingCompletion => 1,
            WorkflowState::ReadyToSummarize => 2,
            WorkflowState::Summarizing => 3,
            WorkflowState::Done => 4,
        }
    }

    /// Forward moves plus the explicit DONE → COLLECTING reset.
    pub fn can_move_to(self, next: WorkflowState) -> bool {
        next.rank() > self.rank()
            || (self == WorkflowState::Done && next == WorkflowState::Collecting)
    }

    /// States in which the summary dialog exists.
    pub fn has_dialog(self) -> bool {
        matches!(
            self,
            WorkflowState::ReadyToSummarize | WorkflowState::Summarizing | WorkflowState::Done
        )
    }

    /// States in which new files may be submitted.
    pub fn accepts_files(self) -> bool {
        matches!(
            self,
            WorkflowState::Collecting | WorkflowState::AwaitingCompletion
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Collecting => write!(f, "COLLECTING"),
            WorkflowState::AwaitingCompletion => write!(f, "AWAITING_COMPLETION"),
            WorkflowState::ReadyToSummarize => write!(f, "READY_TO_SUMMARIZE"),
            WorkflowState::Summarizing => write!(f, "SUMMARIZING"),
            WorkflowState::Done => write!(f, "DONE"),
        }
    }
}

/// The result of asking the workflow to change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The workflow moved to this state.
    Next(WorkflowState),
    /// A guard refused the request; the workflow stays here.
    Unchanged(WorkflowState),
}

/// Notifications the workflow raises for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A tracked file moved to `Completed`.
    FileCompleted(FileId),
    /// Every file has completed; the summary dialog should be shown.
    DialogOpened,
    /// Summarization finished and the report is available.
    SummaryReady,
    /// The dialog was closed. The shell switches back to chat.
    Summarized,
}
