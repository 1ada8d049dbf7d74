use std::sync::Arc;

use tracing::{debug, info, warn};

use super::report::{ProcessedFile, SummaryReport, combined_files};
use super::state::{Signal, Transition, WorkflowState};
use crate::catalog::Catalog;
use crate::error::UploadError;
use crate::events::TimerEvent;
use crate::scheduler::Scheduler;
use crate::upload::{
    CandidateFile, CompletionTiming, FileId, FileRow, FileValidator, TrackedFile,
    UploadStatusTracker,
};

/// Drives a session from file collection through the simulated summary.
pub struct SummaryWorkflow {
    state: WorkflowState,
    state_history: Vec<WorkflowState>,
    validator: FileValidator,
    tracker: UploadStatusTracker,
    summarize_delay_ms: u64,
    catalog: Arc<Catalog>,
    dialog_open: bool,
    last_error: Option<UploadError>,
    report: Option<SummaryReport>,
}

impl SummaryWorkflow {
    pub fn new(
        validator: FileValidator,
        timing: CompletionTiming,
        summarize_delay_ms: u64,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            state: WorkflowState::Collecting,
            state_history: Vec::new(),
            tracker: UploadStatusTracker::new(validator.max_files(), timing),
            validator,
            summarize_delay_ms,
            catalog,
            dialog_open: false,
            last_error: None,
            report: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Every state left so far, oldest first.
    pub fn state_history(&self) -> &[WorkflowState] {
        &self.state_history
    }

    pub fn files(&self) -> &[TrackedFile] {
        self.tracker.current_list()
    }

    pub fn rows(&self) -> Vec<FileRow> {
        self.tracker.rows()
    }

    pub fn remaining_slots(&self) -> usize {
        self.tracker.remaining_slots()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// The message of the last rejected batch, until the next submission.
    pub fn last_error(&self) -> Option<&UploadError> {
        self.last_error.as_ref()
    }

    pub fn report(&self) -> Option<&SummaryReport> {
        self.report.as_ref()
    }

    /// Session files plus the supplementary samples, as listed in the dialog.
    pub fn processed_files(&self) -> Vec<ProcessedFile> {
        combined_files(self.tracker.current_list(), &self.catalog)
    }

    /// Validate a batch and start tracking it.
    ///
    /// Any rejection refuses the whole batch. Submissions while the dialog
    /// phase is underway are ignored and return no ids.
    pub fn submit(
        &mut self,
        candidates: &[CandidateFile],
        scheduler: &mut Scheduler<TimerEvent>,
    ) -> Result<Vec<FileId>, UploadError> {
        if !self.state.accepts_files() {
            debug!(state = %self.state, "submission ignored while dialog is active");
            return Ok(Vec::new());
        }

        self.last_error = None;
        let result = self.validator.validate(candidates, self.tracker.len());
        if !result.is_clean() {
            let err = UploadError::new(result.rejected);
            warn!(error = %err, "batch rejected");
            self.last_error = Some(err.clone());
            return Err(err);
        }
        if result.accepted.is_empty() {
            return Ok(Vec::new());
        }

        info!(count = result.accepted.len(), "batch accepted");
        let ids = self.tracker.enqueue(result.accepted, scheduler);
        if self.state == WorkflowState::Collecting {
            self.move_to(WorkflowState::AwaitingCompletion);
        }
        Ok(ids)
    }

    /// Apply a fired timer. Events that belong to other components are ignored.
    pub fn handle(&mut self, event: TimerEvent) -> Vec<Signal> {
        let mut signals = Vec::new();
        match event {
            TimerEvent::FileCompleted(id) => {
                if !self.tracker.mark_completed(id) {
                    return signals;
                }
                signals.push(Signal::FileCompleted(id));

                if self.state == WorkflowState::AwaitingCompletion && self.tracker.all_completed()
                {
                    self.move_to(WorkflowState::ReadyToSummarize);
                    self.dialog_open = true;
                    signals.push(Signal::DialogOpened);
                }
            }
            TimerEvent::SummaryReady => {
                if self.state == WorkflowState::Summarizing {
                    self.report = Some(SummaryReport::build(
                        self.tracker.current_list(),
                        &self.catalog,
                    ));
                    self.move_to(WorkflowState::Done);
                    info!(files = self.tracker.len(), "summary ready");
                    signals.push(Signal::SummaryReady);
                }
            }
            TimerEvent::AssistantReply => {}
        }
        signals
    }

    /// Start the simulated summarization.
    ///
    /// Refused unless the workflow is ready and no file is still pending.
    pub fn summarize(&mut self, scheduler: &mut Scheduler<TimerEvent>) -> Transition {
        if self.state != WorkflowState::ReadyToSummarize || self.tracker.pending_count() > 0 {
            debug!(
                state = %self.state,
                pending = self.tracker.pending_count(),
                "summarize refused"
            );
            return Transition::Unchanged(self.state);
        }

        scheduler.schedule(self.summarize_delay_ms, TimerEvent::SummaryReady);
        self.move_to(WorkflowState::Summarizing);
        Transition::Next(self.state)
    }

    /// Close the summary dialog and notify the owner.
    ///
    /// From DONE this also resets the session. Earlier, the dialog only hides
    /// and any running timer keeps going.
    pub fn close_dialog(&mut self) -> Option<Signal> {
        if !self.dialog_open {
            return None;
        }
        self.dialog_open = false;

        if self.state == WorkflowState::Done {
            self.reset();
        } else {
            debug!(state = %self.state, "dialog closed early");
        }
        Some(Signal::Summarized)
    }

    /// Show the dialog again after an early close.
    pub fn reopen_dialog(&mut self) -> bool {
        if self.dialog_open || !self.state.has_dialog() {
            return false;
        }
        self.dialog_open = true;
        true
    }

    fn reset(&mut self) {
        self.tracker.clear();
        self.report = None;
        self.last_error = None;
        self.move_to(WorkflowState::Collecting);
        info!("session reset");
    }

    fn move_to(&mut self, next: WorkflowState) {
        debug_assert!(
            self.state.can_move_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        debug!(from = %self.state, to = %next, "workflow transition");
        self.state_history.push(self.state);
        self.state = next;
    }
}
