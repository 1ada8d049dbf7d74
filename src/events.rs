use crate::upload::FileId;

/// Everything the application schedules on its virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A tracked file finished its simulated upload.
    FileCompleted(FileId),
    /// The simulated summarization finished.
    SummaryReady,
    /// The simulated assistant reply arrived.
    AssistantReply,
}
