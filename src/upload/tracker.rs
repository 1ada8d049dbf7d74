use serde::{Deserialize, Serialize};
use tracing::debug;

use super::file::{FileId, FileRow, FileStatus, UploadedFile};
use crate::events::TimerEvent;
use crate::scheduler::Scheduler;

/// Delay schedule for simulated per-file uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTiming {
    /// Delay before the first file of a batch completes.
    pub base_ms: u64,
    /// Extra delay added for each following file in the batch.
    pub stagger_ms: u64,
}

impl Default for CompletionTiming {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            stagger_ms: 500,
        }
    }
}

impl CompletionTiming {
    /// delay = base_ms + index * stagger_ms
    pub fn delay_for_index(&self, index: usize) -> u64 {
        self.base_ms + index as u64 * self.stagger_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedFile {
    pub id: FileId,
    pub file: UploadedFile,
}

/// Ordered list of the session's files and their upload status.
#[derive(Debug)]
pub struct UploadStatusTracker {
    files: Vec<TrackedFile>,
    next_id: u64,
    timing: CompletionTiming,
    capacity: usize,
}

impl UploadStatusTracker {
    pub fn new(capacity: usize, timing: CompletionTiming) -> Self {
        Self {
            files: Vec::new(),
            next_id: 0,
            timing,
            capacity,
        }
    }

    /// Append `files` as pending and schedule one completion for each,
    /// staggered by position in the batch.
    pub fn enqueue(
        &mut self,
        files: Vec<UploadedFile>,
        scheduler: &mut Scheduler<TimerEvent>,
    ) -> Vec<FileId> {
        let mut ids = Vec::with_capacity(files.len());
        for (index, mut file) in files.into_iter().enumerate() {
            let id = FileId(self.next_id);
            self.next_id += 1;

            file.status = FileStatus::Pending;
            let delay = self.timing.delay_for_index(index);
            scheduler.schedule(delay, TimerEvent::FileCompleted(id));
            debug!(file = %file.name, %id, delay_ms = delay, "file enqueued");

            self.files.push(TrackedFile { id, file });
            ids.push(id);
        }
        ids
    }

    /// Move a pending file to `Completed`.
    ///
    /// Returns `true` only when the status actually changed; unknown ids and
    /// already-completed files are left alone.
    pub fn mark_completed(&mut self, id: FileId) -> bool {
        match self.files.iter_mut().find(|t| t.id == id) {
            Some(tracked) if tracked.file.status == FileStatus::Pending => {
                tracked.file.status = FileStatus::Completed;
                debug!(file = %tracked.file.name, %id, "file completed");
                true
            }
            _ => false,
        }
    }

    pub fn current_list(&self) -> &[TrackedFile] {
        &self.files
    }

    pub fn get(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|t| t.id == id).map(|t| &t.file)
    }

    pub fn rows(&self) -> Vec<FileRow> {
        self.files.iter().map(|t| FileRow::from(&t.file)).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.files.iter().filter(|t| t.file.is_pending()).count()
    }

    /// True when there is at least one file and none are pending.
    pub fn all_completed(&self) -> bool {
        !self.files.is_empty() && self.pending_count() == 0
    }

    pub fn remaining_slots(&self) -> usize {
        self.capacity.saturating_sub(self.files.len())
    }

    /// Drop every tracked file. Id allocation continues where it left off.
    pub(crate) fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> UploadStatusTracker {
        UploadStatusTracker::new(5, CompletionTiming::default())
    }

    fn files(names: &[&str]) -> Vec<UploadedFile> {
        names
            .iter()
            .map(|n| UploadedFile::pending(*n, 100))
            .collect()
    }

    #[test]
    fn enqueued_files_start_pending() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        let ids = t.enqueue(files(&["a.pdf", "b.txt"]), &mut sched);

        assert_eq!(ids.len(), 2);
        assert_eq!(t.pending_count(), 2);
        assert_eq!(sched.pending(), 2);
        assert_eq!(t.remaining_slots(), 3);
        assert!(!t.all_completed());
    }

    #[test]
    fn completions_are_staggered_in_enqueue_order() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        let ids = t.enqueue(files(&["a", "b", "c"]), &mut sched);

        let mut fired = Vec::new();
        while let Some(TimerEvent::FileCompleted(id)) = sched.advance_to_next() {
            fired.push((id, sched.now()));
        }
        assert_eq!(fired, vec![(ids[0], 1000), (ids[1], 1500), (ids[2], 2000)]);
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        let ids = t.enqueue(files(&["a.pdf"]), &mut sched);

        assert!(t.mark_completed(ids[0]));
        assert!(!t.mark_completed(ids[0]));
        assert_eq!(t.get(ids[0]).unwrap().status, FileStatus::Completed);
        assert!(t.all_completed());
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut t = tracker();
        assert!(!t.mark_completed(FileId(42)));
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        let first = t.enqueue(files(&["a"]), &mut sched);
        t.clear();
        let second = t.enqueue(files(&["b"]), &mut sched);

        assert_ne!(first[0], second[0]);
        assert!(!t.mark_completed(first[0]));
        assert_eq!(t.pending_count(), 1);
    }

    #[test]
    fn second_batch_restarts_stagger() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        t.enqueue(files(&["a", "b"]), &mut sched);
        sched.advance(200);
        t.enqueue(files(&["c"]), &mut sched);

        // c is index 0 of its own batch: due at 200 + 1000.
        let fired = sched.advance(1000);
        assert_eq!(fired.len(), 2);
    }

    #[test]
    fn rows_follow_list_order() {
        let mut t = tracker();
        let mut sched = Scheduler::new();
        let report = UploadedFile::pending("report.pdf", 2_936_012);
        t.enqueue(vec![report], &mut sched);
        let rows = t.rows();
        assert_eq!(rows[0].name, "report.pdf");
        assert_eq!(rows[0].size, "2.80 MB");
        assert_eq!(rows[0].status, FileStatus::Pending);
    }
}
