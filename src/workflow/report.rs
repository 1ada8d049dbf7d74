use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Insight};
use crate::upload::{FileStatus, TrackedFile};

/// One row of the processed-file list: a session upload or a supplementary
/// sample document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub name: String,
    pub size_label: String,
    pub status: FileStatus,
}

/// Session files first, in upload order, then the catalog's sample files.
pub fn combined_files(files: &[TrackedFile], catalog: &Catalog) -> Vec<ProcessedFile> {
    files
        .iter()
        .map(|t| ProcessedFile {
            name: t.file.name.clone(),
            size_label: t.file.size_label(),
            status: t.file.status,
        })
        .chain(catalog.sample_files.iter().map(|s| ProcessedFile {
            name: s.name.clone(),
            size_label: s.size_label.clone(),
            status: FileStatus::Completed,
        }))
        .collect()
}

/// What the dialog shows once summarization is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub insights: Vec<Insight>,
    pub processed_files: Vec<ProcessedFile>,
}

impl SummaryReport {
    pub fn build(files: &[TrackedFile], catalog: &Catalog) -> Self {
        Self {
            insights: catalog.summary_insights.clone(),
            processed_files: combined_files(files, catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{FileId, UploadedFile};

    fn tracked(name: &str, status: FileStatus) -> TrackedFile {
        let mut file = UploadedFile::pending(name, 2_936_012);
        file.status = status;
        TrackedFile {
            id: FileId(0),
            file,
        }
    }

    #[test]
    fn session_files_come_first() {
        let catalog = Catalog::default();
        let files = vec![tracked("report.pdf", FileStatus::Completed)];
        let combined = combined_files(&files, &catalog);

        assert_eq!(combined.len(), 6);
        assert_eq!(combined[0].name, "report.pdf");
        assert_eq!(combined[0].size_label, "2.80 MB");
        assert_eq!(combined[1].name, "q3-2024-earnings-report.pdf");
        assert!(combined.iter().all(|f| f.status == FileStatus::Completed));
    }

    #[test]
    fn pending_status_is_carried_through() {
        let catalog = Catalog::default();
        let files = vec![tracked("a.txt", FileStatus::Pending)];
        let combined = combined_files(&files, &catalog);
        assert_eq!(combined[0].status, FileStatus::Pending);
    }

    #[test]
    fn report_uses_catalog_insights() {
        let catalog = Catalog::default();
        let report = SummaryReport::build(&[], &catalog);
        assert_eq!(report.insights, catalog.summary_insights);
        assert_eq!(report.processed_files.len(), 5);
    }
}
