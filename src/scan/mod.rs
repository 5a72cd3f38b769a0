//! Input tree classification.
//!
//! Files are classified by their path relative to the input root, by
//! convention: anything under a directory segment containing `images` is a
//! binary asset, markdown files under a directory segment containing
//! `reports` are report documents, and everything else is ignored.

use std::path::Path;

/// Kind of input file, determines the action taken during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Markdown report document - fed to the pipeline.
    ReportDocument,
    /// Binary asset - copied verbatim to the mirrored location.
    ImageAsset,
    /// Everything else - skipped.
    Ignored,
}

impl FileKind {
    /// Classify a path relative to the input root.
    ///
    /// The images rule wins over the reports rule, so every file maps to
    /// exactly one kind.
    pub fn classify(rel_path: &Path) -> Self {
        if dir_segment_contains(rel_path, "images") {
            return Self::ImageAsset;
        }
        if is_markdown(rel_path) && dir_segment_contains(rel_path, "reports") {
            return Self::ReportDocument;
        }
        Self::Ignored
    }
}

/// Check whether any directory segment of the relative path contains the
/// needle. The file name itself is not a directory segment.
fn dir_segment_contains(rel_path: &Path, needle: &str) -> bool {
    rel_path.parent().is_some_and(|parent| {
        parent.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|segment| segment.contains(needle))
        })
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "md" | "markdown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_documents() {
        assert_eq!(
            FileKind::classify(&PathBuf::from("reports/scan.md")),
            FileKind::ReportDocument
        );
        assert_eq!(
            FileKind::classify(&PathBuf::from("security/reports/2024/scan.markdown")),
            FileKind::ReportDocument
        );
        // Segment match is substring-based
        assert_eq!(
            FileKind::classify(&PathBuf::from("weekly-reports/scan.md")),
            FileKind::ReportDocument
        );
    }

    #[test]
    fn test_image_assets() {
        assert_eq!(
            FileKind::classify(&PathBuf::from("reports/images/foo.png")),
            FileKind::ImageAsset
        );
        assert_eq!(
            FileKind::classify(&PathBuf::from("images/logo.svg")),
            FileKind::ImageAsset
        );
    }

    #[test]
    fn test_images_rule_wins() {
        // A markdown file under an images segment is an asset, not a document
        assert_eq!(
            FileKind::classify(&PathBuf::from("reports/images/note.md")),
            FileKind::ImageAsset
        );
    }

    #[test]
    fn test_ignored() {
        // Markdown outside a reports segment
        assert_eq!(
            FileKind::classify(&PathBuf::from("docs/readme.md")),
            FileKind::Ignored
        );
        // Non-markdown under reports
        assert_eq!(
            FileKind::classify(&PathBuf::from("reports/data.csv")),
            FileKind::Ignored
        );
        // File name alone does not make a segment
        assert_eq!(
            FileKind::classify(&PathBuf::from("images.png")),
            FileKind::Ignored
        );
        assert_eq!(
            FileKind::classify(&PathBuf::from("reports.md")),
            FileKind::Ignored
        );
    }
}
