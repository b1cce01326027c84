use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::OrganizeError;
use crate::format::format_size;
use crate::model::{OrganizedResult, PlanSummary, Strategy, PLAN_VERSION};

const SEPARATOR_WIDTH: usize = 60;

/// Renders the text plan. Categories are sorted by label; files keep the
/// order they had when organized.
pub fn render_plan(result: &OrganizedResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Directory Organization Plan ({})\n",
        result.summary.strategy_label
    ));
    out.push_str(&"=".repeat(SEPARATOR_WIDTH));
    out.push_str("\n\n");

    for bucket in result.sorted_buckets() {
        out.push_str(&format!(
            "{}/ ({} files)\n",
            bucket.label,
            bucket.files.len()
        ));
        for file in &bucket.files {
            out.push_str(&format!("   {} ({})\n", file.name, format_size(file.size)));
        }
        out.push('\n');
    }

    out
}

pub fn write_plan(result: &OrganizedResult, path: impl AsRef<Path>) -> Result<(), OrganizeError> {
    let path = path.as_ref();
    fs::write(path, render_plan(result)).map_err(|source| OrganizeError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        categories = result.summary.category_count,
        "plan written"
    );
    Ok(())
}

/// Machine-readable companion to the text plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    pub plan_version: String,
    pub plan_id: String,
    pub generated_at: String,
    pub strategy: Strategy,
    pub summary: PlanSummary,
    pub categories: Vec<PlanCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanCategory {
    pub label: String,
    pub file_count: usize,
    pub total_bytes: u64,
    pub files: Vec<PlanFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanFile {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub size_display: String,
    pub modified: String,
}

pub fn build_plan_document(result: &OrganizedResult, generated_at: DateTime<Utc>) -> PlanDocument {
    let categories = result
        .sorted_buckets()
        .into_iter()
        .map(|bucket| PlanCategory {
            label: bucket.label.clone(),
            file_count: bucket.files.len(),
            total_bytes: bucket.total_bytes(),
            files: bucket
                .files
                .iter()
                .map(|file| PlanFile {
                    name: file.name.clone(),
                    path: file.path.clone(),
                    size: file.size,
                    size_display: format_size(file.size),
                    modified: file.modified_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                })
                .collect(),
        })
        .collect();

    PlanDocument {
        plan_version: PLAN_VERSION.to_string(),
        plan_id: Uuid::new_v4().to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        strategy: result.strategy,
        summary: result.summary.clone(),
        categories,
    }
}

pub fn write_plan_document(
    document: &PlanDocument,
    path: impl AsRef<Path>,
) -> Result<(), OrganizeError> {
    let path = path.as_ref();
    let payload = serde_json::to_string_pretty(document).map_err(|err| {
        OrganizeError::WriteFailure {
            path: path.to_path_buf(),
            source: err.into(),
        }
    })?;
    fs::write(path, payload).map_err(|source| OrganizeError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{build_plan_document, render_plan, write_plan};
    use crate::error::OrganizeError;
    use crate::model::{CategoryBucket, FileRecord, OrganizedResult, PlanSummary, Strategy};

    fn record(name: &str, size: u64) -> FileRecord {
        let modified = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        FileRecord::new(name, format!("/data/{name}"), size, modified)
    }

    fn unsorted_result() -> OrganizedResult {
        let buckets = vec![
            CategoryBucket {
                label: "Videos".to_string(),
                files: vec![record("b.mp4", 3_145_728), record("a.mkv", 10)],
            },
            CategoryBucket {
                label: "Audio".to_string(),
                files: vec![record("c.mp3", 2048)],
            },
            CategoryBucket {
                label: "Code".to_string(),
                files: vec![record("lib.rs", 900)],
            },
        ];
        OrganizedResult {
            strategy: Strategy::ByType,
            summary: PlanSummary {
                category_count: buckets.len(),
                file_count: 4,
                strategy_label: Strategy::ByType.label().to_string(),
            },
            buckets,
        }
    }

    #[test]
    fn renders_sorted_categories_in_exact_layout() {
        let expected = "Directory Organization Plan (By File Type)\n\
============================================================\n\
\n\
Audio/ (1 files)\n   c.mp3 (2.0 KB)\n\n\
Code/ (1 files)\n   lib.rs (900 B)\n\n\
Videos/ (2 files)\n   b.mp4 (3.0 MB)\n   a.mkv (10 B)\n\n";
        assert_eq!(render_plan(&unsorted_result()), expected);
    }

    #[test]
    fn separator_is_sixty_characters() {
        let text = render_plan(&unsorted_result());
        let separator = text.lines().nth(1).expect("separator line");
        assert_eq!(separator.len(), 60);
        assert!(separator.chars().all(|ch| ch == '='));
    }

    #[test]
    fn write_plan_reports_unwritable_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("missing").join("plan.txt");
        let err = write_plan(&unsorted_result(), &target).expect_err("write fails");
        match err {
            OrganizeError::WriteFailure { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn write_plan_creates_text_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("organization-plan.txt");
        write_plan(&unsorted_result(), &target).expect("write succeeds");
        let written = std::fs::read_to_string(&target).expect("read back");
        assert_eq!(written, render_plan(&unsorted_result()));
    }

    #[test]
    fn plan_document_lists_sorted_categories_with_totals() {
        let generated = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let document = build_plan_document(&unsorted_result(), generated);

        assert_eq!(document.generated_at, "2024-05-06T07:08:09Z");
        assert_eq!(document.summary.file_count, 4);
        let labels = document
            .categories
            .iter()
            .map(|category| category.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Audio", "Code", "Videos"]);

        let videos = &document.categories[2];
        assert_eq!(videos.total_bytes, 3_145_738);
        assert_eq!(videos.files[0].size_display, "3.0 MB");
        assert_eq!(videos.files[0].modified, "2024-01-02T03:04:05Z");
    }
}
