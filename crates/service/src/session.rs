use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use medama_core::{
    build_plan_document, format_local_timestamp, format_size, organize, render_markdown_summary,
    write_plan, write_plan_document, FileRecord, OrganizeError, OrganizedResult, PlanDocument,
    Strategy,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of the selected-files listing, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedFileRow {
    pub name: String,
    pub size: String,
    pub modified: String,
}

/// Host-owned state: the current selection, the active strategy and the
/// result of the last organize pass.
#[derive(Debug, Clone, Default)]
pub struct Session {
    files: Vec<FileRecord>,
    strategy: Strategy,
    organized: Option<OrganizedResult>,
}

impl Session {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn organized(&self) -> Option<&OrganizedResult> {
        self.organized.as_ref()
    }

    /// Replaces the selection and drops any previous result.
    pub fn select_files(&mut self, records: Vec<FileRecord>) {
        self.files = records;
        self.organized = None;
    }

    /// Appends to the selection. The last result stays until the next pass.
    pub fn add_files(&mut self, records: impl IntoIterator<Item = FileRecord>) {
        self.files.extend(records);
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.organized = None;
    }

    /// Takes effect on the next organize pass.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn organize(&mut self, now: DateTime<Utc>) -> Result<&OrganizedResult, OrganizeError> {
        let result = organize(&self.files, self.strategy, now)?;
        info!("{}", result.summary_line());
        Ok(self.organized.insert(result))
    }

    pub fn selected_rows(&self) -> Vec<SelectedFileRow> {
        self.files
            .iter()
            .map(|file| SelectedFileRow {
                name: file.name.clone(),
                size: format_size(file.size),
                modified: format_local_timestamp(&file.modified_at),
            })
            .collect()
    }

    pub fn export_plan(&self, path: impl AsRef<Path>) -> Result<(), OrganizeError> {
        write_plan(self.require_result()?, path)
    }

    pub fn export_plan_document(
        &self,
        path: impl AsRef<Path>,
        generated_at: DateTime<Utc>,
    ) -> Result<PlanDocument, OrganizeError> {
        let document = build_plan_document(self.require_result()?, generated_at);
        write_plan_document(&document, path)?;
        Ok(document)
    }

    pub fn export_markdown(&self, path: impl AsRef<Path>) -> Result<(), OrganizeError> {
        let path = path.as_ref();
        let markdown = render_markdown_summary(self.require_result()?);
        fs::write(path, markdown).map_err(|source| OrganizeError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
    }

    fn require_result(&self) -> Result<&OrganizedResult, OrganizeError> {
        self.organized
            .as_ref()
            .ok_or(OrganizeError::NoResultToExport)
    }
}
