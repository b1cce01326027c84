use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PLAN_VERSION: &str = "1.0.0";

/// Metadata for one selected file. Built once by the host and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        size: u64,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            modified_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    ByType,
    ByDate,
    BySize,
    ByExtension,
}

impl Strategy {
    /// UI order, matching `from_index`.
    pub const ALL: [Strategy; 4] = [
        Strategy::ByType,
        Strategy::ByDate,
        Strategy::BySize,
        Strategy::ByExtension,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::ByType => "By File Type",
            Strategy::ByDate => "By Date Modified",
            Strategy::BySize => "By File Size",
            Strategy::ByExtension => "By Extension",
        }
    }

    /// Maps a selector index to a strategy. Unknown indices fall back to `ByType`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        match self {
            Strategy::ByType => 0,
            Strategy::ByDate => 1,
            Strategy::BySize => 2,
            Strategy::ByExtension => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBucket {
    pub label: String,
    pub files: Vec<FileRecord>,
}

impl CategoryBucket {
    pub fn total_bytes(&self) -> u64 {
        self.files
            .iter()
            .fold(0_u64, |total, file| total.saturating_add(file.size))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSummary {
    pub category_count: usize,
    pub file_count: usize,
    pub strategy_label: String,
}

/// Output of one organize pass.
///
/// `buckets` keeps first-seen creation order and each bucket keeps input
/// order. Presentation code should go through [`OrganizedResult::sorted_buckets`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrganizedResult {
    pub strategy: Strategy,
    pub buckets: Vec<CategoryBucket>,
    pub summary: PlanSummary,
}

impl OrganizedResult {
    /// Buckets ordered by label, byte-wise ascending.
    pub fn sorted_buckets(&self) -> Vec<&CategoryBucket> {
        let mut sorted = self.buckets.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.label.as_bytes().cmp(b.label.as_bytes()));
        sorted
    }

    pub fn bucket(&self, label: &str) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sorted_buckets()
            .into_iter()
            .map(|bucket| bucket.label.as_str())
            .collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} categories \u{2022} {} files organized ({})",
            self.summary.category_count, self.summary.file_count, self.summary.strategy_label
        )
    }
}
