use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{FileRecord, Strategy};

pub const NO_EXTENSION: &str = "No Extension";

const TINY_LIMIT: u64 = 100 * 1024;
const SMALL_LIMIT: u64 = 1024 * 1024;
const MEDIUM_LIMIT: u64 = 10 * 1024 * 1024;
const LARGE_LIMIT: u64 = 100 * 1024 * 1024;

/// File type families used by the `ByType` strategy, in match priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Images,
    Audio,
    Videos,
    Code,
    Archives,
    Documents,
    Spreadsheets,
    Presentations,
    Other,
}

impl FileType {
    pub fn label(self) -> &'static str {
        match self {
            FileType::Images => "Images",
            FileType::Audio => "Audio",
            FileType::Videos => "Videos",
            FileType::Code => "Code",
            FileType::Archives => "Archives",
            FileType::Documents => "Documents",
            FileType::Spreadsheets => "Spreadsheets",
            FileType::Presentations => "Presentations",
            FileType::Other => "Other",
        }
    }
}

/// Resolves the category label for one record. Never fails and never returns
/// an empty label.
pub fn category_for(record: &FileRecord, strategy: Strategy, now: DateTime<Utc>) -> String {
    match strategy {
        Strategy::ByType => {
            let file_type = extension_of(&record.name)
                .map(|ext| type_for_extension(&ext))
                .unwrap_or(FileType::Other);
            file_type.label().to_string()
        }
        Strategy::ByDate => date_category(record.modified_at, now).to_string(),
        Strategy::BySize => size_category(record.size).to_string(),
        Strategy::ByExtension => extension_category(&record.name),
    }
}

/// Lowercased text after the last dot of a file name.
///
/// Names without a dot, names ending in a dot and dotfiles such as `.bashrc`
/// have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Expects a lowercased extension without the leading dot.
pub fn type_for_extension(ext: &str) -> FileType {
    match ext {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" => FileType::Images,
        "mp3" | "wav" | "flac" | "aac" | "m4a" | "ogg" | "wma" => FileType::Audio,
        "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" | "mpeg" => FileType::Videos,
        "js" | "jsx" | "ts" | "tsx" | "py" | "java" | "cpp" | "c" | "h" | "cs" | "php" | "rb"
        | "go" | "rs" | "swift" | "html" | "css" | "json" | "xml" => FileType::Code,
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" => FileType::Archives,
        "txt" | "doc" | "docx" | "pdf" | "rtf" | "odt" | "pages" => FileType::Documents,
        "xls" | "xlsx" | "csv" | "ods" | "numbers" => FileType::Spreadsheets,
        "ppt" | "pptx" | "odp" | "key" => FileType::Presentations,
        _ => FileType::Other,
    }
}

/// Whole days elapsed from `modified_at` to `now`, truncated toward zero.
pub fn days_between(modified_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(modified_at).num_days()
}

/// Future timestamps clamp to zero days and land in "Today".
pub fn date_category(modified_at: DateTime<Utc>, now: DateTime<Utc>) -> &'static str {
    let diff_days = days_between(modified_at, now).max(0);
    match diff_days {
        0 => "Today",
        1 => "Yesterday",
        d if d < 7 => "This Week",
        d if d < 30 => "This Month",
        d if d < 90 => "Last 3 Months",
        d if d < 365 => "This Year",
        _ => "Older",
    }
}

pub fn size_category(bytes: u64) -> &'static str {
    if bytes < TINY_LIMIT {
        "Tiny (< 100KB)"
    } else if bytes < SMALL_LIMIT {
        "Small (< 1MB)"
    } else if bytes < MEDIUM_LIMIT {
        "Medium (< 10MB)"
    } else if bytes < LARGE_LIMIT {
        "Large (< 100MB)"
    } else {
        "Very Large (> 100MB)"
    }
}

pub fn extension_category(name: &str) -> String {
    match extension_of(name) {
        Some(ext) => format!(".{ext}"),
        None => NO_EXTENSION.to_string(),
    }
}
