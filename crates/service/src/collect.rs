use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use medama_core::FileRecord;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    pub paths: Vec<PathBuf>,
    pub recursive: bool,
    /// Only applies when `recursive` is set; directory children are depth 1.
    pub max_depth: Option<usize>,
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub records: Vec<FileRecord>,
    pub warnings: Vec<String>,
}

/// Reads name, size and modification time for one file. A modification time
/// the platform cannot report is taken as `now`.
pub fn record_from_path(path: &Path, now: DateTime<Utc>) -> Result<FileRecord> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to read metadata for {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    Ok(FileRecord {
        name,
        path: path.to_string_lossy().to_string(),
        size: metadata.len(),
        modified_at: modified_or(metadata.modified(), now),
    })
}

fn modified_or(modified: io::Result<SystemTime>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    modified.map(DateTime::<Utc>::from).unwrap_or(fallback)
}

/// Resolves files and directories into records, in the order the paths were
/// given. Directory entries are visited sorted by file name. Problems with
/// individual entries are reported as warnings.
pub fn collect_records(options: &CollectOptions, now: DateTime<Utc>) -> Collected {
    let mut collected = Collected::default();
    let excludes = ExcludeSet::build(&options.excludes, &mut collected.warnings);
    let depth = if options.recursive {
        options.max_depth.unwrap_or(usize::MAX)
    } else {
        1
    };

    for root in &options.paths {
        if excludes.contains(root) {
            continue;
        }

        if !root.is_dir() {
            push_record(root, now, &mut collected);
            continue;
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !excludes.contains(entry.path()));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    push_record(entry.path(), now, &mut collected);
                }
                Ok(_) => {}
                Err(err) => collected
                    .warnings
                    .push(format!("walk failed under {}: {}", root.display(), err)),
            }
        }
    }

    for warning in &collected.warnings {
        warn!("{warning}");
    }
    info!(
        roots = options.paths.len(),
        files = collected.records.len(),
        warnings = collected.warnings.len(),
        "collected file metadata"
    );
    collected
}

fn push_record(path: &Path, now: DateTime<Utc>, collected: &mut Collected) {
    match record_from_path(path, now) {
        Ok(record) => collected.records.push(record),
        Err(err) => collected.warnings.push(format!("{err:#}")),
    }
}

/// Paths left out of a collection pass. Globs are tried against the whole
/// path and the bare file name, so `*.tmp` works without a `**/` prefix.
/// Patterns without glob syntax match as case-insensitive text.
struct ExcludeSet {
    globs: GlobSet,
    needles: Vec<String>,
}

impl ExcludeSet {
    fn build(patterns: &[String], warnings: &mut Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut needles = Vec::new();

        for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            if !pattern.contains(['*', '?', '[', ']', '{', '}']) {
                needles.push(pattern.to_lowercase());
                continue;
            }
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    warnings.push(format!(
                        "exclude '{pattern}' is not a valid glob ({err}); matching it as text"
                    ));
                    needles.push(pattern.to_lowercase());
                }
            }
        }

        let globs = builder.build().unwrap_or_else(|err| {
            warnings.push(format!("exclude globs ignored: {err}"));
            GlobSet::empty()
        });
        Self { globs, needles }
    }

    fn contains(&self, path: &Path) -> bool {
        let by_glob = self.globs.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| self.globs.is_match(name));
        if by_glob || self.needles.is_empty() {
            return by_glob;
        }
        let lowered = path.to_string_lossy().to_lowercase();
        self.needles.iter().any(|needle| lowered.contains(needle.as_str()))
    }
}
