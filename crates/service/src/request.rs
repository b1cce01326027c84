use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use medama_core::{OrganizedResult, Strategy};
use serde::{Deserialize, Serialize};

use crate::collect::{collect_records, CollectOptions};
use crate::session::Session;

pub const DEFAULT_PLAN_FILE: &str = "organization-plan.txt";

/// Everything needed for one organize run. Every field is optional in JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrganizeRequest {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub json_output: Option<PathBuf>,
    #[serde(default)]
    pub markdown_output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: OrganizedResult,
    pub warnings: Vec<String>,
    pub written: Vec<PathBuf>,
}

pub fn load_request(path: impl AsRef<Path>) -> Result<OrganizeRequest> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    let request: OrganizeRequest = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(request)
}

/// Collects metadata, runs one organize pass and writes the requested exports.
pub fn run_request(request: &OrganizeRequest, now: DateTime<Utc>) -> Result<RunOutcome> {
    if request.paths.is_empty() {
        bail!("no input paths given");
    }

    let collected = collect_records(
        &CollectOptions {
            paths: request.paths.clone(),
            recursive: request.recursive,
            max_depth: request.max_depth,
            excludes: request.excludes.clone(),
        },
        now,
    );

    let mut session = Session::new(request.strategy);
    session.select_files(collected.records);
    session
        .organize(now)
        .context("nothing to organize after collecting input paths")?;

    let written = write_exports(&session, request, now)?;

    let result = session
        .organized()
        .cloned()
        .context("organize pass left no result")?;

    Ok(RunOutcome {
        result,
        warnings: collected.warnings,
        written,
    })
}

#[derive(Debug, Clone, Copy)]
enum Export {
    Text,
    Json,
    Markdown,
}

/// Writes the requested exports in order. A failure names the exports that
/// were already written.
fn write_exports(
    session: &Session,
    request: &OrganizeRequest,
    now: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    let targets = [
        (Export::Text, &request.output),
        (Export::Json, &request.json_output),
        (Export::Markdown, &request.markdown_output),
    ];

    let mut written: Vec<PathBuf> = Vec::new();
    for (export, path) in targets {
        let Some(path) = path else { continue };
        let outcome = match export {
            Export::Text => session.export_plan(path),
            Export::Json => session.export_plan_document(path, now).map(|_| ()),
            Export::Markdown => session.export_markdown(path),
        };
        if let Err(err) = outcome {
            let already = if written.is_empty() {
                "nothing was written".to_string()
            } else {
                let paths: Vec<String> = written
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect();
                format!("already written: {}", paths.join(", "))
            };
            let message = format!("{export:?} export to {} failed; {already}", path.display());
            return Err(anyhow::Error::new(err).context(message));
        }
        written.push(path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Utc;
    use medama_core::Strategy;

    use super::{load_request, run_request, OrganizeRequest};

    #[test]
    fn request_fields_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{ "paths": ["a", "b"], "strategy": "by_size" }"#).expect("write");

        let request = load_request(&path).expect("request parses");
        assert_eq!(request.paths.len(), 2);
        assert_eq!(request.strategy, Strategy::BySize);
        assert!(!request.recursive);
        assert!(request.output.is_none());
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = run_request(&OrganizeRequest::default(), Utc::now()).expect_err("no paths");
        assert!(err.to_string().contains("no input paths"));
    }

    #[test]
    fn directory_without_files_reports_empty_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = OrganizeRequest {
            paths: vec![dir.path().to_path_buf()],
            ..OrganizeRequest::default()
        };
        let err = run_request(&request, Utc::now()).expect_err("nothing to organize");
        assert!(format!("{err:#}").contains("no files to organize"));
    }

    #[test]
    fn runs_collection_organize_and_exports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("input");
        fs::create_dir_all(&input).expect("input dir");
        fs::write(input.join("song.flac"), b"abc").expect("write");
        fs::write(input.join("photo.png"), b"abcd").expect("write");
        fs::write(input.join("LICENSE"), b"mit").expect("write");

        let output = dir.path().join("organization-plan.txt");
        let json_output = dir.path().join("plan.json");
        let request = OrganizeRequest {
            paths: vec![input],
            strategy: Strategy::ByExtension,
            output: Some(output.clone()),
            json_output: Some(json_output.clone()),
            ..OrganizeRequest::default()
        };

        let outcome = run_request(&request, Utc::now()).expect("run succeeds");
        assert_eq!(outcome.result.labels(), vec![".flac", ".png", "No Extension"]);
        assert_eq!(outcome.written, vec![output.clone(), json_output.clone()]);
        assert!(outcome.warnings.is_empty());

        let plan = fs::read_to_string(&output).expect("plan written");
        assert!(plan.contains(".png/ (1 files)\n   photo.png (4 B)\n"));
        assert!(json_output.exists());
    }

    #[test]
    fn failed_export_names_files_already_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("notes.txt");
        fs::write(&input, b"hello").expect("write");

        let output = dir.path().join("organization-plan.txt");
        let request = OrganizeRequest {
            paths: vec![input],
            output: Some(output.clone()),
            json_output: Some(dir.path().join("missing").join("plan.json")),
            ..OrganizeRequest::default()
        };

        let err = run_request(&request, Utc::now()).expect_err("json export fails");
        let message = format!("{err:#}");
        assert!(message.contains("Json export"));
        assert!(message.contains(&format!("already written: {}", output.display())));
        assert!(output.exists());
    }
}
