use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("no files to organize")]
    EmptyInput,

    #[error("no organized result to export; run organize first")]
    NoResultToExport,

    #[error("failed to write plan to {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
