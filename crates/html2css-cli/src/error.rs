use std::path::PathBuf;

/// Failures while loading inputs or writing outputs.
///
/// Whether one is fatal depends on the source: HTML inputs abort the run,
/// stylesheet sources degrade to empty text.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("The file {} does not exist.", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error fetching {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Error fetching {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
