use std::path::PathBuf;

use thiserror::Error;

/// Unified result type for the promptline crate.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors surfaced while preparing a render. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("config `{path}` could not be read: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no config path given and PROMPTLINE_CONFIG is unset")]
    MissingConfig,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
