use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeedError>;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Download failed: {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download failed: {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Archive not found: {path}")]
    ArchiveNotFound { path: PathBuf },

    #[error("Extraction tool '{tool}' could not be started: {source}")]
    FallbackUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed with error code {}: {stderr}", .code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    FallbackFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Could not find main project directory in {dir} (looked for {markers})")]
    ProjectNotFound { dir: PathBuf, markers: String },

    #[error("Destination exists and is not a directory: {path}")]
    DestinationConflict { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("{message}")]
    Operation { message: String },
}

impl From<anyhow::Error> for SeedError {
    fn from(error: anyhow::Error) -> Self {
        SeedError::Operation {
            message: format!("{error:#}"),
        }
    }
}

impl SeedError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        SeedError::ConfigError {
            message: message.into(),
        }
    }

    /// Maps `PermissionDenied` I/O failures onto the path that caused them.
    pub fn from_io(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => SeedError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => SeedError::Io(error),
        }
    }
}
