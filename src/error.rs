//! Error types for release pipeline operations.
//!
//! Every external process invocation and filesystem hand-off returns a typed
//! result so the pipeline can abort on the first failure instead of plowing
//! ahead and publishing a feed entry for an artifact that was never built.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for release pipeline operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release pipeline operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// External toolchain invocation errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Expected inputs or outputs missing on disk
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Appcast XML writing errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Package download errors
    #[error("Download failed for {url}: {source}")]
    Download {
        /// URL that was requested
        url: String,
        /// Underlying HTTP error
        #[source]
        source: reqwest::Error,
    },

    /// Archive extraction errors
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// External process invocation errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// The process could not be started at all
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The process ran but reported failure
    #[error("'{program} {args}' exited with {status}: {stderr}")]
    Failed {
        /// Program that was run
        program: String,
        /// Arguments it was run with
        args: String,
        /// Exit status it reported
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// A packaging utility is not installed on this host
    #[error("Required tool '{tool}' not found on PATH")]
    ToolNotFound {
        /// Tool name that was looked up
        tool: String,
    },
}

/// Filesystem hand-off errors between pipeline stages
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// A publish step reported success but its output directory is absent
    #[error("Expected build output missing at {path}")]
    MissingBuildOutput {
        /// Directory that was expected
        path: PathBuf,
    },

    /// A copy source (plugin binary, icon, project file) is absent
    #[error("Copy source missing at {path}")]
    MissingSource {
        /// File that was expected
        path: PathBuf,
    },

    /// A packaging utility reported success but produced no artifact
    #[error("Expected artifact missing at {path}")]
    MissingArtifact {
        /// Artifact path that was expected
        path: PathBuf,
    },
}

impl ReleaseError {
    /// Recovery suggestions shown for fatal errors
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Command(CommandError::ToolNotFound { tool }) => vec![
                format!("Install '{tool}' and make sure it is on PATH"),
            ],
            Self::Command(CommandError::Spawn { program, .. }) => vec![
                format!("Check that '{program}' is installed and executable"),
            ],
            Self::Command(CommandError::Failed { program, .. }) => vec![
                format!("Re-run '{program}' manually to inspect its full output"),
            ],
            Self::Filesystem(FilesystemError::MissingBuildOutput { .. }) => vec![
                "Run the pipeline from the OpenUtau repository root".to_string(),
                "Check that the preceding dotnet publish step succeeded".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
