//! Platform packaging: one distinct procedure per distributable kind.
//!
//! Each submodule owns one platform's packaging steps end to end. The only
//! shared pieces are the [`Artifact`] reference handed to the appcast
//! generator and the stale-output cleanup used before regeneration.

pub mod linux;
pub mod macos;
pub mod windows;

use std::path::Path;

use crate::error::Result;
use crate::platform::OsTag;

/// A single named distributable file.
///
/// Consumed by the appcast generator as a reference only; the file itself is
/// never reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// RID or installer variant tag; keys the appcast filename
    pub tag: String,
    /// Final artifact filename in the working directory
    pub filename: String,
    /// Platform tag carried into the feed
    pub os: OsTag,
}

impl Artifact {
    /// Reference an artifact by tag and filename.
    pub fn new(tag: &str, filename: String, os: OsTag) -> Self {
        Self {
            tag: tag.to_string(),
            filename,
            os,
        }
    }
}

/// Remove generated files matching `pattern` from `dir` so a re-run never
/// leaves mixed-version outputs behind.
pub async fn remove_stale(dir: &Path, pattern: &str) -> Result<()> {
    let full = dir.join(pattern);
    let paths = glob::glob(&full.to_string_lossy()).map_err(anyhow::Error::from)?;
    for path in paths.flatten() {
        log::debug!("removing stale output {}", path.display());
        tokio::fs::remove_file(&path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_cleanup_only_touches_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(dir.path().join("appcast.win-x64.xml"), b"old")
            .await
            .expect("write");
        tokio::fs::write(dir.path().join("keep.txt"), b"keep")
            .await
            .expect("write");

        remove_stale(dir.path(), "*.xml").await.expect("cleanup");

        assert!(!dir.path().join("appcast.win-x64.xml").exists());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[tokio::test]
    async fn stale_cleanup_with_no_matches_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        remove_stale(dir.path(), "*.dmg").await.expect("cleanup");
    }
}
