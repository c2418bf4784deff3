//! Release tagging.
//!
//! Creates and pushes a `build/<version>` tag marking the release point.
//! Only the Windows branch tags; the macOS and Linux branches never have.
//! That asymmetry is preserved as observed behavior, see DESIGN.md.

use crate::ReleaseConfig;
use crate::error::Result;
use crate::process;

/// Tag name for one release version.
pub fn tag_name(version: &crate::version::ReleaseVersion) -> String {
    format!("build/{version}")
}

/// Create `build/<version>` at the current commit and push it to origin.
pub async fn tag_release(config: &ReleaseConfig) -> Result<()> {
    let tag = tag_name(&config.version);
    process::run_checked("git", &["tag", &tag], &config.work_dir).await?;
    process::run_checked("git", &["push", "origin", &tag], &config.work_dir).await?;
    log::info!("tagged release {tag}");
    Ok(())
}
