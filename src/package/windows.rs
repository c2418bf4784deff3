//! Windows packaging: zip artifact layout plus the NSIS installer.

use crate::ReleaseConfig;
use crate::error::{FilesystemError, Result};
use crate::package::Artifact;
use crate::platform::OsTag;
use crate::process;

/// Reference the zip artifact for one runtime identifier.
///
/// The published `bin/<rid>` directory is the artifact root; the release
/// harness compresses it into `OpenUtau-<rid>.zip`. This step only verifies
/// the directory exists before the feed references it.
pub fn zip_artifact(config: &ReleaseConfig, rid: &str) -> Result<Artifact> {
    let dir = config.work_dir.join(format!("bin/{rid}"));
    if !dir.is_dir() {
        return Err(FilesystemError::MissingBuildOutput { path: dir }.into());
    }
    Ok(Artifact::new(
        rid,
        format!("OpenUtau-{rid}.zip"),
        OsTag::Windows,
    ))
}

/// Compile the NSIS installer from one runtime identifier's output.
pub async fn build_installer(config: &ReleaseConfig, rid: &str) -> Result<Artifact> {
    process::require_tool("makensis")?;

    let version_def = format!("-DPRODUCT_VERSION={}", config.version);
    process::run_checked("makensis", &[&version_def, "OpenUtau.nsi"], &config.work_dir).await?;

    let artifact = installer_artifact(rid);
    let installer = config.work_dir.join(&artifact.filename);
    if !installer.is_file() {
        return Err(FilesystemError::MissingArtifact { path: installer }.into());
    }
    Ok(artifact)
}

/// Installer artifact reference for one runtime identifier.
///
/// The variant tag keeps the installer feed distinct from the same RID's
/// zip feed.
pub fn installer_artifact(rid: &str) -> Artifact {
    Artifact::new(
        &format!("{rid}-installer"),
        format!("OpenUtau-{rid}.exe"),
        OsTag::Windows,
    )
}
