//! macOS packaging: .app bundle to ad-hoc signed disk image.
//!
//! Uses the external `create-dmg` utility against the bundle produced by the
//! BundleApp msbuild target, then renames the image deterministically and
//! applies an ad-hoc signature. Real signing identities are out of scope.

use std::path::{Path, PathBuf};

use crate::ReleaseConfig;
use crate::error::{FilesystemError, Result};
use crate::package::{Artifact, remove_stale};
use crate::platform::OsTag;
use crate::process;

const ICON: &str = "OpenUtau/Assets/OpenUtau.icns";

/// Package the .app bundle at `app_bundle` into `OpenUtau-<rid>.dmg`.
pub async fn build_dmg(config: &ReleaseConfig, rid: &str, app_bundle: &Path) -> Result<Artifact> {
    process::require_tool("create-dmg")?;

    copy_icon(config, app_bundle).await?;

    // create-dmg refuses to overwrite; clear previous images first.
    remove_stale(&config.work_dir, "*.dmg").await?;

    let bundle_arg = app_bundle.to_string_lossy();
    process::run_checked("create-dmg", &[bundle_arg.as_ref()], &config.work_dir).await?;

    let filename = format!("OpenUtau-{rid}.dmg");
    let image = rename_created_dmg(&config.work_dir, &filename).await?;

    let image_arg = image.to_string_lossy();
    process::run_checked("codesign", &["-fvs", "-", image_arg.as_ref()], &config.work_dir).await?;

    Ok(Artifact::new(rid, filename, OsTag::Macos))
}

/// Copy the icon resource into the bundle so the mounted image shows it.
async fn copy_icon(config: &ReleaseConfig, app_bundle: &Path) -> Result<()> {
    let src = config.work_dir.join(ICON);
    if !src.is_file() {
        return Err(FilesystemError::MissingSource { path: src }.into());
    }
    let dest = app_bundle.join("Contents/Resources/OpenUtau.icns");
    tokio::fs::copy(&src, &dest).await?;
    Ok(())
}

/// create-dmg names the image after the bundle's display name and version;
/// pick up whatever it produced and rename it deterministically.
async fn rename_created_dmg(dir: &Path, filename: &str) -> Result<PathBuf> {
    let pattern = dir.join("*.dmg");
    let produced = glob::glob(&pattern.to_string_lossy())
        .map_err(anyhow::Error::from)?
        .flatten()
        .next()
        .ok_or_else(|| FilesystemError::MissingArtifact {
            path: dir.join(filename),
        })?;

    let target = dir.join(filename);
    if produced != target {
        tokio::fs::rename(&produced, &target).await?;
    }
    Ok(target)
}
