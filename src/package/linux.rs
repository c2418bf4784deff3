//! Linux packaging: compressed tarball of the self-contained publish output.
//!
//! The tarball is written in-process with `tar` and `flate2` rather than by
//! shelling out, so a truncated archive surfaces as an IO error instead of a
//! silently bad artifact.

use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::ReleaseConfig;
use crate::error::{FilesystemError, Result};
use crate::package::Artifact;
use crate::platform::OsTag;

/// Archive `bin/<rid>` into `OpenUtau-<rid>.tar.gz` in the working directory.
///
/// The main executable is marked executable first; the archive preserves
/// permission bits, so the extracted tree is runnable as-is.
pub async fn build_tarball(config: &ReleaseConfig, rid: &str) -> Result<Artifact> {
    let build_dir = config.work_dir.join(format!("bin/{rid}"));
    if !build_dir.is_dir() {
        return Err(FilesystemError::MissingBuildOutput { path: build_dir }.into());
    }

    mark_executable(&build_dir.join("OpenUtau"))?;

    let filename = format!("OpenUtau-{rid}.tar.gz");
    let tarball = config.work_dir.join(&filename);
    let dir = build_dir.clone();
    let out = tarball.clone();
    tokio::task::spawn_blocking(move || write_tarball(&dir, &out))
        .await
        .map_err(anyhow::Error::from)??;

    Ok(Artifact::new(rid, filename, OsTag::Linux))
}

fn write_tarball(build_dir: &Path, out: &Path) -> Result<()> {
    let file = File::create(out)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.follow_symlinks(false);
    archive.append_dir_all(".", build_dir)?;
    archive.into_inner()?.finish()?;
    Ok(())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|_| FilesystemError::MissingSource {
        path: path.to_path_buf(),
    })?;
    let mut perms = metadata.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
