//! Build orchestration: dependency restore and self-contained publish, once
//! per runtime identifier.
//!
//! The application itself is opaque to this pipeline; these steps only drive
//! the external dotnet toolchain and verify that the expected output appeared
//! before handing it to the packager.

use std::path::PathBuf;

use crate::ReleaseConfig;
use crate::error::{FilesystemError, Result};
use crate::process;

/// Project directory passed to the dotnet toolchain.
pub const PROJECT: &str = "OpenUtau";

/// Placeholder version stamped over in the project descriptor on macOS.
const VERSION_PLACEHOLDER: &str = "0.0.0";

const PLUGIN_DLL: &str =
    "OpenUtau.Plugin.Builtin/bin/Release/netstandard2.1/OpenUtau.Plugin.Builtin.dll";

/// Restore dependencies for one runtime identifier.
pub async fn restore(config: &ReleaseConfig, rid: &str) -> Result<()> {
    process::run_checked("dotnet", &["restore", PROJECT, "-r", rid], &config.work_dir).await
}

/// Publish a self-contained build into `bin/<rid>`.
///
/// Returns the build output directory, which the packager takes over.
pub async fn publish_self_contained(config: &ReleaseConfig, rid: &str) -> Result<PathBuf> {
    let out = format!("bin/{rid}");
    process::run_checked(
        "dotnet",
        &[
            "publish",
            PROJECT,
            "-c",
            "Release",
            "-r",
            rid,
            "--self-contained",
            "true",
            "-o",
            &out,
        ],
        &config.work_dir,
    )
    .await?;

    let dir = config.work_dir.join(&out);
    if !dir.is_dir() {
        return Err(FilesystemError::MissingBuildOutput { path: dir }.into());
    }
    Ok(dir)
}

/// Build the macOS .app bundle via the BundleApp msbuild target.
///
/// The bundle lands in `bin/<rid>/publish/OpenUtau.app`.
pub async fn bundle_app(config: &ReleaseConfig, rid: &str) -> Result<PathBuf> {
    let rid_prop = format!("-p:RuntimeIdentifier={rid}");
    let out_prop = format!("-p:OutputPath=../bin/{rid}/");
    process::run_checked(
        "dotnet",
        &[
            "msbuild",
            PROJECT,
            "-t:BundleApp",
            "-p:Configuration=Release",
            &rid_prop,
            "-p:UseAppHost=true",
            &out_prop,
            "-p:PublishReadyToRun=false",
        ],
        &config.work_dir,
    )
    .await?;

    let app = config.work_dir.join(format!("bin/{rid}/publish/OpenUtau.app"));
    if !app.is_dir() {
        return Err(FilesystemError::MissingBuildOutput { path: app }.into());
    }
    Ok(app)
}

/// Stamp the release version over the placeholder in the project descriptor.
///
/// macOS only: the bundled app reports its version from the csproj, so the
/// placeholder must be replaced before restore runs. Plain textual
/// substitution, same as the historical sed invocation.
pub async fn stamp_project_version(config: &ReleaseConfig) -> Result<()> {
    let csproj = config.work_dir.join(format!("{PROJECT}/{PROJECT}.csproj"));
    let text = tokio::fs::read_to_string(&csproj)
        .await
        .map_err(|_| FilesystemError::MissingSource {
            path: csproj.clone(),
        })?;
    let stamped = text.replace(VERSION_PLACEHOLDER, config.version.as_str());
    tokio::fs::write(&csproj, stamped).await?;
    log::info!("stamped version {} into {}", config.version, csproj.display());
    Ok(())
}

/// Copy the builtin phonemizer plugin next to the published output so the
/// packaged artifact is self-sufficient.
pub async fn copy_builtin_plugin(config: &ReleaseConfig, rid: &str) -> Result<()> {
    let src = config.work_dir.join(PLUGIN_DLL);
    if !src.is_file() {
        return Err(FilesystemError::MissingSource { path: src }.into());
    }
    let dest = config
        .work_dir
        .join(format!("bin/{rid}"))
        .join("OpenUtau.Plugin.Builtin.dll");
    tokio::fs::copy(&src, &dest).await?;
    Ok(())
}
