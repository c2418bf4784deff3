//! Top-level release pipeline: platform dispatch and stage sequencing.
//!
//! Execution is strictly sequential; each stage blocks until its external
//! process completes, and the first failed stage aborts the run so a feed is
//! never written for an artifact that does not exist.

use crate::ReleaseConfig;
use crate::appcast;
use crate::build;
use crate::cli::OutputManager;
use crate::directml;
use crate::error::Result;
use crate::package::{self, Artifact};
use crate::platform::{OsTag, PlatformProfile};
use crate::tag;

/// Run the full pipeline for one platform profile.
///
/// Returns the artifacts whose feeds were written, in production order.
pub async fn run(
    config: &ReleaseConfig,
    profile: &PlatformProfile,
    output: &OutputManager,
) -> Result<Vec<Artifact>> {
    match profile.os {
        OsTag::Windows => run_windows(config, profile, output).await,
        OsTag::Macos => run_macos(config, profile, output).await,
        OsTag::Linux => run_linux(config, profile, output).await,
    }
}

/// Windows: tag the release, prefetch the DirectML runtime, then zip layouts
/// for both architectures plus the NSIS installer built from the win-x64
/// output.
async fn run_windows(
    config: &ReleaseConfig,
    profile: &PlatformProfile,
    output: &OutputManager,
) -> Result<Vec<Artifact>> {
    output.println(&format!("🏷️  Tagging {}", tag::tag_name(&config.version)));
    tag::tag_release(config).await?;

    package::remove_stale(&config.work_dir, "*.xml").await?;

    output.println("⬇️  Fetching DirectML");
    directml::prefetch(config).await?;

    let mut artifacts = Vec::new();
    for rid in &profile.rids {
        output.println(&format!("🔨 Building {rid}"));
        build::restore(config, rid).await?;
        build::publish_self_contained(config, rid).await?;
        build::copy_builtin_plugin(config, rid).await?;

        let artifact = package::windows::zip_artifact(config, rid)?;
        appcast::write_appcast(&config.version, &artifact, &config.work_dir)?;
        output.success(&artifact.filename);
        artifacts.push(artifact);
    }

    if let Some(rid) = profile.installer_rid() {
        output.println(&format!("📦 Building installer from {rid}"));
        let installer = package::windows::build_installer(config, rid).await?;
        appcast::write_appcast(&config.version, &installer, &config.work_dir)?;
        output.success(&installer.filename);
        artifacts.push(installer);
    }

    Ok(artifacts)
}

/// macOS: stamp the version into the project descriptor, bundle the .app for
/// the host architecture, and package it as an ad-hoc signed disk image.
async fn run_macos(
    config: &ReleaseConfig,
    profile: &PlatformProfile,
    output: &OutputManager,
) -> Result<Vec<Artifact>> {
    package::remove_stale(&config.work_dir, "*.dmg").await?;
    package::remove_stale(&config.work_dir, "*.xml").await?;

    build::stamp_project_version(config).await?;

    let mut artifacts = Vec::new();
    for rid in &profile.rids {
        output.println(&format!("🔨 Bundling {rid}"));
        build::restore(config, rid).await?;
        let app = build::bundle_app(config, rid).await?;

        output.println("📦 Creating disk image");
        let artifact = package::macos::build_dmg(config, rid, &app).await?;
        appcast::write_appcast(&config.version, &artifact, &config.work_dir)?;
        output.success(&artifact.filename);
        artifacts.push(artifact);
    }

    Ok(artifacts)
}

/// Linux (and any unrecognized host): self-contained publish packaged as a
/// compressed tarball.
async fn run_linux(
    config: &ReleaseConfig,
    profile: &PlatformProfile,
    output: &OutputManager,
) -> Result<Vec<Artifact>> {
    package::remove_stale(&config.work_dir, "*.xml").await?;

    let mut artifacts = Vec::new();
    for rid in &profile.rids {
        output.println(&format!("🔨 Building {rid}"));
        build::restore(config, rid).await?;
        build::publish_self_contained(config, rid).await?;
        build::copy_builtin_plugin(config, rid).await?;

        output.println("📦 Creating tarball");
        let artifact = package::linux::build_tarball(config, rid).await?;
        appcast::write_appcast(&config.version, &artifact, &config.work_dir)?;
        output.success(&artifact.filename);
        artifacts.push(artifact);
    }

    Ok(artifacts)
}
