//! Command line interface for openutau_release.
//!
//! Resolves the release version and platform profile once, then hands both
//! to the pipeline.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::ReleaseConfig;
use crate::error::Result;
use crate::pipeline;
use crate::platform::PlatformProfile;
use crate::version::{ReleaseVersion, VersionSource};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new();

    let version = ReleaseVersion::resolve(args.version, VersionSource::default());
    let work_dir = std::env::current_dir()?;
    let config = ReleaseConfig { version, work_dir };

    let profile = PlatformProfile::detect();
    let host_os = std::env::consts::OS;
    if !matches!(host_os, "windows" | "macos" | "linux") {
        output.warn(&format!(
            "Unrecognized host '{host_os}'; falling through to the Linux branch"
        ));
    }
    output.println(&format!(
        "🚀 Releasing OpenUtau {} ({})",
        config.version,
        profile.os.sparkle_name()
    ));

    let artifacts = pipeline::run(&config, &profile, &output).await?;

    output.success(&format!(
        "Release complete: {} artifact(s) with matching appcasts",
        artifacts.len()
    ));
    Ok(0)
}
