//! Command line argument parsing.
//!
//! Minimal by design: the tool runs from the OpenUtau repository root and
//! takes at most a release version.

use clap::Parser;

/// Release packaging pipeline for OpenUtau
#[derive(Parser, Debug)]
#[command(
    name = "openutau_release",
    version,
    about = "Build, package, and publish update feeds for OpenUtau",
    long_about = "Build self-contained OpenUtau binaries for the current platform, package
them as zip/installer/dmg/tarball, and write one Sparkle appcast per artifact.

Usage:
  openutau_release                 Release with the built-in default version
  openutau_release 0.1.548.0      Release an explicit version"
)]
pub struct Args {
    /// Release version; the built-in default constant is used when omitted
    #[arg(id = "release_version", index = 1, value_name = "VERSION")]
    pub version: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
