//! # OpenUtau Release
//!
//! Release packaging pipeline for the OpenUtau desktop application.
//!
//! One run resolves a release version, selects the packaging steps for the
//! host platform, drives the external dotnet toolchain and platform
//! packaging utilities, and writes one Sparkle appcast per artifact.
//!
//! ## Pipeline
//!
//! - **Windows**: tag the release, publish `win-x86` and `win-x64`
//!   self-contained builds as zip artifact roots, compile the NSIS installer
//!   from the `win-x64` output.
//! - **macOS**: stamp the version into the project descriptor, bundle the
//!   .app for the host architecture, package it as an ad-hoc signed dmg.
//! - **Linux** (and any unrecognized host): publish `linux-x64` and package
//!   it as a compressed tarball.
//!
//! ## Usage
//!
//! ```bash
//! openutau_release              # built-in default version
//! openutau_release 0.1.548.0   # explicit version
//! ```
//!
//! Every external invocation returns a typed result; the pipeline aborts on
//! the first failure instead of emitting feeds for artifacts that were never
//! produced.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod appcast;
pub mod build;
pub mod cli;
pub mod directml;
pub mod error;
pub mod package;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod tag;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use error::{CommandError, FilesystemError, ReleaseError, Result};
pub use package::Artifact;
pub use platform::{OsTag, PackagingKind, PlatformProfile};
pub use version::{DEFAULT_VERSION, ReleaseVersion, VersionSource};

use std::path::PathBuf;

/// Immutable configuration for one pipeline run.
///
/// Constructed once at entry and passed explicitly to every component; no
/// component reads version or paths from ambient state.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Release version for this run
    pub version: ReleaseVersion,
    /// Directory containing the OpenUtau sources and receiving all outputs
    pub work_dir: PathBuf,
}
