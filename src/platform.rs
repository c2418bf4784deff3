//! Platform profile registry.
//!
//! Maps the executing host to the ordered packaging steps for this run.
//! Selection happens once at startup; the rest of the pipeline dispatches on
//! the returned profile instead of re-checking the host OS.

/// Operating system tag carried through to the appcast feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsTag {
    /// Windows hosts, zip + NSIS installer artifacts
    Windows,
    /// macOS hosts, signed disk image artifact
    Macos,
    /// Linux hosts, compressed tarball artifact
    Linux,
}

impl OsTag {
    /// Value of the `sparkle:os` attribute in the feed.
    pub fn sparkle_name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Linux => "linux",
        }
    }
}

/// Final distributable container format for a platform.
///
/// Each kind is a distinct, non-interchangeable procedure; supporting a new
/// platform means adding a variant, not parameterizing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingKind {
    /// Self-contained directory compressed by the release harness
    Zip,
    /// NSIS installer executable
    Installer,
    /// Ad-hoc signed disk image
    Dmg,
    /// Gzip-compressed tarball
    TarGz,
}

/// Runtime identifiers and packaging procedure for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Host operating system tag
    pub os: OsTag,
    /// Runtime identifiers to build, in order
    pub rids: Vec<&'static str>,
    /// Packaging procedure applied to each build output
    pub packaging: PackagingKind,
}

impl PlatformProfile {
    /// Profile for the host this process is running on.
    pub fn detect() -> Self {
        Self::for_host(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Closed three-way dispatch over the host OS.
    ///
    /// An unrecognized host lands on the Linux branch. That mirrors the
    /// historical release script's fallthrough, kept here as an explicit
    /// choice rather than a validated support policy.
    pub fn for_host(os: &str, arch: &str) -> Self {
        match os {
            "windows" => Self {
                os: OsTag::Windows,
                rids: vec!["win-x86", "win-x64"],
                packaging: PackagingKind::Zip,
            },
            "macos" => {
                let rid = if arch == "aarch64" || arch == "arm64" {
                    "osx-arm64"
                } else {
                    "osx-x64"
                };
                Self {
                    os: OsTag::Macos,
                    rids: vec![rid],
                    packaging: PackagingKind::Dmg,
                }
            }
            _ => Self {
                os: OsTag::Linux,
                rids: vec!["linux-x64"],
                packaging: PackagingKind::TarGz,
            },
        }
    }

    /// The Windows branch builds a third pseudo-artifact, an installer
    /// compiled from this runtime identifier's output.
    pub fn installer_rid(&self) -> Option<&'static str> {
        match self.os {
            OsTag::Windows => Some("win-x64"),
            _ => None,
        }
    }
}
