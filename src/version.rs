//! Release version resolution.
//!
//! The version is resolved exactly once at pipeline start and passed
//! explicitly to every component; nothing reads it from ambient state later.

use std::fmt;

/// Version used when no explicit argument is supplied.
pub const DEFAULT_VERSION: &str = "0.1.547.7";

/// CI build-version variable consulted only when [`VersionSource::read_from_env`]
/// is enabled.
pub const VERSION_ENV_VAR: &str = "APPVEYOR_BUILD_VERSION";

/// Where a missing positional version falls back to.
///
/// The environment path exists for CI use but is disabled by default; the
/// positional argument always wins when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionSource {
    /// Read [`VERSION_ENV_VAR`] instead of the default constant.
    pub read_from_env: bool,
}

/// Release version string, used verbatim in filenames, tags, and feed fields.
///
/// No grammar is enforced; any non-empty string is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Resolve the version for this run. Never fails.
    pub fn resolve(arg: Option<String>, source: VersionSource) -> Self {
        if let Some(version) = arg.filter(|v| !v.is_empty()) {
            return Self(version);
        }
        if source.read_from_env
            && let Ok(version) = std::env::var(VERSION_ENV_VAR)
            && !version.is_empty()
        {
            return Self(version);
        }
        Self(DEFAULT_VERSION.to_string())
    }

    /// The version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
