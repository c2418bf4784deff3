//! Typed external process invocation.
//!
//! Every toolchain and packaging utility call goes through this module so a
//! nonzero exit status surfaces as a structured [`CommandError`] and the
//! pipeline can short-circuit, instead of the historical behavior of running
//! the next step against output that was never produced.

use std::path::{Path, PathBuf};

use crate::error::{CommandError, Result};

/// Run `program` with `args` in `cwd` and fail on a nonzero exit status.
///
/// Blocks (asynchronously) until the process completes; the pipeline is
/// strictly sequential by design.
pub async fn run_checked(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    log::debug!("running: {} {}", program, args.join(" "));

    let output = tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| CommandError::Spawn {
            program: program.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CommandError::Failed {
            program: program.to_string(),
            args: args.join(" "),
            status: output.status,
            stderr,
        }
        .into());
    }

    if !output.stdout.is_empty() {
        log::debug!("{} output: {}", program, String::from_utf8_lossy(&output.stdout).trim());
    }
    Ok(())
}

/// Locate a required packaging utility on PATH before invoking it, so a
/// missing tool is reported by name instead of as a spawn failure mid-run.
pub fn require_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| {
        CommandError::ToolNotFound {
            tool: tool.to_string(),
        }
        .into()
    })
}
