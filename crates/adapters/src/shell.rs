// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command executor (C10): shells out through the host shell, with an
//! optional dry-run mode and a `pv` progress interposer for pipes.
//!
//! Dry-run only affects this module — planning, integrity checks, and
//! size estimation upstream of it still run in full (SPEC_FULL §9,
//! "dry-run boundary").

use std::process::{Output, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {status}")]
    NonZeroExit { command: String, status: i32 },
}

/// Whether `pv` is present on `PATH`. Checked once per process and
/// cached — the original tool does the same (`shutil.which` at import
/// time), and re-probing `PATH` on every pipe would be wasteful.
fn pv_available() -> bool {
    static PV_AVAILABLE: OnceLock<bool> = OnceLock::new();
    *PV_AVAILABLE.get_or_init(|| {
        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join("pv").is_file())
            })
            .unwrap_or(false)
    })
}

/// Shells out, running `cmd` through `/bin/sh -c`.
///
/// Under `dry_run`, prints the command and returns a synthetic
/// zero-status result without executing anything. Otherwise runs for
/// real; if `capture` is set, stdout is collected into the returned
/// `Output` (used by e.g. `zfs send -nvP` size estimation), otherwise
/// it's inherited so interactive/streaming commands work as expected.
pub async fn shell(cmd: &str, dry_run: bool, capture: bool) -> Result<Output, ExecError> {
    if dry_run {
        tracing::info!(command = cmd, "dry-run: would execute");
        println!("{cmd}");
        return Ok(synthetic_success());
    }

    tracing::debug!(command = cmd, "executing");
    let mut command = Command::new("sh");
    command.arg("-c").arg(cmd);
    if capture {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }
    let output = command.output().await.map_err(|source| ExecError::Spawn {
        command: cmd.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ExecError::NonZeroExit {
            command: cmd.to_string(),
            status: output.status.code().unwrap_or(-1),
        });
    }
    Ok(output)
}

/// Pipes `left | right` through the host shell.
///
/// When a `pv` binary is on `PATH` and `quiet` is false, interposes
/// `pv [--size <estimated_size>]` between the two stages for a progress
/// bar; otherwise runs the raw two-stage pipe. Dry-run prints the
/// resulting command line and executes nothing.
pub async fn pipe(
    left: &str,
    right: &str,
    dry_run: bool,
    estimated_size: Option<u64>,
    quiet: bool,
) -> Result<Output, ExecError> {
    let cmd = if !quiet && pv_available() {
        let pv = match estimated_size {
            Some(size) => format!("pv --size {size}"),
            None => "pv".to_string(),
        };
        format!("{left} | {pv} | {right}")
    } else {
        format!("{left} | {right}")
    };
    shell(&cmd, dry_run, false).await
}

fn synthetic_success() -> Output {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }
    #[cfg(not(unix))]
    {
        // Only unix targets are supported (the core binaries shell out
        // to `zfs`/`ssh`/`pv`), but keep this buildable elsewhere.
        compile_error!("z3-adapters::shell requires a unix target");
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
