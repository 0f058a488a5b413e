// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the domain layer.

use thiserror::Error;

/// Errors raised by the pure domain logic (graph, local sequence, config).
///
/// This does not cover upload/transport failures — those live in
/// `z3-engine`'s `UploadError`/`ExecError`, which wrap this type where
/// the failure originates in the domain layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A user-visible misconfiguration or empty-state condition, e.g. no
    /// snapshots match the configured prefix. Printed to stderr by the
    /// top-level CLI handler rather than treated as a crash.
    #[error("{0}")]
    SoftError(String),

    /// The remote snapshot chain is broken somewhere the operation needs
    /// to traverse. Carries the offending snapshot name and reason.
    #[error("Broken snapshot detected {snapshot}, reason: '{reason}'")]
    Integrity {
        snapshot: String,
        reason: &'static str,
    },

    /// `zfs send -nvP` produced output this parser could not interpret.
    #[error("failed to parse size estimate from zfs send output: {0}")]
    SizeEstimateParse(String),

    /// A config value failed to parse into the type the caller requested.
    #[error("invalid value for config key {key}: {value}")]
    InvalidConfigValue { key: String, value: String },
}

impl Error {
    pub fn soft(msg: impl Into<String>) -> Self {
        Error::SoftError(msg.into())
    }

    pub fn integrity(snapshot: impl Into<String>, reason: &'static str) -> Self {
        Error::Integrity {
            snapshot: snapshot.into(),
            reason,
        }
    }
}
