// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the orchestration layer: the upload pipeline, the
//! pair manager's backup/restore plans, and the ssh-sync planner.

use thiserror::Error;
use z3_adapters::{ExecError, ObjectStoreError};

/// Failures from driving the chunked upload pipeline (C5/C6).
#[derive(Debug, Error)]
pub enum UploadError {
    /// A worker's retry budget was exhausted; its task exited.
    #[error("upload worker crashed: {0}")]
    WorkerCrashed(String),

    /// The chunker produced zero chunks (empty input).
    #[error("refusing to commit a zero-byte upload")]
    ZeroBytes,

    #[error("object store error: {0}")]
    Store(#[from] ObjectStoreError),

    #[error("failed to read input stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures from building and executing a backup/restore plan (C9).
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Core(#[from] z3_core::Error),

    #[error("{0}")]
    Exec(#[from] ExecError),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("object store error: {0}")]
    Store(#[from] ObjectStoreError),

    #[error("unrecognised compressor: {0}")]
    Compressor(String),
}
