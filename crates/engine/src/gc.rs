// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multipart upload garbage collection (C13): lists in-flight uploads,
//! applies `z3_core::gc::is_expired` to each one's age, and cancels the
//! expired ones. The policy decision is pure (`z3-core`); this module
//! only owns "what time is it" and the actual cancel call.

use chrono::Utc;
use z3_adapters::{InFlightUpload, MultiPartHandle, ObjectStore, ObjectStoreError};

/// One in-flight upload's GC disposition, for CLI reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcOutcome {
    pub key_name: String,
    pub upload_id: String,
    pub age_seconds: i64,
    /// Whether `max_days` puts this upload over budget, regardless of
    /// whether `dry_run` actually cancelled it.
    pub expired: bool,
    /// Whether `cancel` was actually called (always `false` under `dry_run`).
    pub cancelled: bool,
}

/// Lists every in-flight multipart upload and cancels the ones older
/// than `max_days`. Under `dry_run`, reports what would be cancelled
/// without calling `cancel`.
pub async fn cleanup_multipart<S: ObjectStore>(
    store: &S,
    max_days: u32,
    dry_run: bool,
) -> Result<Vec<GcOutcome>, ObjectStoreError> {
    let in_flight = store.list_multipart_uploads().await?;
    let now = Utc::now();

    let mut outcomes = Vec::with_capacity(in_flight.len());
    for upload in in_flight {
        let age_seconds = (now - upload.initiated).num_seconds();
        let expired = z3_core::is_expired(age_seconds, max_days);

        let cancelled = if expired && !dry_run {
            let handle = MultiPartHandle {
                upload_id: upload.upload_id.clone(),
                key_name: upload.key_name.clone(),
            };
            store.cancel(&handle).await?;
            true
        } else {
            false
        };

        outcomes.push(GcOutcome {
            key_name: upload.key_name,
            upload_id: upload.upload_id,
            age_seconds,
            expired,
            cancelled,
        });
    }
    Ok(outcomes)
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
