// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload worker pool (C5): `concurrency` tasks sharing one bounded job
//! channel and one unbounded result channel.
//!
//! A worker's loop exits (with an error) the moment `upload_part`'s
//! retry budget is exhausted — that's the "worker crash" the supervisor
//! watches for via `JoinHandle::is_finished`. A clean shutdown (the
//! supervisor drops the job sender once the chunker is done and the
//! queue empties) ends the loop too, but with `Ok(())`; the supervisor
//! only treats an error return as a crash.

use std::sync::Arc;

use tokio::sync::mpsc;
use z3_adapters::ObjectStore;
use z3_core::retry;

use crate::error::UploadError;

/// One completed part upload: 1-based index plus the digest the object
/// store actually stored it under.
#[derive(Debug, Clone)]
pub struct PartResult {
    pub index: u32,
    pub md5_hex: String,
}

pub(crate) type JobReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<(u32, Vec<u8>)>>>;

/// Spawns `concurrency` worker tasks. Each pulls `(index, chunk)` jobs
/// off the shared receiver, retries `upload_part` up to `max_retries`
/// times, and reports successes on `results`. Returns the tasks'
/// `JoinHandle`s so the supervisor can watch for crashes.
pub fn spawn_workers<S>(
    store: Arc<S>,
    handle: Arc<z3_adapters::MultiPartHandle>,
    jobs: JobReceiver,
    results: mpsc::UnboundedSender<PartResult>,
    concurrency: u32,
    max_retries: u32,
) -> Vec<tokio::task::JoinHandle<Result<(), UploadError>>>
where
    S: ObjectStore + 'static,
{
    (0..concurrency)
        .map(|_| {
            let store = Arc::clone(&store);
            let handle = Arc::clone(&handle);
            let jobs = Arc::clone(&jobs);
            let results = results.clone();
            tokio::spawn(worker_loop(store, handle, jobs, results, max_retries))
        })
        .collect()
}

async fn worker_loop<S>(
    store: Arc<S>,
    handle: Arc<z3_adapters::MultiPartHandle>,
    jobs: JobReceiver,
    results: mpsc::UnboundedSender<PartResult>,
    max_retries: u32,
) -> Result<(), UploadError>
where
    S: ObjectStore,
{
    loop {
        let job = {
            let mut jobs = jobs.lock().await;
            jobs.recv().await
        };
        let Some((index, chunk)) = job else {
            // Job channel closed: the supervisor is done dispatching
            // and this is a clean shutdown, not a crash.
            return Ok(());
        };

        let upload_result = retry(max_retries, || async {
            store.upload_part(&handle, index, &chunk).await
        })
        .await
        .map_err(|err| UploadError::WorkerCrashed(err.to_string()))?;

        // The receiver side may have gone away if the supervisor bailed
        // out for an unrelated reason; nothing further to do.
        let _ = results.send(PartResult {
            index,
            md5_hex: upload_result.md5_hex,
        });
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
