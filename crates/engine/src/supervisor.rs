// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload supervisor (C6): orchestrates the chunker and worker pool,
//! collects ordered part results, and commits (or cancels) the
//! multi-part upload.
//!
//! State machine: `Idle -> Started -> Streaming -> Finalising -> Done |
//! Failed`. Modelled here as an enum purely for observability/tests —
//! the control flow itself is the linear `run` method below, matching
//! §4.6's algorithm step for step.

use std::sync::Arc;

use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use z3_adapters::{MultiPartHandle, ObjectStore, PutObjectHeaders};
use z3_core::multipart_etag;

use crate::chunk_stream::AsyncChunker;
use crate::error::UploadError;
use crate::worker::{spawn_workers, JobReceiver, PartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Started,
    Streaming,
    Finalising,
    Done,
    Failed,
}

pub struct UploadSupervisor<S> {
    store: Arc<S>,
    key_name: String,
    headers: PutObjectHeaders,
    concurrency: u32,
    max_retries: u32,
    chunk_size: usize,
    state: SupervisorState,
}

impl<S> UploadSupervisor<S>
where
    S: ObjectStore + 'static,
{
    pub fn new(
        store: Arc<S>,
        key_name: impl Into<String>,
        headers: PutObjectHeaders,
        concurrency: u32,
        max_retries: u32,
        chunk_size: usize,
    ) -> Self {
        Self {
            store,
            key_name: key_name.into(),
            headers,
            concurrency,
            max_retries,
            chunk_size,
            state: SupervisorState::Idle,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Runs the full upload: initiate, stream, finalise. Returns the
    /// committed ETag on success.
    pub async fn run<R: AsyncRead + Unpin>(&mut self, input: R) -> Result<String, UploadError> {
        self.state = SupervisorState::Started;
        let handle = Arc::new(self.store.initiate_multipart(&self.key_name, &self.headers).await?);

        self.state = SupervisorState::Streaming;
        let (job_tx, job_rx) = mpsc::channel(self.concurrency as usize);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let jobs: JobReceiver = Arc::new(tokio::sync::Mutex::new(job_rx));
        let mut workers = spawn_workers(
            Arc::clone(&self.store),
            Arc::clone(&handle),
            jobs,
            result_tx,
            self.concurrency,
            self.max_retries,
        );

        let result = self
            .stream_and_collect(input, &job_tx, &mut result_rx, &mut workers)
            .await;
        drop(job_tx);

        match result {
            Ok(results) => self.finalise(&handle, results).await,
            Err(err) => {
                self.state = SupervisorState::Failed;
                // Best-effort: the handle is abandoned either way, but
                // an explicit cancel keeps the backend's in-flight list
                // clean rather than relying solely on GC (C13).
                let _ = self.store.cancel(&handle).await;
                Err(err)
            }
        }
    }

    async fn stream_and_collect<R: AsyncRead + Unpin>(
        &mut self,
        input: R,
        job_tx: &mpsc::Sender<(u32, Vec<u8>)>,
        result_rx: &mut mpsc::UnboundedReceiver<PartResult>,
        workers: &mut Vec<tokio::task::JoinHandle<Result<(), UploadError>>>,
    ) -> Result<Vec<(u32, String)>, UploadError> {
        let mut chunker = AsyncChunker::new(input, self.chunk_size);
        let mut chunk_index: u32 = 0;
        let mut pending_chunks: u64 = 0;
        let mut results: Vec<(u32, String)> = Vec::new();

        while pending_chunks > 0 || !chunker.finished() {
            if let Some(crashed) = first_crash(workers).await {
                return Err(crashed);
            }

            while let Ok(result) = result_rx.try_recv() {
                results.push((result.index, result.md5_hex));
                pending_chunks -= 1;
            }

            if chunker.finished() {
                // Nothing left to read: block for the remaining results
                // rather than spinning (§5 suspension points).
                if pending_chunks > 0 {
                    match result_rx.recv().await {
                        Some(result) => {
                            results.push((result.index, result.md5_hex));
                            pending_chunks -= 1;
                        }
                        None => {
                            // Every worker exited without reporting —
                            // the crash should already be visible on the
                            // next liveness check, but guard against a
                            // closed channel with no live worker left.
                            if let Some(crashed) = first_crash(workers).await {
                                return Err(crashed);
                            }
                        }
                    }
                }
                continue;
            }

            if let Some(chunk) = chunker.next_chunk().await? {
                chunk_index += 1;
                pending_chunks += 1;
                if job_tx.send((chunk_index, chunk)).await.is_err()
                    && first_crash(workers).await.is_some()
                {
                    return Err(first_crash(workers).await.unwrap_or(UploadError::WorkerCrashed(
                        "all upload workers exited".to_string(),
                    )));
                }
            }
        }
        Ok(results)
    }

    async fn finalise(
        &mut self,
        handle: &MultiPartHandle,
        mut results: Vec<(u32, String)>,
    ) -> Result<String, UploadError> {
        self.state = SupervisorState::Finalising;
        if results.is_empty() {
            self.store.cancel(handle).await?;
            self.state = SupervisorState::Failed;
            return Err(UploadError::ZeroBytes);
        }
        results.sort_by_key(|(index, _)| *index);
        let etag = multipart_etag(results.iter().map(|(_, md5)| md5.clone()));
        let committed = self.store.complete(handle, &results).await?;
        self.state = SupervisorState::Done;
        debug_assert_eq!(
            committed.trim_matches('"'),
            etag.trim_matches('"'),
            "composite ETag mismatch between local computation and the store's response"
        );
        Ok(committed)
    }
}

/// Non-blocking liveness check: `Some(error)` if any worker task has
/// already finished with an error, `None` if all are still running (or
/// finished cleanly, which only happens after the job channel closes).
/// Finished workers are removed from `workers` as they're observed.
async fn first_crash(
    workers: &mut Vec<tokio::task::JoinHandle<Result<(), UploadError>>>,
) -> Option<UploadError> {
    let mut i = 0;
    while i < workers.len() {
        if workers[i].is_finished() {
            let worker = workers.remove(i);
            match worker.await {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => return Some(err),
                Err(join_err) => return Some(UploadError::WorkerCrashed(join_err.to_string())),
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
