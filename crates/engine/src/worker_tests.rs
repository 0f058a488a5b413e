// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tokio::sync::mpsc;
use z3_adapters::{FakeObjectStore, ObjectStore, PutObjectHeaders};

use super::*;

async fn setup(store: &FakeObjectStore) -> Arc<z3_adapters::MultiPartHandle> {
    Arc::new(
        store
            .initiate_multipart("ds@snap", &PutObjectHeaders::default())
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn happy_path_reports_every_part() {
    let store = Arc::new(FakeObjectStore::new());
    let handle = setup(&store).await;
    let (job_tx, job_rx) = mpsc::channel(4);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();
    let jobs: JobReceiver = Arc::new(tokio::sync::Mutex::new(job_rx));

    let handles = spawn_workers(Arc::clone(&store), Arc::clone(&handle), jobs, result_tx, 2, 3);

    job_tx.send((1, vec![1u8; 10])).await.unwrap();
    job_tx.send((2, vec![2u8; 10])).await.unwrap();
    drop(job_tx);

    let mut received = Vec::new();
    while let Some(result) = result_rx.recv().await {
        received.push(result.index);
    }
    received.sort();
    assert_eq!(received, vec![1, 2]);

    for h in handles {
        assert!(h.await.unwrap().is_ok());
    }
}

#[tokio::test]
async fn a_dead_part_crashes_its_worker() {
    let store = Arc::new(FakeObjectStore::new());
    store.fail_index(2);
    let handle = setup(&store).await;
    let (job_tx, job_rx) = mpsc::channel(4);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();
    let jobs: JobReceiver = Arc::new(tokio::sync::Mutex::new(job_rx));

    let handles = spawn_workers(Arc::clone(&store), Arc::clone(&handle), jobs, result_tx, 1, 3);

    job_tx.send((2, vec![9u8; 10])).await.unwrap();
    drop(job_tx);

    assert!(result_rx.recv().await.is_none());
    let outcome = handles.into_iter().next().unwrap().await.unwrap();
    assert!(matches!(outcome, Err(UploadError::WorkerCrashed(_))));
}
