// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Duration;
use z3_adapters::{FakeObjectStore, ObjectStore};

use super::*;

#[tokio::test]
async fn cancels_uploads_older_than_max_days() {
    let store = FakeObjectStore::new();
    store.seed_in_flight_upload("pool/fs@old", Duration::days(10));
    store.seed_in_flight_upload("pool/fs@fresh", Duration::hours(1));

    let outcomes = cleanup_multipart(&store, 7, false).await.unwrap();

    let old = outcomes.iter().find(|o| o.key_name == "pool/fs@old").unwrap();
    assert!(old.expired);
    assert!(old.cancelled);

    let fresh = outcomes.iter().find(|o| o.key_name == "pool/fs@fresh").unwrap();
    assert!(!fresh.expired);
    assert!(!fresh.cancelled);
}

#[tokio::test]
async fn dry_run_reports_without_cancelling() {
    let store = FakeObjectStore::new();
    store.seed_in_flight_upload("pool/fs@old", Duration::days(10));

    let outcomes = cleanup_multipart(&store, 7, true).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].expired);
    assert!(!outcomes[0].cancelled);

    // Confirm cancel really wasn't invoked: list still reports it in flight.
    let still_in_flight = store.list_multipart_uploads().await.unwrap();
    assert_eq!(still_in_flight.len(), 1);
}
