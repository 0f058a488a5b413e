// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the remote snapshot graph (C7) from an [`ObjectStore`]: lists
//! every key under the bucket's `s3_prefix`, fetches each one's
//! metadata, and materialises a `z3_core::RemoteGraph` keyed by the
//! stripped `<dataset>@<short_name>` name (matching `LocalSnapshot::name`).
//!
//! Decision (see DESIGN.md): the distilled spec's "lists all keys under
//! `s3_prefix + snapshot_prefix`" doesn't line up with the object
//! layout (`<s3_prefix>/<dataset>@<short_name>` has no snapshot-prefix
//! component before the dataset name) — objects uploaded by this same
//! tool already only ever contain prefix-filtered local snapshots, so
//! listing under `s3_prefix` alone and skipping a redundant client-side
//! `snapshot_prefix` filter on the remote side is equivalent in
//! practice and matches what `§4.7`'s "stripped name" output needs to
//! look like to line up with `LocalSnapshot::name`.

use z3_adapters::{ObjectStore, ObjectStoreError};
use z3_core::graph::{RemoteGraph, RemoteSnapshot};

/// Normalises `s3_prefix` to always end in `/`, matching §4.7/§4.12
/// ("trailing-slash-normalised").
pub fn normalize_prefix(s3_prefix: &str) -> String {
    if s3_prefix.is_empty() || s3_prefix.ends_with('/') {
        s3_prefix.to_string()
    } else {
        format!("{s3_prefix}/")
    }
}

/// Lists and fetches every object under `s3_prefix`, building the
/// [`RemoteGraph`] the pair manager and `status` subcommand consult.
pub async fn build_remote_graph<S: ObjectStore>(
    store: &S,
    s3_prefix: &str,
) -> Result<RemoteGraph, ObjectStoreError> {
    let prefix = normalize_prefix(s3_prefix);
    let keys = store.list(&prefix).await?;
    let mut graph = RemoteGraph::new();
    for key_ref in keys {
        let info = store.get_key(&key_ref).await?;
        let stripped_name = info
            .key
            .strip_prefix(&prefix)
            .unwrap_or(&info.key)
            .to_string();
        graph.insert(RemoteSnapshot::new(stripped_name, info.size, info.metadata));
    }
    Ok(graph)
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
