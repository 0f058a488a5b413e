// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3 status`: lists every local/remote snapshot pair and renders the
//! `NAME | PARENT | TYPE | HEALTH | LOCAL STATE | SIZE` table (§6).

use anyhow::Result;
use z3_adapters::{ObjectStore, ZfsRunner};
use z3_core::{humanize_bytes, sequence_for_dataset};
use z3_engine::build_remote_graph;

use crate::table;

const HEADERS: [&str; 6] = ["NAME", "PARENT", "TYPE", "HEALTH", "LOCAL STATE", "SIZE"];

/// Builds the remote graph and local sequence, pairs them up, and
/// returns the rendered table (stdout is the CLI's job, kept separate
/// here so the rendering itself is unit-testable without a live store).
pub async fn run<S: ObjectStore, Z: ZfsRunner>(
    store: &S,
    zfs: &Z,
    s3_prefix: &str,
    filesystem: &str,
    snapshot_prefix: &str,
) -> Result<String> {
    let remote = build_remote_graph(store, s3_prefix).await?;
    let local_output = zfs.list_snapshots(None).await?;
    let local = sequence_for_dataset(&local_output, snapshot_prefix, filesystem);

    let mut seen = std::collections::HashSet::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for snap in local.iter() {
        seen.insert(snap.name.as_str());
        rows.push(row(&remote, Some(snap), remote.get(&snap.name)));
    }
    for remote_snap in remote.list() {
        if !seen.contains(remote_snap.name.as_str()) {
            rows.push(row(&remote, None, Some(remote_snap)));
        }
    }
    rows.sort_by(|a, b| a[0].cmp(&b[0]));

    Ok(table::render(&HEADERS, &rows))
}

fn row(
    remote: &z3_core::RemoteGraph,
    local: Option<&z3_core::local::LocalSnapshot>,
    remote_snap: Option<&z3_core::graph::RemoteSnapshot>,
) -> Vec<String> {
    let name = local
        .map(|l| l.name.clone())
        .or_else(|| remote_snap.map(|r| r.name.clone()))
        .unwrap_or_default();

    let parent = remote_snap
        .and_then(|r| r.parent_name())
        .map(str::to_string)
        .or_else(|| local.and_then(|l| l.parent.clone()))
        .unwrap_or_else(|| "-".to_string());

    let type_ = match remote_snap {
        Some(r) if r.is_full() => "full".to_string(),
        Some(_) => "incremental".to_string(),
        None => "-".to_string(),
    };

    let health = match remote_snap {
        Some(r) if remote.is_healthy(&r.name) => "healthy".to_string(),
        Some(r) => format!(
            "broken ({})",
            remote.reason_broken(&r.name).map(|r| r.as_str()).unwrap_or("unknown")
        ),
        None => "not backed up".to_string(),
    };

    let local_state = if local.is_some() { "present" } else { "missing" }.to_string();

    let size = remote_snap
        .map(|r| humanize_bytes(r.size_bytes))
        .unwrap_or_else(|| "-".to_string());

    vec![name, parent, type_, health, local_state, size]
}
