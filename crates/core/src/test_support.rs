// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture builders shared by other crates' test suites. Gated behind
//! the `test-support` feature so none of this ships in the real binary.

use crate::graph::{RemoteSnapshot, RemoteSnapshotMetadata};
use crate::local::{parse_zfs_list, LocalSequence};

fn metadata(pairs: &[(&str, &str)]) -> RemoteSnapshotMetadata {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// A full remote snapshot fixture with the given declared size.
pub fn full_remote_snapshot(name: &str, size_bytes: u64) -> RemoteSnapshot {
    RemoteSnapshot::new(name, size_bytes, metadata(&[("isfull", "true")]))
}

/// An incremental remote snapshot fixture chained off `parent`.
pub fn incremental_remote_snapshot(name: &str, parent: &str, size_bytes: u64) -> RemoteSnapshot {
    RemoteSnapshot::new(
        name,
        size_bytes,
        metadata(&[("isfull", "false"), ("parent", parent)]),
    )
}

/// Same as [`incremental_remote_snapshot`] but with a `compressor` tag set.
pub fn compressed_remote_snapshot(
    name: &str,
    parent: Option<&str>,
    size_bytes: u64,
    compressor: &str,
) -> RemoteSnapshot {
    let mut pairs = vec![
        ("isfull", if parent.is_some() { "false" } else { "true" }),
        ("compressor", compressor),
    ];
    if let Some(p) = parent {
        pairs.push(("parent", p));
    }
    RemoteSnapshot::new(name, size_bytes, metadata(&pairs))
}

/// Builds a [`LocalSequence`] for `dataset` directly from an ordered
/// list of short snapshot names, with no prefix filtering — useful for
/// assembling the scenarios from the design doc's worked examples
/// without hand-writing `zfs list` output.
pub fn local_sequence(dataset: &str, short_names: &[&str]) -> LocalSequence {
    let lines: Vec<String> = short_names
        .iter()
        .map(|short| format!("{dataset}@{short}\t0\t0\t/{dataset}\t0"))
        .collect();
    parse_zfs_list(&lines.join("\n"), "")
        .into_iter()
        .find(|seq| seq.dataset() == dataset)
        .unwrap_or_else(|| LocalSequence::empty(dataset))
}
