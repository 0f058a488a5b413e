// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The local (ZFS-side) snapshot sequence.
//!
//! Parses the tab-separated output of
//! `zfs list -Ht snap -o name,used,refer,mountpoint,written` into an
//! insertion-ordered, per-dataset chain. Order here *is* the
//! incremental chain: ZFS already lists snapshots chronologically, and
//! re-sorting would silently corrupt which snapshot is whose parent
//! (see SPEC_FULL §9, "insertion-ordered maps matter").

use std::collections::HashMap;

use crate::error::Error;

/// One local snapshot: its full `dataset@short` name and the full name
/// of the snapshot immediately preceding it (in survivor order) within
/// the same dataset, or `None` if it's the first surviving entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSnapshot {
    pub name: String,
    pub dataset: String,
    pub short_name: String,
    pub parent: Option<String>,
}

/// The ordered chain of snapshots for a single dataset that survived
/// `snapshot_prefix` filtering, in ZFS list order.
#[derive(Debug, Clone, Default)]
pub struct LocalSequence {
    dataset: String,
    order: Vec<LocalSnapshot>,
    by_short_name: HashMap<String, usize>,
}

impl LocalSequence {
    fn new(dataset: String) -> Self {
        Self::empty(dataset)
    }

    /// An empty sequence for `dataset` — what a caller gets when
    /// nothing in `zfs list` survived prefix filtering.
    pub fn empty(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            order: Vec::new(),
            by_short_name: HashMap::new(),
        }
    }

    fn push(&mut self, short_name: String) {
        let name = format!("{}@{}", self.dataset, short_name);
        let parent = self.order.last().map(|s| s.name.clone());
        let index = self.order.len();
        self.order.push(LocalSnapshot {
            name,
            dataset: self.dataset.clone(),
            short_name: short_name.clone(),
            parent,
        });
        self.by_short_name.insert(short_name, index);
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalSnapshot> {
        self.order.iter()
    }

    pub fn get(&self, short_name: &str) -> Option<&LocalSnapshot> {
        self.by_short_name.get(short_name).map(|&i| &self.order[i])
    }

    /// The snapshot immediately before `snapshot` in this sequence, or
    /// `None` if it's the first surviving entry.
    pub fn parent_of(&self, snapshot: &LocalSnapshot) -> Option<&LocalSnapshot> {
        let parent_name = snapshot.parent.as_ref()?;
        self.order.iter().find(|s| &s.name == parent_name)
    }

    /// The most recent snapshot, or `SoftError` when the sequence is
    /// empty — a user-visible configuration problem (nothing matched
    /// `snapshot_prefix`), not a crash.
    pub fn get_latest(&self) -> Result<&LocalSnapshot, Error> {
        self.order.last().ok_or_else(|| {
            Error::soft(format!(
                "no snapshots found for dataset {} (check --snapshot-prefix)",
                self.dataset
            ))
        })
    }
}

/// Parses `zfs list -Ht snap -o name,used,refer,mountpoint,written`
/// output into one [`LocalSequence`] per dataset, retaining only
/// entries whose short name (the part after `@`) starts with
/// `snapshot_prefix`. Datasets are returned in the order their first
/// surviving snapshot was seen.
pub fn parse_zfs_list(output: &str, snapshot_prefix: &str) -> Vec<LocalSequence> {
    let mut sequences: Vec<LocalSequence> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(name_field) = line.split('\t').next() else {
            continue;
        };
        let Some((dataset, short_name)) = name_field.split_once('@') else {
            continue;
        };
        if !short_name.starts_with(snapshot_prefix) {
            continue;
        }
        let idx = *index_of.entry(dataset.to_string()).or_insert_with(|| {
            sequences.push(LocalSequence::new(dataset.to_string()));
            sequences.len() - 1
        });
        sequences[idx].push(short_name.to_string());
    }

    sequences
}

/// Convenience wrapper for the common case of operating on one
/// configured dataset: returns that dataset's sequence, or an empty one
/// if `zfs list` produced no surviving entries for it.
pub fn sequence_for_dataset(output: &str, snapshot_prefix: &str, dataset: &str) -> LocalSequence {
    parse_zfs_list(output, snapshot_prefix)
        .into_iter()
        .find(|seq| seq.dataset() == dataset)
        .unwrap_or_else(|| LocalSequence::empty(dataset))
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
