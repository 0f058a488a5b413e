// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The remote snapshot forest and its health rules.
//!
//! The object store only gives us a flat list of keys with metadata; a
//! snapshot's `parent` metadata field is the only edge we have. This
//! module reconstructs the graph those edges describe and classifies
//! every node as healthy or broken-with-reason, per §3/§9 of the design:
//! nodes are stored in a name-keyed table owned by [`RemoteGraph`], and
//! a snapshot never holds an owning reference to its parent — only the
//! parent's *name*, resolved back through the graph. This keeps cyclic
//! data (which the real world occasionally produces) representable
//! without leaking or requiring a cycle-aware collector.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Raw per-object metadata as returned by the object store, already
/// stripped of its `x-amz-meta-` prefix.
pub type RemoteSnapshotMetadata = HashMap<String, String>;

/// Why a snapshot fails the health check. Matches the literal strings
/// used in `IntegrityError` messages (see `z3-core::error::Error::Integrity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokenReason {
    CycleDetected,
    MissingParent,
    ParentBroken,
}

impl BrokenReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BrokenReason::CycleDetected => "cycle detected",
            BrokenReason::MissingParent => "missing parent",
            BrokenReason::ParentBroken => "parent broken",
        }
    }
}

impl fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single remote snapshot, as materialised from one object's
/// metadata. Holds only its own data — the parent is resolved by name
/// through the owning [`RemoteGraph`], never linked directly.
#[derive(Debug, Clone)]
pub struct RemoteSnapshot {
    pub name: String,
    pub size_bytes: u64,
    pub metadata: RemoteSnapshotMetadata,
}

impl RemoteSnapshot {
    pub fn new(name: impl Into<String>, size_bytes: u64, metadata: RemoteSnapshotMetadata) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            metadata,
        }
    }

    /// `isfull`, falling back to the legacy `is_full` key on read.
    pub fn is_full(&self) -> bool {
        let raw = self
            .metadata
            .get("isfull")
            .or_else(|| self.metadata.get("is_full"));
        matches!(raw.map(String::as_str), Some("true"))
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.metadata.get("parent").map(String::as_str)
    }

    /// The uncompressed byte count reported at upload time, if recorded.
    pub fn declared_size(&self) -> Option<u64> {
        self.metadata.get("size").and_then(|v| v.parse().ok())
    }

    /// The `compressor` metadata tag, if any (validated by the caller
    /// via `z3_core::Compressor::from_tag`).
    pub fn compressor_tag(&self) -> Option<&str> {
        self.metadata.get("compressor").map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HealthStatus {
    reason: Option<BrokenReason>,
}

impl HealthStatus {
    fn healthy() -> Self {
        Self { reason: None }
    }

    fn broken(reason: BrokenReason) -> Self {
        Self {
            reason: Some(reason),
        }
    }

    fn is_healthy(self) -> bool {
        self.reason.is_none()
    }
}

/// Owns every [`RemoteSnapshot`] reachable under a prefix, keyed by
/// stripped name (the `s3_prefix`/`snapshot_prefix` already removed).
///
/// Health is computed lazily and memoised per node the first time it's
/// asked for; a fresh `visited` set guards each top-level query against
/// infinite recursion on a cyclic chain.
#[derive(Debug, Default)]
pub struct RemoteGraph {
    snapshots: HashMap<String, RemoteSnapshot>,
    health_cache: RefCell<HashMap<String, HealthStatus>>,
}

impl RemoteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: RemoteSnapshot) {
        self.health_cache.borrow_mut().remove(&snapshot.name);
        self.snapshots.insert(snapshot.name.clone(), snapshot);
    }

    pub fn get(&self, name: &str) -> Option<&RemoteSnapshot> {
        self.snapshots.get(name)
    }

    pub fn parent(&self, name: &str) -> Option<&RemoteSnapshot> {
        let parent_name = self.get(name)?.parent_name()?;
        self.get(parent_name)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All known snapshots, sorted by name.
    pub fn list(&self) -> Vec<&RemoteSnapshot> {
        let mut all: Vec<&RemoteSnapshot> = self.snapshots.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn is_healthy(&self, name: &str) -> bool {
        self.compute_health(name, &mut HashSet::new()).is_healthy()
    }

    pub fn reason_broken(&self, name: &str) -> Option<BrokenReason> {
        self.compute_health(name, &mut HashSet::new()).reason
    }

    fn compute_health(&self, name: &str, visited: &mut HashSet<String>) -> HealthStatus {
        if let Some(cached) = self.health_cache.borrow().get(name) {
            return *cached;
        }
        if visited.contains(name) {
            // Mid-recursion: don't cache, the final verdict for this
            // node is decided by whoever unwinds back to it.
            return HealthStatus::broken(BrokenReason::CycleDetected);
        }
        let Some(snapshot) = self.snapshots.get(name) else {
            return HealthStatus::broken(BrokenReason::MissingParent);
        };
        if snapshot.is_full() {
            return self.cache(name, HealthStatus::healthy());
        }
        let Some(parent_name) = snapshot.parent_name() else {
            return self.cache(name, HealthStatus::broken(BrokenReason::MissingParent));
        };
        if !self.snapshots.contains_key(parent_name) {
            return self.cache(name, HealthStatus::broken(BrokenReason::MissingParent));
        }

        visited.insert(name.to_string());
        let parent_status = self.compute_health(parent_name, visited);
        visited.remove(name);

        let status = match parent_status.reason {
            None => HealthStatus::healthy(),
            // Cycle wins over parent-broken even when this node is one
            // hop removed from the cycle itself (see SPEC_FULL §9).
            Some(BrokenReason::CycleDetected) => HealthStatus::broken(BrokenReason::CycleDetected),
            Some(_) => HealthStatus::broken(BrokenReason::ParentBroken),
        };
        self.cache(name, status)
    }

    fn cache(&self, name: &str, status: HealthStatus) -> HealthStatus {
        self.health_cache
            .borrow_mut()
            .insert(name.to_string(), status);
        status
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
