// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn meta(pairs: &[(&str, &str)]) -> RemoteSnapshotMetadata {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn full(name: &str) -> RemoteSnapshot {
    RemoteSnapshot::new(name, 100, meta(&[("isfull", "true")]))
}

fn incr(name: &str, parent: &str) -> RemoteSnapshot {
    RemoteSnapshot::new(name, 10, meta(&[("isfull", "false"), ("parent", parent)]))
}

#[test]
fn full_snapshot_is_healthy_with_no_parent() {
    let mut g = RemoteGraph::new();
    g.insert(full("pool/fs@snap_0"));
    assert!(g.is_healthy("pool/fs@snap_0"));
    assert_eq!(g.reason_broken("pool/fs@snap_0"), None);
}

#[test]
fn chain_off_a_full_is_healthy() {
    let mut g = RemoteGraph::new();
    g.insert(full("pool/fs@snap_0"));
    g.insert(incr("pool/fs@snap_1", "pool/fs@snap_0"));
    g.insert(incr("pool/fs@snap_2", "pool/fs@snap_1"));
    assert!(g.is_healthy("pool/fs@snap_2"));
}

#[test]
fn missing_parent_is_flagged_on_the_node_itself() {
    let mut g = RemoteGraph::new();
    g.insert(incr("pool/fs@snap_5", "missing_parent"));
    assert!(!g.is_healthy("pool/fs@snap_5"));
    assert_eq!(
        g.reason_broken("pool/fs@snap_5"),
        Some(BrokenReason::MissingParent)
    );
}

#[test]
fn descendant_of_a_missing_parent_is_parent_broken_not_missing_parent() {
    let mut g = RemoteGraph::new();
    g.insert(incr("pool/fs@snap_5", "missing_parent"));
    g.insert(incr("pool/fs@snap_6", "pool/fs@snap_5"));
    assert_eq!(
        g.reason_broken("pool/fs@snap_6"),
        Some(BrokenReason::ParentBroken)
    );
}

#[test]
fn two_node_cycle_flags_both_as_cycle_detected() {
    let mut g = RemoteGraph::new();
    g.insert(incr("pool/fs@a", "pool/fs@b"));
    g.insert(incr("pool/fs@b", "pool/fs@a"));
    assert_eq!(g.reason_broken("pool/fs@a"), Some(BrokenReason::CycleDetected));
    assert_eq!(g.reason_broken("pool/fs@b"), Some(BrokenReason::CycleDetected));
}

#[test]
fn self_referential_parent_is_a_cycle() {
    let mut g = RemoteGraph::new();
    g.insert(incr("pool/fs@a", "pool/fs@a"));
    assert_eq!(g.reason_broken("pool/fs@a"), Some(BrokenReason::CycleDetected));
}

#[test]
fn descendant_of_a_cycle_propagates_cycle_not_parent_broken() {
    let mut g = RemoteGraph::new();
    g.insert(incr("pool/fs@a", "pool/fs@b"));
    g.insert(incr("pool/fs@b", "pool/fs@a"));
    g.insert(incr("pool/fs@c", "pool/fs@b"));
    assert_eq!(g.reason_broken("pool/fs@c"), Some(BrokenReason::CycleDetected));
}

#[test]
fn legacy_is_full_key_is_honoured() {
    let mut g = RemoteGraph::new();
    g.insert(RemoteSnapshot::new(
        "pool/fs@snap_0",
        1,
        meta(&[("is_full", "true")]),
    ));
    assert!(g.get("pool/fs@snap_0").unwrap().is_full());
    assert!(g.is_healthy("pool/fs@snap_0"));
}

#[test]
fn unknown_name_is_reported_missing_parent() {
    let g = RemoteGraph::new();
    assert!(!g.is_healthy("pool/fs@nope"));
    assert_eq!(g.reason_broken("pool/fs@nope"), Some(BrokenReason::MissingParent));
}

#[test]
fn list_is_sorted_by_name() {
    let mut g = RemoteGraph::new();
    g.insert(full("pool/fs@snap_9"));
    g.insert(full("pool/fs@snap_1"));
    g.insert(full("pool/fs@snap_5"));
    let names: Vec<&str> = g.list().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["pool/fs@snap_1", "pool/fs@snap_5", "pool/fs@snap_9"]);
}

#[test]
fn parent_resolves_through_the_manager() {
    let mut g = RemoteGraph::new();
    g.insert(full("pool/fs@snap_0"));
    g.insert(incr("pool/fs@snap_1", "pool/fs@snap_0"));
    assert_eq!(g.parent("pool/fs@snap_1").unwrap().name, "pool/fs@snap_0");
    assert!(g.parent("pool/fs@snap_0").is_none());
}

#[test]
fn health_is_memoised_after_first_query() {
    let mut g = RemoteGraph::new();
    g.insert(full("pool/fs@snap_0"));
    g.insert(incr("pool/fs@snap_1", "pool/fs@snap_0"));
    assert!(g.is_healthy("pool/fs@snap_1"));
    // Second call must hit the cache and still agree.
    assert!(g.is_healthy("pool/fs@snap_1"));
    assert_eq!(g.reason_broken("pool/fs@snap_1"), None);
}
