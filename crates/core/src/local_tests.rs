// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn line(name: &str) -> String {
    format!("{name}\t10M\t20M\t/pool/fs\t5M")
}

#[test]
fn builds_a_single_dataset_chain_in_order() {
    let output = [
        line("tank/data@zfs-auto-snap:daily-0"),
        line("tank/data@zfs-auto-snap:daily-1"),
        line("tank/data@zfs-auto-snap:daily-2"),
    ]
    .join("\n");
    let sequences = parse_zfs_list(&output, "zfs-auto-snap:daily");
    assert_eq!(sequences.len(), 1);
    let seq = &sequences[0];
    assert_eq!(seq.len(), 3);
    let names: Vec<&str> = seq.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "tank/data@zfs-auto-snap:daily-0",
            "tank/data@zfs-auto-snap:daily-1",
            "tank/data@zfs-auto-snap:daily-2",
        ]
    );
    assert_eq!(seq.iter().next().unwrap().parent, None);
    assert_eq!(
        seq.iter().nth(1).unwrap().parent.as_deref(),
        Some("tank/data@zfs-auto-snap:daily-0")
    );
}

#[test]
fn filters_out_entries_not_matching_the_prefix() {
    let output = [
        line("tank/data@zfs-auto-snap:daily-0"),
        line("tank/data@manual-snapshot"),
        line("tank/data@zfs-auto-snap:daily-1"),
    ]
    .join("\n");
    let sequences = parse_zfs_list(&output, "zfs-auto-snap:daily");
    let seq = &sequences[0];
    assert_eq!(seq.len(), 2);
    // The manual snapshot must not become anyone's parent link.
    assert_eq!(
        seq.iter().nth(1).unwrap().parent.as_deref(),
        Some("tank/data@zfs-auto-snap:daily-0")
    );
}

#[test]
fn groups_by_dataset_preserving_first_seen_order() {
    let output = [
        line("tank/a@zfs-auto-snap:daily-0"),
        line("tank/b@zfs-auto-snap:daily-0"),
        line("tank/a@zfs-auto-snap:daily-1"),
    ]
    .join("\n");
    let sequences = parse_zfs_list(&output, "zfs-auto-snap:daily");
    let datasets: Vec<&str> = sequences.iter().map(|s| s.dataset()).collect();
    assert_eq!(datasets, vec!["tank/a", "tank/b"]);
    assert_eq!(sequences[0].len(), 2);
    assert_eq!(sequences[1].len(), 1);
}

#[test]
fn get_latest_fails_soft_on_empty_sequence() {
    let seq = sequence_for_dataset("", "zfs-auto-snap:daily", "tank/data");
    let err = seq.get_latest().unwrap_err();
    match err {
        Error::SoftError(msg) => assert!(msg.contains("tank/data")),
        other => panic!("expected SoftError, got {other:?}"),
    }
}

#[test]
fn get_latest_returns_the_last_surviving_snapshot() {
    let output = [
        line("tank/data@zfs-auto-snap:daily-0"),
        line("tank/data@zfs-auto-snap:daily-1"),
    ]
    .join("\n");
    let seq = sequence_for_dataset(&output, "zfs-auto-snap:daily", "tank/data");
    assert_eq!(seq.get_latest().unwrap().name, "tank/data@zfs-auto-snap:daily-1");
}

#[test]
fn get_by_short_name_looks_up_within_the_dataset() {
    let output = line("tank/data@zfs-auto-snap:daily-0");
    let seq = sequence_for_dataset(&output, "zfs-auto-snap:daily", "tank/data");
    assert!(seq.get("zfs-auto-snap:daily-0").is_some());
    assert!(seq.get("nonexistent").is_none());
}

#[test]
fn parent_of_resolves_the_preceding_record() {
    let output = [
        line("tank/data@zfs-auto-snap:daily-0"),
        line("tank/data@zfs-auto-snap:daily-1"),
    ]
    .join("\n");
    let seq = sequence_for_dataset(&output, "zfs-auto-snap:daily", "tank/data");
    let second = seq.get("zfs-auto-snap:daily-1").unwrap();
    let parent = seq.parent_of(second).unwrap();
    assert_eq!(parent.short_name, "zfs-auto-snap:daily-0");
    let first = seq.get("zfs-auto-snap:daily-0").unwrap();
    assert!(seq.parent_of(first).is_none());
}

#[test]
fn blank_lines_are_ignored() {
    let output = format!("\n{}\n\n", line("tank/data@zfs-auto-snap:daily-0"));
    let sequences = parse_zfs_list(&output, "zfs-auto-snap:daily");
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].len(), 1);
}
