// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn strs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_source_is_a_soft_error() {
    let err = snapshots_to_send(&[], &strs(&["a"])).unwrap_err();
    assert!(matches!(err, Error::SoftError(_)));
}

#[test]
fn empty_dest_sends_everything() {
    let source = strs(&["a", "b", "c"]);
    let (from, to) = snapshots_to_send(&source, &[]).unwrap();
    assert_eq!(from, None);
    assert_eq!(to, "c");
}

#[test]
fn common_ancestor_found_newest_to_oldest() {
    let source = strs(&["S_0", "S_1", "S_2", "S_3", "S_4"]);
    let dest = strs(&["S_1", "S_3"]);
    let (from, to) = snapshots_to_send(&source, &dest).unwrap();
    assert_eq!(from, Some("S_3"));
    assert_eq!(to, "S_4");
}

#[test]
fn diverged_destination_is_an_error() {
    let source = strs(&["S_0", "S_1"]);
    let dest = strs(&["S_9"]);
    let err = snapshots_to_send(&source, &dest).unwrap_err();
    assert!(matches!(err, Error::SoftError(_)));
}

#[test]
fn nothing_to_do_when_from_equals_to() {
    let result = sync_snapshots((Some("S_4"), "S_4"), "local/fs", "remote/fs", "host", false, false);
    assert_eq!(result, None);
}

#[test]
fn s8_push_pipeline() {
    let (send_cmd, recv_cmd) =
        sync_snapshots((Some("S_3"), "S_4"), "local/fs", "remote/fs", "host", false, false).unwrap();
    assert_eq!(send_cmd, "zfs send -I local/fs@S_3 local/fs@S_4");
    assert_eq!(
        recv_cmd,
        "ssh host -C 'mbuffer -s 128k -m 200m -q | sudo zfs recv -d remote/fs'"
    );
}

#[test]
fn pull_pipeline_wraps_the_send_side() {
    let (send_cmd, recv_cmd) =
        sync_snapshots((Some("S_3"), "S_4"), "local/fs", "remote/fs", "host", true, false).unwrap();
    assert_eq!(send_cmd, "ssh host -C 'sudo zfs send -I remote/fs@S_3 remote/fs@S_4'");
    assert_eq!(recv_cmd, "mbuffer -s 128k -m 200m -q | zfs recv -d local/fs");
}

#[test]
fn full_send_when_from_is_none() {
    let (send_cmd, _) =
        sync_snapshots((None, "S_0"), "local/fs", "remote/fs", "host", false, false).unwrap();
    assert_eq!(send_cmd, "zfs send local/fs@S_0");
}

#[test]
fn dry_run_adds_nv_to_recv() {
    let (_, recv_cmd) =
        sync_snapshots((Some("S_3"), "S_4"), "local/fs", "remote/fs", "host", false, true).unwrap();
    assert_eq!(
        recv_cmd,
        "ssh host -C 'mbuffer -s 128k -m 200m -q | sudo zfs recv -dnv remote/fs'"
    );
}
