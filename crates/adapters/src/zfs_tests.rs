// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn send_cmd_is_full_without_a_parent() {
    assert_eq!(send_cmd("pool/fs@snap", None), "zfs send pool/fs@snap");
}

#[test]
fn send_cmd_is_incremental_with_a_parent() {
    assert_eq!(
        send_cmd("pool/fs@snap2", Some("pool/fs@snap1")),
        "zfs send -i pool/fs@snap1 pool/fs@snap2"
    );
}

#[test]
fn recv_cmd_adds_force_flag() {
    assert_eq!(recv_cmd("pool/fs@snap", true), "zfs recv -F pool/fs@snap");
    assert_eq!(recv_cmd("pool/fs@snap", false), "zfs recv pool/fs@snap");
}
