// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use z3_adapters::FakeZfs;

use super::*;

fn zfs_list_line(dataset: &str, short: &str) -> String {
    format!("{dataset}@{short}\t0\t0\t/{dataset}\t0")
}

/// S8: push sync with the remote one snapshot behind should send the
/// incremental range `snap1..snap2`, wrapping the receive side over ssh.
#[tokio::test]
async fn s8_push_sends_incremental_range_over_ssh() {
    let zfs = FakeZfs::new();
    zfs.set_listing(
        None,
        [
            zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"),
            zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap2"),
        ]
        .join("\n"),
    );
    zfs.set_listing(
        Some("backup-host"),
        zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"),
    );

    let result = plan_and_sync(
        &zfs,
        "pool/fs",
        "pool/fs",
        "backup-host",
        "zfs-auto-snap:daily",
        false,
        true,
        true,
    )
    .await
    .unwrap();

    let (send_cmd, recv_cmd) = result.expect("levels differ, a sync should be planned");
    assert!(send_cmd.contains("zfs send -I pool/fs@zfs-auto-snap:daily-snap1 pool/fs@zfs-auto-snap:daily-snap2"));
    assert!(recv_cmd.starts_with("ssh backup-host -C"));
    assert!(recv_cmd.contains("mbuffer -s 128k -m 200m -q"));
}

#[tokio::test]
async fn pull_wraps_the_send_side_over_ssh() {
    let zfs = FakeZfs::new();
    zfs.set_listing(None, zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"));
    zfs.set_listing(
        Some("backup-host"),
        [
            zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"),
            zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap2"),
        ]
        .join("\n"),
    );

    let result = plan_and_sync(
        &zfs,
        "pool/fs",
        "pool/fs",
        "backup-host",
        "zfs-auto-snap:daily",
        true,
        true,
        true,
    )
    .await
    .unwrap();

    let (send_cmd, recv_cmd) = result.expect("levels differ, a sync should be planned");
    assert!(send_cmd.starts_with("ssh backup-host -C"));
    assert!(recv_cmd.starts_with("mbuffer -s 128k -m 200m -q"));
}

#[tokio::test]
async fn level_sequences_plan_nothing() {
    let zfs = FakeZfs::new();
    zfs.set_listing(None, zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"));
    zfs.set_listing(
        Some("backup-host"),
        zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"),
    );

    let result = plan_and_sync(
        &zfs,
        "pool/fs",
        "pool/fs",
        "backup-host",
        "zfs-auto-snap:daily",
        false,
        true,
        true,
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn diverged_sides_fail_as_a_soft_error() {
    let zfs = FakeZfs::new();
    zfs.set_listing(None, zfs_list_line("pool/fs", "zfs-auto-snap:daily-snap1"));
    zfs.set_listing(
        Some("backup-host"),
        zfs_list_line("pool/fs", "zfs-auto-snap:daily-other"),
    );

    let err = plan_and_sync(
        &zfs,
        "pool/fs",
        "pool/fs",
        "backup-host",
        "zfs-auto-snap:daily",
        false,
        true,
        true,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlanError::Core(z3_core::Error::SoftError(_))));
}
