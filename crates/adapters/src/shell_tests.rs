// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn dry_run_executes_nothing_and_succeeds() {
    let output = shell("this-command-does-not-exist-anywhere", true, false)
        .await
        .unwrap();
    assert!(output.status.success());
}

#[tokio::test]
async fn real_run_captures_stdout() {
    let output = shell("echo hello", false, true).await.unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn non_zero_exit_is_an_error() {
    let err = shell("exit 3", false, false).await.unwrap_err();
    assert!(matches!(err, ExecError::NonZeroExit { status: 3, .. }));
}

#[tokio::test]
async fn pipe_without_pv_falls_back_to_raw_pipe() {
    // quiet=true forces the raw-pipe path regardless of whether `pv`
    // happens to be installed on the machine running these tests.
    // Pipe output streams to the inherited stdout/stderr rather than
    // being captured in memory (real snapshot streams can be huge).
    let output = pipe("echo hi", "cat", false, None, true).await.unwrap();
    assert!(output.status.success());
}

#[tokio::test]
async fn dry_run_pipe_prints_without_executing() {
    let output = pipe("zfs send -i a b", "zfs recv -d fs", true, Some(1024), true)
        .await
        .unwrap();
    assert!(output.status.success());
}
