// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installs the `tracing-subscriber` `fmt` layer every binary starts
//! with. Always writes to stderr: stdout is reserved for the
//! machine-parseable output each binary produces (`--parseable` backup
//! lines, `pput`'s JSON result, `z3_get`'s byte stream).

use tracing_subscriber::EnvFilter;

/// Installs a stderr-writing `fmt` subscriber, honouring `RUST_LOG` (or
/// `warn` by default). Safe to call once per process; a second call
/// from a test harness is silently ignored.
pub fn init() {
    init_with_default("warn");
}

/// Same as [`init`], but `default_level` is used when `RUST_LOG` is
/// unset — `pput --progress`/`--quiet` raise or lower the default
/// without requiring the user to also set `RUST_LOG`.
pub fn init_with_default(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
