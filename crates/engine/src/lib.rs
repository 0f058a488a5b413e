// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! z3-engine: the orchestration layer wired on top of `z3-core`'s pure
//! domain logic and `z3-adapters`' I/O.
//!
//! This is where concurrency and shelling-out actually happen: the
//! chunked upload pipeline (C5/C6), the backup/restore pair manager
//! (C9), the ssh snapshot-sync glue (C11), and multipart GC (C13).

pub mod chunk_stream;
pub mod error;
pub mod gc;
pub mod pair;
pub mod remote;
pub mod ssh_sync;
pub mod supervisor;
pub mod worker;

pub use error::{PlanError, UploadError};
pub use gc::{cleanup_multipart, GcOutcome};
pub use pair::{BackupOutcome, ExecOptions, PairManager, RestoreOutcome};
pub use remote::build_remote_graph;
pub use ssh_sync::plan_and_sync;
pub use supervisor::{SupervisorState, UploadSupervisor};
