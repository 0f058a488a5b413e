// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! z3-core: pure domain logic for the z3 ZFS-to-object-store backup tool.
//!
//! Nothing in this crate performs I/O — it owns the data model, the
//! snapshot health/graph rules, size/etag math, and the layered
//! configuration lookup. Everything that shells out or talks to an
//! object store lives in `z3-adapters`/`z3-engine`.

pub mod chunk;
pub mod compressor;
pub mod config;
pub mod error;
pub mod etag;
pub mod gc;
pub mod graph;
pub mod humansize;
pub mod local;
pub mod retry;
pub mod size_estimate;
pub mod ssh_sync;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use chunk::{chunk_size_for_estimate, Chunk};
pub use compressor::Compressor;
pub use config::{Config, IniDocument};
pub use error::Error;
pub use etag::multipart_etag;
pub use gc::is_expired;
pub use graph::{BrokenReason, RemoteGraph, RemoteSnapshot, RemoteSnapshotMetadata};
pub use humansize::{humanize_bytes, parse_size};
pub use local::{parse_zfs_list, sequence_for_dataset, LocalSequence, LocalSnapshot};
pub use retry::retry;
pub use size_estimate::parse_send_estimate;
pub use ssh_sync::{snapshots_to_send, sync_snapshots};
