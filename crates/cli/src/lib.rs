// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! z3-cli: the four binaries exposed by this tool (`z3`, `pput`,
//! `z3_ssh_sync`, `z3_get`) and the bootstrap logic they share —
//! resolving `z3-core::Config` off disk/env, building an
//! `aws-sdk-s3`-backed `S3ObjectStore`, and installing the `tracing`
//! subscriber.
//!
//! Following the teacher's split (`oj-cli` is a thin `anyhow`-wrapped
//! shell around `oj-core`/`oj-engine`): everything here composes
//! library errors into `anyhow::Result` at the command boundary and
//! never reimplements domain logic.

pub mod bootstrap;
pub mod commands;
pub mod logging;
pub mod table;

pub use bootstrap::{build_aws_client, resolve_bucket, resolve_client, CliConfig};
