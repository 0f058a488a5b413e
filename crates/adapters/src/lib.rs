// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! z3-adapters: everything that performs real I/O on behalf of the
//! core domain logic — the object-store client, shelling out to `zfs`
//! and the host shell, and loading configuration off disk.

pub mod config_loader;
pub mod object_store;
pub mod s3_object_store;
pub mod shell;
pub mod zfs;

#[cfg(feature = "test-support")]
pub mod fake_object_store;
#[cfg(feature = "test-support")]
pub mod fake_zfs;

pub use config_loader::{load_config, ConfigLoadError};
pub use object_store::{
    InFlightUpload, KeyRef, MultiPartHandle, ObjectInfo, ObjectStore, ObjectStoreError,
    PartUploadResult, PutObjectHeaders,
};
pub use s3_object_store::S3ObjectStore;
pub use shell::ExecError;
pub use zfs::{RealZfs, ZfsRunner};

#[cfg(feature = "test-support")]
pub use fake_object_store::FakeObjectStore;
#[cfg(feature = "test-support")]
pub use fake_zfs::FakeZfs;
