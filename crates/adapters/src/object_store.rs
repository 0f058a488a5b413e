// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The narrow object-store interface the engine depends on (C4).
//!
//! Deliberately smaller than the full S3 API: initiate/upload-part/
//! complete/cancel for multi-part uploads, plus list/get for reading
//! back snapshot metadata. `z3-engine` codes against this trait, not
//! against `aws-sdk-s3` directly, so the upload supervisor and the
//! remote graph builder can be driven by an in-memory fake in tests
//! (see `z3_adapters::fake_object_store`, behind `test-support`).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Default value of the always-present `x-amz-acl` header.
pub const DEFAULT_ACL: &str = "bucket-owner-full-control";

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("multipart upload already completed")]
    AlreadyCompleted,
    #[error("multipart upload already cancelled")]
    AlreadyCancelled,
    #[error("object store request failed: {0}")]
    Request(String),
    #[error("key not found: {0}")]
    NotFound(String),
}

/// Opaque handle to an in-progress multi-part upload. Terminates
/// exactly once, via [`ObjectStore::complete`] or [`ObjectStore::cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPartHandle {
    pub upload_id: String,
    pub key_name: String,
}

/// The result of successfully uploading one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartUploadResult {
    pub md5_hex: String,
}

/// Headers accepted by `initiate_multipart`. `x-amz-acl` is always sent
/// by the caller; `storage_class` defaults to `STANDARD_IA`; `user_metadata`
/// becomes `x-amz-meta-*` entries.
#[derive(Debug, Clone, Default)]
pub struct PutObjectHeaders {
    pub storage_class: String,
    pub user_metadata: HashMap<String, String>,
}

/// A listed key, before its metadata has been fetched via `get_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef {
    pub key: String,
}

/// A key's metadata and size, as returned by `get_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub metadata: HashMap<String, String>,
}

/// An in-flight multipart upload, as listed for garbage collection (C13).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightUpload {
    pub key_name: String,
    pub upload_id: String,
    pub initiated: DateTime<Utc>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn initiate_multipart(
        &self,
        key_name: &str,
        headers: &PutObjectHeaders,
    ) -> Result<MultiPartHandle, ObjectStoreError>;

    /// Idempotent replace of the part at `index` (1-based).
    async fn upload_part(
        &self,
        handle: &MultiPartHandle,
        index: u32,
        chunk_bytes: &[u8],
    ) -> Result<PartUploadResult, ObjectStoreError>;

    /// Commits the multi-part upload, returning the composite ETag.
    /// `parts` must already be sorted by index.
    async fn complete(
        &self,
        handle: &MultiPartHandle,
        parts: &[(u32, String)],
    ) -> Result<String, ObjectStoreError>;

    async fn cancel(&self, handle: &MultiPartHandle) -> Result<(), ObjectStoreError>;

    async fn list(&self, prefix: &str) -> Result<Vec<KeyRef>, ObjectStoreError>;

    async fn get_key(&self, key_ref: &KeyRef) -> Result<ObjectInfo, ObjectStoreError>;

    /// Lists every multipart upload that hasn't been completed or
    /// cancelled yet, for the GC subcommand (C13).
    async fn list_multipart_uploads(&self) -> Result<Vec<InFlightUpload>, ObjectStoreError>;
}

#[cfg(test)]
#[path = "object_store_tests.rs"]
mod tests;
