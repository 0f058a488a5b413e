// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`ObjectStore`] fake used by `z3-engine`'s and `z3-cli`'s
//! test suites (S3/S4/gc scenarios). Gated behind the `test-support`
//! feature so it never ships in the real binaries.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

use crate::object_store::{
    InFlightUpload, KeyRef, MultiPartHandle, ObjectInfo, ObjectStore, ObjectStoreError,
    PartUploadResult, PutObjectHeaders,
};

/// One multipart upload's lifecycle state inside the fake.
#[derive(Debug, Default)]
struct Upload {
    key_name: String,
    parts: HashMap<u32, Vec<u8>>,
    completed: bool,
    cancelled: bool,
    initiated: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    uploads: HashMap<String, Upload>,
    objects: HashMap<String, ObjectInfo>,
    next_upload_id: u64,
    /// Part indices that should fail every call (simulates a dead
    /// backend so the retry wrapper and worker-crash path can be
    /// exercised, per scenario S4).
    failing_indices: std::collections::HashSet<u32>,
}

/// A controllable, in-process stand-in for a real object store.
///
/// Seed it with [`FakeObjectStore::seed_object`] for graph/status tests,
/// or drive it through a real [`crate::object_store::ObjectStore`]
/// multipart lifecycle for upload-pipeline tests. [`FakeObjectStore::fail_index`]
/// makes `upload_part` return an error for a specific part index, every
/// attempt, so the retry budget genuinely exhausts (scenario S4).
#[derive(Debug, Default, Clone)]
pub struct FakeObjectStore {
    inner: std::sync::Arc<Mutex<Inner>>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pre-existing key with metadata, as if it had already been
    /// uploaded — for `RemoteGraph`/`status` style tests that never go
    /// through a multipart lifecycle.
    pub fn seed_object(&self, key: &str, size: u64, metadata: HashMap<String, String>) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.objects.insert(
            key.to_string(),
            ObjectInfo {
                key: key.to_string(),
                size,
                metadata,
            },
        );
    }

    /// Makes every `upload_part` call for `index` fail, regardless of
    /// how many times the retry wrapper re-invokes it.
    pub fn fail_index(&self, index: u32) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failing_indices
            .insert(index);
    }

    /// True iff `complete` was called on `handle`.
    pub fn is_completed(&self, handle: &MultiPartHandle) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .uploads
            .get(&handle.upload_id)
            .is_some_and(|u| u.completed)
    }

    /// True iff `cancel` was called on `handle`.
    pub fn is_cancelled(&self, handle: &MultiPartHandle) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .uploads
            .get(&handle.upload_id)
            .is_some_and(|u| u.cancelled)
    }

    /// Injects an in-flight (never completed/cancelled) multipart upload
    /// with a given age, for GC scenario tests.
    pub fn seed_in_flight_upload(&self, key_name: &str, age: chrono::Duration) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_upload_id;
        inner.next_upload_id += 1;
        inner.uploads.insert(
            id.to_string(),
            Upload {
                key_name: key_name.to_string(),
                parts: HashMap::new(),
                completed: false,
                cancelled: false,
                initiated: Utc::now() - age,
            },
        );
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn initiate_multipart(
        &self,
        key_name: &str,
        _headers: &PutObjectHeaders,
    ) -> Result<MultiPartHandle, ObjectStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_upload_id;
        inner.next_upload_id += 1;
        let upload_id = id.to_string();
        inner.uploads.insert(
            upload_id.clone(),
            Upload {
                key_name: key_name.to_string(),
                parts: HashMap::new(),
                completed: false,
                cancelled: false,
                initiated: Utc::now(),
            },
        );
        Ok(MultiPartHandle {
            upload_id,
            key_name: key_name.to_string(),
        })
    }

    async fn upload_part(
        &self,
        handle: &MultiPartHandle,
        index: u32,
        chunk_bytes: &[u8],
    ) -> Result<PartUploadResult, ObjectStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.failing_indices.contains(&index) {
            return Err(ObjectStoreError::Request(format!(
                "simulated failure on part {index}"
            )));
        }
        let mut hasher = Md5::new();
        hasher.update(chunk_bytes);
        let md5_hex = format!("{:x}", hasher.finalize());

        let upload = inner
            .uploads
            .get_mut(&handle.upload_id)
            .ok_or_else(|| ObjectStoreError::Request("unknown upload".to_string()))?;
        // Idempotent replace, per the §4.4 contract.
        upload.parts.insert(index, chunk_bytes.to_vec());

        Ok(PartUploadResult { md5_hex })
    }

    async fn complete(
        &self,
        handle: &MultiPartHandle,
        parts: &[(u32, String)],
    ) -> Result<String, ObjectStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let upload = inner
            .uploads
            .get_mut(&handle.upload_id)
            .ok_or_else(|| ObjectStoreError::Request("unknown upload".to_string()))?;
        if upload.completed {
            return Err(ObjectStoreError::AlreadyCompleted);
        }
        if upload.cancelled {
            return Err(ObjectStoreError::AlreadyCancelled);
        }
        upload.completed = true;
        let etag = z3_core::multipart_etag(parts.iter().map(|(_, md5)| md5.clone()));
        Ok(etag)
    }

    async fn cancel(&self, handle: &MultiPartHandle) -> Result<(), ObjectStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let upload = inner
            .uploads
            .get_mut(&handle.upload_id)
            .ok_or_else(|| ObjectStoreError::Request("unknown upload".to_string()))?;
        if upload.cancelled {
            return Err(ObjectStoreError::AlreadyCancelled);
        }
        if upload.completed {
            return Err(ObjectStoreError::AlreadyCompleted);
        }
        upload.cancelled = true;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<KeyRef>, ObjectStoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut keys: Vec<KeyRef> = inner
            .objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .map(|k| KeyRef { key: k.clone() })
            .collect();
        keys.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(keys)
    }

    async fn get_key(&self, key_ref: &KeyRef) -> Result<ObjectInfo, ObjectStoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .objects
            .get(&key_ref.key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound(key_ref.key.clone()))
    }

    async fn list_multipart_uploads(&self) -> Result<Vec<InFlightUpload>, ObjectStoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut uploads: Vec<InFlightUpload> = inner
            .uploads
            .iter()
            .filter(|(_, u)| !u.completed && !u.cancelled)
            .map(|(upload_id, u)| InFlightUpload {
                key_name: u.key_name.clone(),
                upload_id: upload_id.clone(),
                initiated: u.initiated,
            })
            .collect();
        uploads.sort_by(|a, b| a.key_name.cmp(&b.key_name));
        Ok(uploads)
    }
}

#[cfg(test)]
#[path = "fake_object_store_tests.rs"]
mod tests;
