// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aws-sdk-s3`-backed implementation of [`ObjectStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use md5::{Digest, Md5};

use crate::object_store::{
    InFlightUpload, KeyRef, MultiPartHandle, ObjectInfo, ObjectStore, ObjectStoreError,
    PartUploadResult, PutObjectHeaders, DEFAULT_ACL,
};

/// `x-amz-meta-` prefix S3 strips on write and re-adds on read.
const META_PREFIX: &str = "x-amz-meta-";

/// Strips the `x-amz-meta-` prefix S3 echoes back on `HeadObject`/`ListMultipartUploads`.
fn strip_meta_prefix(key: &str) -> &str {
    key.trim_start_matches(META_PREFIX)
}

/// S3 returns ETags wrapped in double quotes; `complete_multipart_upload`
/// expects each part's ETag quoted the same way it was received.
fn quote_etag(etag: &str) -> String {
    format!("\"{etag}\"")
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn initiate_multipart(
        &self,
        key_name: &str,
        headers: &PutObjectHeaders,
    ) -> Result<MultiPartHandle, ObjectStoreError> {
        let mut builder = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key_name)
            .acl(aws_sdk_s3::types::ObjectCannedAcl::from(DEFAULT_ACL));

        if !headers.storage_class.is_empty() {
            builder = builder.storage_class(aws_sdk_s3::types::StorageClass::from(
                headers.storage_class.as_str(),
            ));
        }
        for (k, v) in &headers.user_metadata {
            builder = builder.metadata(k, v);
        }

        let output = builder
            .send()
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;
        let upload_id = output
            .upload_id()
            .ok_or_else(|| ObjectStoreError::Request("missing upload_id".to_string()))?
            .to_string();

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
        let mut hasher = Md5::new();
        hasher.update(chunk_bytes);
        let md5_hex = format!("{:x}", hasher.finalize());
        let output = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(&handle.key_name)
            .upload_id(&handle.upload_id)
            .part_number(index as i32)
            .body(ByteStream::from(chunk_bytes.to_vec()))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;

        // Prefer the digest S3 actually stored (its ETag, quotes
        // stripped) over our locally-computed one when present, so a
        // server-side re-encoding can't silently desync the composite
        // ETag math in z3-core::etag.
        let md5_hex = output
            .e_tag()
            .map(|t| t.trim_matches('"').to_string())
            .unwrap_or(md5_hex);

        Ok(PartUploadResult { md5_hex })
    }

    async fn complete(
        &self,
        handle: &MultiPartHandle,
        parts: &[(u32, String)],
    ) -> Result<String, ObjectStoreError> {
        let completed_parts: Vec<CompletedPart> = parts
            .iter()
            .map(|(index, etag)| {
                CompletedPart::builder()
                    .part_number(*index as i32)
                    .e_tag(quote_etag(etag))
                    .build()
            })
            .collect();

        let output = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(&handle.key_name)
            .upload_id(&handle.upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed_parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;

        Ok(output.e_tag().unwrap_or_default().to_string())
    }

    async fn cancel(&self, handle: &MultiPartHandle) -> Result<(), ObjectStoreError> {
        self.client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(&handle.key_name)
            .upload_id(&handle.upload_id)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<KeyRef>, ObjectStoreError> {
        let mut keys = Vec::new();
        let mut continuation_token = None;
        loop {
            let mut builder = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation_token {
                builder = builder.continuation_token(token);
            }
            let output = builder
                .send()
                .await
                .map_err(|e| ObjectStoreError::Request(e.to_string()))?;

            for object in output.contents() {
                if let Some(key) = object.key() {
                    keys.push(KeyRef { key: key.to_string() });
                }
            }

            continuation_token = output
                .is_truncated()
                .unwrap_or(false)
                .then(|| output.next_continuation_token().map(str::to_string))
                .flatten();
            if continuation_token.is_none() {
                break;
            }
        }
        Ok(keys)
    }

    async fn get_key(&self, key_ref: &KeyRef) -> Result<ObjectInfo, ObjectStoreError> {
        let output = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key_ref.key)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;

        let metadata: HashMap<String, String> = output
            .metadata()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (strip_meta_prefix(&k).to_string(), v))
            .collect();

        Ok(ObjectInfo {
            key: key_ref.key.clone(),
            size: output.content_length().unwrap_or(0).max(0) as u64,
            metadata,
        })
    }

    async fn list_multipart_uploads(&self) -> Result<Vec<InFlightUpload>, ObjectStoreError> {
        let mut uploads = Vec::new();
        let mut key_marker = None;
        let mut upload_id_marker = None;
        loop {
            let mut builder = self.client.list_multipart_uploads().bucket(&self.bucket);
            if let Some(marker) = &key_marker {
                builder = builder.key_marker(marker);
            }
            if let Some(marker) = &upload_id_marker {
                builder = builder.upload_id_marker(marker);
            }
            let output = builder
                .send()
                .await
                .map_err(|e| ObjectStoreError::Request(e.to_string()))?;

            for upload in output.uploads() {
                let (Some(key), Some(upload_id), Some(initiated)) =
                    (upload.key(), upload.upload_id(), upload.initiated())
                else {
                    continue;
                };
                let secs_f64 = initiated.as_secs_f64();
                let Some(initiated) =
                    DateTime::<Utc>::from_timestamp(secs_f64.floor() as i64, 0)
                else {
                    continue;
                };
                uploads.push(InFlightUpload {
                    key_name: key.to_string(),
                    upload_id: upload_id.to_string(),
                    initiated,
                });
            }

            if output.is_truncated().unwrap_or(false) {
                key_marker = output.next_key_marker().map(str::to_string);
                upload_id_marker = output.next_upload_id_marker().map(str::to_string);
            } else {
                break;
            }
        }
        Ok(uploads)
    }
}

#[cfg(test)]
#[path = "s3_object_store_tests.rs"]
mod tests;
