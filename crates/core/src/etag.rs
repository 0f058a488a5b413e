// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S3 composite multipart ETag computation.
//!
//! Ported from `multipart_etag` in the original `pput.py`: the ETag of
//! a multipart object is the MD5 of the concatenation of the raw
//! (decoded) per-part MD5 digests, hex-encoded, suffixed with the part
//! count, and wrapped in double quotes.

use md5::{Digest, Md5};

/// Computes the composite ETag for a multipart upload from the ordered
/// hex-encoded per-part MD5 digests.
///
/// Input must already be ordered by part index — this function does not
/// sort; the caller (the upload supervisor) is responsible for imposing
/// that order, since part completion order is otherwise non-deterministic.
pub fn multipart_etag<I, S>(digests: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Md5::new();
    let mut count = 0u32;
    for hex_digest in digests {
        count += 1;
        let raw = decode_hex(hex_digest.as_ref());
        hasher.update(&raw);
    }
    let digest = hasher.finalize();
    format!("\"{}-{}\"", hex::encode(digest), count)
}

fn decode_hex(s: &str) -> Vec<u8> {
    debug_assert!(s.len() % 2 == 0, "hex digest must have even length");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap_or(0))
        .collect()
}

/// Minimal hex-encoding helper so this module doesn't need an extra
/// dependency beyond the `md-5` crate already required for hashing.
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
#[path = "etag_tests.rs"]
mod tests;
