// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size chunking of an unbounded byte stream.
//!
//! Mirrors the original `StreamHandler`: the buffer only ever grows up
//! to `chunk_size`, a short read just tops it up, and EOF flushes
//! whatever is left (possibly a final short chunk, possibly nothing).

/// Default chunk size used by the uploader when no override is given (5 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// An immutable, 1-based indexed slice of the input stream.
///
/// `index` values are assigned by whoever drives the chunker (the
/// upload supervisor) and form `1..N` without gaps, in production order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: u32,
    pub bytes: Vec<u8>,
}

/// Accumulates bytes read from an external source into fixed-size chunks.
///
/// `Chunker` itself does no I/O: the caller feeds it bytes via
/// [`Chunker::fill`] (from a short read of any size, including zero for
/// EOF) and pulls completed buffers out with [`Chunker::take_if_full`] /
/// [`Chunker::take_final`]. This keeps the accumulation logic testable
/// without an async runtime, while `z3-engine`'s streaming wrapper
/// drives it against a real `AsyncRead`.
#[derive(Debug)]
pub struct Chunker {
    chunk_size: usize,
    partial: Vec<u8>,
    eof_reached: bool,
}

impl Chunker {
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be non-zero");
        Self {
            chunk_size,
            partial: Vec::with_capacity(chunk_size.min(1 << 20)),
            eof_reached: false,
        }
    }

    pub fn with_default_size() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }

    /// True once EOF has been observed and the partial buffer has been
    /// fully drained. No further chunks are produced after this.
    pub fn finished(&self) -> bool {
        self.eof_reached && self.partial.is_empty()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// How many more bytes `fill` will accept before the buffer is full.
    pub fn remaining_capacity(&self) -> usize {
        self.chunk_size - self.partial.len()
    }

    /// Append `data` to the partial buffer. `data` must not exceed
    /// `remaining_capacity()` — the caller (the async reader wrapper)
    /// is expected to request exactly that many bytes from upstream.
    /// A zero-length `data` marks EOF.
    pub fn fill(&mut self, data: &[u8]) {
        if data.is_empty() {
            self.eof_reached = true;
            return;
        }
        debug_assert!(data.len() <= self.remaining_capacity());
        self.partial.extend_from_slice(data);
    }

    /// Returns a completed chunk if the buffer is full or EOF has been
    /// reached with pending bytes, clearing the buffer. Returns `None`
    /// if neither condition holds yet (more input is needed).
    pub fn take_ready(&mut self) -> Option<Vec<u8>> {
        if self.partial.len() == self.chunk_size || (self.eof_reached && !self.partial.is_empty())
        {
            Some(std::mem::take(&mut self.partial))
        } else {
            None
        }
    }
}

/// S3 multi-part ceiling: at most this many parts per upload.
pub const MAX_PARTS: u64 = 9_999;

/// Given an estimated uncompressed byte size, picks a chunk size that
/// keeps the part count under [`MAX_PARTS`] while never going below the
/// 5 MiB per-part minimum (the estimate is inflated 5% as headroom
/// against compression/estimation drift).
pub fn chunk_size_for_estimate(estimated_bytes: u64) -> usize {
    let inflated = (estimated_bytes as f64) * 1.05;
    let by_part_budget = (inflated / MAX_PARTS as f64).ceil() as u64;
    by_part_budget.max(DEFAULT_CHUNK_SIZE as u64) as usize
}

#[cfg(test)]
#[path = "chunk_tests.rs"]
mod tests;
