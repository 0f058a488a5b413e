// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives `z3_core::Chunker` against a real async byte source.
//!
//! `Chunker` itself is pure accumulation logic with no I/O (see its
//! module docs in `z3-core`); this wrapper is the thin async loop that
//! feeds it from a `tokio::io::AsyncRead` and pulls completed chunks
//! back out, one `fill`/`take_ready` cycle per read.

use tokio::io::{AsyncRead, AsyncReadExt};
use z3_core::chunk::Chunker;

/// Reads from `input` in chunks of up to `chunker`'s remaining
/// capacity, feeding each read back into the chunker, until a complete
/// chunk (or the final short one) is ready. Returns `None` once the
/// chunker is [`Chunker::finished`].
pub struct AsyncChunker<R> {
    input: R,
    chunker: Chunker,
}

impl<R: AsyncRead + Unpin> AsyncChunker<R> {
    pub fn new(input: R, chunk_size: usize) -> Self {
        Self {
            input,
            chunker: Chunker::new(chunk_size),
        }
    }

    pub fn finished(&self) -> bool {
        self.chunker.finished()
    }

    /// Reads until one full chunk (or the final short one) is produced,
    /// or `None` once the stream and chunker are both drained.
    pub async fn next_chunk(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(chunk) = self.chunker.take_ready() {
                return Ok(Some(chunk));
            }
            if self.chunker.finished() {
                return Ok(None);
            }
            let mut buf = vec![0u8; self.chunker.remaining_capacity()];
            let read = self.input.read(&mut buf).await?;
            buf.truncate(read);
            self.chunker.fill(&buf);
        }
    }
}

#[cfg(test)]
#[path = "chunk_stream_tests.rs"]
mod tests;
