// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compressor registry consulted by backup/restore pipelines.
//!
//! Recognised tags are stored as object metadata (`compressor=pigz1`) so
//! that `restore` knows which decompress stage to interpose without any
//! out-of-band bookkeeping.

/// A recognised compressor: its metadata tag plus the shell fragments
/// used on the send (compress) and receive (decompress) sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compressor {
    Pigz1,
    Pigz4,
}

impl Compressor {
    /// Parses the `compressor` object-metadata tag. `None`/absent and
    /// the literal tag `"none"` both mean "no compression stage" and
    /// are represented as `Ok(None)`; anything else unrecognised is an error.
    pub fn from_tag(tag: Option<&str>) -> Result<Option<Self>, String> {
        match tag {
            None | Some("none") | Some("") => Ok(None),
            Some("pigz1") => Ok(Some(Compressor::Pigz1)),
            Some("pigz4") => Ok(Some(Compressor::Pigz4)),
            Some(other) => Err(format!("unrecognised compressor tag: {other}")),
        }
    }

    /// The metadata tag this compressor is recorded under.
    pub fn tag(self) -> &'static str {
        match self {
            Compressor::Pigz1 => "pigz1",
            Compressor::Pigz4 => "pigz4",
        }
    }

    /// The shell fragment that compresses stdin to stdout during backup.
    pub fn compress_cmd(self) -> &'static str {
        match self {
            Compressor::Pigz1 => "pigz -1 --blocksize 4096",
            Compressor::Pigz4 => "pigz -4 --blocksize 4096",
        }
    }

    /// The shell fragment that decompresses stdin to stdout during restore.
    /// Both registered compressors share the same decompressor.
    pub fn decompress_cmd(self) -> &'static str {
        "pigz -d"
    }
}

#[cfg(test)]
#[path = "compressor_tests.rs"]
mod tests;
