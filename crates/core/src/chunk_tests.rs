// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// Drives a `Chunker` against an in-memory buffer using short, uneven
/// reads, simulating what an async reader wrapper does one poll at a time.
fn drain(mut input: &[u8], chunk_size: usize, read_size: usize) -> Vec<Vec<u8>> {
    let mut chunker = Chunker::new(chunk_size);
    let mut chunks = Vec::new();
    while !chunker.finished() {
        let want = chunker.remaining_capacity().min(read_size).max(1);
        let n = want.min(input.len());
        chunker.fill(&input[..n]);
        input = &input[n..];
        if let Some(chunk) = chunker.take_ready() {
            chunks.push(chunk);
        }
    }
    chunks
}

#[test]
fn boundary_splits_exactly_on_chunk_size() {
    // S2 — "aabbccdde", chunk_size=2 -> ["aa","bb","cc","dd","e"]
    let chunks = drain(b"aabbccdde", 2, 2);
    let as_strings: Vec<String> = chunks
        .iter()
        .map(|c| String::from_utf8(c.clone()).unwrap())
        .collect();
    assert_eq!(as_strings, vec!["aa", "bb", "cc", "dd", "e"]);
}

#[test]
fn short_reads_are_tolerated() {
    let chunks = drain(b"aabbccdde", 2, 1);
    let as_strings: Vec<String> = chunks
        .iter()
        .map(|c| String::from_utf8(c.clone()).unwrap())
        .collect();
    assert_eq!(as_strings, vec!["aa", "bb", "cc", "dd", "e"]);
}

#[test]
fn zero_length_input_produces_no_chunks() {
    let chunks = drain(b"", 5, 4);
    assert!(chunks.is_empty());
}

#[test]
fn totality_for_arbitrary_sizes() {
    let input: Vec<u8> = (0u32..12_345).map(|i| (i % 256) as u8).collect();
    let chunk_size = 1000;
    let chunks = drain(&input, chunk_size, 333);

    let expected_count = input.len().div_ceil(chunk_size);
    assert_eq!(chunks.len(), expected_count);

    let reassembled: Vec<u8> = chunks.into_iter().flatten().collect();
    assert_eq!(reassembled, input);
}

#[test]
fn finished_is_false_until_eof_and_buffer_drained() {
    let mut chunker = Chunker::new(4);
    assert!(!chunker.finished());
    chunker.fill(b"ab");
    assert!(chunker.take_ready().is_none());
    assert!(!chunker.finished());
    chunker.fill(&[]); // EOF
    assert!(!chunker.finished()); // partial buffer still has "ab"
    let last = chunker.take_ready();
    assert_eq!(last, Some(b"ab".to_vec()));
    assert!(chunker.finished());
    assert_eq!(chunker.take_ready(), None);
}

#[test]
fn chunk_size_for_estimate_never_goes_below_the_default() {
    assert_eq!(chunk_size_for_estimate(0), DEFAULT_CHUNK_SIZE);
    assert_eq!(chunk_size_for_estimate(1024), DEFAULT_CHUNK_SIZE);
}

#[test]
fn chunk_size_for_estimate_keeps_part_count_under_the_limit() {
    let estimated = 100 * 1024 * 1024 * 1024u64; // 100 GiB
    let size = chunk_size_for_estimate(estimated);
    let parts = (estimated as f64 * 1.05 / size as f64).ceil() as u64;
    assert!(parts <= MAX_PARTS);
    assert!(size as u64 >= DEFAULT_CHUNK_SIZE as u64);
}
