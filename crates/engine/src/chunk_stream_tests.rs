// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

async fn collect(input: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    let mut chunker = AsyncChunker::new(std::io::Cursor::new(input.to_vec()), chunk_size);
    let mut chunks = Vec::new();
    while let Some(chunk) = chunker.next_chunk().await.unwrap() {
        chunks.push(chunk);
    }
    assert!(chunker.finished());
    chunks
}

#[tokio::test]
async fn s2_chunker_boundary() {
    let chunks = collect(b"aabbccdde", 2).await;
    let as_strings: Vec<String> = chunks
        .iter()
        .map(|c| String::from_utf8(c.clone()).unwrap())
        .collect();
    assert_eq!(as_strings, vec!["aa", "bb", "cc", "dd", "e"]);
}

#[tokio::test]
async fn empty_input_produces_zero_chunks() {
    let chunks = collect(b"", 5).await;
    assert!(chunks.is_empty());
}

#[tokio::test]
async fn totality_holds_for_an_exact_multiple() {
    let input = vec![7u8; 30];
    let chunks = collect(&input, 10).await;
    assert_eq!(chunks.len(), 3);
    let reassembled: Vec<u8> = chunks.into_iter().flatten().collect();
    assert_eq!(reassembled, input);
}
