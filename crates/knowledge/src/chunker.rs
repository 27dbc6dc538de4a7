//! Text chunking with configurable size and overlap.
//!
//! Sizes and overlaps are measured in characters (Unicode scalar values), so
//! a segment never splits a multi-byte character.

use crate::loader::load_document;
use crate::types::{Document, Segment};
use askrag_core::{AppError, AppResult, ChunkStrategy};
use std::path::Path;
use text_splitter::{ChunkConfig, TextSplitter};

/// Load the document at `path` and split it into segments.
pub fn load_and_chunk(
    path: &Path,
    chunk_size: usize,
    chunk_overlap: usize,
    strategy: ChunkStrategy,
) -> AppResult<Vec<Segment>> {
    let document = load_document(path)?;
    chunk_document(&document, chunk_size, chunk_overlap, strategy)
}

/// Split a document into ordered segments of at most `chunk_size` characters.
pub fn chunk_document(
    document: &Document,
    chunk_size: usize,
    chunk_overlap: usize,
    strategy: ChunkStrategy,
) -> AppResult<Vec<Segment>> {
    if chunk_size == 0 {
        return Err(AppError::Config("chunk size must be greater than 0".to_string()));
    }
    if chunk_overlap >= chunk_size {
        return Err(AppError::Config(format!(
            "chunk overlap ({}) must be smaller than chunk size ({})",
            chunk_overlap, chunk_size
        )));
    }

    let segments = match strategy {
        ChunkStrategy::Window => window_segments(document, chunk_size, chunk_overlap),
        ChunkStrategy::Semantic => semantic_segments(document, chunk_size, chunk_overlap)?,
    };

    tracing::debug!(
        "Chunked {:?} into {} segments (strategy: {:?}, size: {}, overlap: {})",
        document.source,
        segments.len(),
        strategy,
        chunk_size,
        chunk_overlap
    );

    Ok(segments)
}

/// Fixed windows stepping by `chunk_size - overlap` characters.
///
/// Consecutive windows share exactly `overlap` characters. The last window
/// ends at the end of the text.
fn window_segments(document: &Document, chunk_size: usize, overlap: usize) -> Vec<Segment> {
    let text = &document.content;

    // Byte offset of every char boundary, including the end of the text
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    if char_count == 0 {
        return Vec::new();
    }

    let step = chunk_size - overlap;
    let mut segments = Vec::new();
    let mut start = 0;
    let mut position = 0u32;

    loop {
        let end = (start + chunk_size).min(char_count);

        segments.push(Segment {
            source: document.source.clone(),
            position,
            text: text[boundaries[start]..boundaries[end]].to_string(),
            char_range: (start, end),
        });

        if end == char_count {
            break;
        }

        position += 1;
        start += step;
    }

    segments
}

/// Boundary-aware splitting via `text-splitter`.
///
/// Prefers paragraph, sentence and word boundaries; trims surrounding
/// whitespace, so overlap is at most `overlap` characters.
fn semantic_segments(
    document: &Document,
    chunk_size: usize,
    overlap: usize,
) -> AppResult<Vec<Segment>> {
    let config = ChunkConfig::new(chunk_size)
        .with_overlap(overlap)
        .map_err(|e| AppError::Config(format!("Invalid chunk configuration: {}", e)))?;
    let splitter = TextSplitter::new(config);

    let text = &document.content;

    // Chunk offsets only increase, so char positions advance with a cursor
    let mut cursor_byte = 0;
    let mut cursor_char = 0;

    let segments = splitter
        .chunk_indices(text)
        .enumerate()
        .map(|(position, (byte_offset, chunk))| {
            cursor_char += text[cursor_byte..byte_offset].chars().count();
            cursor_byte = byte_offset;

            let start = cursor_char;
            let end = start + chunk.chars().count();
            Segment {
                source: document.source.clone(),
                position: position as u32,
                text: chunk.to_string(),
                char_range: (start, end),
            }
        })
        .collect();

    Ok(segments)
}
