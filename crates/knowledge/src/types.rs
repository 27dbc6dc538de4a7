//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A source document loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path the content was read from
    pub source: PathBuf,

    /// Full text content
    pub content: String,
}

/// A bounded-length substring of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Source document path
    pub source: PathBuf,

    /// Position within the source (0-indexed)
    pub position: u32,

    /// Text content
    pub text: String,

    /// Character (not byte) range in the source document
    pub char_range: (usize, usize),
}

impl Segment {
    /// Length of the segment in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A segment returned by a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSegment {
    /// The matching segment
    pub segment: Segment,

    /// Cosine similarity to the query (higher is nearer)
    pub score: f32,
}
