//! Knowledge base provisioning.
//!
//! Makes sure the document backing the knowledge base exists before it is
//! loaded.

use askrag_core::AppResult;
use std::fs;
use std::path::Path;

/// Passage written when no knowledge base document exists yet.
pub const DEFAULT_DOCUMENT: &str = "The Apollo 11 mission was the spaceflight that first landed humans on the Moon. \
Commander Neil Armstrong and lunar module pilot Buzz Aldrin formed the American crew \
that landed the Apollo Lunar Module Eagle on July 20, 1969.\n";

/// Create the document at `path` with [`DEFAULT_DOCUMENT`] if it is missing.
///
/// An existing file is never touched. Returns `true` when a file was written.
pub fn ensure_document(path: &Path) -> AppResult<bool> {
    if path.exists() {
        tracing::debug!("Knowledge base document present at {:?}", path);
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, DEFAULT_DOCUMENT)?;
    tracing::info!("Created default knowledge base document at {:?}", path);

    Ok(true)
}
