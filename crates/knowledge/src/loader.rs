//! Document loading.

use crate::types::Document;
use askrag_core::{AppError, AppResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read the full text of the document at `path`.
pub fn load_document(path: &Path) -> AppResult<Document> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::NotFound(format!("Document not found: {:?}", path)),
        _ => AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)),
    })?;

    tracing::debug!("Loaded {:?} ({} bytes)", path, content.len());

    Ok(Document {
        source: path.to_path_buf(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.txt");
        fs::write(&path, "hello moon").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.content, "hello moon");
        assert_eq!(doc.source, path);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_document(&temp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
