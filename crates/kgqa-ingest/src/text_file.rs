//! Load a local text file as a document.

use std::path::Path;

use kgqa_core::Document;

use crate::error::{IngestError, Result};

/// Read a UTF-8 text file. The title is the file stem.
pub async fn load_text_file(path: &Path) -> Result<Document> {
    let text = tokio::fs::read_to_string(path).await?;
    if text.trim().is_empty() {
        return Err(IngestError::Source(format!("{} is empty", path.display())));
    }

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let source = format!("file://{}", path.display());

    tracing::info!(path = %path.display(), chars = text.chars().count(), "Loaded text file");
    Ok(Document::new(source, title, text))
}
