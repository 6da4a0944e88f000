//! File I/O for the output document.

use std::fs;
use std::path::Path;

use crate::document::OutputDocument;
use crate::error::Result;

/// Write the document as pretty-printed JSON.
pub fn write_document(document: &OutputDocument, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a previously written document back from disk.
pub fn read_document(path: impl AsRef<Path>) -> Result<OutputDocument> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
