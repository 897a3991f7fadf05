//! Serialization of the finished document to the output sink.
//!
//! The document is written as pretty-printed JSON to a single file, fully
//! overwriting any previous run's output. Failures here are the only fatal
//! errors of a run; no partial document is ever written on serialization
//! failure.

use crate::error::{Error, Result};
use crate::swagger_builder::SwaggerDocument;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a Swagger document to pretty-printed JSON.
pub fn serialize_json(document: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    Ok(serde_json::to_string_pretty(document)?)
}

/// Serializes the document and writes it to `path`, creating the parent
/// directory if absent.
///
/// # Errors
///
/// Returns [`Error::Output`] when the directory cannot be created or the
/// file cannot be written. The run fails entirely in that case.
pub fn write_document(document: &SwaggerDocument, path: &Path) -> Result<()> {
    let content = serialize_json(document)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Output {
            message: format!("failed to create directory {}: {}", parent.display(), e),
        })?;
    }

    fs::write(path, &content).map_err(|e| Error::Output {
        message: format!("failed to write {}: {}", path.display(), e),
    })?;

    debug!(
        "Wrote {} bytes to {}",
        content.len(),
        path.display()
    );
    Ok(())
}
