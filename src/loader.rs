//! Input loading for the CLI.
//!
//! Reads schema text and answer payloads from files or stdin (`-`).

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Load raw text from a file path, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::ReadError` if reading fails.
pub fn load_text(source: &str) -> Result<String, LoadError> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| LoadError::ReadError {
                path: "-".into(),
                source,
            })?;
        return Ok(buf);
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON document from a file path or stdin.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the content isn't valid JSON.
pub fn load_json(source: &str) -> Result<Value, LoadError> {
    let content = load_text(source)?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson { source })
}
