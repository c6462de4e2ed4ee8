//! Shared helpers: name validation, hashing and atomic JSON writes

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{HelperError, HelperResult};

/// Validate a user-supplied name (backup, MCP server) for use as a map key or
/// directory name
///
/// # Errors
/// Returns a validation error if the name is empty, too long, padded with
/// whitespace, or could escape its parent directory
pub fn validate_name(name: &str) -> HelperResult<()> {
    if name.is_empty() {
        return Err(HelperError::Validation("name cannot be empty".into()));
    }

    if name.len() > 128 {
        return Err(HelperError::Validation(
            "name cannot exceed 128 characters".into(),
        ));
    }

    if name != name.trim() {
        return Err(HelperError::Validation(
            "name cannot start or end with whitespace".into(),
        ));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(HelperError::Validation(format!(
            "name contains path separator: {name}"
        )));
    }

    if name.contains("..") {
        return Err(HelperError::Validation(format!(
            "name contains parent directory reference: {name}"
        )));
    }

    if name.starts_with('.') {
        return Err(HelperError::Validation(format!(
            "name cannot start with dot: {name}"
        )));
    }

    if name.contains('\0') {
        return Err(HelperError::Validation("name contains null byte".into()));
    }

    Ok(())
}

/// Hex-encoded SHA-256 of a byte slice
#[must_use]
pub fn compute_sha256(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Serialize a value the way the settings files are stored on disk:
/// two-space indentation and a trailing newline
///
/// # Errors
/// Returns a validation error if the value cannot be serialized
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> HelperResult<String> {
    let mut content =
        serde_json::to_string_pretty(value).map_err(|e| HelperError::Validation(e.to_string()))?;
    content.push('\n');
    Ok(content)
}

/// Write a JSON document atomically
///
/// The content goes to a temporary file in the target directory which is then
/// renamed over the destination, so readers never see a half-written file.
///
/// # Errors
/// Returns an I/O error if the directory cannot be created or the file cannot
/// be written
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> HelperResult<()> {
    let content = to_pretty_json(value)?;
    write_atomic(path, content.as_bytes())
}

/// Replace `path` with `content` via a temp file and rename
///
/// # Errors
/// Returns an I/O error on any filesystem failure
pub fn write_atomic(path: &Path, content: &[u8]) -> HelperResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| HelperError::io(parent, &e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| HelperError::io(parent, &e))?;
    tmp.write_all(content)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| HelperError::io(tmp.path(), &e))?;
    tmp.persist(path).map_err(|e| HelperError::io(path, &e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_name_normal() {
        assert!(validate_name("before_developer").is_ok());
        assert!(validate_name("backup_20240101_120000").is_ok());
        assert!(validate_name("my-server").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_traversal() {
        assert!(validate_name("../etc").is_err());
        assert!(validate_name("foo/bar").is_err());
        assert!(validate_name("foo\\bar").is_err());
    }

    #[test]
    fn test_validate_name_rejects_hidden() {
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn test_validate_name_rejects_whitespace_and_empty() {
        assert!(validate_name("").is_err());
        assert!(validate_name(" padded").is_err());
        assert!(validate_name(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_write_json_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");

        write_json_file(&path, &serde_json::json!({"b": 1, "a": [true]})).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": [\n    true\n  ],\n  \"b\": 1\n}\n");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_compute_sha256() {
        assert_eq!(
            compute_sha256(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
