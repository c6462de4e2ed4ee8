//! Settings manager
//!
//! Reads and writes the three settings documents. Documents are read fresh
//! from disk on every call and written back whole.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{HelperError, HelperResult};
use crate::model::{DocumentKind, SettingsDocument};
use crate::paths::ConfigPaths;
use crate::util::write_json_file;

/// Existence of one managed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub exists: bool,
}

/// Reads and writes the Claude configuration documents
#[derive(Debug, Clone)]
pub struct SettingsManager {
    paths: ConfigPaths,
}

impl SettingsManager {
    #[must_use]
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Manager for the running process
    pub fn from_process() -> HelperResult<Self> {
        Ok(Self::new(ConfigPaths::from_process()?))
    }

    #[must_use]
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Path of a managed document
    #[must_use]
    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        kind.path(&self.paths)
    }

    /// Read a document, or its default when the file does not exist
    ///
    /// # Errors
    /// Returns a parse error if the file is not valid JSON for the document
    pub fn read<D: SettingsDocument>(&self) -> HelperResult<D> {
        let path = self.path_of(D::KIND);
        match read_text(&path)? {
            Some(text) => parse_json(&path, &text),
            None => {
                tracing::debug!(path = %path.display(), "file absent, using defaults");
                Ok(D::default())
            }
        }
    }

    /// Write a document in full
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written
    pub fn write<D: SettingsDocument>(&self, doc: &D) -> HelperResult<()> {
        let path = self.path_of(D::KIND);
        write_json_file(&path, doc)?;
        tracing::info!(file = D::KIND.label(), path = %path.display(), "saved settings");
        Ok(())
    }

    /// Read a document as an untyped JSON value (`{}` when absent)
    ///
    /// # Errors
    /// Returns a parse error on invalid JSON
    pub fn read_raw(&self, kind: DocumentKind) -> HelperResult<Value> {
        let path = self.path_of(kind);
        match read_text(&path)? {
            Some(text) => parse_json(&path, &text),
            None => Ok(Value::Object(serde_json::Map::new())),
        }
    }

    /// Existence of the three managed files
    #[must_use]
    pub fn file_status(&self) -> Vec<FileStatus> {
        DocumentKind::all()
            .iter()
            .map(|&kind| {
                let path = self.path_of(kind);
                FileStatus {
                    kind,
                    exists: path.is_file(),
                    path,
                }
            })
            .collect()
    }
}

/// Read a file as text, `None` if it does not exist. A UTF-8 BOM is dropped.
pub(crate) fn read_text(path: &Path) -> HelperResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), "read file");
            Ok(Some(match text.strip_prefix('\u{feff}') {
                Some(rest) => rest.to_string(),
                None => text,
            }))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(HelperError::io(path, &e)),
    }
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    path: &Path,
    text: &str,
) -> HelperResult<T> {
    serde_json::from_str(text).map_err(|e| HelperError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeSettings, DesktopSettings, McpConfig, McpServer};
    use tempfile::TempDir;

    fn manager() -> (TempDir, SettingsManager) {
        let dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(ConfigPaths::sandboxed(dir.path()));
        (dir, manager)
    }

    #[test]
    fn test_read_missing_returns_default() {
        let (_dir, manager) = manager();
        let settings: CodeSettings = manager.read().unwrap();
        assert_eq!(settings, CodeSettings::default());
        let desktop: DesktopSettings = manager.read().unwrap();
        assert_eq!(desktop.theme(), "system");
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, manager) = manager();
        let config = McpConfig::with_servers([(
            "fs".to_string(),
            McpServer::new("npx", vec!["-y".into(), "server-fs".into()]),
        )]);
        manager.write(&config).unwrap();

        let back: McpConfig = manager.read().unwrap();
        assert_eq!(back, config);
        assert!(manager.paths().mcp_config.is_file());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let (_dir, manager) = manager();
        let path = &manager.paths().code_settings;
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{ not json").unwrap();

        let err = manager.read::<CodeSettings>().unwrap_err();
        assert!(matches!(err, HelperError::JsonParse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_bom_is_tolerated() {
        let (_dir, manager) = manager();
        let path = &manager.paths().code_settings;
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "\u{feff}{\"model\": \"opus\"}").unwrap();

        let settings: CodeSettings = manager.read().unwrap();
        assert_eq!(settings.model.as_deref(), Some("opus"));
    }

    #[test]
    fn test_file_status() {
        let (_dir, manager) = manager();
        manager.write(&CodeSettings::default()).unwrap();

        let status = manager.file_status();
        assert_eq!(status.len(), 3);
        assert!(!status[0].exists);
        assert!(status[2].exists);
        assert_eq!(status[2].kind, DocumentKind::Code);
    }

    #[test]
    fn test_read_raw_absent_is_empty_object() {
        let (_dir, manager) = manager();
        assert_eq!(
            manager.read_raw(DocumentKind::Desktop).unwrap(),
            serde_json::json!({})
        );
    }
}
