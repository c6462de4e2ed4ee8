//! Backup restore

use std::fs;
use std::path::PathBuf;

use super::BackupStore;
use crate::error::{HelperError, HelperResult};
use crate::model::DocumentKind;

impl BackupStore {
    /// Copy every file stored in a backup back to its live location
    ///
    /// Live files that have no copy in the backup are left untouched. Nothing
    /// is written when the backup does not exist.
    ///
    /// # Errors
    /// Returns `BackupNotFound` for an unknown backup or an I/O error if copying
    /// fails
    pub fn restore(&self, name: &str) -> HelperResult<Vec<(DocumentKind, PathBuf)>> {
        let dir = self.existing_dir(name)?;

        let mut restored = Vec::new();
        for &kind in DocumentKind::all() {
            let source = dir.join(kind.backup_file_name());
            if !source.is_file() {
                continue;
            }
            let target = kind.path(&self.paths);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| HelperError::io(parent, &e))?;
            }
            fs::copy(&source, &target).map_err(|e| HelperError::io(&target, &e))?;
            tracing::debug!(from = %source.display(), to = %target.display(), "restored");
            restored.push((kind, target));
        }

        tracing::info!(backup = name, files = restored.len(), "restored backup");
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ConfigPaths;
    use tempfile::TempDir;

    #[test]
    fn test_restore_missing_backup_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::sandboxed(dir.path());
        let store = BackupStore::new(paths.clone());

        let err = store.restore("ghost").unwrap_err();
        assert!(matches!(err, HelperError::BackupNotFound(_)));
        assert!(!paths.code_dir.exists());
        assert!(!paths.desktop_dir.exists());
    }

    #[test]
    fn test_restore_leaves_unbacked_files() {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::sandboxed(dir.path());
        fs::create_dir_all(&paths.code_dir).unwrap();
        fs::write(&paths.code_settings, "{\"model\": \"haiku\"}").unwrap();

        let store = BackupStore::new(paths.clone());
        store.create(Some("snap")).unwrap();

        fs::write(&paths.code_settings, "{\"model\": \"opus\"}").unwrap();
        fs::create_dir_all(&paths.desktop_dir).unwrap();
        fs::write(&paths.desktop_settings, "{\"theme\": \"dark\"}").unwrap();

        let restored = store.restore("snap").unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(
            fs::read_to_string(&paths.code_settings).unwrap(),
            "{\"model\": \"haiku\"}"
        );
        assert_eq!(
            fs::read_to_string(&paths.desktop_settings).unwrap(),
            "{\"theme\": \"dark\"}"
        );
    }
}
