//! Named backups of the settings files
//!
//! A backup is a directory under `<code dir>/backups/<name>` holding verbatim
//! copies of whichever managed files existed when it was created. Restore is
//! the exact inverse of create for every file present in the backup.

mod create;
mod restore;
mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HelperError, HelperResult};
use crate::paths::ConfigPaths;
use crate::util::validate_name;

pub use create::default_backup_name;
pub use types::{BackupFile, BackupInfo};

/// Backup directory manager
#[derive(Debug, Clone)]
pub struct BackupStore {
    paths: ConfigPaths,
}

impl BackupStore {
    #[must_use]
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Root directory holding all backups
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.paths.backup_dir
    }

    /// Directory of a named backup
    ///
    /// # Errors
    /// Returns a validation error for names that are not a plain directory name
    pub fn dir_of(&self, name: &str) -> HelperResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root().join(name))
    }

    /// All backups, sorted by name. Empty when no backup was ever made.
    /// Backups that cannot be read are logged and left out.
    ///
    /// # Errors
    /// Returns an I/O error if the backup directory cannot be read
    pub fn list(&self) -> HelperResult<Vec<BackupInfo>> {
        let root = self.root();
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HelperError::io(root, &e)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %root.display(), error = %e, "skipping unreadable backup entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            match BackupInfo::load(&name, &path) {
                Ok(info) => backups.push(info),
                Err(e) => tracing::warn!(backup = %name, error = %e, "skipping unreadable backup"),
            }
        }
        backups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(backups)
    }

    /// Details of one backup
    ///
    /// # Errors
    /// Returns `BackupNotFound` if there is no such backup
    pub fn show(&self, name: &str) -> HelperResult<BackupInfo> {
        let dir = self.existing_dir(name)?;
        BackupInfo::load(name, &dir)
    }

    /// Delete a backup directory
    ///
    /// # Errors
    /// Returns `BackupNotFound` if there is no such backup
    pub fn delete(&self, name: &str) -> HelperResult<()> {
        let dir = self.existing_dir(name)?;
        fs::remove_dir_all(&dir).map_err(|e| HelperError::io(&dir, &e))?;
        tracing::info!(backup = name, "deleted backup");
        Ok(())
    }

    /// Number of backups on disk, zero if the directory is missing
    #[must_use]
    pub fn count(&self) -> usize {
        self.list().map_or(0, |b| b.len())
    }

    fn existing_dir(&self, name: &str) -> HelperResult<PathBuf> {
        let dir = self.dir_of(name)?;
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(HelperError::BackupNotFound(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;
    use tempfile::TempDir;

    fn store() -> (TempDir, BackupStore) {
        let dir = TempDir::new().unwrap();
        let store = BackupStore::new(ConfigPaths::sandboxed(dir.path()));
        (dir, store)
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_list_without_backup_dir() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_list_is_sorted() {
        let (_dir, store) = store();
        write(&store.paths.code_settings, "{}");
        store.create(Some("zeta")).unwrap();
        store.create(Some("alpha")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_skips_unreadable_backup() {
        let (_dir, store) = store();
        write(&store.paths.code_settings, "{}");
        store.create(Some("good")).unwrap();

        // Reading address zero of our own memory fails with EIO, even as root
        let broken = store.root().join("broken");
        fs::create_dir_all(&broken).unwrap();
        std::os::unix::fs::symlink(
            "/proc/self/mem",
            broken.join(DocumentKind::Code.backup_file_name()),
        )
        .unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["good"]);
        assert_eq!(store.count(), 1);
        assert!(store.show("broken").is_err());
    }

    #[test]
    fn test_show_reports_files() {
        let (_dir, store) = store();
        write(&store.paths.mcp_config, r#"{"mcpServers": {}}"#);

        store.create(Some("snap")).unwrap();
        let info = store.show("snap").unwrap();
        assert!(info.contains(DocumentKind::Mcp));
        assert!(!info.contains(DocumentKind::Code));
        assert_eq!(info.total_size(), 18);
    }

    #[test]
    fn test_show_and_delete_missing() {
        let (_dir, store) = store();
        assert!(matches!(
            store.show("nope"),
            Err(HelperError::BackupNotFound(_))
        ));
        assert!(matches!(
            store.delete("nope"),
            Err(HelperError::BackupNotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        write(&store.paths.code_settings, "{}");
        store.create(Some("old")).unwrap();

        store.delete("old").unwrap();
        assert!(!store.root().join("old").exists());
    }

    #[test]
    fn test_rejects_traversal_names() {
        let (_dir, store) = store();
        assert!(matches!(
            store.create(Some("../escape")),
            Err(HelperError::Validation(_))
        ));
        assert!(store.restore("..").is_err());
    }
}
