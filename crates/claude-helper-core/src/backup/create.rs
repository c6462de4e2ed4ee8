//! Backup creation

use chrono::Local;
use std::fs;

use super::{BackupInfo, BackupStore};
use crate::error::{HelperError, HelperResult};
use crate::model::DocumentKind;

/// Timestamped name used when the user does not pick one
#[must_use]
pub fn default_backup_name() -> String {
    Local::now().format("backup_%Y%m%d_%H%M%S").to_string()
}

impl BackupStore {
    /// Copy every managed file that exists into a backup directory
    ///
    /// Missing source files are skipped. Re-using a name overwrites that
    /// backup, removing copies of files that no longer exist.
    ///
    /// # Errors
    /// Returns a validation error for a bad name or an I/O error if copying fails
    pub fn create(&self, name: Option<&str>) -> HelperResult<BackupInfo> {
        let name = name.map_or_else(default_backup_name, str::to_string);
        let dir = self.dir_of(&name)?;
        fs::create_dir_all(&dir).map_err(|e| HelperError::io(&dir, &e))?;

        for &kind in DocumentKind::all() {
            let source = kind.path(&self.paths);
            let target = dir.join(kind.backup_file_name());

            if source.is_file() {
                fs::copy(&source, &target).map_err(|e| HelperError::io(&source, &e))?;
                tracing::debug!(from = %source.display(), to = %target.display(), "copied");
            } else {
                tracing::debug!(path = %source.display(), "not present, skipped");
                if target.is_file() {
                    fs::remove_file(&target).map_err(|e| HelperError::io(&target, &e))?;
                }
            }
        }

        tracing::info!(backup = %name, "created backup");
        BackupInfo::load(&name, &dir)
    }
}
