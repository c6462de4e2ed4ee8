//! Backup metadata

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HelperError, HelperResult};
use crate::model::DocumentKind;
use crate::util::compute_sha256;

/// A file stored inside a backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// Which live document the file was copied from
    pub kind: DocumentKind,
    /// Path inside the backup directory
    pub path: PathBuf,
    pub size: u64,
    /// SHA256 hash of the content
    pub sha256: String,
}

impl BackupFile {
    pub(crate) fn read(kind: DocumentKind, path: PathBuf) -> HelperResult<Self> {
        let content = fs::read(&path).map_err(|e| HelperError::io(&path, &e))?;
        Ok(Self {
            kind,
            size: content.len() as u64,
            sha256: compute_sha256(&content),
            path,
        })
    }
}

/// A named backup directory
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    /// Last modification time of the directory
    pub modified: Option<DateTime<Local>>,
    /// Well-known files present, in document order
    pub files: Vec<BackupFile>,
}

impl BackupInfo {
    /// Inspect a backup directory
    pub(crate) fn load(name: &str, path: &Path) -> HelperResult<Self> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        let mut files = Vec::new();
        for &kind in DocumentKind::all() {
            let file = path.join(kind.backup_file_name());
            if file.is_file() {
                files.push(BackupFile::read(kind, file)?);
            }
        }

        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            modified,
            files,
        })
    }

    /// Whether a copy of the given document is stored
    #[must_use]
    pub fn contains(&self, kind: DocumentKind) -> bool {
        self.files.iter().any(|f| f.kind == kind)
    }

    /// Total size of stored files in bytes
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
