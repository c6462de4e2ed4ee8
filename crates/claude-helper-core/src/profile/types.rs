//! Profile types

use crate::model::{CodeSettings, DesktopSettings, DocumentKind, McpConfig};

/// A named bundle of settings applied in one step
///
/// Each sub-document is overlaid onto the live file: only the fields a profile
/// sets are changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsProfile {
    pub name: String,
    pub description: String,
    pub desktop: Option<DesktopSettings>,
    pub code: Option<CodeSettings>,
    pub mcp: Option<McpConfig>,
}

impl SettingsProfile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            desktop: None,
            code: None,
            mcp: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: CodeSettings) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_mcp(mut self, mcp: McpConfig) -> Self {
        self.mcp = Some(mcp);
        self
    }

    #[must_use]
    pub fn with_desktop(mut self, desktop: DesktopSettings) -> Self {
        self.desktop = Some(desktop);
        self
    }

    /// Documents this profile touches, in document order
    #[must_use]
    pub fn targets(&self) -> Vec<DocumentKind> {
        let mut kinds = Vec::new();
        if self.desktop.is_some() {
            kinds.push(DocumentKind::Desktop);
        }
        if self.mcp.is_some() {
            kinds.push(DocumentKind::Mcp);
        }
        if self.code.is_some() {
            kinds.push(DocumentKind::Code);
        }
        kinds
    }
}

/// Options for applying a profile
#[derive(Debug, Clone, Copy)]
pub struct ApplyOptions {
    /// Create a `before_<profile>` backup first
    pub backup: bool,
    /// Compute the changes without writing anything
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            backup: true,
            dry_run: false,
        }
    }
}

/// Change to one document caused by a profile
#[derive(Debug, Clone)]
pub struct FileChange {
    pub kind: DocumentKind,
    pub path: std::path::PathBuf,
    /// Line diff of the serialized document; empty when nothing changes
    pub diff: String,
}

impl FileChange {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Result of applying a profile
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub profile: String,
    /// Name of the backup taken before writing
    pub backup: Option<String>,
    pub changes: Vec<FileChange>,
    pub dry_run: bool,
}
