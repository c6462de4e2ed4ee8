//! Settings document model
//!
//! Each document is a struct of the fields claude-helper understands plus a
//! flattened map holding every other key, so files written by newer Claude
//! releases survive a read/modify/write cycle untouched.

mod hooks;
mod mcp;
mod settings;

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::paths::ConfigPaths;

pub use hooks::{HookCommand, HookEntry, HookMatcher, HookTrigger, HooksConfig};
pub use mcp::{McpConfig, McpServer};
pub use settings::{CodeSettings, DesktopSettings};

/// The three JSON documents managed by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Claude Desktop `settings.json`
    Desktop,
    /// Claude Desktop `claude_desktop_config.json` (MCP registry)
    Mcp,
    /// Claude Code `~/.claude/settings.json`
    Code,
}

impl DocumentKind {
    /// All kinds, in display order
    #[must_use]
    pub fn all() -> &'static [DocumentKind] {
        &[Self::Desktop, Self::Mcp, Self::Code]
    }

    /// Location of the live document
    #[must_use]
    pub fn path(&self, paths: &ConfigPaths) -> PathBuf {
        match self {
            Self::Desktop => paths.desktop_settings.clone(),
            Self::Mcp => paths.mcp_config.clone(),
            Self::Code => paths.code_settings.clone(),
        }
    }

    /// File name used inside a backup directory
    #[must_use]
    pub fn backup_file_name(&self) -> &'static str {
        match self {
            Self::Desktop => "settings.json",
            Self::Mcp => "claude_desktop_config.json",
            Self::Code => "claude_code_settings.json",
        }
    }

    /// Human readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Desktop => "Claude Desktop",
            Self::Mcp => "MCP Config",
            Self::Code => "Claude Code",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed settings document stored at a well-known path
pub trait SettingsDocument: Serialize + DeserializeOwned + Default {
    /// Which file this document lives in
    const KIND: DocumentKind;
}

impl SettingsDocument for DesktopSettings {
    const KIND: DocumentKind = DocumentKind::Desktop;
}

impl SettingsDocument for McpConfig {
    const KIND: DocumentKind = DocumentKind::Mcp;
}

impl SettingsDocument for CodeSettings {
    const KIND: DocumentKind = DocumentKind::Code;
}
