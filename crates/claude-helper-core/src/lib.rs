//! claude-helper core - settings model, backups, profiles and diagnostics
//!
//! This crate reads and writes the JSON configuration of Claude Desktop and
//! Claude Code, and provides the operations behind the `claude-helper` CLI.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod backup;
pub mod claude_md;
pub mod doctor;
pub mod env;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod mcp;
pub mod model;
pub mod notify;
pub mod paths;
pub mod profile;
pub mod util;

pub use backup::{BackupInfo, BackupStore};
pub use error::{ErrorKind, HelperError, HelperResult};
pub use manager::SettingsManager;
pub use model::{CodeSettings, DesktopSettings, DocumentKind, McpConfig, McpServer};
pub use paths::{ConfigPaths, Platform};
pub use profile::SettingsProfile;
