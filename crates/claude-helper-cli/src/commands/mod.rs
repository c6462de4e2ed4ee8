//! CLI command handlers
//!
//! One module per command group. Each exposes a clap `Subcommand` enum and
//! an `execute` function taking the shared [`Context`].

pub mod backup;
pub mod config;
pub mod doctor;
pub mod env;
pub mod hooks;
pub mod mcp;
pub mod profile;
pub mod settings;
pub mod setup;

use claude_helper_core::{BackupStore, Platform, SettingsManager};

use crate::prompt::Prompter;

/// State shared by every command of one invocation
pub struct Context {
    pub manager: SettingsManager,
    pub backups: BackupStore,
    pub platform: Platform,
    pub verbose: u8,
    pub prompter: Box<dyn Prompter>,
}

impl Context {
    /// Ask before a destructive action; `yes` skips the question
    pub fn confirm(&mut self, message: &str, yes: bool) -> std::io::Result<bool> {
        if yes {
            return Ok(true);
        }
        self.prompter.confirm(message, false)
    }
}

/// Human readable byte count
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
