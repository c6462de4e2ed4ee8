//! Error types for claude-helper operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for claude-helper operations
pub type HelperResult<T> = Result<T, HelperError>;

/// Broad classification used by the CLI to decide how to report an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A named backup, profile, setting key or server does not exist
    NotFound,
    /// Invalid JSON on disk or an invalid command-line argument
    MalformedInput,
    /// An editor or notification command is missing or failed
    ExternalToolFailure,
    /// Filesystem failure
    Io,
}

/// Errors that can occur while managing Claude configuration
#[derive(Debug, Error)]
pub enum HelperError {
    /// Backup directory does not exist
    #[error("Backup '{0}' not found")]
    BackupNotFound(String),

    /// No built-in profile with this name
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// Settings key not present in the document
    #[error("Setting '{0}' not found")]
    SettingNotFound(String),

    /// Environment variable not present in the `env` map
    #[error("Environment variable '{0}' not found")]
    EnvVarNotFound(String),

    /// MCP server not registered
    #[error("MCP server '{0}' not found")]
    ServerNotFound(String),

    /// No hooks configured for the requested event
    #[error("No {0} hooks configured")]
    NoHooks(String),

    /// MCP server already registered under this name
    #[error("MCP server '{name}' already exists (use --force to replace it)")]
    ServerExists { name: String },

    /// Hook index outside the configured range
    #[error("Invalid hook index {index}. Valid range: 0-{max}")]
    InvalidIndex { index: usize, max: usize },

    /// Notification preset not defined for this platform
    #[error("Preset '{preset}' not available on {platform}")]
    UnknownPreset { preset: String, platform: String },

    /// JSON parse error in a settings file
    #[error("Invalid JSON in {path}: {message}")]
    JsonParse { path: PathBuf, message: String },

    /// Validation error for names and argument values
    #[error("Validation error: {0}")]
    Validation(String),

    /// External command could not be started
    #[error("Command '{program}' not found: {message}")]
    ToolMissing { program: String, message: String },

    /// External command ran but exited unsuccessfully
    #[error("Command '{program}' exited with {status}")]
    ToolFailed { program: String, status: String },

    /// File I/O error
    #[error("I/O error for {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Home directory could not be determined
    #[error("Cannot find home directory")]
    NoHomeDir,
}

impl HelperError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Classify the error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BackupNotFound(_)
            | Self::ProfileNotFound(_)
            | Self::SettingNotFound(_)
            | Self::EnvVarNotFound(_)
            | Self::ServerNotFound(_)
            | Self::NoHooks(_) => ErrorKind::NotFound,
            Self::ServerExists { .. }
            | Self::InvalidIndex { .. }
            | Self::UnknownPreset { .. }
            | Self::JsonParse { .. }
            | Self::Validation(_) => ErrorKind::MalformedInput,
            Self::ToolMissing { .. } | Self::ToolFailed { .. } => ErrorKind::ExternalToolFailure,
            Self::Io { .. } | Self::NoHomeDir => ErrorKind::Io,
        }
    }

    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BackupNotFound(_) => "BACKUP_NOT_FOUND",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::SettingNotFound(_) => "SETTING_NOT_FOUND",
            Self::EnvVarNotFound(_) => "ENV_NOT_FOUND",
            Self::ServerNotFound(_) => "SERVER_NOT_FOUND",
            Self::NoHooks(_) => "NO_HOOKS",
            Self::ServerExists { .. } => "ITEM_EXISTS",
            Self::InvalidIndex { .. } => "INVALID_INDEX",
            Self::UnknownPreset { .. } => "UNKNOWN_PRESET",
            Self::JsonParse { .. } => "PARSE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ToolMissing { .. } => "TOOL_MISSING",
            Self::ToolFailed { .. } => "TOOL_FAILED",
            Self::Io { .. } | Self::NoHomeDir => "IO_ERROR",
        }
    }
}

impl From<std::io::Error> for HelperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}
