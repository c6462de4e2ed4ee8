//! Configuration path resolution
//!
//! Computes where Claude Desktop and Claude Code keep their settings. The
//! resolver is a pure function of the platform and an environment snapshot so
//! every platform can be exercised from any host.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{HelperError, HelperResult};

/// Desktop settings file name
pub const DESKTOP_SETTINGS_FILE: &str = "settings.json";
/// Desktop MCP registry file name
pub const MCP_CONFIG_FILE: &str = "claude_desktop_config.json";
/// Claude Code settings file name
pub const CODE_SETTINGS_FILE: &str = "settings.json";

/// Operating system family the paths are computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Platform of the running process. Unknown Unix flavours use Linux rules.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }

    /// Human readable name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Snapshot of the environment inputs used for path resolution
#[derive(Debug, Clone, Default)]
pub struct PathEnv {
    pub home: PathBuf,
    pub appdata: Option<String>,
    pub xdg_config_home: Option<String>,
    pub claude_config_dir: Option<String>,
}

impl PathEnv {
    /// Environment with only a home directory set
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            ..Self::default()
        }
    }

    /// Read the snapshot from the running process
    pub fn from_process() -> HelperResult<Self> {
        let home = dirs::home_dir().ok_or(HelperError::NoHomeDir)?;
        Ok(Self {
            home,
            appdata: std::env::var("APPDATA").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            claude_config_dir: std::env::var("CLAUDE_CONFIG_DIR").ok(),
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Resolved locations of every file the tool touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub platform: Platform,
    /// Claude Desktop configuration directory
    pub desktop_dir: PathBuf,
    /// Claude Code configuration directory (`~/.claude`)
    pub code_dir: PathBuf,
    pub desktop_settings: PathBuf,
    pub mcp_config: PathBuf,
    pub code_settings: PathBuf,
    pub backup_dir: PathBuf,
}

impl ConfigPaths {
    /// Resolve all paths for a platform
    #[must_use]
    pub fn resolve(platform: Platform, env: &PathEnv) -> Self {
        let desktop_dir = desktop_config_dir(platform, env);
        let code_dir = code_config_dir(env);
        Self {
            platform,
            desktop_settings: desktop_dir.join(DESKTOP_SETTINGS_FILE),
            mcp_config: desktop_dir.join(MCP_CONFIG_FILE),
            code_settings: code_dir.join(CODE_SETTINGS_FILE),
            backup_dir: code_dir.join("backups"),
            desktop_dir,
            code_dir,
        }
    }

    /// Resolve paths for the running process
    pub fn from_process() -> HelperResult<Self> {
        Ok(Self::resolve(Platform::current(), &PathEnv::from_process()?))
    }

    /// Paths rooted in a sandbox directory, laid out like Linux
    pub fn sandboxed(root: &Path) -> Self {
        let env = PathEnv {
            home: root.to_path_buf(),
            xdg_config_home: Some(root.join(".config").display().to_string()),
            ..PathEnv::default()
        };
        Self::resolve(Platform::Linux, &env)
    }
}

/// Claude Desktop configuration directory
#[must_use]
pub fn desktop_config_dir(platform: Platform, env: &PathEnv) -> PathBuf {
    match platform {
        Platform::Windows => {
            PathBuf::from(env.appdata.as_deref().unwrap_or_default()).join("Claude")
        }
        Platform::MacOs => env
            .home
            .join("Library")
            .join("Application Support")
            .join("Claude"),
        Platform::Linux => match non_empty(env.xdg_config_home.as_ref()) {
            Some(xdg) => PathBuf::from(xdg).join("Claude"),
            None => env.home.join(".config").join("Claude"),
        },
    }
}

/// Claude Code configuration directory, the same on every platform
#[must_use]
pub fn code_config_dir(env: &PathEnv) -> PathBuf {
    match non_empty(env.claude_config_dir.as_ref()) {
        Some(dir) => PathBuf::from(dir),
        None => env.home.join(".claude"),
    }
}
