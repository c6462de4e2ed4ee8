//! MCP server operations
//!
//! Servers live either in the Claude Desktop registry
//! (`claude_desktop_config.json`) or in the `mcpServers` map of the Claude
//! Code settings.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::{HelperError, HelperResult};
use crate::manager::SettingsManager;
use crate::model::{CodeSettings, DocumentKind, McpConfig, McpServer};
use crate::util::validate_name;

/// Which document holds the servers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum McpTarget {
    #[default]
    Desktop,
    Code,
}

impl McpTarget {
    #[must_use]
    pub fn document(&self) -> DocumentKind {
        match self {
            Self::Desktop => DocumentKind::Mcp,
            Self::Code => DocumentKind::Code,
        }
    }
}

impl fmt::Display for McpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.document().label())
    }
}

/// MCP operations manager
pub struct McpOps<'a> {
    manager: &'a SettingsManager,
    target: McpTarget,
}

impl<'a> McpOps<'a> {
    #[must_use]
    pub fn new(manager: &'a SettingsManager, target: McpTarget) -> Self {
        Self { manager, target }
    }

    /// File the servers are stored in
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.manager.path_of(self.target.document())
    }

    /// All servers, sorted by name
    ///
    /// # Errors
    /// Returns a parse error if the target file is malformed
    pub fn list(&self) -> HelperResult<BTreeMap<String, McpServer>> {
        match self.target {
            McpTarget::Desktop => Ok(self.manager.read::<McpConfig>()?.mcp_servers),
            McpTarget::Code => Ok(self
                .manager
                .read::<CodeSettings>()?
                .mcp_servers
                .unwrap_or_default()),
        }
    }

    /// A single server
    ///
    /// # Errors
    /// Returns `ServerNotFound` if the name is not registered
    pub fn get(&self, name: &str) -> HelperResult<McpServer> {
        self.list()?
            .remove(name)
            .ok_or_else(|| HelperError::ServerNotFound(name.to_string()))
    }

    /// Register a server. An existing name is only replaced with `force`.
    ///
    /// # Errors
    /// Returns a validation error for a bad name, `ServerExists` without
    /// `force`, or an I/O error when saving
    pub fn add(&self, name: &str, server: McpServer, force: bool) -> HelperResult<()> {
        validate_name(name)?;
        if server.command.trim().is_empty() {
            return Err(HelperError::Validation("command cannot be empty".into()));
        }

        self.update(|servers| {
            if servers.contains_key(name) && !force {
                return Err(HelperError::ServerExists {
                    name: name.to_string(),
                });
            }
            servers.insert(name.to_string(), server);
            Ok(())
        })?;
        tracing::info!(server = name, target = %self.target, "added MCP server");
        Ok(())
    }

    /// Unregister a server
    ///
    /// # Errors
    /// Returns `ServerNotFound` if the name is not registered
    pub fn remove(&self, name: &str) -> HelperResult<McpServer> {
        let mut removed = None;
        self.update(|servers| {
            removed = servers.remove(name);
            if removed.is_some() {
                Ok(())
            } else {
                Err(HelperError::ServerNotFound(name.to_string()))
            }
        })?;
        tracing::info!(server = name, target = %self.target, "removed MCP server");
        removed.ok_or_else(|| HelperError::ServerNotFound(name.to_string()))
    }

    /// Read, modify and write back the server map of the target document.
    /// Nothing is written when `f` fails.
    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, McpServer>) -> HelperResult<()>,
    ) -> HelperResult<()> {
        match self.target {
            McpTarget::Desktop => {
                let mut config: McpConfig = self.manager.read()?;
                f(&mut config.mcp_servers)?;
                self.manager.write(&config)
            }
            McpTarget::Code => {
                let mut settings: CodeSettings = self.manager.read()?;
                f(settings.mcp_servers_mut())?;
                self.manager.write(&settings)
            }
        }
    }
}

/// Parse a `KEY=VALUE` pair. The value may itself contain `=`.
///
/// # Errors
/// Returns a validation error if there is no `=` or the key is empty
pub fn parse_env_pair(pair: &str) -> HelperResult<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(HelperError::Validation(format!(
            "invalid environment variable '{pair}', expected KEY=VALUE"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ConfigPaths;
    use std::fs;
    use tempfile::TempDir;

    fn manager() -> (TempDir, SettingsManager) {
        let dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(ConfigPaths::sandboxed(dir.path()));
        (dir, manager)
    }

    fn demo() -> McpServer {
        McpServer::new("npx", vec!["-y".into(), "pkg".into()])
    }

    #[test]
    fn test_add_and_list_desktop() {
        let (_dir, manager) = manager();
        let ops = McpOps::new(&manager, McpTarget::Desktop);
        ops.add("demo", demo(), false).unwrap();

        let servers = ops.list().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers["demo"].args, vec!["-y", "pkg"]);
        assert!(manager.paths().mcp_config.is_file());
        assert!(!manager.paths().code_settings.exists());
    }

    #[test]
    fn test_add_to_code_settings() {
        let (_dir, manager) = manager();
        let ops = McpOps::new(&manager, McpTarget::Code);
        ops.add("demo", demo(), false).unwrap();

        let settings: CodeSettings = manager.read().unwrap();
        assert_eq!(settings.mcp_servers()["demo"].command, "npx");
    }

    #[test]
    fn test_add_existing_requires_force() {
        let (_dir, manager) = manager();
        let ops = McpOps::new(&manager, McpTarget::Desktop);
        ops.add("demo", demo(), false).unwrap();

        let err = ops
            .add("demo", McpServer::new("node", vec![]), false)
            .unwrap_err();
        assert!(matches!(err, HelperError::ServerExists { .. }));
        assert_eq!(ops.get("demo").unwrap().command, "npx");

        ops.add("demo", McpServer::new("node", vec![]), true).unwrap();
        assert_eq!(ops.get("demo").unwrap().command, "node");
    }

    #[test]
    fn test_remove_missing_leaves_file() {
        let (_dir, manager) = manager();
        let ops = McpOps::new(&manager, McpTarget::Desktop);
        ops.add("demo", demo(), false).unwrap();
        let before = fs::read(ops.path()).unwrap();

        assert!(matches!(
            ops.remove("ghost"),
            Err(HelperError::ServerNotFound(_))
        ));
        assert_eq!(fs::read(ops.path()).unwrap(), before);

        let removed = ops.remove("demo").unwrap();
        assert_eq!(removed.command, "npx");
        assert!(ops.list().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_names() {
        let (_dir, manager) = manager();
        let ops = McpOps::new(&manager, McpTarget::Desktop);
        assert!(ops.add("../x", demo(), false).is_err());
        assert!(ops.add("ok", McpServer::new(" ", vec![]), false).is_err());
    }

    #[test]
    fn test_parse_env_pair() {
        assert_eq!(
            parse_env_pair("TOKEN=a=b").unwrap(),
            ("TOKEN".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_env_pair("EMPTY=").unwrap().1, "");
        assert!(parse_env_pair("novalue").is_err());
        assert!(parse_env_pair("=x").is_err());
    }
}
