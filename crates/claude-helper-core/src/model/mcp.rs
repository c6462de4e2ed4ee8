//! MCP server registry types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// MCP server configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    /// Command to execute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,

    /// Command arguments, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Keys we do not model (`type`, `url`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl McpServer {
    /// Create a new server definition
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            ..Self::default()
        }
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Get a display string for this server
    #[must_use]
    pub fn display(&self) -> String {
        if self.command.is_empty() {
            return self
                .extra
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
        }
        let args = self.args.join(" ");
        if args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {args}", self.command)
        }
    }
}

/// The `claude_desktop_config.json` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: BTreeMap<String, McpServer>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl McpConfig {
    /// Config holding the given servers
    #[must_use]
    pub fn with_servers(servers: impl IntoIterator<Item = (String, McpServer)>) -> Self {
        Self {
            mcp_servers: servers.into_iter().collect(),
            extra: Map::new(),
        }
    }

    /// Overlay another config: servers are added or replaced by name
    pub fn overlay(&mut self, other: &McpConfig) {
        for (name, server) in &other.mcp_servers {
            self.mcp_servers.insert(name.clone(), server.clone());
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server: McpServer = serde_json::from_str(r#"{"command": "npx"}"#).unwrap();
        assert_eq!(server.command, "npx");
        assert!(server.args.is_empty());
        assert!(server.env.is_empty());
    }

    #[test]
    fn test_server_keeps_unknown_keys() {
        let raw = r#"{"type": "http", "url": "https://mcp.example.com"}"#;
        let server: McpServer = serde_json::from_str(raw).unwrap();
        assert_eq!(server.display(), "https://mcp.example.com");

        let back = serde_json::to_value(&server).unwrap();
        assert_eq!(back["type"], "http");
        assert!(back.get("command").is_none());
    }

    #[test]
    fn test_overlay_replaces_by_name() {
        let mut base = McpConfig::with_servers([
            ("a".to_string(), McpServer::new("node", vec![])),
            ("b".to_string(), McpServer::new("python", vec![])),
        ]);
        let incoming = McpConfig::with_servers([(
            "a".to_string(),
            McpServer::new("npx", vec!["-y".into()]),
        )]);
        base.overlay(&incoming);

        assert_eq!(base.mcp_servers.len(), 2);
        assert_eq!(base.mcp_servers["a"].command, "npx");
        assert_eq!(base.mcp_servers["b"].command, "python");
    }

    #[test]
    fn test_with_env() {
        let server = McpServer::new("npx", vec![])
            .with_env("API_KEY", "secret")
            .with_env("DEBUG", "true");
        assert_eq!(server.env.get("API_KEY"), Some(&"secret".to_string()));
        assert_eq!(server.env.len(), 2);
    }
}
