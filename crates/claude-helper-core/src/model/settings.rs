//! Claude Desktop and Claude Code settings documents

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::hooks::HooksConfig;
use super::mcp::McpServer;
use crate::error::{HelperError, HelperResult};

/// Claude Desktop `settings.json`
///
/// Known fields are optional so that writing never adds keys the user did not
/// have; the accessors apply the application defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DesktopSettings {
    #[must_use]
    pub fn theme(&self) -> &str {
        self.theme.as_deref().unwrap_or("system")
    }

    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size.unwrap_or(14)
    }

    #[must_use]
    pub fn auto_update(&self) -> bool {
        self.auto_update.unwrap_or(true)
    }

    /// Overlay the fields set in `other` onto this document
    pub fn overlay(&mut self, other: &DesktopSettings) {
        if other.theme.is_some() {
            self.theme.clone_from(&other.theme);
        }
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.auto_update.is_some() {
            self.auto_update = other.auto_update;
        }
        merge_extra(&mut self.extra, &other.extra);
    }
}

/// Claude Code CLI `settings.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_tools: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_all: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_read: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_write: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_bash: Option<bool>,

    /// Default model alias (`sonnet`, `opus`, `haiku`) or full model id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variables exported to Claude Code sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<BTreeMap<String, McpServer>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HooksConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

static NO_ENV: BTreeMap<String, String> = BTreeMap::new();
static NO_SERVERS: BTreeMap<String, McpServer> = BTreeMap::new();

/// Value reported for a known key that is absent from the file
fn known_default(key: &str) -> Option<Value> {
    match key {
        "autoApproveAll" | "autoApproveRead" | "autoApproveWrite" | "autoApproveBash" => {
            Some(Value::Bool(false))
        }
        "allowedTools" | "deniedTools" => Some(Value::Array(Vec::new())),
        "env" | "mcpServers" | "hooks" => Some(Value::Object(Map::new())),
        _ => None,
    }
}

impl CodeSettings {
    /// Environment variables, empty when the file has none
    #[must_use]
    pub fn env(&self) -> &BTreeMap<String, String> {
        self.env.as_ref().unwrap_or(&NO_ENV)
    }

    /// Environment map, created on demand
    pub fn env_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.env.get_or_insert_with(BTreeMap::new)
    }

    /// MCP servers, empty when the file has none
    #[must_use]
    pub fn mcp_servers(&self) -> &BTreeMap<String, McpServer> {
        self.mcp_servers.as_ref().unwrap_or(&NO_SERVERS)
    }

    /// MCP server map, created on demand
    pub fn mcp_servers_mut(&mut self) -> &mut BTreeMap<String, McpServer> {
        self.mcp_servers.get_or_insert_with(BTreeMap::new)
    }

    #[must_use]
    pub fn auto_approve_all(&self) -> bool {
        self.auto_approve_all.unwrap_or(false)
    }

    #[must_use]
    pub fn auto_approve_read(&self) -> bool {
        self.auto_approve_read.unwrap_or(false)
    }

    #[must_use]
    pub fn auto_approve_write(&self) -> bool {
        self.auto_approve_write.unwrap_or(false)
    }

    #[must_use]
    pub fn auto_approve_bash(&self) -> bool {
        self.auto_approve_bash.unwrap_or(false)
    }

    /// Set all four auto-approve flags explicitly
    pub fn set_approvals(&mut self, all: bool, read: bool, write: bool, bash: bool) {
        self.auto_approve_all = Some(all);
        self.auto_approve_read = Some(read);
        self.auto_approve_write = Some(write);
        self.auto_approve_bash = Some(bash);
    }

    /// Short names of the enabled auto-approvals (`all` hides the rest)
    #[must_use]
    pub fn approvals(&self) -> Vec<&'static str> {
        if self.auto_approve_all() {
            return vec!["all"];
        }
        let mut enabled = Vec::new();
        if self.auto_approve_read() {
            enabled.push("read");
        }
        if self.auto_approve_write() {
            enabled.push("write");
        }
        if self.auto_approve_bash() {
            enabled.push("bash");
        }
        enabled
    }

    /// Whether the document carries no settings at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Hooks section, created on demand
    pub fn hooks_mut(&mut self) -> &mut HooksConfig {
        self.hooks.get_or_insert_with(HooksConfig::default)
    }

    /// Drop the hooks section once it holds no events
    pub fn prune_hooks(&mut self) {
        if self.hooks.as_ref().is_some_and(HooksConfig::is_empty) {
            self.hooks = None;
        }
    }

    /// Overlay the fields set in `other` onto this document
    ///
    /// Set optional fields replace, non-empty lists replace, maps merge by key.
    pub fn overlay(&mut self, other: &CodeSettings) {
        if let Some(tools) = other.allowed_tools.as_ref().filter(|t| !t.is_empty()) {
            self.allowed_tools = Some(tools.clone());
        }
        if let Some(tools) = other.denied_tools.as_ref().filter(|t| !t.is_empty()) {
            self.denied_tools = Some(tools.clone());
        }
        for (target, source) in [
            (&mut self.auto_approve_all, other.auto_approve_all),
            (&mut self.auto_approve_read, other.auto_approve_read),
            (&mut self.auto_approve_write, other.auto_approve_write),
            (&mut self.auto_approve_bash, other.auto_approve_bash),
        ] {
            if source.is_some() {
                *target = source;
            }
        }
        if other.model.is_some() {
            self.model.clone_from(&other.model);
        }
        for (key, value) in other.env() {
            self.env_mut().insert(key.clone(), value.clone());
        }
        for (name, server) in other.mcp_servers() {
            self.mcp_servers_mut().insert(name.clone(), server.clone());
        }
        if let Some(hooks) = &other.hooks {
            self.hooks_mut().extend(hooks);
        }
        merge_extra(&mut self.extra, &other.extra);
    }

    /// Look up a top-level key, known or not. Known keys missing from the
    /// file report their default.
    pub fn get_key(&self, key: &str) -> HelperResult<Value> {
        let doc = self.to_object()?;
        doc.get(key)
            .cloned()
            .or_else(|| known_default(key))
            .ok_or_else(|| HelperError::SettingNotFound(key.to_string()))
    }

    /// Set a top-level key; the result must still be a valid document
    pub fn set_key(&mut self, key: &str, value: Value) -> HelperResult<()> {
        let mut doc = self.to_object()?;
        doc.insert(key.to_string(), value);
        *self = Self::from_object(key, doc)?;
        Ok(())
    }

    /// Remove a top-level key
    pub fn unset_key(&mut self, key: &str) -> HelperResult<Value> {
        let mut doc = self.to_object()?;
        let removed = doc
            .remove(key)
            .ok_or_else(|| HelperError::SettingNotFound(key.to_string()))?;
        *self = Self::from_object(key, doc)?;
        Ok(removed)
    }

    fn to_object(&self) -> HelperResult<Map<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Ok(Map::new()),
            Err(e) => Err(HelperError::Validation(e.to_string())),
        }
    }

    fn from_object(key: &str, doc: Map<String, Value>) -> HelperResult<Self> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| HelperError::Validation(format!("invalid value for '{key}': {e}")))
    }
}

fn merge_extra(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}
