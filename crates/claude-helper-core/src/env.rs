//! Environment variables exported to Claude Code sessions
//!
//! Stored in the `env` map of the Claude Code settings.

use std::collections::BTreeMap;

use crate::error::{HelperError, HelperResult};
use crate::manager::SettingsManager;
use crate::model::CodeSettings;

/// Key fragments that mark a value as secret
const SENSITIVE_MARKERS: &[&str] = &["TOKEN", "SECRET", "KEY", "PASSWORD"];

/// Whether values of this key should be hidden in output
#[must_use]
pub fn is_sensitive(key: &str) -> bool {
    let upper = key.to_uppercase();
    SENSITIVE_MARKERS.iter().any(|m| upper.contains(m))
}

/// Value as it should be displayed: secrets keep their first ten characters
/// when longer than that, otherwise they are replaced entirely
#[must_use]
pub fn mask_value(key: &str, value: &str) -> String {
    if !is_sensitive(key) {
        return value.to_string();
    }
    if value.chars().count() > 10 {
        let prefix: String = value.chars().take(10).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}

/// Set a variable, replacing any previous value
///
/// # Errors
/// Returns a validation error for an empty key, or a read/write error
pub fn set(manager: &SettingsManager, key: &str, value: &str) -> HelperResult<()> {
    if key.trim().is_empty() {
        return Err(HelperError::Validation("variable name cannot be empty".into()));
    }
    let mut settings: CodeSettings = manager.read()?;
    settings.env_mut().insert(key.to_string(), value.to_string());
    manager.write(&settings)?;
    tracing::info!(key, "set environment variable");
    Ok(())
}

/// Value of a variable
///
/// # Errors
/// Returns `EnvVarNotFound` if the key is not set
pub fn get(manager: &SettingsManager, key: &str) -> HelperResult<String> {
    let settings: CodeSettings = manager.read()?;
    settings
        .env()
        .get(key)
        .cloned()
        .ok_or_else(|| HelperError::EnvVarNotFound(key.to_string()))
}

/// All variables, sorted by key
///
/// # Errors
/// Returns a parse error if the settings file is malformed
pub fn list(manager: &SettingsManager) -> HelperResult<BTreeMap<String, String>> {
    Ok(manager.read::<CodeSettings>()?.env.unwrap_or_default())
}

/// Check that a key exists without changing anything
///
/// # Errors
/// Returns `EnvVarNotFound` if the key is not set
pub fn ensure_exists(manager: &SettingsManager, key: &str) -> HelperResult<()> {
    get(manager, key).map(|_| ())
}

/// Delete a variable, returning its old value
///
/// # Errors
/// Returns `EnvVarNotFound` if the key is not set; the file is not touched
pub fn delete(manager: &SettingsManager, key: &str) -> HelperResult<String> {
    let mut settings: CodeSettings = manager.read()?;
    let removed = settings
        .env_mut()
        .remove(key)
        .ok_or_else(|| HelperError::EnvVarNotFound(key.to_string()))?;
    manager.write(&settings)?;
    tracing::info!(key, "deleted environment variable");
    Ok(removed)
}
