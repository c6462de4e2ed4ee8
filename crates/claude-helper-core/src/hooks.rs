//! Hook operations on the Claude Code settings

use crate::error::{HelperError, HelperResult};
use crate::manager::SettingsManager;
use crate::model::{CodeSettings, HookMatcher, HookTrigger, HooksConfig};

/// Configured hooks (empty when none)
///
/// # Errors
/// Returns a parse error if the settings file is malformed
pub fn load(manager: &SettingsManager) -> HelperResult<HooksConfig> {
    let settings: CodeSettings = manager.read()?;
    Ok(settings.hooks.unwrap_or_default())
}

/// Append a matcher group to an event
///
/// # Errors
/// Returns a validation error for a blank command, or a read/write error
pub fn add(manager: &SettingsManager, trigger: HookTrigger, group: HookMatcher) -> HelperResult<()> {
    if group
        .hooks
        .iter()
        .any(|h| h.command.as_deref().is_some_and(|c| c.trim().is_empty()))
    {
        return Err(HelperError::Validation("hook command cannot be empty".into()));
    }

    let mut settings: CodeSettings = manager.read()?;
    settings.hooks_mut().push(trigger, group);
    manager.write(&settings)?;
    tracing::info!(event = %trigger, "added hook");
    Ok(())
}

/// Remove the matcher group at `index`
///
/// # Errors
/// Returns `NoHooks` when the event has no hooks and `InvalidIndex` when the
/// index is out of range; the file is not touched in either case
pub fn remove(
    manager: &SettingsManager,
    trigger: HookTrigger,
    index: usize,
) -> HelperResult<HookMatcher> {
    let mut settings: CodeSettings = manager.read()?;
    let removed = settings.hooks_mut().remove(trigger, index)?;
    settings.prune_hooks();
    manager.write(&settings)?;
    tracing::info!(event = %trigger, index, "removed hook");
    Ok(removed)
}

/// Remove every group of an event, returning how many were removed. The
/// file is only written when something was removed.
///
/// # Errors
/// Returns a read/write error
pub fn clear(manager: &SettingsManager, trigger: HookTrigger) -> HelperResult<usize> {
    let mut settings: CodeSettings = manager.read()?;
    let count = settings.hooks.as_mut().map_or(0, |h| h.clear(trigger));
    if count > 0 {
        settings.prune_hooks();
        manager.write(&settings)?;
        tracing::info!(event = %trigger, count, "cleared hooks");
    }
    Ok(count)
}

/// First shell command registered for an event
///
/// # Errors
/// Returns a parse error if the settings file is malformed
pub fn first_command(manager: &SettingsManager, trigger: HookTrigger) -> HelperResult<Option<String>> {
    let hooks = load(manager)?;
    Ok(hooks
        .groups(trigger)
        .iter()
        .find_map(HookMatcher::first_command)
        .map(str::to_string))
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

    #[test]
    fn test_add_writes_canonical_layout() {
        let (_dir, manager) = manager();
        add(&manager, HookTrigger::Stop, HookMatcher::command("say done")).unwrap();

        let raw = manager
            .read_raw(crate::model::DocumentKind::Code)
            .unwrap();
        assert_eq!(
            raw["hooks"]["Stop"],
            serde_json::json!([{"hooks": [{"type": "command", "command": "say done"}]}])
        );
    }

    #[test]
    fn test_remove_out_of_range_leaves_file() {
        let (_dir, manager) = manager();
        add(&manager, HookTrigger::Stop, HookMatcher::command("a")).unwrap();
        let before = fs::read(&manager.paths().code_settings).unwrap();

        let err = remove(&manager, HookTrigger::Stop, 4).unwrap_err();
        assert_eq!(err.to_string(), "Invalid hook index 4. Valid range: 0-0");
        assert_eq!(fs::read(&manager.paths().code_settings).unwrap(), before);
    }

    #[test]
    fn test_remove_last_drops_hooks_key() {
        let (_dir, manager) = manager();
        add(&manager, HookTrigger::Stop, HookMatcher::command("a")).unwrap();
        remove(&manager, HookTrigger::Stop, 0).unwrap();

        let settings: CodeSettings = manager.read().unwrap();
        assert!(settings.hooks.is_none());
    }

    #[test]
    fn test_clear_only_touches_event() {
        let (_dir, manager) = manager();
        add(&manager, HookTrigger::Stop, HookMatcher::command("a")).unwrap();
        add(&manager, HookTrigger::Stop, HookMatcher::command("b")).unwrap();
        add(
            &manager,
            HookTrigger::PostToolUse,
            HookMatcher::command("fmt").with_matcher("Edit"),
        )
        .unwrap();

        assert_eq!(clear(&manager, HookTrigger::Stop).unwrap(), 2);
        assert_eq!(clear(&manager, HookTrigger::Stop).unwrap(), 0);
        let hooks = load(&manager).unwrap();
        assert_eq!(hooks.groups(HookTrigger::PostToolUse).len(), 1);
    }

    #[test]
    fn test_first_command() {
        let (_dir, manager) = manager();
        assert_eq!(first_command(&manager, HookTrigger::Stop).unwrap(), None);
        add(&manager, HookTrigger::Stop, HookMatcher::command("beep")).unwrap();
        assert_eq!(
            first_command(&manager, HookTrigger::Stop).unwrap().as_deref(),
            Some("beep")
        );
    }

    #[test]
    fn test_rejects_blank_command() {
        let (_dir, manager) = manager();
        assert!(add(&manager, HookTrigger::Stop, HookMatcher::command("  ")).is_err());
        assert!(!manager.paths().code_settings.exists());
    }
}
