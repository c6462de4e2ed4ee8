//! Settings profiles
//!
//! A fixed table of presets and the logic that overlays one onto the live
//! settings files.

mod builtin;
mod types;

use similar::TextDiff;

use crate::backup::BackupStore;
use crate::error::{HelperError, HelperResult};
use crate::manager::SettingsManager;
use crate::model::{CodeSettings, DesktopSettings, DocumentKind, McpConfig, SettingsDocument};
use crate::util::to_pretty_json;

pub use builtin::builtin_profiles;
pub use types::{ApplyOptions, ApplyReport, FileChange, SettingsProfile};

/// Look up a built-in profile
///
/// # Errors
/// Returns `ProfileNotFound` if no profile has this name
pub fn get(name: &str) -> HelperResult<&'static SettingsProfile> {
    builtin_profiles()
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| HelperError::ProfileNotFound(name.to_string()))
}

/// A merged document waiting to be written
enum Pending {
    Desktop(DesktopSettings),
    Mcp(McpConfig),
    Code(CodeSettings),
}

impl Pending {
    fn write(&self, manager: &SettingsManager) -> HelperResult<()> {
        match self {
            Self::Desktop(doc) => manager.write(doc),
            Self::Mcp(doc) => manager.write(doc),
            Self::Code(doc) => manager.write(doc),
        }
    }
}

fn merge<D: SettingsDocument>(
    manager: &SettingsManager,
    overlay: impl FnOnce(&mut D),
) -> HelperResult<(D, FileChange)> {
    let current: D = manager.read()?;
    let path = manager.path_of(D::KIND);
    let before = if path.is_file() {
        to_pretty_json(&current)?
    } else {
        String::new()
    };

    let mut merged = current;
    overlay(&mut merged);
    let after = to_pretty_json(&merged)?;

    let diff = if before == after {
        String::new()
    } else {
        let label = path.display().to_string();
        let old_label = if before.is_empty() { "/dev/null" } else { &label };
        generate_text_diff(&before, &after, old_label, &label)
    };
    Ok((merged, FileChange { kind: D::KIND, path, diff }))
}

/// Apply a profile to the live settings
///
/// Every target document is read and merged before the first write, so an
/// unreadable file aborts the whole operation with nothing changed.
///
/// # Errors
/// Returns `ProfileNotFound`, a parse error for a malformed live file, or an
/// I/O error while backing up or writing
pub fn apply(
    manager: &SettingsManager,
    backups: &BackupStore,
    name: &str,
    options: ApplyOptions,
) -> HelperResult<ApplyReport> {
    let profile = get(name)?;

    let mut pending = Vec::new();
    let mut changes = Vec::new();
    for kind in profile.targets() {
        let (doc, change) = match kind {
            DocumentKind::Desktop => {
                let overlay = profile.desktop.as_ref();
                let (doc, change) = merge(manager, |d: &mut DesktopSettings| {
                    if let Some(o) = overlay {
                        d.overlay(o);
                    }
                })?;
                (Pending::Desktop(doc), change)
            }
            DocumentKind::Mcp => {
                let overlay = profile.mcp.as_ref();
                let (doc, change) = merge(manager, |d: &mut McpConfig| {
                    if let Some(o) = overlay {
                        d.overlay(o);
                    }
                })?;
                (Pending::Mcp(doc), change)
            }
            DocumentKind::Code => {
                let overlay = profile.code.as_ref();
                let (doc, change) = merge(manager, |d: &mut CodeSettings| {
                    if let Some(o) = overlay {
                        d.overlay(o);
                    }
                })?;
                (Pending::Code(doc), change)
            }
        };
        pending.push(doc);
        changes.push(change);
    }

    if options.dry_run {
        return Ok(ApplyReport {
            profile: profile.name.clone(),
            backup: None,
            changes,
            dry_run: true,
        });
    }

    let backup = if options.backup {
        let info = backups.create(Some(&format!("before_{}", profile.name)))?;
        Some(info.name)
    } else {
        None
    };

    for doc in &pending {
        doc.write(manager)?;
    }
    tracing::info!(profile = %profile.name, files = pending.len(), "applied profile");

    Ok(ApplyReport {
        profile: profile.name.clone(),
        backup,
        changes,
        dry_run: false,
    })
}

/// Unified diff between two strings, with `@@` hunk headers and three lines
/// of context
#[must_use]
pub fn generate_text_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ConfigPaths;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SettingsManager, BackupStore) {
        let dir = TempDir::new().unwrap();
        let paths = ConfigPaths::sandboxed(dir.path());
        (
            dir,
            SettingsManager::new(paths.clone()),
            BackupStore::new(paths),
        )
    }

    #[test]
    fn test_builtin_order() {
        let names: Vec<_> = builtin_profiles().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["developer", "power-user", "filesystem-mcp", "github-mcp", "minimal"]
        );
    }

    #[test]
    fn test_get_unknown() {
        assert!(matches!(get("nope"), Err(HelperError::ProfileNotFound(_))));
    }

    #[test]
    fn test_apply_keeps_unrelated_settings() {
        let (_dir, manager, backups) = setup();
        let mut live = CodeSettings {
            model: Some("opus".into()),
            ..CodeSettings::default()
        };
        live.env_mut().insert("KEEP".into(), "1".into());
        manager.write(&live).unwrap();

        let report = apply(&manager, &backups, "power-user", ApplyOptions::default()).unwrap();
        assert_eq!(report.backup.as_deref(), Some("before_power-user"));

        let after: CodeSettings = manager.read().unwrap();
        assert!(after.auto_approve_read());
        assert!(after.auto_approve_write());
        assert!(!after.auto_approve_bash());
        assert_eq!(after.model.as_deref(), Some("opus"));
        assert_eq!(after.env()["KEEP"], "1");
    }

    #[test]
    fn test_apply_backup_holds_previous_state() {
        let (_dir, manager, backups) = setup();
        let mut live = CodeSettings::default();
        live.set_approvals(true, true, true, true);
        manager.write(&live).unwrap();
        let original = fs::read(&manager.paths().code_settings).unwrap();

        apply(&manager, &backups, "minimal", ApplyOptions::default()).unwrap();
        let info = backups.show("before_minimal").unwrap();
        let saved = fs::read(info.path.join("claude_code_settings.json")).unwrap();
        assert_eq!(saved, original);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, manager, backups) = setup();

        let report = apply(
            &manager,
            &backups,
            "github-mcp",
            ApplyOptions {
                backup: true,
                dry_run: true,
            },
        )
        .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.changes.len(), 1);
        assert!(report.changes[0].diff.contains("+  \"mcpServers\": {"));
        assert!(!manager.paths().mcp_config.exists());
        assert!(backups.list().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_target_aborts_before_writing() {
        let (_dir, manager, backups) = setup();
        let path = manager.paths().code_settings.clone();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{broken").unwrap();

        let err = apply(&manager, &backups, "developer", ApplyOptions::default()).unwrap_err();
        assert!(matches!(err, HelperError::JsonParse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{broken");
        assert!(backups.list().unwrap().is_empty());
    }

    #[test]
    fn test_text_diff() {
        let diff = generate_text_diff("a\nb\nc\n", "a\nx\nc\n", "old.json", "new.json");
        assert_eq!(
            diff,
            "--- old.json\n+++ new.json\n@@ -1,3 +1,3 @@\n a\n-b\n+x\n c\n"
        );
    }

    #[test]
    fn test_text_diff_limits_context() {
        let old: String = (1..=20).map(|i| format!("line {i}\n")).collect();
        let new = old.replace("line 10\n", "line ten\n");
        let diff = generate_text_diff(&old, &new, "a", "b");

        assert!(diff.contains("@@ -7,7 +7,7 @@"));
        assert!(diff.contains("-line 10\n+line ten\n"));
        assert!(!diff.contains("line 1\n"));
        assert!(!diff.contains("line 20"));
    }
}
