//! MCP, env and hook operations against a sandboxed settings tree

use claude_helper_core::env;
use claude_helper_core::hooks;
use claude_helper_core::mcp::{McpOps, McpTarget};
use claude_helper_core::model::{HookMatcher, HookTrigger};
use claude_helper_core::{ConfigPaths, ErrorKind, HelperError, McpServer, SettingsManager};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sandbox() -> (TempDir, SettingsManager) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager = SettingsManager::new(ConfigPaths::sandboxed(dir.path()));
    (dir, manager)
}

fn hash_file(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fs::read(path).unwrap());
    hex::encode(hasher.finalize())
}

#[test]
fn test_add_demo_server_then_list() {
    let (_dir, manager) = sandbox();
    let ops = McpOps::new(&manager, McpTarget::Desktop);

    ops.add(
        "demo",
        McpServer::new("npx", vec!["-y".into(), "pkg".into()]),
        false,
    )
    .unwrap();

    let servers = ops.list().unwrap();
    assert_eq!(servers.len(), 1);
    let demo = &servers["demo"];
    assert_eq!(demo.command, "npx");
    assert_eq!(demo.args, vec!["-y", "pkg"]);
}

#[test]
fn test_duplicate_server_needs_force() {
    let (_dir, manager) = sandbox();
    let ops = McpOps::new(&manager, McpTarget::Code);
    ops.add("demo", McpServer::new("a", vec![]), false).unwrap();

    let err = ops
        .add("demo", McpServer::new("b", vec![]), false)
        .unwrap_err();
    assert!(matches!(err, HelperError::ServerExists { .. }));
    assert_eq!(ops.get("demo").unwrap().command, "a");

    ops.add("demo", McpServer::new("b", vec![]), true).unwrap();
    assert_eq!(ops.get("demo").unwrap().command, "b");

    // Desktop registry is a separate document
    assert!(McpOps::new(&manager, McpTarget::Desktop)
        .list()
        .unwrap()
        .is_empty());
}

#[test]
fn test_remove_unknown_server() {
    let (_dir, manager) = sandbox();
    let err = McpOps::new(&manager, McpTarget::Desktop)
        .remove("ghost")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!manager.paths().mcp_config.exists());
}

#[test]
fn test_delete_missing_env_key_leaves_file_unchanged() {
    let (_dir, manager) = sandbox();
    env::set(&manager, "ANTHROPIC_BASE_URL", "https://proxy.local").unwrap();
    let path = manager.paths().code_settings.clone();
    let before = hash_file(&path);

    let err = env::delete(&manager, "MISSING_KEY").unwrap_err();
    assert!(matches!(err, HelperError::EnvVarNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(hash_file(&path), before);
}

#[test]
fn test_env_set_get_delete() {
    let (_dir, manager) = sandbox();
    env::set(&manager, "B_VAR", "2").unwrap();
    env::set(&manager, "A_VAR", "1").unwrap();

    let keys: Vec<String> = env::list(&manager).unwrap().into_keys().collect();
    assert_eq!(keys, vec!["A_VAR", "B_VAR"]);
    assert_eq!(env::delete(&manager, "A_VAR").unwrap(), "1");
    assert!(env::get(&manager, "A_VAR").is_err());
    assert_eq!(env::get(&manager, "B_VAR").unwrap(), "2");
}

#[test]
fn test_env_masking() {
    assert_eq!(
        env::mask_value("ANTHROPIC_AUTH_TOKEN", "sk-ant-0123456789"),
        "sk-ant-012..."
    );
    assert_eq!(env::mask_value("MY_SECRET", "short"), "***");
    assert_eq!(env::mask_value("api_key", "abc"), "***");
    assert_eq!(
        env::mask_value("ANTHROPIC_BASE_URL", "https://proxy.local"),
        "https://proxy.local"
    );
}

#[test]
fn test_hooks_keep_other_settings() {
    let (_dir, manager) = sandbox();
    env::set(&manager, "FOO", "bar").unwrap();

    hooks::add(&manager, HookTrigger::Stop, HookMatcher::command("beep")).unwrap();
    hooks::add(
        &manager,
        HookTrigger::PostToolUse,
        HookMatcher::command("cargo fmt")
            .with_matcher("Edit|Write")
            .with_timeout(30),
    )
    .unwrap();

    let config = hooks::load(&manager).unwrap();
    let entries: Vec<_> = config.entries().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].event, "PostToolUse");
    assert_eq!(entries[0].matcher, Some("Edit|Write"));
    assert_eq!(entries[0].hook.timeout, Some(30));
    assert_eq!(env::get(&manager, "FOO").unwrap(), "bar");

    let err = hooks::remove(&manager, HookTrigger::Stop, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    let err = hooks::remove(&manager, HookTrigger::SessionStart, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
