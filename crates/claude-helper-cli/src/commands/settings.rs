//! Settings CLI commands
//!
//! Handles: claude-helper settings show/get/set/unset

use clap::Subcommand;
use serde_json::Value;

use claude_helper_core::{CodeSettings, HelperError, HelperResult};

use super::Context;

/// Settings commands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the configuration file locations
    Show,
    /// Print a Claude Code setting
    Get {
        /// Setting name (e.g. model, autoApproveRead)
        key: String,
    },
    /// Change a Claude Code setting
    Set {
        /// Setting name
        key: String,
        /// New value; `true`/`false` are stored as booleans
        value: String,
        /// Parse VALUE as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a Claude Code setting
    Unset {
        /// Setting name
        key: String,
    },
}

/// Execute settings command
pub fn execute(cmd: SettingsCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        SettingsCommands::Show => execute_show(ctx),
        SettingsCommands::Get { key } => execute_get(ctx, &key),
        SettingsCommands::Set { key, value, json } => execute_set(ctx, &key, &value, json),
        SettingsCommands::Unset { key } => execute_unset(ctx, &key),
    }
}

/// Interpret a command-line value
fn parse_value(raw: &str, json: bool) -> HelperResult<Value> {
    if json {
        return serde_json::from_str(raw)
            .map_err(|e| HelperError::Validation(format!("invalid JSON value '{raw}': {e}")));
    }
    Ok(match raw.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    })
}

fn render(value: &Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn execute_show(ctx: &Context) -> anyhow::Result<()> {
    println!("Claude settings paths:\n");
    println!("  {:<16} {:<7} PATH", "TYPE", "EXISTS");
    for status in ctx.manager.file_status() {
        let exists = if status.exists { "yes" } else { "no" };
        println!(
            "  {:<16} {:<7} {}",
            status.kind.label(),
            exists,
            status.path.display()
        );
    }
    Ok(())
}

fn execute_get(ctx: &Context, key: &str) -> anyhow::Result<()> {
    let settings: CodeSettings = ctx.manager.read()?;
    let value = settings.get_key(key)?;
    println!("{key} = {}", render(&value)?);
    Ok(())
}

fn execute_set(ctx: &Context, key: &str, raw: &str, json: bool) -> anyhow::Result<()> {
    let value = parse_value(raw, json)?;
    let mut settings: CodeSettings = ctx.manager.read()?;
    settings.set_key(key, value.clone())?;
    ctx.manager.write(&settings)?;
    println!("Set {key} = {}", render(&value)?);
    Ok(())
}

fn execute_unset(ctx: &Context, key: &str) -> anyhow::Result<()> {
    let mut settings: CodeSettings = ctx.manager.read()?;
    let old = settings.unset_key(key)?;
    ctx.manager.write(&settings)?;
    println!("Removed {key} (was {})", render(&old)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true", false).unwrap(), Value::Bool(true));
        assert_eq!(parse_value("FALSE", false).unwrap(), Value::Bool(false));
        assert_eq!(
            parse_value("opus", false).unwrap(),
            Value::String("opus".into())
        );
        assert_eq!(
            parse_value(r#"["Read"]"#, true).unwrap(),
            serde_json::json!(["Read"])
        );
        assert!(parse_value("{oops", true).is_err());
    }
}
