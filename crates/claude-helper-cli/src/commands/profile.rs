//! Profile CLI commands
//!
//! Handles: claude-helper profile list/show/apply

use clap::Subcommand;

use claude_helper_core::profile::{self, ApplyOptions, ApplyReport};

use super::Context;

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List built-in profiles
    List,
    /// Show what a profile changes
    Show {
        /// Profile name
        name: String,
    },
    /// Apply a profile to the current settings
    Apply {
        /// Profile name
        name: String,
        /// Do not back up the settings first
        #[arg(long)]
        no_backup: bool,
        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
    },
}

/// Execute profile command
pub fn execute(cmd: ProfileCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        ProfileCommands::List => {
            let profiles = profile::builtin_profiles();
            let width = profiles.iter().map(|p| p.name.len()).max().unwrap_or(4);
            println!("Available profiles:\n");
            for p in profiles {
                println!("  {:<width$}  {}", p.name, p.description);
            }
            println!("\nApply with: claude-helper profile apply <NAME>");
            Ok(())
        }
        ProfileCommands::Show { name } => execute_show(&name),
        ProfileCommands::Apply {
            name,
            no_backup,
            dry_run,
        } => {
            let options = ApplyOptions {
                backup: !no_backup,
                dry_run,
            };
            let report = profile::apply(&ctx.manager, &ctx.backups, &name, options)?;
            print_report(&report);
            Ok(())
        }
    }
}

fn execute_show(name: &str) -> anyhow::Result<()> {
    let p = profile::get(name)?;
    println!("{}", p.name);
    println!("{}\n", p.description);

    if let Some(code) = &p.code {
        println!("Claude Code settings:");
        if let serde_json::Value::Object(fields) = serde_json::to_value(code)? {
            for (key, value) in fields {
                println!("  {key}: {value}");
            }
        }
    }
    if let Some(mcp) = &p.mcp {
        println!("MCP servers:");
        for (server, config) in &mcp.mcp_servers {
            println!("  {server}: {}", config.display());
            for (key, value) in &config.env {
                println!("    {key}={value}");
            }
        }
    }
    if let Some(desktop) = &p.desktop {
        println!("Claude Desktop settings:");
        println!("  {}", serde_json::to_string(desktop)?);
    }
    Ok(())
}

fn print_report(report: &ApplyReport) {
    if report.dry_run {
        println!("Dry run: profile '{}' would change:\n", report.profile);
        let mut any = false;
        for change in report.changes.iter().filter(|c| !c.is_unchanged()) {
            any = true;
            print!("{}", change.diff);
            println!();
        }
        if !any {
            println!("  Nothing; the settings already match.");
        }
        return;
    }

    if let Some(backup) = &report.backup {
        println!("Created backup: {backup}");
    }
    for change in &report.changes {
        let note = if change.is_unchanged() {
            "unchanged"
        } else {
            "updated"
        };
        println!("  {} {note} ({})", change.kind.label(), change.path.display());
    }
    println!("\nApplied profile '{}'", report.profile);
}
