//! Backup CLI commands
//!
//! Handles: claude-helper backup create/list/show/restore/delete

use clap::Subcommand;
use serde_json::json;

use claude_helper_core::BackupInfo;

use super::{format_size, Context};

/// Backup commands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up the current settings files
    Create {
        /// Backup name (default: backup_YYYYMMDD_HHMMSS)
        name: Option<String>,
    },
    /// List backups
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the files stored in a backup
    Show {
        /// Backup name
        name: String,
    },
    /// Restore settings from a backup
    Restore {
        /// Backup name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a backup
    Delete {
        /// Backup name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute backup command
pub fn execute(cmd: BackupCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        BackupCommands::Create { name } => {
            let info = ctx.backups.create(name.as_deref())?;
            println!("Created backup '{}' at {}", info.name, info.path.display());
            if info.files.is_empty() {
                println!("  No settings files exist yet; the backup is empty.");
            }
            for file in &info.files {
                println!("  {} ({})", file.kind.label(), format_size(file.size));
            }
            Ok(())
        }
        BackupCommands::List { json } => execute_list(ctx, json),
        BackupCommands::Show { name } => {
            let info = ctx.backups.show(&name)?;
            print_details(&info);
            Ok(())
        }
        BackupCommands::Restore { name, yes } => {
            // Fail on unknown names before asking anything
            let info = ctx.backups.show(&name)?;
            print_details(&info);
            println!();

            if !ctx.confirm(&format!("Restore backup '{name}'?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }

            let restored = ctx.backups.restore(&name)?;
            println!("Restored backup '{name}':");
            for (kind, path) in restored {
                println!("  {} -> {}", kind.label(), path.display());
            }
            Ok(())
        }
        BackupCommands::Delete { name, yes } => {
            ctx.backups.show(&name)?;
            if !ctx.confirm(&format!("Delete backup '{name}'?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.backups.delete(&name)?;
            println!("Deleted backup '{name}'");
            Ok(())
        }
    }
}

fn modified(info: &BackupInfo) -> String {
    info.modified
        .map_or_else(|| "-".to_string(), |m| m.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn execute_list(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let backups = ctx.backups.list()?;

    if json_output {
        let items: Vec<serde_json::Value> = backups
            .iter()
            .map(|b| {
                json!({
                    "name": b.name,
                    "path": b.path.display().to_string(),
                    "modified": b.modified.map(|m| m.to_rfc3339()),
                    "files": b.files.iter().map(|f| f.kind.backup_file_name()).collect::<Vec<_>>(),
                    "size": b.total_size(),
                })
            })
            .collect();
        let output = json!({ "count": items.len(), "backups": items });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if backups.is_empty() {
        println!("No backups found.");
        return Ok(());
    }

    let width = backups.iter().map(|b| b.name.len()).max().unwrap_or(4).max(4);
    println!("{:<width$}  {:<19}  {:>5}  SIZE", "NAME", "MODIFIED", "FILES");
    for backup in &backups {
        println!(
            "{:<width$}  {:<19}  {:>5}  {}",
            backup.name,
            modified(backup),
            backup.files.len(),
            format_size(backup.total_size())
        );
    }
    println!("\nBackups are stored in {}", ctx.backups.root().display());
    Ok(())
}

fn print_details(info: &BackupInfo) {
    println!("Backup: {}", info.name);
    println!("Path: {}", info.path.display());
    println!("Modified: {}", modified(info));
    if info.files.is_empty() {
        println!("Files: none");
        return;
    }
    println!("Files:");
    for file in &info.files {
        println!(
            "  {:<28} {:>9}  sha256:{}",
            file.kind.backup_file_name(),
            format_size(file.size),
            &file.sha256[..12.min(file.sha256.len())]
        );
    }
}
