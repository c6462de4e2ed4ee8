//! Environment variable CLI commands
//!
//! Handles: claude-helper env set/get/list/delete

use clap::Subcommand;

use claude_helper_core::env::{self, mask_value};

use super::Context;

/// Environment variable commands
#[derive(Subcommand)]
pub enum EnvCommands {
    /// Set an environment variable
    ///
    /// Example: claude-helper env set ANTHROPIC_BASE_URL https://api.custom.com
    Set {
        /// Variable name
        key: String,
        /// Value
        value: String,
    },
    /// Print an environment variable (secrets are masked)
    Get {
        /// Variable name
        key: String,
    },
    /// List environment variables
    List,
    /// Delete an environment variable
    Delete {
        /// Variable name
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute env command
pub fn execute(cmd: EnvCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        EnvCommands::Set { key, value } => {
            env::set(&ctx.manager, &key, &value)?;
            println!("Set {key} = {}", mask_value(&key, &value));
        }
        EnvCommands::Get { key } => {
            let value = env::get(&ctx.manager, &key)?;
            println!("{key} = {}", mask_value(&key, &value));
        }
        EnvCommands::List => {
            let vars = env::list(&ctx.manager)?;
            if vars.is_empty() {
                println!("No environment variables configured.");
                return Ok(());
            }
            let width = vars.keys().map(String::len).max().unwrap_or(3).max(3);
            println!("{:<width$}  VALUE", "KEY");
            for (key, value) in &vars {
                println!("{key:<width$}  {}", mask_value(key, value));
            }
        }
        EnvCommands::Delete { key, yes } => {
            env::ensure_exists(&ctx.manager, &key)?;
            if !ctx.confirm(&format!("Delete environment variable '{key}'?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            env::delete(&ctx.manager, &key)?;
            println!("Deleted environment variable '{key}'");
        }
    }
    Ok(())
}
