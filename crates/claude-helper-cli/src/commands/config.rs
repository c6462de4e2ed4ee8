//! CLAUDE.md CLI commands
//!
//! Handles: claude-helper config show/edit/add-rule

use std::path::PathBuf;

use clap::Subcommand;

use claude_helper_core::claude_md::{self, RuleInsertion, CLAUDE_MD_FILE};
use claude_helper_core::HelperError;

/// CLAUDE.md commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print CLAUDE.md from the current directory
    Show,
    /// Open CLAUDE.md in $EDITOR (created from a template if missing)
    Edit,
    /// Add a rule to the Rules section of CLAUDE.md
    AddRule {
        /// Rule text
        rule: String,
    },
}

fn current_file() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| HelperError::io(".", &e))?;
    Ok(claude_md::claude_md_path(&cwd))
}

/// Execute config command
pub fn execute(cmd: ConfigCommands) -> anyhow::Result<()> {
    let path = current_file()?;
    match cmd {
        ConfigCommands::Show => {
            if !path.exists() {
                println!("No {CLAUDE_MD_FILE} found in current directory.");
                println!("\nRun 'claude-helper config edit' to create one.");
                return Ok(());
            }
            let content =
                std::fs::read_to_string(&path).map_err(|e| HelperError::io(&path, &e))?;
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
        ConfigCommands::Edit => {
            if claude_md::ensure_exists(&path)? {
                println!("Created {CLAUDE_MD_FILE} with default template.");
            }
            let editor = claude_md::editor_from_env();
            println!("Opening with {editor}...");
            claude_md::open_in_editor(&editor, &path)?;
        }
        ConfigCommands::AddRule { rule } => {
            let message = match claude_md::add_rule(&path, &rule)? {
                RuleInsertion::Created => format!("Created {CLAUDE_MD_FILE} with rule."),
                RuleInsertion::InSection => format!("Rule added to {CLAUDE_MD_FILE}."),
                RuleInsertion::NewSection => "Added Rules section with new rule.".to_string(),
            };
            println!("{message}");
            println!("+ {}", rule.trim());
        }
    }
    Ok(())
}
