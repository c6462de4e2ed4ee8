//! claude-helper CLI - manage Claude Desktop and Claude Code settings
//!
//! Provides `claude-helper settings`, `mcp`, `backup`, `profile`, `hooks`,
//! `doctor`, `config`, `env` and the `setup` wizard.

mod commands;
mod prompt;

use std::io::{self, IsTerminal};

use clap::{ArgAction, Parser, Subcommand};
use claude_helper_core::{BackupStore, ErrorKind, HelperError, Platform, SettingsManager};
use tracing_subscriber::EnvFilter;

use commands::backup::BackupCommands;
use commands::config::ConfigCommands;
use commands::env::EnvCommands;
use commands::hooks::HooksCommands;
use commands::mcp::McpCommands;
use commands::profile::ProfileCommands;
use commands::settings::SettingsCommands;
use commands::setup::SetupArgs;
use commands::Context;
use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "CLAUDE_HELPER_LOG";

#[derive(Parser)]
#[command(name = "claude-helper")]
#[command(about = "Manage Claude Desktop and Claude Code settings")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Never wait on the terminal; read answers from stdin and use defaults
    #[arg(long, global = true)]
    no_input: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive setup wizard for Claude Code settings
    Setup(SetupArgs),
    /// Show and change Claude Code settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Manage MCP servers
    Mcp {
        #[command(subcommand)]
        action: McpCommands,
    },
    /// Back up and restore settings
    Backup {
        #[command(subcommand)]
        action: BackupCommands,
    },
    /// Apply preset settings profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Manage notification hooks
    Hooks {
        #[command(subcommand)]
        action: HooksCommands,
    },
    /// Diagnose configuration issues
    Doctor {
        /// Create missing directories
        #[arg(long)]
        fix: bool,
    },
    /// Manage the CLAUDE.md file in the current directory
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Manage environment variables passed to Claude Code
    Env {
        #[command(subcommand)]
        action: EnvCommands,
    },
    /// Show version and available commands
    Info,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `CLAUDE_HELPER_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Dispatch the command. `Ok(false)` means it ran but found problems.
fn run(cli: Cli) -> anyhow::Result<bool> {
    if matches!(cli.command, Commands::Info) {
        print_info();
        return Ok(true);
    }

    let manager = SettingsManager::from_process()?;
    let backups = BackupStore::new(manager.paths().clone());
    let prompter: Box<dyn Prompter> = if cli.no_input || !io::stdin().is_terminal() {
        Box::new(ScriptedPrompter::new(io::stdin().lock()))
    } else {
        Box::new(TerminalPrompter)
    };
    let mut ctx = Context {
        manager,
        backups,
        platform: Platform::current(),
        verbose: cli.verbose,
        prompter,
    };

    match cli.command {
        Commands::Setup(args) => commands::setup::execute(&args, &mut ctx)?,
        Commands::Settings { action } => commands::settings::execute(action, &mut ctx)?,
        Commands::Mcp { action } => commands::mcp::execute(action, &mut ctx)?,
        Commands::Backup { action } => commands::backup::execute(action, &mut ctx)?,
        Commands::Profile { action } => commands::profile::execute(action, &mut ctx)?,
        Commands::Hooks { action } => commands::hooks::execute(action, &mut ctx)?,
        Commands::Doctor { fix } => return commands::doctor::execute(fix, &ctx),
        Commands::Config { action } => commands::config::execute(action)?,
        Commands::Env { action } => commands::env::execute(action, &mut ctx)?,
        Commands::Info => print_info(),
    }
    Ok(true)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");

    let Some(helper) = err.downcast_ref::<HelperError>() else {
        return;
    };
    if helper.kind() != ErrorKind::ExternalToolFailure {
        return;
    }
    match helper {
        HelperError::ToolMissing { program, .. } => eprintln!(
            "Hint: make sure '{program}' is installed and on your PATH. \
             For the editor, set $EDITOR or $VISUAL."
        ),
        _ => eprintln!("Hint: run the command by hand to see its full output."),
    }
}

fn print_info() {
    println!("claude-helper v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Manage Claude Desktop and Claude Code settings quickly.");
    println!();
    println!("Commands:");
    for (name, about) in [
        ("setup", "Interactive setup wizard"),
        ("settings", "Manage Claude settings"),
        ("mcp", "Manage MCP servers"),
        ("backup", "Backup/restore settings"),
        ("profile", "Apply preset settings profiles"),
        ("hooks", "Manage notification hooks"),
        ("doctor", "Diagnose configuration issues"),
        ("config", "Manage CLAUDE.md file"),
        ("env", "Manage environment variables"),
    ] {
        println!("  {name:<10}{about}");
    }
}
