//! Hook CLI commands
//!
//! Handles: claude-helper hooks list/add/remove/remove-all/clear/presets/sounds/test
//!
//! Hooks default to the Stop event, which fires when Claude finishes
//! responding, so they are mostly used for "task done" notifications.

use clap::{Args, Subcommand};

use claude_helper_core::hooks;
use claude_helper_core::model::{HookMatcher, HookTrigger};
use claude_helper_core::notify::{self, VOLUME_LEVELS};
use claude_helper_core::Platform;

use super::Context;

/// Hook commands
#[derive(Subcommand)]
pub enum HooksCommands {
    /// List configured hooks
    List {
        /// Only show one event (e.g. Stop, PostToolUse)
        #[arg(long)]
        event: Option<HookTrigger>,
    },
    /// Add a hook (interactive when neither --command nor --preset is given)
    Add(HookAddArgs),
    /// Remove a hook by index (see `hooks list`)
    Remove {
        /// Index of the hook group
        index: usize,
        /// Event the hook belongs to
        #[arg(long, default_value = "Stop")]
        event: HookTrigger,
    },
    /// Remove every hook of an event without confirmation
    RemoveAll {
        /// Event to clear
        #[arg(long, default_value = "Stop")]
        event: HookTrigger,
    },
    /// Remove every hook of an event
    Clear {
        /// Event to clear
        #[arg(long, default_value = "Stop")]
        event: HookTrigger,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show notification presets for this platform
    Presets,
    /// Browse Windows system sounds and add one as a hook (Windows only)
    Sounds,
    /// Run a notification command to check that it works
    Test {
        /// Preset to run (default: first Stop hook, else beep)
        #[arg(short, long)]
        preset: Option<String>,
    },
}

/// Arguments for `claude-helper hooks add`
#[derive(Args)]
pub struct HookAddArgs {
    /// Shell command to run
    #[arg(short, long, conflicts_with = "preset")]
    pub command: Option<String>,

    /// Notification preset (beep, toast, sound)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Event that triggers the hook
    #[arg(long, default_value = "Stop")]
    pub event: HookTrigger,

    /// Tool name pattern (PreToolUse/PostToolUse only)
    #[arg(long)]
    pub matcher: Option<String>,

    /// Timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Execute hooks command
pub fn execute(cmd: HooksCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        HooksCommands::List { event } => execute_list(ctx, event),
        HooksCommands::Add(args) => execute_add(ctx, args),
        HooksCommands::Remove { index, event } => {
            let removed = hooks::remove(&ctx.manager, event, index)?;
            println!("Removed {event} hook #{index}:");
            for hook in &removed.hooks {
                println!("  Command: {}", hook.display());
            }
            Ok(())
        }
        HooksCommands::RemoveAll { event } => {
            let count = hooks::clear(&ctx.manager, event)?;
            if count == 0 {
                println!("No {event} hooks to remove.");
            } else {
                println!("Removed {count} hook(s).");
            }
            Ok(())
        }
        HooksCommands::Clear { event, yes } => {
            if hooks::load(&ctx.manager)?.groups(event).is_empty() {
                println!("No {event} hooks to clear.");
                return Ok(());
            }
            if !ctx.confirm(&format!("Remove all {event} hooks?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let count = hooks::clear(&ctx.manager, event)?;
            println!("Cleared {count} {event} hook(s).");
            Ok(())
        }
        HooksCommands::Presets => {
            execute_presets(ctx.platform);
            Ok(())
        }
        HooksCommands::Sounds => execute_sounds(ctx),
        HooksCommands::Test { preset } => execute_test(ctx, preset.as_deref()),
    }
}

fn execute_list(ctx: &Context, event: Option<HookTrigger>) -> anyhow::Result<()> {
    let config = hooks::load(&ctx.manager)?;
    let entries: Vec<_> = config
        .entries()
        .filter(|e| event.map_or(true, |t| e.event == t.as_str()))
        .collect();

    if entries.is_empty() {
        match event {
            Some(t) => println!("No {t} hooks configured."),
            None => println!("No hooks configured."),
        }
        println!("\nUse 'claude-helper hooks add' to add a notification hook.");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.event.len()).max().unwrap_or(5).max(5);
    println!("{:<3} {:<width$}  {:<10} COMMAND", "#", "EVENT", "MATCHER");
    for entry in &entries {
        let mut command = entry.hook.display();
        if let Some(timeout) = entry.hook.timeout {
            command.push_str(&format!(" (timeout {timeout}s)"));
        }
        println!(
            "{:<3} {:<width$}  {:<10} {command}",
            entry.group,
            entry.event,
            entry.matcher.unwrap_or("*"),
        );
    }
    Ok(())
}

fn execute_add(ctx: &mut Context, args: HookAddArgs) -> anyhow::Result<()> {
    let command = match (args.command, args.preset) {
        (Some(command), _) => command,
        (None, Some(preset)) => notify::preset_command(ctx.platform, &preset)?.to_string(),
        (None, None) => match select_command(ctx)? {
            Some(command) => command,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    if args.matcher.is_some() && !args.event.uses_matcher() {
        println!("Note: {} hooks ignore the matcher.", args.event);
    }

    let mut group = HookMatcher::command(command.clone());
    if let Some(matcher) = args.matcher {
        group = group.with_matcher(matcher);
    }
    if let Some(timeout) = args.timeout {
        group = group.with_timeout(timeout);
    }

    hooks::add(&ctx.manager, args.event, group)?;
    println!("Added {} hook:", args.event);
    println!("  Command: {command}");
    Ok(())
}

/// Ask for a preset, a Windows sound or a custom command
fn select_command(ctx: &mut Context) -> anyhow::Result<Option<String>> {
    const BROWSE: &str = "Browse Windows sounds...";
    const CUSTOM: &str = "Custom command...";

    let presets = notify::presets(ctx.platform);
    let mut options: Vec<&str> = presets.iter().map(|p| p.label).collect();
    if ctx.platform == Platform::Windows {
        options.push(BROWSE);
    }
    options.push(CUSTOM);

    let Some(choice) = ctx
        .prompter
        .select("Select notification type:", &options, 0)?
    else {
        return Ok(None);
    };

    if let Some(preset) = presets.get(choice) {
        return Ok(Some(preset.command.to_string()));
    }
    if options[choice] == BROWSE {
        return select_sound(ctx);
    }

    let custom = ctx.prompter.input("Enter custom command", None)?;
    Ok(custom.filter(|c| !c.trim().is_empty()))
}

/// Pick a Windows sound and volume, play it once and return its command
fn select_sound(ctx: &mut Context) -> anyhow::Result<Option<String>> {
    let sounds = notify::windows_sounds();
    if sounds.is_empty() {
        println!("No sound files found in {}", notify::WINDOWS_MEDIA_DIR);
        return Ok(None);
    }

    let names: Vec<&str> = sounds.iter().map(String::as_str).collect();
    let Some(sound) = ctx.prompter.select("Select a sound file:", &names, 0)? else {
        return Ok(None);
    };

    let labels: Vec<&str> = VOLUME_LEVELS.iter().map(|(_, label)| *label).collect();
    let Some(level) = ctx.prompter.select("Select volume level:", &labels, 0)? else {
        return Ok(None);
    };
    let volume = VOLUME_LEVELS[level].0;

    let command = notify::build_sound_command(&sounds[sound], volume);
    println!("Playing: {} at {volume}% volume", sounds[sound]);
    notify::run_shell(ctx.platform, &command)?;
    Ok(Some(command))
}

fn execute_presets(platform: Platform) {
    println!("Available presets for {}:\n", platform.display_name());
    for preset in notify::presets(platform) {
        println!("  {:<6} {}", preset.name, preset.command);
    }
    println!("\nUse 'claude-helper hooks add -p <PRESET>' to add one.");
}

fn execute_sounds(ctx: &mut Context) -> anyhow::Result<()> {
    if ctx.platform != Platform::Windows {
        println!("This command is only available on Windows.");
        return Ok(());
    }

    let Some(command) = select_sound(ctx)? else {
        println!("Cancelled.");
        return Ok(());
    };

    if !ctx.prompter.confirm("Add this sound as notification hook?", true)? {
        println!("Sound not added.");
        return Ok(());
    }
    hooks::add(&ctx.manager, HookTrigger::Stop, HookMatcher::command(command))?;
    println!("Added Stop hook with the selected sound.");
    Ok(())
}

fn execute_test(ctx: &Context, preset: Option<&str>) -> anyhow::Result<()> {
    let command = if let Some(name) = preset {
        notify::preset_command(ctx.platform, name)?.to_string()
    } else if let Some(command) = hooks::first_command(&ctx.manager, HookTrigger::Stop)? {
        println!("Testing first configured Stop hook...");
        command
    } else {
        println!("No hooks configured, testing default beep...");
        notify::preset_command(ctx.platform, "beep")?.to_string()
    };

    println!("Running: {command}");
    notify::run_shell(ctx.platform, &command)?;
    println!("Notification executed successfully!");
    Ok(())
}
