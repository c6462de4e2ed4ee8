//! Setup wizard
//!
//! Handles: claude-helper setup
//!
//! Without flags every value is asked through the prompter. Passing any of
//! `--model`, `--auto-approve`, `--base-url` or `--auth-token` skips the
//! questions and keeps the current value of everything not given.

use clap::Args;

use claude_helper_core::env::mask_value;
use claude_helper_core::{CodeSettings, HelperError, HelperResult};

use super::Context;

const MODELS: &[(&str, &str)] = &[
    ("sonnet", "Sonnet (balanced)"),
    ("opus", "Opus (most capable)"),
    ("haiku", "Haiku (fastest)"),
];

const BASE_URL: &str = "ANTHROPIC_BASE_URL";
const AUTH_TOKEN: &str = "ANTHROPIC_AUTH_TOKEN";

/// Arguments for `claude-helper setup`
#[derive(Args)]
pub struct SetupArgs {
    /// Default model (sonnet, opus, haiku or a full model name)
    #[arg(long)]
    pub model: Option<String>,

    /// Auto-approved actions: comma-separated read,write,bash,all or `none`
    #[arg(long, value_name = "LIST")]
    pub auto_approve: Option<String>,

    /// Value for ANTHROPIC_BASE_URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Value for ANTHROPIC_AUTH_TOKEN
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Save without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl SetupArgs {
    fn is_scripted(&self) -> bool {
        self.model.is_some()
            || self.auto_approve.is_some()
            || self.base_url.is_some()
            || self.auth_token.is_some()
    }
}

/// Auto-approve flags in the order all, read, write, bash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Approvals {
    all: bool,
    read: bool,
    write: bool,
    bash: bool,
}

impl Approvals {
    fn current(settings: &CodeSettings) -> Self {
        Self {
            all: settings.auto_approve_all(),
            read: settings.auto_approve_read(),
            write: settings.auto_approve_write(),
            bash: settings.auto_approve_bash(),
        }
    }

    /// Parse `read,write`, `all` or `none`
    fn parse(list: &str) -> HelperResult<Self> {
        let mut approvals = Self::default();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match item.to_lowercase().as_str() {
                "none" => approvals = Self::default(),
                "all" => approvals.all = true,
                "read" => approvals.read = true,
                "write" => approvals.write = true,
                "bash" => approvals.bash = true,
                other => {
                    return Err(HelperError::Validation(format!(
                        "unknown auto-approve option '{other}' (expected read, write, bash, all or none)"
                    )))
                }
            }
        }
        Ok(approvals)
    }

    /// Write only the flags that differ from what the settings already say
    fn apply(self, settings: &mut CodeSettings) {
        let current = Self::current(settings);
        for (slot, old, new) in [
            (&mut settings.auto_approve_all, current.all, self.all),
            (&mut settings.auto_approve_read, current.read, self.read),
            (&mut settings.auto_approve_write, current.write, self.write),
            (&mut settings.auto_approve_bash, current.bash, self.bash),
        ] {
            if old != new {
                *slot = Some(new);
            }
        }
    }
}

/// Execute the setup wizard
pub fn execute(args: &SetupArgs, ctx: &mut Context) -> anyhow::Result<()> {
    println!("Claude Code Setup Wizard\n");

    let mut settings: CodeSettings = ctx.manager.read()?;
    show_current(&settings);

    let approvals = match &args.auto_approve {
        Some(list) => Approvals::parse(list)?,
        None if args.is_scripted() => Approvals::current(&settings),
        None => match ask_approvals(ctx, Approvals::current(&settings))? {
            Some(a) => a,
            None => return cancelled(),
        },
    };

    let model = match &args.model {
        Some(model) if model.trim().is_empty() => {
            return Err(HelperError::Validation("model cannot be empty".into()).into())
        }
        Some(model) => Some(model.trim().to_string()),
        None if args.is_scripted() => settings.model.clone(),
        None => match ask_model(ctx, settings.model.as_deref())? {
            Some(m) => Some(m),
            None => return cancelled(),
        },
    };

    let mut env = settings.env().clone();
    if args.is_scripted() {
        if let Some(url) = &args.base_url {
            env.insert(BASE_URL.to_string(), url.clone());
        }
        if let Some(token) = &args.auth_token {
            env.insert(AUTH_TOKEN.to_string(), token.clone());
        }
    } else {
        let configure = ctx
            .prompter
            .confirm("Configure environment variables (API URL, tokens)?", false)?;
        if configure && !ask_env(ctx, &mut env)? {
            return cancelled();
        }
    }

    approvals.apply(&mut settings);
    settings.model = model;
    if env != *settings.env() {
        settings.env = Some(env);
    }

    println!("\nSummary:");
    println!("  Model: {}", settings.model.as_deref().unwrap_or("(default)"));
    println!("  Auto-approve read: {}", approvals.read);
    println!("  Auto-approve write: {}", approvals.write);
    println!("  Auto-approve bash: {}", approvals.bash);
    println!("  Auto-approve all: {}", approvals.all);
    if !settings.env().is_empty() {
        println!("  Environment variables: {} configured", settings.env().len());
    }
    println!();

    let save = args.yes || ctx.prompter.confirm("Save these settings?", true)?;
    if !save {
        println!("Settings not saved.");
        return Ok(());
    }
    ctx.manager.write(&settings)?;
    println!("Settings saved to {}", ctx.manager.paths().code_settings.display());
    Ok(())
}

fn cancelled() -> anyhow::Result<()> {
    println!("Setup cancelled.");
    Ok(())
}

fn show_current(settings: &CodeSettings) {
    if settings.is_empty() {
        println!("No settings configured yet.\n");
        return;
    }

    println!("Current settings:");
    if let Some(model) = &settings.model {
        println!("  Model: {model}");
    }
    let approvals = settings.approvals();
    if approvals.is_empty() {
        println!("  Auto-approve: none");
    } else {
        println!("  Auto-approve: {}", approvals.join(", "));
    }
    if !settings.env().is_empty() {
        println!("  Environment variables: {} configured", settings.env().len());
        for (key, value) in settings.env() {
            println!("    {key}: {}", mask_value(key, value));
        }
    }
    println!();
}

fn ask_approvals(ctx: &mut Context, current: Approvals) -> anyhow::Result<Option<Approvals>> {
    println!("Auto-approve settings");
    println!("Choose which actions Claude can perform without asking.\n");

    let options = [
        "Read files (autoApproveRead)",
        "Write files (autoApproveWrite)",
        "Run bash commands (autoApproveBash)",
        "All actions (autoApproveAll)",
    ];
    let checked = [current.read, current.write, current.bash, current.all];
    let Some(picked) = ctx
        .prompter
        .multi_select("Select auto-approve options:", &options, &checked)?
    else {
        return Ok(None);
    };

    let on = |i: usize| picked.get(i).copied().unwrap_or(false);
    Ok(Some(Approvals {
        read: on(0),
        write: on(1),
        bash: on(2),
        all: on(3),
    }))
}

/// Pick a model. A current model outside the built-in list is offered first
/// and is the default, so accepting the default never changes it.
fn ask_model(ctx: &mut Context, current: Option<&str>) -> anyhow::Result<Option<String>> {
    println!();
    let custom = current.filter(|m| !MODELS.iter().any(|(name, _)| name == m));
    let keep = custom.map(|m| format!("Keep current ({m})"));
    let offset = usize::from(keep.is_some());

    let mut labels: Vec<&str> = keep.iter().map(String::as_str).collect();
    labels.extend(MODELS.iter().map(|(_, label)| *label));

    let default = match custom {
        Some(_) => 0,
        None => current
            .and_then(|m| MODELS.iter().position(|(name, _)| *name == m))
            .unwrap_or(0),
    };
    let choice = ctx
        .prompter
        .select("Select default model:", &labels, default)?;
    Ok(choice.map(|i| match custom {
        Some(m) if i == 0 => m.to_string(),
        _ => MODELS[i - offset].0.to_string(),
    }))
}

/// Ask for the API URL and token. Returns `false` when cancelled.
fn ask_env(
    ctx: &mut Context,
    env: &mut std::collections::BTreeMap<String, String>,
) -> anyhow::Result<bool> {
    println!("\nLeave empty to keep the current value.\n");

    let current_url = env.get(BASE_URL).cloned();
    let Some(url) = ctx.prompter.input(BASE_URL, current_url.as_deref())? else {
        return Ok(false);
    };
    if !url.is_empty() {
        env.insert(BASE_URL.to_string(), url);
    }

    let hint = env
        .get(AUTH_TOKEN)
        .map(|t| mask_value(AUTH_TOKEN, t))
        .unwrap_or_default();
    let prompt = if hint.is_empty() {
        AUTH_TOKEN.to_string()
    } else {
        format!("{AUTH_TOKEN} (current {hint})")
    };
    let Some(token) = ctx.prompter.input(&prompt, None)? else {
        return Ok(false);
    };
    if !token.is_empty() {
        env.insert(AUTH_TOKEN.to_string(), token);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_approvals() {
        assert_eq!(
            Approvals::parse("read, bash").unwrap(),
            Approvals {
                read: true,
                bash: true,
                ..Approvals::default()
            }
        );
        assert_eq!(Approvals::parse("all,none").unwrap(), Approvals::default());
        assert!(Approvals::parse("read,sudo").is_err());
    }

    #[test]
    fn test_apply_writes_only_changed_flags() {
        let mut settings = CodeSettings {
            auto_approve_read: Some(true),
            ..CodeSettings::default()
        };
        Approvals {
            read: true,
            bash: true,
            ..Approvals::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.auto_approve_read, Some(true));
        assert_eq!(settings.auto_approve_bash, Some(true));
        assert_eq!(settings.auto_approve_all, None);
        assert_eq!(settings.auto_approve_write, None);
    }
}
