//! MCP server CLI commands
//!
//! Handles: claude-helper mcp list/get/add/remove

use clap::{Args, Subcommand};
use serde_json::json;

use claude_helper_core::mcp::{parse_env_pair, McpOps, McpTarget};
use claude_helper_core::{HelperResult, McpServer};

use super::Context;

/// MCP server commands
#[derive(Subcommand)]
pub enum McpCommands {
    /// List configured MCP servers
    List {
        /// Use the Claude Code settings instead of the desktop registry
        #[arg(long)]
        code: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one MCP server
    Get {
        /// Server name
        name: String,
        /// Use the Claude Code settings instead of the desktop registry
        #[arg(long)]
        code: bool,
    },
    /// Add an MCP server
    Add(McpAddArgs),
    /// Remove an MCP server
    Remove {
        /// Server name
        name: String,
        /// Use the Claude Code settings instead of the desktop registry
        #[arg(long)]
        code: bool,
    },
}

/// Arguments for `claude-helper mcp add`
#[derive(Args)]
pub struct McpAddArgs {
    /// Server name (must be unique)
    pub name: String,

    /// Command that starts the server
    pub command: String,

    /// Command argument (can specify multiple times)
    #[arg(short = 'a', long = "args", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Environment variable (KEY=VALUE, can specify multiple times)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Further arguments after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub trailing: Vec<String>,

    /// Replace an existing server with the same name
    #[arg(long)]
    pub force: bool,

    /// Use the Claude Code settings instead of the desktop registry
    #[arg(long)]
    pub code: bool,
}

impl McpAddArgs {
    /// Build the server definition
    pub fn to_server(&self) -> HelperResult<McpServer> {
        let args = self.args.iter().chain(&self.trailing).cloned().collect();
        let mut server = McpServer::new(self.command.clone(), args);
        for pair in &self.env {
            let (key, value) = parse_env_pair(pair)?;
            server.env.insert(key, value);
        }
        Ok(server)
    }
}

fn target(code: bool) -> McpTarget {
    if code {
        McpTarget::Code
    } else {
        McpTarget::Desktop
    }
}

/// Execute MCP command
pub fn execute(cmd: McpCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        McpCommands::List { code, json } => execute_list(ctx, target(code), json),
        McpCommands::Get { name, code } => execute_get(ctx, target(code), &name),
        McpCommands::Add(args) => execute_add(ctx, &args),
        McpCommands::Remove { name, code } => {
            let ops = McpOps::new(&ctx.manager, target(code));
            ops.remove(&name)?;
            println!("Removed MCP server '{name}' from {}", target(code));
            Ok(())
        }
    }
}

fn execute_list(ctx: &Context, target: McpTarget, json_output: bool) -> anyhow::Result<()> {
    let ops = McpOps::new(&ctx.manager, target);
    let servers = ops.list()?;

    if json_output {
        let output = json!({
            "count": servers.len(),
            "target": target.to_string(),
            "servers": servers,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if servers.is_empty() {
        println!("No MCP servers configured in {target}.");
        return Ok(());
    }

    println!("MCP servers ({target}):\n");
    let width = servers.keys().map(String::len).max().unwrap_or(4).max(4);
    println!("  {:<width$}  {:<12} ARGS", "NAME", "COMMAND");
    for (name, server) in &servers {
        let command = if server.command.is_empty() {
            server.display()
        } else {
            server.command.clone()
        };
        println!("  {name:<width$}  {command:<12} {}", server.args.join(" "));
    }
    Ok(())
}

fn execute_get(ctx: &Context, target: McpTarget, name: &str) -> anyhow::Result<()> {
    let ops = McpOps::new(&ctx.manager, target);
    let server = ops.get(name)?;
    println!("{}", serde_json::to_string_pretty(&json!({ name: server }))?);
    Ok(())
}

fn execute_add(ctx: &Context, args: &McpAddArgs) -> anyhow::Result<()> {
    let target = target(args.code);
    let server = args.to_server()?;
    let ops = McpOps::new(&ctx.manager, target);
    let display = server.display();

    ops.add(&args.name, server, args.force)?;
    println!("Added MCP server '{}' to {target}", args.name);
    println!("  {display}");
    println!("  File: {}", ops.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args(env: &[&str]) -> McpAddArgs {
        McpAddArgs {
            name: "demo".into(),
            command: "npx".into(),
            args: vec!["-y".into()],
            env: env.iter().map(ToString::to_string).collect(),
            trailing: vec!["pkg".into()],
            force: false,
            code: false,
        }
    }

    #[test]
    fn test_to_server_keeps_argument_order() {
        let server = add_args(&["A=1", "B=x=y"]).to_server().unwrap();
        assert_eq!(server.args, vec!["-y", "pkg"]);
        assert_eq!(server.env["B"], "x=y");
    }

    #[test]
    fn test_to_server_rejects_bad_env() {
        assert!(add_args(&["NOEQUALS"]).to_server().is_err());
    }
}
