//! Built-in profiles

use std::sync::OnceLock;

use super::SettingsProfile;
use crate::model::{CodeSettings, McpConfig, McpServer};

fn approvals(all: bool, read: bool, write: bool, bash: bool) -> CodeSettings {
    let mut settings = CodeSettings::default();
    settings.set_approvals(all, read, write, bash);
    settings
}

fn npx(package: &str, extra: &[&str]) -> McpServer {
    let mut args = vec!["-y".to_string(), package.to_string()];
    args.extend(extra.iter().map(|a| (*a).to_string()));
    McpServer::new("npx", args)
}

fn build() -> Vec<SettingsProfile> {
    vec![
        SettingsProfile::new("developer", "Auto-approve file reads")
            .with_code(approvals(false, true, false, false)),
        SettingsProfile::new("power-user", "Auto-approve file reads and writes")
            .with_code(approvals(false, true, true, false)),
        SettingsProfile::new("filesystem-mcp", "Register the MCP filesystem server")
            .with_mcp(McpConfig::with_servers([(
                "filesystem".to_string(),
                npx(
                    "@modelcontextprotocol/server-filesystem",
                    &["/path/to/allowed/dir"],
                ),
            )])),
        SettingsProfile::new("github-mcp", "Register the MCP GitHub server").with_mcp(
            McpConfig::with_servers([(
                "github".to_string(),
                npx("@modelcontextprotocol/server-github", &[])
                    .with_env("GITHUB_PERSONAL_ACCESS_TOKEN", "<your-token>"),
            )]),
        ),
        SettingsProfile::new("minimal", "Turn every auto-approval off")
            .with_code(approvals(false, false, false, false)),
    ]
}

/// The built-in profiles, in display order
#[must_use]
pub fn builtin_profiles() -> &'static [SettingsProfile] {
    static PROFILES: OnceLock<Vec<SettingsProfile>> = OnceLock::new();
    PROFILES.get_or_init(build)
}
