//! Configuration diagnostics
//!
//! Runs a fixed checklist over the settings files, directories, MCP servers
//! and hooks. With `fix` enabled, missing directories are created.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backup::BackupStore;
use crate::manager::{read_text, SettingsManager};
use crate::model::{CodeSettings, DesktopSettings, DocumentKind, McpConfig, McpServer};

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    /// Was failing and has been repaired
    Fixed,
}

impl CheckStatus {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "OK",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
            Self::Fixed => "FIXED",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub section: &'static str,
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

/// Full diagnostics result
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub checks: Vec<Check>,
}

impl DoctorReport {
    fn push(
        &mut self,
        section: &'static str,
        name: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
    ) {
        self.checks.push(Check {
            section,
            name: name.into(),
            status,
            message: message.into(),
        });
    }

    /// Problems found, including the ones that were fixed
    #[must_use]
    pub fn issues(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Fail | CheckStatus::Fixed))
            .count()
    }

    #[must_use]
    pub fn fixed(&self) -> usize {
        self.count(CheckStatus::Fixed)
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    #[must_use]
    pub fn warnings(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    /// No check is left failing
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failures() == 0
    }

    /// Section names in report order
    #[must_use]
    pub fn sections(&self) -> Vec<&'static str> {
        let mut sections: Vec<&'static str> = Vec::new();
        for check in &self.checks {
            if !sections.contains(&check.section) {
                sections.push(check.section);
            }
        }
        sections
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }
}

/// Operating system, architecture and tool version
#[must_use]
pub fn system_info(platform: crate::paths::Platform, version: &str) -> Vec<(&'static str, String)> {
    vec![
        ("OS", platform.display_name().to_string()),
        ("Architecture", std::env::consts::ARCH.to_string()),
        ("claude-helper", version.to_string()),
    ]
}

/// Run every check
#[must_use]
pub fn run(manager: &SettingsManager, fix: bool) -> DoctorReport {
    let mut report = DoctorReport::default();
    check_claude_cli(&mut report);
    check_files(&mut report, manager);
    check_directories(&mut report, manager, fix);
    check_backup_dir(&mut report, manager, fix);
    check_mcp_servers(&mut report, manager);
    check_hooks(&mut report, manager);
    tracing::debug!(
        checks = report.checks.len(),
        failures = report.failures(),
        "doctor finished"
    );
    report
}

fn check_claude_cli(report: &mut DoctorReport) {
    const SECTION: &str = "Claude CLI";
    match which::which("claude") {
        Ok(path) => report.push(
            SECTION,
            "claude",
            CheckStatus::Pass,
            format!("Claude CLI found at {}", path.display()),
        ),
        Err(_) => report.push(
            SECTION,
            "claude",
            CheckStatus::Warn,
            "Claude CLI not found in PATH",
        ),
    }
}

fn check_document<D: DeserializeOwned>(report: &mut DoctorReport, kind: DocumentKind, path: &Path) {
    const SECTION: &str = "Configuration Files";
    let (status, message) = match read_text(path) {
        Ok(None) => (CheckStatus::Warn, "Not created yet".to_string()),
        Ok(Some(text)) => match serde_json::from_str::<Value>(&text) {
            Err(e) => (CheckStatus::Fail, format!("Invalid JSON: {e}")),
            Ok(value) => match serde_json::from_value::<D>(value) {
                Ok(_) => (CheckStatus::Pass, "Valid JSON".to_string()),
                Err(e) => (CheckStatus::Fail, format!("Unexpected structure: {e}")),
            },
        },
        Err(e) => (CheckStatus::Fail, format!("Error reading: {e}")),
    };
    report.push(SECTION, kind.label(), status, message);
}

fn check_files(report: &mut DoctorReport, manager: &SettingsManager) {
    let paths = manager.paths();
    check_document::<CodeSettings>(report, DocumentKind::Code, &paths.code_settings);
    check_document::<McpConfig>(report, DocumentKind::Mcp, &paths.mcp_config);
    check_document::<DesktopSettings>(report, DocumentKind::Desktop, &paths.desktop_settings);
}

fn check_dir(report: &mut DoctorReport, section: &'static str, name: &str, dir: &Path, fix: bool) {
    if dir.is_dir() {
        report.push(section, name, CheckStatus::Pass, "Exists");
        return;
    }
    if !fix {
        report.push(section, name, CheckStatus::Fail, "Not found");
        return;
    }
    // Best effort: a failure is reported, not propagated
    match fs::create_dir_all(dir) {
        Ok(()) => {
            tracing::info!(path = %dir.display(), "created directory");
            report.push(section, name, CheckStatus::Fixed, "Created");
        }
        Err(e) => report.push(
            section,
            name,
            CheckStatus::Fail,
            format!("Not found (could not create: {e})"),
        ),
    }
}

fn check_directories(report: &mut DoctorReport, manager: &SettingsManager, fix: bool) {
    const SECTION: &str = "Directories";
    let paths = manager.paths();
    check_dir(report, SECTION, "Claude Desktop Dir", &paths.desktop_dir, fix);
    check_dir(report, SECTION, "Claude Code Dir", &paths.code_dir, fix);
}

fn probe_writable(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(".write_test");
    fs::write(&probe, b"test")?;
    fs::remove_file(&probe)
}

fn check_backup_dir(report: &mut DoctorReport, manager: &SettingsManager, fix: bool) {
    const SECTION: &str = "Backup Directory";
    let dir = &manager.paths().backup_dir;

    if !dir.is_dir() {
        if !fix {
            report.push(SECTION, "backups", CheckStatus::Warn, "Not created yet");
            return;
        }
        match fs::create_dir_all(dir) {
            Ok(()) => report.push(SECTION, "backups", CheckStatus::Fixed, "Created"),
            Err(e) => {
                report.push(
                    SECTION,
                    "backups",
                    CheckStatus::Warn,
                    format!("Not created yet (could not create: {e})"),
                );
                return;
            }
        }
    }

    match probe_writable(dir) {
        Ok(()) => report.push(SECTION, "writable", CheckStatus::Pass, "Writable"),
        Err(e) => report.push(
            SECTION,
            "writable",
            CheckStatus::Fail,
            format!("Not writable: {e}"),
        ),
    }

    let count = BackupStore::new(manager.paths().clone()).count();
    report.push(
        SECTION,
        "count",
        CheckStatus::Pass,
        format!("{count} backup(s) available"),
    );
}

fn check_server(report: &mut DoctorReport, origin: &str, name: &str, server: &McpServer) {
    const SECTION: &str = "MCP Servers";
    let label = format!("{origin}: {name}");
    if server.command.is_empty() {
        let endpoint = server.display();
        let (status, message) = if endpoint.is_empty() {
            (CheckStatus::Fail, "No command or URL configured".to_string())
        } else {
            (CheckStatus::Pass, format!("Remote server {endpoint}"))
        };
        report.push(SECTION, label, status, message);
        return;
    }
    let cmd = &server.command;
    if which::which(cmd).is_ok() {
        report.push(SECTION, label, CheckStatus::Pass, format!("Command '{cmd}' found"));
    } else {
        report.push(SECTION, label, CheckStatus::Fail, format!("Command '{cmd}' not found"));
    }
}

fn check_mcp_servers(report: &mut DoctorReport, manager: &SettingsManager) {
    let code = manager
        .read::<CodeSettings>()
        .map(|s| s.mcp_servers.unwrap_or_default())
        .unwrap_or_default();
    let desktop = manager
        .read::<McpConfig>()
        .map(|c| c.mcp_servers)
        .unwrap_or_default();

    if code.is_empty() && desktop.is_empty() {
        report.push(
            "MCP Servers",
            "servers",
            CheckStatus::Warn,
            "No MCP servers configured",
        );
        return;
    }
    for (name, server) in &code {
        check_server(report, "Claude Code", name, server);
    }
    for (name, server) in &desktop {
        check_server(report, "Claude Desktop", name, server);
    }
}

/// Program a hook command line starts with
fn program_of(command: &str) -> Option<String> {
    let words = if cfg!(windows) {
        None
    } else {
        shell_words::split(command).ok()
    };
    words
        .unwrap_or_else(|| command.split_whitespace().map(str::to_string).collect())
        .into_iter()
        .next()
}

fn check_hooks(report: &mut DoctorReport, manager: &SettingsManager) {
    const SECTION: &str = "Hooks";
    let hooks = manager
        .read::<CodeSettings>()
        .ok()
        .and_then(|s| s.hooks)
        .unwrap_or_default();

    let mut any = false;
    for entry in hooks.entries() {
        any = true;
        let name = format!("{} #{}", entry.event, entry.group);
        let Some(command) = entry.hook.command.as_deref() else {
            report.push(
                SECTION,
                name,
                CheckStatus::Pass,
                format!("{} hook configured", entry.hook.kind),
            );
            continue;
        };
        match program_of(command) {
            None => report.push(SECTION, name, CheckStatus::Fail, "Empty command"),
            Some(program) if which::which(&program).is_ok() => {
                report.push(SECTION, name, CheckStatus::Pass, "Command configured");
            }
            Some(program) => report.push(
                SECTION,
                name,
                CheckStatus::Warn,
                format!("Program '{program}' not found in PATH"),
            ),
        }
    }

    if !any {
        report.push(SECTION, "hooks", CheckStatus::Warn, "No hooks configured");
    }
}
