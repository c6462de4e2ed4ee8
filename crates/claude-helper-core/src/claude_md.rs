//! Per-project `CLAUDE.md` instruction file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HelperError, HelperResult};
use crate::paths::Platform;
use crate::util::write_atomic;

/// File name looked up in the working directory
pub const CLAUDE_MD_FILE: &str = "CLAUDE.md";

/// Content of a freshly created file
pub const DEFAULT_TEMPLATE: &str = "# CLAUDE.md\n\nProject instructions for Claude Code.\n\n## Rules\n\n";

/// Location of `CLAUDE.md` in a directory
#[must_use]
pub fn claude_md_path(dir: &Path) -> PathBuf {
    dir.join(CLAUDE_MD_FILE)
}

/// Where a rule ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleInsertion {
    /// The file did not exist and was created from the template
    Created,
    /// Appended to the existing rules section
    InSection,
    /// A new rules section was added at the end
    NewSection,
}

fn is_rules_heading(line: &str) -> bool {
    let heading = line.trim().to_lowercase();
    heading == "## rules" || heading == "## rule"
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Insert `- rule` into existing `CLAUDE.md` content
///
/// The rule goes after the last entry of the `## Rules` section, before the
/// blank line that separates it from the next `## ` heading. Without such a
/// section a new one is appended.
#[must_use]
pub fn insert_rule(content: &str, rule: &str) -> (String, RuleInsertion) {
    let entry = format!("- {rule}");
    let mut lines: Vec<&str> = content.split('\n').collect();

    let Some(heading) = lines.iter().position(|l| is_rules_heading(l)) else {
        let mut updated = content.to_string();
        if !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&format!("\n## Rules\n\n{entry}\n"));
        return (updated, RuleInsertion::NewSection);
    };

    let mut body_start = heading + 1;
    while body_start < lines.len() && is_blank(lines[body_start]) {
        body_start += 1;
    }

    let mut index = body_start;
    while index < lines.len() {
        let line = lines[index];
        if line.starts_with("## ") {
            break;
        }
        if is_blank(line) && lines.get(index + 1).is_some_and(|next| next.starts_with("## ")) {
            break;
        }
        index += 1;
    }

    if index == lines.len() {
        if body_start == lines.len() {
            // Empty section at the end: keep one blank line under the heading
            index = (heading + 2).min(lines.len());
        } else {
            while index > body_start && is_blank(lines[index - 1]) {
                index -= 1;
            }
        }
    }

    let needs_gap = lines.get(index).is_some_and(|next| next.starts_with("## "));
    lines.insert(index, &entry);
    if needs_gap {
        lines.insert(index + 1, "");
    }

    let mut updated = lines.join("\n");
    if content.ends_with('\n') && !updated.ends_with('\n') {
        updated.push('\n');
    }
    (updated, RuleInsertion::InSection)
}

/// Add a rule to the file at `path`, creating it from the template if needed
///
/// # Errors
/// Returns an I/O error if the file cannot be read or written
pub fn add_rule(path: &Path, rule: &str) -> HelperResult<RuleInsertion> {
    let rule = rule.trim();
    if rule.is_empty() {
        return Err(HelperError::Validation("rule cannot be empty".into()));
    }

    let (content, outcome) = match fs::read_to_string(path) {
        Ok(existing) => insert_rule(&existing, rule),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            format!("{DEFAULT_TEMPLATE}- {rule}\n"),
            RuleInsertion::Created,
        ),
        Err(e) => return Err(HelperError::io(path, &e)),
    };
    write_atomic(path, content.as_bytes())?;
    tracing::info!(path = %path.display(), ?outcome, "added rule");
    Ok(outcome)
}

/// Create the file from the template if it does not exist. Returns whether
/// it was created.
///
/// # Errors
/// Returns an I/O error if the file cannot be written
pub fn ensure_exists(path: &Path) -> HelperResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_atomic(path, DEFAULT_TEMPLATE.as_bytes())?;
    Ok(true)
}

/// Editor command: `$EDITOR`, then `$VISUAL`, then the platform default
#[must_use]
pub fn default_editor(platform: Platform, editor: Option<&str>, visual: Option<&str>) -> String {
    [editor, visual]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|e| !e.is_empty())
        .map_or_else(
            || match platform {
                Platform::Windows => "notepad".to_string(),
                Platform::MacOs | Platform::Linux => "nano".to_string(),
            },
            str::to_string,
        )
}

/// Editor for the running process
#[must_use]
pub fn editor_from_env() -> String {
    default_editor(
        Platform::current(),
        std::env::var("EDITOR").ok().as_deref(),
        std::env::var("VISUAL").ok().as_deref(),
    )
}

fn split_command(raw: &str) -> HelperResult<Vec<String>> {
    // shell_words treats backslashes as escapes, which mangles Windows paths
    if cfg!(windows) {
        Ok(raw.split_whitespace().map(str::to_string).collect())
    } else {
        shell_words::split(raw).map_err(|e| HelperError::Validation(format!("editor '{raw}': {e}")))
    }
}

/// Open a file in an editor and wait for it to exit
///
/// # Errors
/// Returns `ToolMissing` if the editor cannot be started and `ToolFailed` if
/// it exits unsuccessfully
pub fn open_in_editor(editor: &str, path: &Path) -> HelperResult<()> {
    let mut words = split_command(editor)?.into_iter();
    let Some(program) = words.next() else {
        return Err(HelperError::Validation("editor command is empty".into()));
    };

    tracing::debug!(editor = %program, path = %path.display(), "opening editor");
    let status = Command::new(&program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| HelperError::ToolMissing {
            program: program.clone(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(HelperError::ToolFailed {
            program,
            status: status.to_string(),
        })
    }
}
