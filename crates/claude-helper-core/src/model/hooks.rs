//! Hook configuration
//!
//! Canonical layout, as written by Claude Code:
//!
//! ```json
//! "hooks": {
//!   "Stop": [ { "hooks": [ { "type": "command", "command": "notify-send done" } ] } ],
//!   "PostToolUse": [ { "matcher": "Edit|Write", "hooks": [ ... ] } ]
//! }
//! ```
//!
//! Older files put bare entries (`{"command": ...}` or a plain string) directly
//! in an event list, or plain strings inside a group's `hooks` list. Those are
//! read as shell commands and written back in the canonical layout. Entries
//! that match neither shape are written back untouched.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{HelperError, HelperResult};

/// Hook trigger types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookTrigger {
    PreToolUse,
    PostToolUse,
    UserPromptSubmit,
    SessionStart,
    SessionEnd,
    Notification,
    Stop,
    SubagentStop,
    PreCompact,
}

impl HookTrigger {
    /// Get the JSON key name for this trigger
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::SessionStart => "SessionStart",
            Self::SessionEnd => "SessionEnd",
            Self::Notification => "Notification",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::PreCompact => "PreCompact",
        }
    }

    /// All available triggers
    #[must_use]
    pub fn all() -> &'static [HookTrigger] {
        &[
            Self::PreToolUse,
            Self::PostToolUse,
            Self::UserPromptSubmit,
            Self::SessionStart,
            Self::SessionEnd,
            Self::Notification,
            Self::Stop,
            Self::SubagentStop,
            Self::PreCompact,
        ]
    }

    /// Whether the trigger is tool-specific and honours a matcher
    #[must_use]
    pub fn uses_matcher(&self) -> bool {
        matches!(self, Self::PreToolUse | Self::PostToolUse)
    }
}

impl std::str::FromStr for HookTrigger {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HelperError::Validation(format!("Unknown hook trigger: {s}")))
    }
}

impl std::fmt::Display for HookTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_hook_type() -> String {
    "command".to_string()
}

/// A single hook action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    /// `command` for shell hooks; other types are preserved as-is
    #[serde(rename = "type", default = "default_hook_type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HookCommand {
    /// Create a shell command hook
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            kind: default_hook_type(),
            command: Some(command.into()),
            timeout: None,
            extra: Map::new(),
        }
    }

    /// Get a display string
    #[must_use]
    pub fn display(&self) -> String {
        match &self.command {
            Some(command) => command.clone(),
            None => format!("<{} hook>", self.kind),
        }
    }
}

/// A matcher group: hooks that run for tools matching `matcher`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawHookMatcher")]
pub struct HookMatcher {
    pub matcher: Option<String>,
    pub hooks: Vec<HookCommand>,
    pub extra: Map<String, Value>,
    /// Entry that is not a recognizable group, written back as read
    verbatim: Option<Value>,
}

impl HookMatcher {
    /// Group holding a single shell command
    pub fn command(command: impl Into<String>) -> Self {
        Self::group(None, vec![HookCommand::shell(command)], Map::new())
    }

    fn group(matcher: Option<String>, hooks: Vec<HookCommand>, extra: Map<String, Value>) -> Self {
        Self {
            matcher,
            hooks,
            extra,
            verbatim: None,
        }
    }

    /// Set matcher pattern
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    /// Set a timeout on every command in the group
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        for hook in &mut self.hooks {
            hook.timeout = Some(seconds);
        }
        self
    }

    /// First shell command in the group
    #[must_use]
    pub fn first_command(&self) -> Option<&str> {
        self.hooks.iter().find_map(|h| h.command.as_deref())
    }
}

impl Serialize for HookMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(raw) = &self.verbatim {
            return raw.serialize(serializer);
        }
        let mut map = serializer.serialize_map(None)?;
        if let Some(matcher) = &self.matcher {
            map.serialize_entry("matcher", matcher)?;
        }
        map.serialize_entry("hooks", &self.hooks)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HookItem {
    Command(HookCommand),
    Bare(String),
}

impl From<HookItem> for HookCommand {
    fn from(item: HookItem) -> Self {
        match item {
            HookItem::Command(hook) => hook,
            HookItem::Bare(command) => HookCommand::shell(command),
        }
    }
}

#[derive(Deserialize)]
struct GroupRepr {
    #[serde(default)]
    matcher: Option<String>,
    hooks: Vec<HookItem>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHookMatcher {
    Group(GroupRepr),
    Bare(String),
    Other(Value),
}

/// A legacy `{"command": "..."}` entry sitting directly in an event list
fn flat_command(value: &Value) -> Option<HookCommand> {
    let obj = value.as_object()?;
    if obj.contains_key("hooks") || !obj.get("command").is_some_and(Value::is_string) {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

impl From<RawHookMatcher> for HookMatcher {
    fn from(raw: RawHookMatcher) -> Self {
        match raw {
            RawHookMatcher::Group(group) => Self::group(
                group.matcher,
                group.hooks.into_iter().map(HookCommand::from).collect(),
                group.extra,
            ),
            RawHookMatcher::Bare(command) => Self::command(command),
            RawHookMatcher::Other(value) => match flat_command(&value) {
                Some(mut hook) => {
                    let matcher = match hook.extra.remove("matcher") {
                        Some(Value::String(m)) => Some(m),
                        Some(other) => {
                            hook.extra.insert("matcher".into(), other);
                            None
                        }
                        None => None,
                    };
                    Self::group(matcher, vec![hook], Map::new())
                }
                None => {
                    tracing::debug!(entry = %value, "keeping unrecognized hook entry as-is");
                    Self {
                        verbatim: Some(value),
                        ..Self::group(None, Vec::new(), Map::new())
                    }
                }
            },
        }
    }
}

/// One shell command located in the hooks tree
#[derive(Debug, Clone, PartialEq)]
pub struct HookEntry<'a> {
    pub event: &'a str,
    pub group: usize,
    pub matcher: Option<&'a str>,
    pub hook: &'a HookCommand,
}

/// The `hooks` section of Claude Code settings: event name to matcher groups
///
/// Event names are kept as strings so events added by newer Claude releases
/// survive a rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HooksConfig {
    events: BTreeMap<String, Vec<HookMatcher>>,
}

impl HooksConfig {
    /// Matcher groups registered for a trigger
    #[must_use]
    pub fn groups(&self, trigger: HookTrigger) -> &[HookMatcher] {
        self.events
            .get(trigger.as_str())
            .map_or(&[], Vec::as_slice)
    }

    /// Append a matcher group to a trigger
    pub fn push(&mut self, trigger: HookTrigger, group: HookMatcher) {
        self.events
            .entry(trigger.as_str().to_string())
            .or_default()
            .push(group);
    }

    /// Remove the matcher group at `index`
    pub fn remove(&mut self, trigger: HookTrigger, index: usize) -> HelperResult<HookMatcher> {
        let key = trigger.as_str();
        let groups = self
            .events
            .get_mut(key)
            .filter(|g| !g.is_empty())
            .ok_or_else(|| HelperError::NoHooks(key.to_string()))?;
        if index >= groups.len() {
            return Err(HelperError::InvalidIndex {
                index,
                max: groups.len() - 1,
            });
        }
        let removed = groups.remove(index);
        if groups.is_empty() {
            self.events.remove(key);
        }
        Ok(removed)
    }

    /// Remove every group for a trigger, returning how many were removed
    pub fn clear(&mut self, trigger: HookTrigger) -> usize {
        self.events.remove(trigger.as_str()).map_or(0, |g| g.len())
    }

    /// Append every event of `other`
    pub fn extend(&mut self, other: &HooksConfig) {
        for (event, groups) in &other.events {
            self.events
                .entry(event.clone())
                .or_default()
                .extend(groups.iter().cloned());
        }
    }

    /// Whether no event has any group
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.values().all(Vec::is_empty)
    }

    /// Event names present in the document
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Every hook command, across all events
    pub fn entries(&self) -> impl Iterator<Item = HookEntry<'_>> {
        self.events.iter().flat_map(|(event, groups)| {
            groups.iter().enumerate().flat_map(move |(group, m)| {
                m.hooks.iter().map(move |hook| HookEntry {
                    event: event.as_str(),
                    group,
                    matcher: m.matcher.as_deref(),
                    hook,
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_hook_trigger_parse() {
        assert_eq!(
            "PostToolUse".parse::<HookTrigger>().unwrap(),
            HookTrigger::PostToolUse
        );
        assert_eq!("stop".parse::<HookTrigger>().unwrap(), HookTrigger::Stop);
        assert!("Invalid".parse::<HookTrigger>().is_err());
    }

    #[test]
    fn test_canonical_round_trip() {
        let raw = json!({
            "Stop": [{"hooks": [{"type": "command", "command": "say done"}]}],
            "PostToolUse": [{
                "matcher": "Edit|Write",
                "hooks": [{"type": "command", "command": "cargo fmt", "timeout": 30}]
            }]
        });
        let hooks: HooksConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(hooks.groups(HookTrigger::Stop).len(), 1);
        assert_eq!(
            hooks.groups(HookTrigger::PostToolUse)[0].matcher.as_deref(),
            Some("Edit|Write")
        );
        assert_eq!(serde_json::to_value(&hooks).unwrap(), raw);
    }

    #[test]
    fn test_legacy_entries_migrate() {
        let raw = json!({
            "Stop": ["afplay /System/Library/Sounds/Glass.aiff"],
            "PostToolUse": [{"matcher": "Bash", "command": "echo ran"}]
        });
        let hooks: HooksConfig = serde_json::from_value(raw).unwrap();

        let stop = &hooks.groups(HookTrigger::Stop)[0];
        assert_eq!(
            stop.first_command(),
            Some("afplay /System/Library/Sounds/Glass.aiff")
        );

        let post = &hooks.groups(HookTrigger::PostToolUse)[0];
        assert_eq!(post.matcher.as_deref(), Some("Bash"));
        assert_eq!(post.hooks[0].kind, "command");

        let written = serde_json::to_value(&hooks).unwrap();
        assert_eq!(
            written["PostToolUse"],
            json!([{"matcher": "Bash", "hooks": [{"type": "command", "command": "echo ran"}]}])
        );
    }

    #[test]
    fn test_bare_strings_in_group_migrate() {
        let raw = json!({"Stop": [{"hooks": ["say done", {"type": "command", "command": "beep"}]}]});
        let hooks: HooksConfig = serde_json::from_value(raw).unwrap();

        let stop = &hooks.groups(HookTrigger::Stop)[0];
        assert_eq!(stop.hooks.len(), 2);
        assert_eq!(stop.first_command(), Some("say done"));
        assert_eq!(
            serde_json::to_value(&hooks).unwrap(),
            json!({"Stop": [{"hooks": [
                {"type": "command", "command": "say done"},
                {"type": "command", "command": "beep"}
            ]}]})
        );
    }

    #[test]
    fn test_unrecognized_entries_written_back_unchanged() {
        let raw = json!({"Stop": [
            {"hooks": "not-a-list"},
            {"note": 1},
            {"command": 42},
            7
        ]});
        let hooks: HooksConfig = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(hooks.groups(HookTrigger::Stop).len(), 4);
        assert_eq!(hooks.entries().count(), 0);
        assert_eq!(serde_json::to_value(&hooks).unwrap(), raw);
    }

    #[test]
    fn test_unknown_events_preserved() {
        let raw = json!({"FutureEvent": [{"hooks": [{"type": "prompt", "prompt": "hi"}]}]});
        let hooks: HooksConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(hooks.event_names().collect::<Vec<_>>(), vec!["FutureEvent"]);
        assert_eq!(serde_json::to_value(&hooks).unwrap(), raw);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut hooks = HooksConfig::default();
        hooks.push(HookTrigger::Stop, HookMatcher::command("one"));
        hooks.push(HookTrigger::Stop, HookMatcher::command("two"));

        assert!(matches!(
            hooks.remove(HookTrigger::Stop, 2),
            Err(HelperError::InvalidIndex { index: 2, max: 1 })
        ));
        let removed = hooks.remove(HookTrigger::Stop, 0).unwrap();
        assert_eq!(removed.first_command(), Some("one"));
        assert_eq!(hooks.clear(HookTrigger::Stop), 1);
        assert!(hooks.is_empty());
        assert!(matches!(
            hooks.remove(HookTrigger::Stop, 0),
            Err(HelperError::NoHooks(_))
        ));
    }

    #[test]
    fn test_entries() {
        let mut hooks = HooksConfig::default();
        hooks.push(
            HookTrigger::PostToolUse,
            HookMatcher::command("lint").with_matcher("Edit"),
        );
        hooks.push(HookTrigger::Stop, HookMatcher::command("beep"));

        let entries: Vec<_> = hooks.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "PostToolUse");
        assert_eq!(entries[0].matcher, Some("Edit"));
        assert_eq!(entries[1].hook.command.as_deref(), Some("beep"));
    }
}
