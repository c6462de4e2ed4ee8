//! Notification commands
//!
//! Per-platform shell one-liners that make a sound or show a popup, suitable
//! as hook commands, plus helpers to run them.

use std::fs;
use std::path::Path;
use std::process::Command;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};

use crate::error::{HelperError, HelperResult};
use crate::paths::Platform;

/// Directory holding the stock Windows sounds
pub const WINDOWS_MEDIA_DIR: &str = r"C:\Windows\Media";

/// Volume choices offered when picking a Windows sound
pub const VOLUME_LEVELS: &[(u8, &str)] = &[
    (100, "100% (Full)"),
    (75, "75%"),
    (50, "50%"),
    (25, "25%"),
    (10, "10% (Quiet)"),
];

/// A named notification command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    /// Menu label
    pub label: &'static str,
    pub command: &'static str,
}

const WINDOWS_PRESETS: &[Preset] = &[
    Preset {
        name: "beep",
        label: "Beep sound",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "[console]::beep(1000,500)""#,
    },
    Preset {
        name: "toast",
        label: "Toast/Popup notification",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "Add-Type -AssemblyName System.Windows.Forms; [System.Windows.Forms.MessageBox]::Show('Claude Code task completed!', 'Notification')""#,
    },
    Preset {
        name: "sound",
        label: "System sound (default)",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "(New-Object Media.SoundPlayer 'C:\Windows\Media\notify.wav').PlaySync()""#,
    },
];

const MACOS_PRESETS: &[Preset] = &[
    Preset {
        name: "beep",
        label: "Beep sound",
        command: "afplay /System/Library/Sounds/Glass.aiff",
    },
    Preset {
        name: "toast",
        label: "Toast/Popup notification",
        command: r#"osascript -e 'display notification "Claude Code task completed!" with title "Notification"'"#,
    },
    Preset {
        name: "sound",
        label: "System sound (default)",
        command: "afplay /System/Library/Sounds/Ping.aiff",
    },
];

const LINUX_PRESETS: &[Preset] = &[
    Preset {
        name: "beep",
        label: "Beep sound",
        command: r"paplay /usr/share/sounds/freedesktop/stereo/complete.oga 2>/dev/null || echo -e '\a'",
    },
    Preset {
        name: "toast",
        label: "Toast/Popup notification",
        command: r#"notify-send "Claude Code" "Task completed!""#,
    },
    Preset {
        name: "sound",
        label: "System sound (default)",
        command: r"paplay /usr/share/sounds/freedesktop/stereo/message.oga 2>/dev/null || echo -e '\a'",
    },
];

/// Presets available on a platform, in menu order
#[must_use]
pub fn presets(platform: Platform) -> &'static [Preset] {
    match platform {
        Platform::Windows => WINDOWS_PRESETS,
        Platform::MacOs => MACOS_PRESETS,
        Platform::Linux => LINUX_PRESETS,
    }
}

/// Command of a named preset
///
/// # Errors
/// Returns `UnknownPreset` if the platform has no preset with this name
pub fn preset_command(platform: Platform, name: &str) -> HelperResult<&'static str> {
    presets(platform)
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.command)
        .ok_or_else(|| HelperError::UnknownPreset {
            preset: name.to_string(),
            platform: platform.to_string(),
        })
}

/// `.wav` files in a directory, sorted by name. Empty if the directory is
/// missing.
#[must_use]
pub fn list_sounds(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut sounds: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    sounds.sort();
    sounds
}

/// Stock Windows sounds
#[must_use]
pub fn windows_sounds() -> Vec<String> {
    list_sounds(Path::new(WINDOWS_MEDIA_DIR))
}

/// PowerShell command that plays a sound from the Windows media directory at
/// the given volume (percent, capped at 100)
///
/// The script is passed via `-EncodedCommand` so no quoting survives into the
/// settings file.
#[must_use]
pub fn build_sound_command(sound_file: &str, volume: u8) -> String {
    let volume = volume.min(100);
    let script = format!(
        "\nAdd-Type -AssemblyName PresentationCore\n\
         $p = New-Object System.Windows.Media.MediaPlayer\n\
         $p.Volume = {}.{:02}\n\
         $p.Open([uri]\"{WINDOWS_MEDIA_DIR}\\{sound_file}\")\n\
         while (-not $p.HasAudio) {{ Start-Sleep -Milliseconds 50 }}\n\
         $p.Play()\n\
         Start-Sleep -Milliseconds 2000\n",
        volume / 100,
        volume % 100,
    );
    let utf16: Vec<u8> = script.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let encoded = BASE64_STANDARD.encode(utf16);
    format!("powershell -NoProfile -ExecutionPolicy Bypass -EncodedCommand {encoded}")
}

/// Run a command line through the platform shell (`cmd /C` or `sh -c`)
///
/// # Errors
/// Returns `ToolMissing` if the shell cannot be started and `ToolFailed` if
/// the command exits unsuccessfully
pub fn run_shell(platform: Platform, command: &str) -> HelperResult<()> {
    let (shell, flag) = match platform {
        Platform::Windows => ("cmd", "/C"),
        Platform::MacOs | Platform::Linux => ("sh", "-c"),
    };
    tracing::debug!(shell, command, "running notification command");

    let status = Command::new(shell)
        .arg(flag)
        .arg(command)
        .status()
        .map_err(|e| HelperError::ToolMissing {
            program: shell.to_string(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(HelperError::ToolFailed {
            program: command.to_string(),
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_every_platform_has_three_presets() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            let names: Vec<_> = presets(platform).iter().map(|p| p.name).collect();
            assert_eq!(names, vec!["beep", "toast", "sound"]);
        }
    }

    #[test]
    fn test_preset_command() {
        assert_eq!(
            preset_command(Platform::MacOs, "beep").unwrap(),
            "afplay /System/Library/Sounds/Glass.aiff"
        );
        assert!(preset_command(Platform::Linux, "toast")
            .unwrap()
            .starts_with("notify-send"));
        assert!(matches!(
            preset_command(Platform::Linux, "siren"),
            Err(HelperError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_linux_beep_keeps_literal_escape() {
        let beep = preset_command(Platform::Linux, "beep").unwrap();
        assert!(beep.ends_with(r"echo -e '\a'"));
    }

    #[test]
    fn test_build_sound_command_encodes_script() {
        let command = build_sound_command("chimes.wav", 50);
        let encoded = command
            .strip_prefix("powershell -NoProfile -ExecutionPolicy Bypass -EncodedCommand ")
            .unwrap();

        let bytes = BASE64_STANDARD.decode(encoded).unwrap();
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let script = String::from_utf16(&units).unwrap();

        assert!(script.contains("$p.Volume = 0.50\n"));
        assert!(script.contains(r#"$p.Open([uri]"C:\Windows\Media\chimes.wav")"#));
        assert!(script.contains("while (-not $p.HasAudio) { Start-Sleep -Milliseconds 50 }"));
    }

    #[test]
    fn test_full_volume() {
        let command = build_sound_command("ding.wav", 255);
        assert_eq!(command, build_sound_command("ding.wav", 100));
    }

    #[test]
    fn test_list_sounds_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["tada.wav", "Alarm01.WAV", "readme.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("folder.wav")).unwrap();

        assert_eq!(list_sounds(dir.path()), vec!["Alarm01.WAV", "tada.wav"]);
        assert!(list_sounds(&dir.path().join("missing")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_reports_failure() {
        assert!(run_shell(Platform::Linux, "true").is_ok());
        assert!(matches!(
            run_shell(Platform::Linux, "exit 3"),
            Err(HelperError::ToolFailed { .. })
        ));
    }
}
