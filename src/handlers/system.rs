//! OS shell command handler
//!
//! The classifier routes volume/mute/brightness phrasing here as
//! `system <task>`. Known task names translate to platform commands;
//! anything else runs through the shell as-is.

use super::Handler;
use crate::core::error::{Result, VesperError};
use std::process::Command;

pub struct SystemHandler;

impl Handler for SystemHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        let command = translate(target).unwrap_or_else(|| target.to_string());
        tracing::info!(task = target, command = %command, "system command");
        run_shell(&command)
    }
}

/// Map the classifier's task names onto platform commands
fn translate(task: &str) -> Option<String> {
    let task = task.to_lowercase();
    let task = task.trim();
    if task.contains("unmute") {
        return Some(unmute_command());
    }
    if task.contains("mute") {
        return Some(mute_command());
    }
    if task.contains("volume") && (task.contains("up") || task.contains("increase")) {
        return Some(volume_command(true));
    }
    if task.contains("volume") && (task.contains("down") || task.contains("decrease")) {
        return Some(volume_command(false));
    }
    None
}

#[cfg(target_os = "macos")]
fn mute_command() -> String {
    "osascript -e 'set volume output muted true'".into()
}

#[cfg(target_os = "macos")]
fn unmute_command() -> String {
    "osascript -e 'set volume output muted false'".into()
}

#[cfg(target_os = "macos")]
fn volume_command(up: bool) -> String {
    if up {
        "osascript -e 'set volume output volume ((output volume of (get volume settings)) + 10)'"
            .into()
    } else {
        "osascript -e 'set volume output volume ((output volume of (get volume settings)) - 10)'"
            .into()
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn mute_command() -> String {
    "amixer -q set Master mute".into()
}

#[cfg(all(unix, not(target_os = "macos")))]
fn unmute_command() -> String {
    "amixer -q set Master unmute".into()
}

#[cfg(all(unix, not(target_os = "macos")))]
fn volume_command(up: bool) -> String {
    if up {
        "amixer -q set Master 10%+".into()
    } else {
        "amixer -q set Master 10%-".into()
    }
}

#[cfg(target_os = "windows")]
fn mute_command() -> String {
    // Key code 173 is the mute toggle.
    "powershell -c \"(New-Object -ComObject WScript.Shell).SendKeys([char]173)\"".into()
}

#[cfg(target_os = "windows")]
fn unmute_command() -> String {
    mute_command()
}

#[cfg(target_os = "windows")]
fn volume_command(up: bool) -> String {
    let key = if up { 175 } else { 174 };
    format!("powershell -c \"(New-Object -ComObject WScript.Shell).SendKeys([char]{key})\"")
}

#[cfg(unix)]
fn run_shell(command: &str) -> Result<bool> {
    let status = Command::new("sh")
        .args(["-c", command])
        .status()
        .map_err(|e| VesperError::Handler(format!("shell spawn failed: {e}")))?;
    Ok(status.success())
}

#[cfg(target_os = "windows")]
fn run_shell(command: &str) -> Result<bool> {
    let status = Command::new("cmd")
        .args(["/C", command])
        .status()
        .map_err(|e| VesperError::Handler(format!("shell spawn failed: {e}")))?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_recognizes_volume_tasks() {
        assert!(translate("mute").is_some());
        assert!(translate("unmute the sound").is_some());
        assert!(translate("volume up").is_some());
        assert!(translate("turn the volume down").is_some());
    }

    #[test]
    fn test_translate_passes_unknown_tasks_through() {
        assert_eq!(translate("rotate the screen"), None);
    }

    #[test]
    fn test_unmute_wins_over_mute_substring() {
        // "unmute" contains "mute"; order of checks matters.
        let unmute = translate("unmute").unwrap();
        let mute = translate("mute").unwrap();
        #[cfg(unix)]
        assert_ne!(unmute, mute);
        #[cfg(target_os = "windows")]
        assert_eq!(unmute, mute);
    }
}
