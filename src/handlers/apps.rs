//! Application launch and close adapters
//!
//! Thin wrappers over the platform launcher. Resolution of friendly names
//! to installed applications is the launcher's job; these handlers only
//! hand the name over and report the outcome.

use super::Handler;
use crate::core::error::{Result, VesperError};
use std::process::Command;

pub struct AppOpenHandler;

impl Handler for AppOpenHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(app = target, "opening application");
        open_app(target)
    }
}

pub struct AppCloseHandler;

impl Handler for AppCloseHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(app = target, "closing application");
        close_app(target)
    }
}

#[cfg(target_os = "windows")]
fn open_app(name: &str) -> Result<bool> {
    // `start` resolves registered application names and documents alike.
    let status = Command::new("cmd")
        .args(["/C", "start", "", name])
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to launch {name}: {e}")))?;
    Ok(status.success())
}

#[cfg(target_os = "macos")]
fn open_app(name: &str) -> Result<bool> {
    let status = Command::new("open")
        .args(["-a", name])
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to launch {name}: {e}")))?;
    Ok(status.success())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_app(name: &str) -> Result<bool> {
    // Detached spawn; the command name is the app name.
    Command::new(name)
        .spawn()
        .map(|_| true)
        .map_err(|e| VesperError::Handler(format!("failed to launch {name}: {e}")))
}

#[cfg(target_os = "windows")]
fn close_app(name: &str) -> Result<bool> {
    let image = if name.ends_with(".exe") {
        name.to_string()
    } else {
        format!("{name}.exe")
    };
    let status = Command::new("taskkill")
        .args(["/F", "/IM", &image])
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to close {name}: {e}")))?;
    // taskkill exits nonzero when no such process exists.
    Ok(status.success())
}

#[cfg(unix)]
fn close_app(name: &str) -> Result<bool> {
    let status = Command::new("pkill")
        .args(["-f", name])
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to close {name}: {e}")))?;
    // pkill exits 1 when nothing matched; the app simply wasn't running.
    Ok(status.success())
}
