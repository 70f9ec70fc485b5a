//! Browser-routed handlers: web search and media playback
//!
//! Each handler builds a search URL and hands it to a `UrlOpener`. Playback
//! goes through the YouTube results page; picking and starting the first
//! result is the browser's (or the user's) side of the boundary.

use super::Handler;
use crate::core::error::{Result, VesperError};
use std::process::Command;
use std::sync::Arc;

/// Seam for opening a URL in the user's browser
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<bool>;
}

/// Opens URLs with the platform opener
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<bool> {
        open_url(url)
    }
}

#[cfg(target_os = "windows")]
fn open_url(url: &str) -> Result<bool> {
    let status = Command::new("cmd")
        .args(["/C", "start", "", url])
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open browser: {e}")))?;
    Ok(status.success())
}

#[cfg(target_os = "macos")]
fn open_url(url: &str) -> Result<bool> {
    let status = Command::new("open")
        .arg(url)
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open browser: {e}")))?;
    Ok(status.success())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url(url: &str) -> Result<bool> {
    let status = Command::new("xdg-open")
        .arg(url)
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open browser: {e}")))?;
    Ok(status.success())
}

/// Space-to-plus query encoding, as search engines accept in `q=`
fn plus_encode(query: &str) -> String {
    query.trim().replace(' ', "+")
}

pub fn google_search_url(query: &str) -> String {
    format!("https://www.google.com/search?q={}", plus_encode(query))
}

pub fn youtube_search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        plus_encode(query)
    )
}

pub struct GoogleSearchHandler {
    opener: Arc<dyn UrlOpener>,
}

impl GoogleSearchHandler {
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }
}

impl Handler for GoogleSearchHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(query = target, "google search");
        self.opener.open(&google_search_url(target))
    }
}

pub struct YoutubeSearchHandler {
    opener: Arc<dyn UrlOpener>,
}

impl YoutubeSearchHandler {
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }
}

impl Handler for YoutubeSearchHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(query = target, "youtube search");
        self.opener.open(&youtube_search_url(target))
    }
}

pub struct PlayHandler {
    opener: Arc<dyn UrlOpener>,
}

impl PlayHandler {
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }
}

impl Handler for PlayHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(media = target, "playing via youtube");
        self.opener.open(&youtube_search_url(target))
    }
}
