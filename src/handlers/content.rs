//! Content-authoring handler
//!
//! "write a joke on notepad" style commands land here with the whole
//! phrase as the target. The handler derives the topic, composes text for
//! it, writes the text under the notes directory, and opens the file in
//! the configured editor. Composition is deterministic; richer generation
//! belongs to the chat collaborator, not this seam.

use super::Handler;
use crate::core::error::{Result, VesperError};
use std::path::PathBuf;
use std::process::Command;

/// Phrases stripped from the target when deriving the topic
const AUTHORING_PREFIXES: &[&str] = &[
    "write", "create", "generate", "make", "type", "draft",
];
const EDITOR_PHRASES: &[&str] = &["on notepad", "in notepad", "to notepad", "notepad", "in the editor"];

pub struct ContentHandler {
    notes_dir: PathBuf,
    editor_command: String,
}

impl ContentHandler {
    pub fn new(notes_dir: PathBuf, editor_command: String) -> Self {
        Self {
            notes_dir,
            editor_command,
        }
    }
}

impl Handler for ContentHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        let topic = extract_topic(target);
        let text = compose(&topic);
        let path = self.notes_dir.join(format!("{}.txt", slug(&topic)));

        std::fs::create_dir_all(&self.notes_dir)?;
        std::fs::write(&path, &text)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "content written");

        // A written note with no editor is still a completed command,
        // just a degraded one.
        match open_in_editor(&self.editor_command, &path) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!("editor did not open: {e}");
                Ok(false)
            }
        }
    }
}

fn open_in_editor(editor_command: &str, path: &std::path::Path) -> Result<()> {
    let mut parts = editor_command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| VesperError::Config("empty editor command".into()))?;
    Command::new(program)
        .args(parts)
        .arg(path)
        .spawn()
        .map_err(|e| VesperError::Handler(format!("failed to start editor: {e}")))?;
    Ok(())
}

/// Strip authoring verbs, articles, and editor references from the target
fn extract_topic(target: &str) -> String {
    let mut topic = target.to_lowercase();
    for phrase in EDITOR_PHRASES {
        topic = topic.replace(phrase, " ");
    }
    let words: Vec<&str> = topic
        .split_whitespace()
        .filter(|w| !AUTHORING_PREFIXES.contains(w) && *w != "a" && *w != "an" && *w != "the")
        .collect();
    let topic = words.join(" ");
    if topic.is_empty() {
        "note".to_string()
    } else {
        topic
    }
}

/// Deterministic composition for common requests, with a plain note as the
/// general case
fn compose(topic: &str) -> String {
    if topic.contains("joke") {
        return "Why do programmers prefer dark mode?\nBecause light attracts bugs.\n".into();
    }
    if topic.contains("poem") {
        return "The cursor blinks, the evening fades,\nA quiet hum of small machines;\nThe day dissolves in soft cascades\nOf half-remembered in-betweens.\n".into();
    }
    if topic.contains("hello") {
        return "Hello World!\n".into();
    }
    if topic.contains("test") {
        return "This is a test note.\n".into();
    }
    format!("Notes: {topic}\n\n- \n")
}

/// First few topic words as a filesystem-safe file stem
fn slug(topic: &str) -> String {
    let stem: String = topic
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.is_empty() {
        "note".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_topic_strips_authoring_phrasing() {
        assert_eq!(extract_topic("write a joke on notepad"), "joke");
        assert_eq!(extract_topic("create a poem about sunset"), "poem about sunset");
        assert_eq!(extract_topic("type hello world"), "hello world");
    }

    #[test]
    fn test_extract_topic_defaults_to_note() {
        assert_eq!(extract_topic("write"), "note");
        assert_eq!(extract_topic(""), "note");
    }

    #[test]
    fn test_compose_is_deterministic() {
        assert_eq!(compose("joke"), compose("joke"));
        assert!(compose("poem about rain").contains('\n'));
        assert!(compose("shopping list").starts_with("Notes: shopping list"));
    }

    #[test]
    fn test_slug_is_filesystem_safe() {
        assert_eq!(slug("joke"), "joke");
        assert_eq!(slug("poem about the sea at dawn"), "poem_about_the_sea");
        assert_eq!(slug("a/b\\c?"), "abc");
    }
}
