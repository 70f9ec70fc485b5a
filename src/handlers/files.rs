//! The file-command family
//!
//! One handler per operation, all sharing path resolution and the
//! `|`-delimited compound-target format: `source|destination` for
//! copy/move/rename and `path|content` for create. Relative targets
//! resolve under the configured files root.

use super::Handler;
use crate::core::error::{Result, VesperError};
use crate::verbs::FileOp;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct FileHandler {
    op: FileOp,
    root: PathBuf,
    editor_command: String,
}

impl FileHandler {
    pub fn new(op: FileOp, root: PathBuf, editor_command: String) -> Self {
        Self {
            op,
            root,
            editor_command,
        }
    }

    fn resolve(&self, target: &str) -> PathBuf {
        let path = Path::new(target.trim());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Handler for FileHandler {
    fn execute(&self, target: &str) -> Result<bool> {
        tracing::info!(op = ?self.op, target, "file command");
        match self.op {
            FileOp::Open => self.open(target),
            FileOp::Edit => self.edit(target),
            FileOp::Read => self.read(target),
            FileOp::Create => self.create(target),
            FileOp::Delete => self.delete(target),
            FileOp::Copy => self.copy(target),
            FileOp::Move | FileOp::Rename => self.rename(target),
            FileOp::List => self.list(target),
            FileOp::Info => self.info(target),
        }
    }
}

/// Split a `left|right` compound target
fn split_pair(target: &str) -> Result<(&str, &str)> {
    match target.split_once('|') {
        Some((left, right)) if !left.trim().is_empty() => Ok((left.trim(), right.trim())),
        _ => Err(VesperError::InvalidCommand(format!(
            "expected 'source|destination', got '{target}'"
        ))),
    }
}

impl FileHandler {
    fn open(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        if !path.exists() {
            return Err(VesperError::Handler(format!(
                "no such file: {}",
                path.display()
            )));
        }
        open_with_platform(&path)
    }

    fn edit(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        let mut parts = self.editor_command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| VesperError::Config("empty editor command".into()))?;
        Command::new(program)
            .args(parts)
            .arg(&path)
            .spawn()
            .map_err(|e| VesperError::Handler(format!("failed to start editor: {e}")))?;
        Ok(true)
    }

    fn read(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        let content = std::fs::read_to_string(&path)?;
        if content.is_empty() {
            tracing::warn!(path = %path.display(), "file is empty");
            return Ok(false);
        }
        let preview: String = content.chars().take(200).collect();
        tracing::info!(path = %path.display(), bytes = content.len(), %preview, "file read");
        Ok(true)
    }

    fn create(&self, target: &str) -> Result<bool> {
        // Content after the pipe is optional; a bare path makes an empty file.
        let (raw_path, content) = match target.split_once('|') {
            Some((p, c)) => (p.trim(), c),
            None => (target.trim(), ""),
        };
        if raw_path.is_empty() {
            return Err(VesperError::InvalidCommand("create file needs a path".into()));
        }
        let path = self.resolve(raw_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(true)
    }

    fn delete(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        let meta = std::fs::metadata(&path)?;
        if meta.is_dir() {
            // Only empty directories; recursive deletion is too sharp for a
            // voice command.
            std::fs::remove_dir(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        Ok(true)
    }

    fn copy(&self, target: &str) -> Result<bool> {
        let (src, dst) = split_pair(target)?;
        let (src, dst) = (self.resolve(src), self.resolve(dst));
        std::fs::copy(&src, &dst)?;
        Ok(true)
    }

    fn rename(&self, target: &str) -> Result<bool> {
        let (src, dst) = split_pair(target)?;
        let (src, dst) = (self.resolve(src), self.resolve(dst));
        std::fs::rename(&src, &dst)?;
        Ok(true)
    }

    fn list(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        let mut names: Vec<String> = std::fs::read_dir(&path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        tracing::info!(path = %path.display(), count = names.len(), entries = ?names, "directory listing");
        Ok(true)
    }

    fn info(&self, target: &str) -> Result<bool> {
        let path = self.resolve(target);
        let meta = std::fs::metadata(&path)?;
        let kind = if meta.is_dir() { "directory" } else { "file" };
        tracing::info!(
            path = %path.display(),
            kind,
            bytes = meta.len(),
            modified = ?meta.modified().ok(),
            "file info"
        );
        Ok(true)
    }
}

#[cfg(target_os = "windows")]
fn open_with_platform(path: &Path) -> Result<bool> {
    let status = Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open {}: {e}", path.display())))?;
    Ok(status.success())
}

#[cfg(target_os = "macos")]
fn open_with_platform(path: &Path) -> Result<bool> {
    let status = Command::new("open")
        .arg(path)
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open {}: {e}", path.display())))?;
    Ok(status.success())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_with_platform(path: &Path) -> Result<bool> {
    let status = Command::new("xdg-open")
        .arg(path)
        .status()
        .map_err(|e| VesperError::Handler(format!("failed to open {}: {e}", path.display())))?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(op: FileOp, root: &Path) -> FileHandler {
        FileHandler::new(op, root.to_path_buf(), "true".into())
    }

    #[test]
    fn test_create_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let create = handler(FileOp::Create, dir.path());
        let read = handler(FileOp::Read, dir.path());

        assert!(create.execute("notes.txt|hello there").unwrap());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "hello there"
        );
        assert!(read.execute("notes.txt").unwrap());
    }

    #[test]
    fn test_create_without_content_makes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let create = handler(FileOp::Create, dir.path());
        assert!(create.execute("empty.txt").unwrap());

        // Reading an empty file completes with a warning.
        let read = handler(FileOp::Read, dir.path());
        assert!(!read.execute("empty.txt").unwrap());
    }

    #[test]
    fn test_copy_and_rename_use_pipe_format() {
        let dir = tempfile::tempdir().unwrap();
        handler(FileOp::Create, dir.path())
            .execute("a.txt|payload")
            .unwrap();

        assert!(handler(FileOp::Copy, dir.path()).execute("a.txt|b.txt").unwrap());
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("b.txt").exists());

        assert!(handler(FileOp::Rename, dir.path()).execute("b.txt|c.txt").unwrap());
        assert!(!dir.path().join("b.txt").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("c.txt")).unwrap(),
            "payload"
        );
    }

    #[test]
    fn test_copy_rejects_missing_pipe() {
        let dir = tempfile::tempdir().unwrap();
        let err = handler(FileOp::Copy, dir.path()).execute("a.txt b.txt");
        assert!(err.is_err());
    }

    #[test]
    fn test_delete_refuses_nothing_but_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        handler(FileOp::Create, dir.path()).execute("gone.txt|x").unwrap();
        assert!(handler(FileOp::Delete, dir.path()).execute("gone.txt").unwrap());
        assert!(!dir.path().join("gone.txt").exists());

        // Deleting a missing path is a hard failure.
        assert!(handler(FileOp::Delete, dir.path()).execute("gone.txt").is_err());
    }

    #[test]
    fn test_list_and_info() {
        let dir = tempfile::tempdir().unwrap();
        handler(FileOp::Create, dir.path()).execute("one.txt|1").unwrap();
        handler(FileOp::Create, dir.path()).execute("two.txt|22").unwrap();

        // "." is the sentinel the dispatcher supplies for a bare "list files".
        assert!(handler(FileOp::List, dir.path()).execute(".").unwrap());
        assert!(handler(FileOp::Info, dir.path()).execute("two.txt").unwrap());
    }
}
