//! Handler seams the dispatcher binds verbs to
//!
//! Every handler receives the command target and answers with a tri-state:
//! `Ok(true)` success, `Ok(false)` completed-with-warning, `Err` hard
//! failure. Handlers are synchronous and may block on process spawn,
//! filesystem, or network I/O; the dispatcher isolates each invocation on
//! its own blocking task.

pub mod apps;
pub mod content;
pub mod files;
pub mod system;
pub mod web;

use crate::core::config::AssistantConfig;
use crate::core::error::Result;
use crate::verbs::{Capability, FileOp};
use std::collections::HashMap;
use std::sync::Arc;

pub use apps::{AppCloseHandler, AppOpenHandler};
pub use content::ContentHandler;
pub use files::FileHandler;
pub use system::SystemHandler;
pub use web::{GoogleSearchHandler, PlayHandler, SystemBrowser, UrlOpener, YoutubeSearchHandler};

/// One executable capability behind a verb
pub trait Handler: Send + Sync {
    /// Execute against `target`
    fn execute(&self, target: &str) -> Result<bool>;
}

/// Capability-to-handler bindings consulted by the dispatcher
///
/// A registered verb whose capability has no binding is skipped with a
/// diagnostic rather than failing the batch.
#[derive(Clone, Default)]
pub struct HandlerSet {
    bindings: HashMap<Capability, Arc<dyn Handler>>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, capability: Capability, handler: Arc<dyn Handler>) -> &mut Self {
        self.bindings.insert(capability, handler);
        self
    }

    pub fn get(&self, capability: Capability) -> Option<Arc<dyn Handler>> {
        self.bindings.get(&capability).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The production automation set
    ///
    /// Binds application, media, search, system, content, and file-family
    /// capabilities. `Chat`, `Realtime`, and `Exit` are routed before
    /// dispatch; `GenerateImage` and `Reminder` stay unbound by default.
    pub fn automation_defaults(config: &AssistantConfig) -> Self {
        let browser = Arc::new(SystemBrowser);
        let mut set = Self::new();

        set.bind(Capability::AppOpen, Arc::new(AppOpenHandler));
        set.bind(Capability::AppClose, Arc::new(AppCloseHandler));
        set.bind(
            Capability::MediaPlay,
            Arc::new(PlayHandler::new(browser.clone())),
        );
        set.bind(
            Capability::GoogleSearch,
            Arc::new(GoogleSearchHandler::new(browser.clone())),
        );
        set.bind(
            Capability::YoutubeSearch,
            Arc::new(YoutubeSearchHandler::new(browser)),
        );
        set.bind(Capability::System, Arc::new(SystemHandler));
        set.bind(
            Capability::Content,
            Arc::new(ContentHandler::new(
                config.notes_dir.clone(),
                config.editor_command.clone(),
            )),
        );
        for op in FileOp::ALL {
            set.bind(
                Capability::File(op),
                Arc::new(FileHandler::new(
                    op,
                    config.files_root.clone(),
                    config.editor_command.clone(),
                )),
            );
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automation_defaults_cover_the_automation_verbs() {
        let set = HandlerSet::automation_defaults(&AssistantConfig::default());

        for capability in [
            Capability::AppOpen,
            Capability::AppClose,
            Capability::MediaPlay,
            Capability::GoogleSearch,
            Capability::YoutubeSearch,
            Capability::System,
            Capability::Content,
        ] {
            assert!(set.get(capability).is_some(), "{capability:?} unbound");
        }
        for op in FileOp::ALL {
            assert!(set.get(Capability::File(op)).is_some(), "{op:?} unbound");
        }

        // Conversational and integrator capabilities are not dispatched here.
        assert!(set.get(Capability::Chat).is_none());
        assert!(set.get(Capability::GenerateImage).is_none());
        assert!(set.get(Capability::Reminder).is_none());
    }
}
