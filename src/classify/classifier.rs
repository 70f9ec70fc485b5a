//! Two-tier intent classification
//!
//! One utterance in, an ordered decision list out. Deterministic fast
//! paths short-circuit the network round trip for short, high-frequency
//! phrasing the primary model is unreliable on. The primary pass is
//! validated against the verb registry; any transport error, timeout, or
//! invalid response lands on the keyword fallback. `classify` never
//! errors and never returns an empty list.

use crate::classify::client::LlmClient;
use crate::classify::context::ClassifierContext;
use crate::classify::fallback;
use crate::core::config::AssistantConfig;
use crate::verbs::VerbRegistry;

/// Bare exit phrasing recognized without classification
const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye", "stop"];

/// Words allowed alongside an exit word ("bye vesper", "stop now please")
const EXIT_FILLER: &[&str] = &["now", "please"];

/// Companions that make "save" editor-bound
const SAVE_HINTS: &[&str] = &["file", "notepad", "document", "text", "the"];

const EDITOR_WORDS: &[&str] = &["notepad", "editor"];
const AUTHORING_HINTS: &[&str] = &["create", "make", "joke", "poem", "story"];

pub struct IntentClassifier {
    client: Option<LlmClient>,
    context: ClassifierContext,
    registry: VerbRegistry,
}

impl IntentClassifier {
    /// Build a classifier from config
    ///
    /// Without a configured API key the primary pass is disabled and every
    /// utterance goes through the fast paths and fallback rules.
    pub fn new(config: &AssistantConfig, registry: VerbRegistry) -> Self {
        let client = match LlmClient::new(&config.classifier) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("primary classifier unavailable ({e}); keyword rules only");
                None
            }
        };

        Self {
            client,
            context: ClassifierContext::new(config.assistant_name.clone(), config.history_limit),
            registry,
        }
    }

    /// Classify one utterance into an ordered decision list
    pub async fn classify(&mut self, utterance: &str) -> Vec<String> {
        let utterance = utterance.trim();

        if let Some(decision) = self.prefilter(utterance) {
            tracing::debug!(?decision, "fast path");
            return decision;
        }

        if let Some(client) = &self.client {
            match client.complete(&self.context.system_prompt(), utterance).await {
                Ok(raw) => {
                    if let Some(decision) = self.validate(&raw) {
                        tracing::debug!(?decision, "primary classification");
                        self.context.record(utterance, &decision.join(", "));
                        return decision;
                    }
                    tracing::warn!(response = %raw, "invalid primary response; falling back");
                }
                Err(e) => {
                    tracing::warn!("primary classifier failed ({e}); falling back");
                }
            }
        }

        vec![fallback::classify(utterance)]
    }

    /// Deterministic routes checked before any network call
    fn prefilter(&self, utterance: &str) -> Option<Vec<String>> {
        let lower = utterance.to_lowercase();

        if lower.contains("save") && SAVE_HINTS.iter().any(|w| lower.contains(w)) {
            return Some(vec![format!("content {utterance}")]);
        }
        if ["write", "type"].iter().any(|w| lower.contains(w))
            && EDITOR_WORDS.iter().any(|w| lower.contains(w))
        {
            return Some(vec![format!("content {utterance}")]);
        }
        if EDITOR_WORDS.iter().any(|w| lower.contains(w))
            && AUTHORING_HINTS.iter().any(|w| lower.contains(w))
        {
            return Some(vec![format!("content {utterance}")]);
        }
        if self.is_exit_phrase(&lower) {
            return Some(vec!["exit".to_string()]);
        }

        None
    }

    /// True when the utterance is nothing but exit phrasing, optionally
    /// addressed to the assistant by name
    fn is_exit_phrase(&self, lower: &str) -> bool {
        let name = self.context.assistant_name().to_lowercase();
        let mut saw_exit_word = false;

        for word in lower.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&word) {
                saw_exit_word = true;
            } else if word != name && !EXIT_FILLER.contains(&word) {
                return false;
            }
        }

        saw_exit_word
    }

    /// Validate a primary response against the registry
    ///
    /// Keeps only comma-separated entries whose prefix resolves to a
    /// registered verb. The whole response is invalid when nothing
    /// survives or an entry still carries the `(query)` template marker.
    fn validate(&self, raw: &str) -> Option<Vec<String>> {
        let cleaned = raw.replace('\n', " ");
        let kept: Vec<String> = cleaned
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty() && self.registry.resolve(entry).is_some())
            .map(str::to_string)
            .collect();

        if kept.is_empty() || kept.iter().any(|entry| entry.contains("(query)")) {
            return None;
        }
        Some(kept)
    }
}
