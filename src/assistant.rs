//! Per-turn orchestration
//!
//! One utterance becomes one classified decision list, which is split by
//! capability: conversational decisions go to the responders, `exit`
//! surfaces to the caller, and everything else is handed to the
//! dispatcher as one automation batch.

use crate::classify::{IntentClassifier, LlmClient};
use crate::command::parser::{parse, CommandInput};
use crate::command::{DispatchReport, Dispatcher};
use crate::core::config::AssistantConfig;
use crate::core::error::Result;
use crate::handlers::HandlerSet;
use crate::verbs::{Capability, VerbRegistry};
use std::collections::VecDeque;

/// An LLM-backed conversational responder
///
/// Covers both `general` chat and `realtime` queries; the two differ only
/// in preamble. Keeps its own bounded in-memory history; persistence of
/// the chat log is a collaborator concern.
pub struct ChatResponder {
    client: LlmClient,
    preamble: String,
    history: VecDeque<(String, String)>,
    history_limit: usize,
}

impl ChatResponder {
    pub fn general(config: &AssistantConfig) -> Result<Self> {
        let preamble = format!(
            "You are {}, a precise and helpful assistant talking to {}. \
             Answer the question directly, in English, without filler or \
             meta-commentary.",
            config.assistant_name, config.user_name
        );
        Self::with_preamble(config, preamble)
    }

    pub fn realtime(config: &AssistantConfig) -> Result<Self> {
        let preamble = format!(
            "You are {}, a precise and helpful assistant talking to {}. \
             The question concerns current events or live information; \
             answer with the freshest knowledge you have, say when it may \
             be stale, and keep it brief.",
            config.assistant_name, config.user_name
        );
        Self::with_preamble(config, preamble)
    }

    fn with_preamble(config: &AssistantConfig, preamble: String) -> Result<Self> {
        Ok(Self {
            client: LlmClient::new(&config.chat)?,
            preamble,
            history: VecDeque::new(),
            history_limit: config.history_limit,
        })
    }

    fn system_prompt(&self) -> String {
        let mut prompt = self.preamble.clone();
        if !self.history.is_empty() {
            prompt.push_str("\n\nRecent conversation:\n");
            for (user, reply) in &self.history {
                prompt.push_str(&format!("user: {user}\nassistant: {reply}\n"));
            }
        }
        prompt
    }

    pub async fn reply(&mut self, query: &str) -> Result<String> {
        let answer = self.client.complete(&self.system_prompt(), query).await?;
        let answer = answer.trim().to_string();
        self.history.push_back((query.to_string(), answer.clone()));
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        Ok(answer)
    }
}

/// The classified decision list, split by destination
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition {
    /// Targets of `general` decisions, verb stripped
    pub chat: Vec<String>,
    /// Targets of `realtime` decisions, verb stripped
    pub realtime: Vec<String>,
    /// Everything bound for the dispatcher, original form preserved
    pub automation: Vec<CommandInput>,
    pub exit: bool,
}

/// Split a decision list by capability
///
/// Unrecognized decisions go to the automation batch so the dispatcher
/// records them as skip diagnostics; diagnostics live in one place.
pub fn partition(registry: &VerbRegistry, decision: &[String]) -> Partition {
    let mut split = Partition::default();

    for intent in decision {
        let input = CommandInput::from(intent.as_str());
        let (verb_tag, target) = parse(registry, &input);
        let capability = registry.resolve(&verb_tag).map(|verb| verb.capability());

        match capability {
            Some(Capability::Chat) => split.chat.push(target),
            Some(Capability::Realtime) => split.realtime.push(target),
            Some(Capability::Exit) => split.exit = true,
            _ => split.automation.push(input),
        }
    }

    split
}

/// What one assistant turn produced
#[derive(Debug)]
pub struct TurnReport {
    pub decision: Vec<String>,
    /// Responder answers, in decision order within each class
    pub replies: Vec<String>,
    pub dispatch: Option<DispatchReport>,
    pub exit: bool,
}

pub struct Assistant {
    registry: VerbRegistry,
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    chat: Option<ChatResponder>,
    realtime: Option<ChatResponder>,
}

impl Assistant {
    /// Assemble a full assistant from config: classifier, default
    /// automation handlers, and (when a chat key is configured) the
    /// conversational responders.
    pub fn new(config: &AssistantConfig) -> Self {
        let registry = VerbRegistry::new();
        let classifier = IntentClassifier::new(config, registry.clone());
        let dispatcher = Dispatcher::new(
            registry.clone(),
            HandlerSet::automation_defaults(config),
        );

        let chat = ChatResponder::general(config)
            .map_err(|e| tracing::warn!("chat responder unavailable: {e}"))
            .ok();
        let realtime = ChatResponder::realtime(config)
            .map_err(|e| tracing::warn!("realtime responder unavailable: {e}"))
            .ok();

        Self {
            registry,
            classifier,
            dispatcher,
            chat,
            realtime,
        }
    }

    /// Construct with an explicit dispatcher, for embedding and tests
    pub fn with_dispatcher(config: &AssistantConfig, dispatcher: Dispatcher) -> Self {
        let registry = VerbRegistry::new();
        let classifier = IntentClassifier::new(config, registry.clone());
        Self {
            registry,
            classifier,
            dispatcher,
            chat: None,
            realtime: None,
        }
    }

    /// Run one full turn: classify, partition, respond, dispatch
    pub async fn handle_utterance(&mut self, utterance: &str) -> TurnReport {
        let decision = self.classifier.classify(utterance).await;
        tracing::info!(?decision, "decision");

        let split = partition(&self.registry, &decision);
        let mut replies = Vec::new();

        for query in &split.chat {
            replies.push(self.respond(query, false).await);
        }
        for query in &split.realtime {
            replies.push(self.respond(query, true).await);
        }

        let dispatch = if split.automation.is_empty() {
            None
        } else {
            Some(self.dispatcher.dispatch(&split.automation).await)
        };

        TurnReport {
            decision,
            replies,
            dispatch,
            exit: split.exit,
        }
    }

    /// Answer one conversational query, degrading to a canned reply when
    /// the responder is offline
    async fn respond(&mut self, query: &str, realtime: bool) -> String {
        let responder = if realtime {
            self.realtime.as_mut()
        } else {
            self.chat.as_mut()
        };

        match responder {
            Some(responder) => match responder.reply(query).await {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!("responder failed: {e}");
                    "I couldn't reach the language model just now; please try again.".into()
                }
            },
            None => {
                tracing::debug!(query, "no responder configured");
                "Chat is not configured; set an API key to enable conversational replies.".into()
            }
        }
    }
}
