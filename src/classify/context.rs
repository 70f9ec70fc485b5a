//! Build the classification prompt
//!
//! The preamble teaches the decision grammar, a fixed set of few-shot
//! exchanges pins the output format, and a bounded rolling history of the
//! session's own turns keeps multi-turn phrasing ("open it again")
//! classifiable. The history is the only mutable state in the classifier.

use std::collections::VecDeque;

/// One user-utterance/decision pair
#[derive(Debug, Clone)]
pub struct Exchange {
    pub utterance: String,
    pub decision: String,
}

/// Prompt state for the primary classifier
pub struct ClassifierContext {
    assistant_name: String,
    history: VecDeque<Exchange>,
    history_limit: usize,
}

/// Decision grammar taught to the model
///
/// The model must answer with nothing but a comma-separated decision list;
/// every element starts with a registered verb.
const PREAMBLE: &str = "\
You are the decision layer of a personal assistant. You never answer the \
user's request yourself; you only label it. Respond with a single line: a \
comma-separated list of decisions, one per task the user asked for, in the \
order they asked. Each decision starts with exactly one of these verbs:

- 'general <query>' for anything a chat model can answer from its own \
knowledge, including incomplete or pronoun-only queries and questions about \
the current time or date.
- 'realtime <query>' for anything that needs fresh information: news, live \
status, or facts about specific people in the present.
- 'open <application or website>' / 'close <application>' to launch or quit \
applications; one decision per application.
- 'play <song>' to play music or video; one decision per song.
- 'generate image <prompt>' for image requests; one decision per image.
- 'reminder <datetime with message>' for reminder requests.
- 'system <task>' for volume, mute, unmute, or brightness tasks.
- 'content <topic>' for requests to write, type, or save anything in the \
editor: applications, code, emails, jokes, poems, and file saving.
- 'google search <topic>' / 'youtube search <topic>' for explicit searches.
- 'exit' when the user says goodbye or ends the conversation.

Split compound requests into multiple decisions. If you cannot decide, use \
'general <query>'. Do not explain, do not add anything else.";

/// Fixed few-shot exchanges, kept in the same shape the model must emit
const EXAMPLES: &[(&str, &str)] = &[
    ("how are you?", "general how are you?"),
    ("open chrome and firefox", "open chrome, open firefox"),
    (
        "open chrome and tell me about mahatma gandhi",
        "open chrome, general tell me about mahatma gandhi",
    ),
    ("what's today's headline?", "realtime what's today's headline?"),
    ("write a joke on notepad", "content write a joke on notepad"),
    ("save the file", "content save the file"),
    ("play let her go", "play let her go"),
    (
        "what is the time and remind me of my meeting at 9:00pm on 25th june",
        "general what is the time, reminder 9:00pm 25th june meeting",
    ),
    ("bye", "exit"),
];

impl ClassifierContext {
    pub fn new(assistant_name: impl Into<String>, history_limit: usize) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            history: VecDeque::new(),
            history_limit,
        }
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    /// Assemble the full system prompt: preamble, examples, recent turns
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::from(PREAMBLE);

        prompt.push_str("\n\nExamples:\n");
        for (utterance, decision) in EXAMPLES {
            prompt.push_str(&format!("user: {utterance}\ndecision: {decision}\n"));
        }

        if !self.history.is_empty() {
            prompt.push_str("\nRecent turns:\n");
            for exchange in &self.history {
                prompt.push_str(&format!(
                    "user: {}\ndecision: {}\n",
                    exchange.utterance, exchange.decision
                ));
            }
        }

        prompt
    }

    /// Append one classified turn to the rolling history
    pub fn record(&mut self, utterance: &str, decision: &str) {
        self.history.push_back(Exchange {
            utterance: utterance.to_string(),
            decision: decision.to_string(),
        });
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_grammar_and_examples() {
        let context = ClassifierContext::new("Vesper", 8);
        let prompt = context.system_prompt();
        assert!(prompt.contains("comma-separated"));
        assert!(prompt.contains("open chrome, open firefox"));
        assert!(!prompt.contains("Recent turns"));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut context = ClassifierContext::new("Vesper", 2);
        context.record("open chrome", "open chrome");
        context.record("play a song", "play a song");
        context.record("bye", "exit");

        assert_eq!(context.history.len(), 2);
        assert_eq!(context.history.front().unwrap().utterance, "play a song");

        let prompt = context.system_prompt();
        assert!(prompt.contains("Recent turns"));
        assert!(prompt.contains("decision: exit"));
        assert!(!prompt.contains("open chrome\ndecision: open chrome"));
    }
}
