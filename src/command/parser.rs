//! Turn one raw intent into a `(verb_tag, target)` pair
//!
//! Intents arrive in two shapes: mini-language strings from the classifier
//! ("open notepad", "google search rust traits") and pre-tokenized sequences
//! from programmatic callers (["open", "notepad"]). Both are accepted
//! through `CommandInput`, normalized once at this boundary.

use crate::verbs::VerbRegistry;
use std::fmt;

/// One intent in either of the accepted input shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandInput {
    Text(String),
    Tokens(Vec<String>),
}

impl From<&str> for CommandInput {
    fn from(text: &str) -> Self {
        CommandInput::Text(text.to_string())
    }
}

impl From<String> for CommandInput {
    fn from(text: String) -> Self {
        CommandInput::Text(text)
    }
}

impl From<Vec<String>> for CommandInput {
    fn from(tokens: Vec<String>) -> Self {
        CommandInput::Tokens(tokens)
    }
}

impl fmt::Display for CommandInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandInput::Text(text) => f.write_str(text),
            CommandInput::Tokens(tokens) => f.write_str(&tokens.join(" ")),
        }
    }
}

/// Parse an intent into `(verb_tag, target)`
///
/// String form: the registry's multi-word verbs are tested first, longest
/// canonical form first; on a hit the target is the remainder of the
/// original string with its case preserved. Otherwise the input splits at
/// the first whitespace boundary and the target may be empty.
///
/// Sequence form: the first element is the verb tag (lower-cased), the rest
/// join with single spaces.
///
/// Empty input of either shape yields `("", "")`, which callers treat as
/// unparsable.
pub fn parse(registry: &VerbRegistry, input: &CommandInput) -> (String, String) {
    match input {
        CommandInput::Text(text) => parse_text(registry, text),
        CommandInput::Tokens(tokens) => parse_tokens(tokens),
    }
}

fn parse_text(registry: &VerbRegistry, text: &str) -> (String, String) {
    let text = text.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }

    // Multi-word verbs first, longest canonical form first, so that
    // "google search cats" never splits into ("google", "search cats").
    for verb in registry.all_verbs().iter().filter(|v| v.is_multi_word()) {
        let prefix = verb.canonical();
        if text.len() >= prefix.len()
            && text.is_char_boundary(prefix.len())
            && text[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            let target = text[prefix.len()..].trim();
            return (prefix.to_string(), target.to_string());
        }
    }

    match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head.to_lowercase(), rest.trim().to_string()),
        None => (text.to_lowercase(), String::new()),
    }
}

fn parse_tokens(tokens: &[String]) -> (String, String) {
    match tokens.split_first() {
        None => (String::new(), String::new()),
        Some((head, rest)) => {
            let target = rest.join(" ").trim().to_string();
            (head.trim().to_lowercase(), target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> VerbRegistry {
        VerbRegistry::new()
    }

    #[test]
    fn test_parse_single_word_verb() {
        let (verb, target) = parse(&registry(), &"open notepad".into());
        assert_eq!((verb.as_str(), target.as_str()), ("open", "notepad"));
    }

    #[test]
    fn test_parse_multi_word_verb() {
        let (verb, target) = parse(&registry(), &"google search rust traits".into());
        assert_eq!((verb.as_str(), target.as_str()), ("google search", "rust traits"));
    }

    #[test]
    fn test_parse_preserves_target_case() {
        let (verb, target) = parse(&registry(), &"open Notepad".into());
        assert_eq!((verb.as_str(), target.as_str()), ("open", "Notepad"));

        let (verb, target) = parse(&registry(), &"Google Search Rust Programming".into());
        assert_eq!(
            (verb.as_str(), target.as_str()),
            ("google search", "Rust Programming")
        );
    }

    #[test]
    fn test_parse_verb_without_target() {
        let (verb, target) = parse(&registry(), &"exit".into());
        assert_eq!((verb.as_str(), target.as_str()), ("exit", ""));
    }

    #[test]
    fn test_parse_compound_target_is_opaque() {
        // The pipe sub-format belongs to the handler, not the parser.
        let (verb, target) = parse(&registry(), &"copy file a.txt|b.txt".into());
        assert_eq!((verb.as_str(), target.as_str()), ("copy file", "a.txt|b.txt"));
    }

    #[test]
    fn test_parse_token_sequences() {
        let (verb, target) = parse(&registry(), &CommandInput::Tokens(vec![]));
        assert_eq!((verb.as_str(), target.as_str()), ("", ""));

        let (verb, target) = parse(&registry(), &vec!["open".to_string()].into());
        assert_eq!((verb.as_str(), target.as_str()), ("open", ""));

        let (verb, target) = parse(
            &registry(),
            &vec!["open".to_string(), "notepad".to_string()].into(),
        );
        assert_eq!((verb.as_str(), target.as_str()), ("open", "notepad"));

        let (verb, target) = parse(
            &registry(),
            &vec!["PLAY".to_string(), "let".to_string(), "her".to_string(), "go".to_string()]
                .into(),
        );
        assert_eq!((verb.as_str(), target.as_str()), ("play", "let her go"));
    }

    #[test]
    fn test_parse_empty_text_is_unparsable() {
        let (verb, target) = parse(&registry(), &"".into());
        assert_eq!((verb.as_str(), target.as_str()), ("", ""));

        let (verb, target) = parse(&registry(), &"   ".into());
        assert_eq!((verb.as_str(), target.as_str()), ("", ""));
    }

    #[test]
    fn test_parse_unknown_verb_still_splits() {
        // Resolution failures are the dispatcher's concern; the parser just
        // splits.
        let (verb, target) = parse(&registry(), &"frobnicate the widget".into());
        assert_eq!((verb.as_str(), target.as_str()), ("frobnicate", "the widget"));
    }

    proptest! {
        #[test]
        fn prop_registered_verb_round_trips(
            verb_idx in 0usize..crate::verbs::Verb::ALL.len(),
            target in "[a-zA-Z0-9][a-zA-Z0-9 .|_-]{0,40}",
        ) {
            let registry = registry();
            let verb = crate::verbs::Verb::ALL[verb_idx];
            let target = target.trim().to_string();
            prop_assume!(!target.is_empty());

            let input = format!("{} {}", verb.canonical(), target);
            // Skip inputs where the target extends the verb into a longer
            // registered form ("open" + "file x" reads as "open file x").
            prop_assume!(registry.resolve(&input) == Some(verb));

            let (tag, parsed_target) = parse(&registry, &input.into());
            prop_assert_eq!(tag, verb.canonical());
            prop_assert_eq!(parsed_target, target);
        }

        #[test]
        fn prop_token_form_joins_tail(tokens in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
            let registry = registry();
            let (tag, target) = parse(&registry, &CommandInput::Tokens(tokens.clone()));
            prop_assert_eq!(tag, tokens[0].clone());
            prop_assert_eq!(target, tokens[1..].join(" "));
        }
    }
}
