//! Deterministic keyword fallback
//!
//! Applied when the primary classifier is unreachable or answers garbage.
//! Precedence is the top-to-bottom order of `RULES`: an utterance that
//! matches several rules gets the first one. That order is carried
//! verbatim from the shipped product behavior; reordering it is a product
//! decision, not a refactor.

/// One fallback rule: a named predicate-plus-builder over the utterance
///
/// `apply` receives the trimmed original utterance and its lower-cased
/// form, and returns the single decision this rule produces, or `None` to
/// pass to the next rule.
pub struct FallbackRule {
    pub name: &'static str,
    apply: fn(utterance: &str, lower: &str) -> Option<String>,
}

impl FallbackRule {
    pub fn apply(&self, utterance: &str, lower: &str) -> Option<String> {
        (self.apply)(utterance, lower)
    }
}

/// The ordered rule list, first match wins
pub const RULES: &[FallbackRule] = &[
    FallbackRule { name: "save", apply: save_rule },
    FallbackRule { name: "write", apply: write_rule },
    FallbackRule { name: "open", apply: open_rule },
    FallbackRule { name: "close", apply: close_rule },
    FallbackRule { name: "play", apply: play_rule },
    FallbackRule { name: "search", apply: search_rule },
    FallbackRule { name: "image", apply: image_rule },
    FallbackRule { name: "reminder", apply: reminder_rule },
    FallbackRule { name: "system", apply: system_rule },
    FallbackRule { name: "realtime", apply: realtime_rule },
    FallbackRule { name: "exit", apply: exit_rule },
];

/// Classify one utterance with the rule list
///
/// Pure and deterministic; the same utterance always yields the same
/// decision. Falls through to `general <utterance>`.
pub fn classify(utterance: &str) -> String {
    let utterance = utterance.trim();
    let lower = utterance.to_lowercase();

    for rule in RULES {
        if let Some(decision) = rule.apply(utterance, &lower) {
            tracing::debug!(rule = rule.name, "fallback rule matched");
            return decision;
        }
    }

    format!("general {utterance}").trim().to_string()
}

fn contains_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lower.contains(w))
}

/// Remove every occurrence of the given words, collapsing whitespace
fn strip_words(lower: &str, words: &[&str]) -> String {
    let mut stripped = lower.to_string();
    for word in words {
        stripped = stripped.replace(word, " ");
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn save_rule(utterance: &str, lower: &str) -> Option<String> {
    lower
        .contains("save")
        .then(|| format!("content {utterance}"))
}

fn write_rule(utterance: &str, lower: &str) -> Option<String> {
    contains_any(lower, &["write", "type", "create text", "create file"])
        .then(|| format!("content {utterance}"))
}

fn open_rule(_utterance: &str, lower: &str) -> Option<String> {
    if !contains_any(lower, &["open", "launch", "start"]) {
        return None;
    }
    let app = strip_words(lower, &["open", "launch", "start"]);
    Some(format!("open {app}").trim().to_string())
}

fn close_rule(_utterance: &str, lower: &str) -> Option<String> {
    if !contains_any(lower, &["close", "exit app", "quit"]) {
        return None;
    }
    let app = strip_words(lower, &["close", "exit", "quit"]);
    // A bare "quit" has no app to close; let the exit rule claim it.
    if app.is_empty() {
        return None;
    }
    Some(format!("close {app}"))
}

fn play_rule(_utterance: &str, lower: &str) -> Option<String> {
    if !lower.contains("play") {
        return None;
    }
    let song = strip_words(lower, &["play"]);
    Some(format!("play {song}").trim().to_string())
}

fn search_rule(_utterance: &str, lower: &str) -> Option<String> {
    if !lower.contains("search") {
        return None;
    }
    if lower.contains("youtube") {
        let query = strip_words(lower, &["youtube", "search"]);
        Some(format!("youtube search {query}"))
    } else {
        let query = strip_words(lower, &["google", "search"]);
        Some(format!("google search {query}"))
    }
}

fn image_rule(_utterance: &str, lower: &str) -> Option<String> {
    if !contains_any(lower, &["generate image", "create image", "make image"]) {
        return None;
    }
    let prompt = strip_words(
        lower,
        &["generate image", "create image", "make image", "generate", "create", "make"],
    );
    Some(format!("generate image {prompt}"))
}

fn reminder_rule(utterance: &str, lower: &str) -> Option<String> {
    contains_any(lower, &["remind", "reminder", "set reminder"])
        .then(|| format!("reminder {utterance}"))
}

fn system_rule(utterance: &str, lower: &str) -> Option<String> {
    contains_any(lower, &["volume", "mute", "unmute", "brightness"])
        .then(|| format!("system {utterance}"))
}

fn realtime_rule(utterance: &str, lower: &str) -> Option<String> {
    contains_any(
        lower,
        &["news", "weather", "temperature", "current", "latest", "today's"],
    )
    .then(|| format!("realtime {utterance}"))
}

fn exit_rule(_utterance: &str, lower: &str) -> Option<String> {
    contains_any(lower, &["exit", "quit", "bye", "goodbye", "stop assistant"])
        .then(|| "exit".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_deterministic() {
        for utterance in ["save the file", "open notepad", "what is rust?"] {
            assert_eq!(classify(utterance), classify(utterance));
        }
    }

    #[test]
    fn test_save_routes_to_content() {
        assert_eq!(classify("save the file"), "content save the file");
        assert_eq!(
            classify("save file name test.txt"),
            "content save file name test.txt"
        );
    }

    #[test]
    fn test_save_wins_over_write() {
        // Precedence: the save rule sits above the write rule.
        assert_eq!(
            classify("write the poem and save it in notepad"),
            "content write the poem and save it in notepad"
        );
    }

    #[test]
    fn test_open_strips_launch_words() {
        assert_eq!(classify("open notepad"), "open notepad");
        assert_eq!(classify("launch the chrome browser"), "open the chrome browser");
    }

    #[test]
    fn test_bare_quit_falls_through_to_exit() {
        // The close rule declines when stripping leaves no app name.
        assert_eq!(classify("quit"), "exit");
        assert_eq!(classify("close notepad"), "close notepad");
    }

    #[test]
    fn test_search_disambiguation() {
        assert_eq!(
            classify("search youtube for lo-fi beats"),
            "youtube search for lo-fi beats"
        );
        assert_eq!(
            classify("search google for rust traits"),
            "google search for rust traits"
        );
        assert_eq!(classify("search rust traits"), "google search rust traits");
    }

    #[test]
    fn test_image_reminder_system_realtime() {
        assert_eq!(classify("generate image of a lion"), "generate image of a lion");
        assert_eq!(
            classify("remind me about standup at 9am"),
            "reminder remind me about standup at 9am"
        );
        assert_eq!(classify("volume up a bit"), "system volume up a bit");
        assert_eq!(
            classify("what's the weather like"),
            "realtime what's the weather like"
        );
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(classify("who was ada lovelace?"), "general who was ada lovelace?");
        assert_eq!(classify("stop the music"), "general stop the music");
    }

    #[test]
    fn test_rule_order_is_the_documented_one() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "save", "write", "open", "close", "play", "search", "image", "reminder",
                "system", "realtime", "exit"
            ]
        );
    }
}
