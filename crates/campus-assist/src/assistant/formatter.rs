use std::sync::OnceLock;

use regex::Regex;

use crate::channel::Channel;

use super::prompts::campus;

/// Cleans generative replies and shapes them per channel. Both `clean` and
/// the channel truncation are idempotent: running either twice produces the
/// same string as running it once.
pub struct ReplyFormatter;

impl ReplyFormatter {
    /// Strip stage directions and canned self-introductions, collapse
    /// whitespace, and capitalize the first letter.
    pub fn clean(reply: &str, user_name: Option<&str>) -> String {
        let mut cleaned = stage_directions().replace_all(reply, "").into_owned();
        cleaned = tone_directions().replace_all(&cleaned, "").into_owned();
        cleaned = spoken_directions().replace_all(&cleaned, "").into_owned();
        cleaned = strip_intro(&cleaned, user_name);

        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        capitalize_first(&collapsed)
    }

    /// Truncate to the channel's reply limit, ellipsis marker included
    /// within the limit.
    pub fn finish(reply: &str, channel: Channel) -> String {
        truncate_with_ellipsis(reply, channel.policy().reply_limit)
    }

    /// Full post-processing applied to every generative reply.
    pub fn format(reply: &str, channel: Channel, user_name: Option<&str>) -> String {
        Self::finish(&Self::clean(reply, user_name), channel)
    }
}

fn stage_directions() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // *speaks in a friendly tone* and similar asterisk-delimited spans
    RE.get_or_init(|| Regex::new(r"\*[^*]*\*").expect("valid stage-direction pattern"))
}

fn tone_directions() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\([^)]*tone[^)]*\)").expect("valid tone pattern"))
}

fn spoken_directions() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(speaks|says|responds|replies)\s+(in\s+a\s+)?\w+\s+(tone|manner|way)\b")
            .expect("valid spoken-direction pattern")
    })
}

fn intro_phrases(user_name: Option<&str>) -> Vec<String> {
    let assistant = campus::ASSISTANT_NAME;
    let university = campus::UNIVERSITY;

    let mut phrases = Vec::new();
    if let Some(name) = user_name {
        phrases.push(format!(
            "Hello {name}! I'm {assistant}, an assistant at {university}"
        ));
        phrases.push(format!(
            "Hello {name}! This is {assistant}, an assistant at {university}"
        ));
    }
    phrases.push(format!(
        "Hello there! Welcome to {university}. My name is {assistant}"
    ));
    phrases.push(format!("Hi! I'm {assistant}, an assistant for {university}"));
    phrases.push(format!("Hello! I'm {assistant} from {university}"));
    phrases.push(format!("My name is {assistant} and I'm here to assist you"));
    phrases
}

/// Drop a canned introduction when it sits at the very start of the reply.
fn strip_intro(reply: &str, user_name: Option<&str>) -> String {
    let trimmed = reply.trim_start();
    for intro in intro_phrases(user_name) {
        if let Some(prefix) = trimmed.get(..intro.len()) {
            if prefix.eq_ignore_ascii_case(&intro) {
                let rest = trimmed[intro.len()..].trim_start_matches(['.', ',', '!', ' ']);
                return rest.to_string();
            }
        }
    }
    reply.to_string()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => text.to_string(),
    }
}

fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", keep.trim_end())
}
