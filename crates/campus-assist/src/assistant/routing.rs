use std::sync::OnceLock;

use regex::Regex;

use crate::channel::Channel;

use super::ports::{IntentRecognition, FALLBACK_INTENT};

/// Utterances that always go to the generative fallback, regardless of
/// dialog-engine confidence.
pub const HELP_PHRASES: &[&str] = &[
    "help",
    "what can you do",
    "how can you help",
    "what do you do",
];

/// Application-process phrases likewise bypass the dialog engine; its canned
/// intents answer *about* programmes, not how to get into one.
pub const APPLY_PHRASES: &[&str] = &[
    "application process",
    "how to apply",
    "how do i apply",
    "registration process",
    "how to register",
    "start application",
    "lets start",
    "begin application",
    "start the application",
    "how can i start",
    "how do i start",
    "i want to apply",
    "just want to apply",
    "apply for it",
    "how to upload",
    "upload documents",
];

/// Phrases recognized as a request for application status; these
/// short-circuit before the dialog engine is consulted at all.
pub const STATUS_PHRASES: &[&str] = &[
    "application status",
    "check status",
    "my status",
    "status check",
    "application progress",
    "check application",
    "my application",
    "where is my application",
    "application update",
];

/// What the gate decided for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Return the dialog engine's candidate reply as-is.
    Direct(String),
    /// Compose a prompt and ask the generative model instead.
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    HelpPhrase,
    ApplyPhrase,
    LowConfidence,
    FallbackIntent,
    NoStructuredReply,
}

/// Gate deciding whether a dialog-engine answer is trustworthy enough to
/// return directly. The rules run in a fixed order; no retries anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    confidence_floor: f32,
}

impl FallbackPolicy {
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            confidence_floor: channel.policy().confidence_floor,
        }
    }

    pub fn decide(
        &self,
        utterance: &str,
        recognition: Option<&IntentRecognition>,
    ) -> RoutingDecision {
        let lowered = utterance.to_lowercase();

        if contains_any(&lowered, HELP_PHRASES) {
            return RoutingDecision::Fallback(FallbackReason::HelpPhrase);
        }

        if contains_any(&lowered, APPLY_PHRASES) {
            return RoutingDecision::Fallback(FallbackReason::ApplyPhrase);
        }

        let Some(recognition) = recognition else {
            return RoutingDecision::Fallback(FallbackReason::NoStructuredReply);
        };

        if recognition.confidence < self.confidence_floor {
            return RoutingDecision::Fallback(FallbackReason::LowConfidence);
        }

        if recognition.intent == FALLBACK_INTENT {
            return RoutingDecision::Fallback(FallbackReason::FallbackIntent);
        }

        match &recognition.reply {
            Some(reply) => RoutingDecision::Direct(reply.clone()),
            None => RoutingDecision::Fallback(FallbackReason::NoStructuredReply),
        }
    }
}

/// True when the message asks about application status.
pub fn is_status_request(message: &str) -> bool {
    let lowered = message.to_lowercase();
    contains_any(&lowered, STATUS_PHRASES)
}

fn student_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:DEMO|STU)\d+$").expect("valid student-id pattern"))
}

/// A bare student id typed into the messaging channel triggers a status
/// lookup; returns the normalized id.
pub fn student_id_lookup(message: &str) -> Option<String> {
    let candidate = message.trim().to_uppercase();
    student_id_pattern()
        .is_match(&candidate)
        .then_some(candidate)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
