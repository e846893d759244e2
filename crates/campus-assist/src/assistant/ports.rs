use serde::{Deserialize, Serialize};

use super::prompts::Prompt;

/// Intent name the dialog engine reports when it gave up on the utterance.
pub const FALLBACK_INTENT: &str = "FallbackIntent";

/// Structured result of one dialog-engine turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRecognition {
    pub intent: String,
    pub confidence: f32,
    pub reply: Option<String>,
}

/// Slot-filling intent recognizer (e.g. a hosted conversational service).
/// One synchronous attempt per turn; failures are treated as "no structured
/// reply" by the caller.
pub trait DialogEngine: Send + Sync {
    fn recognize(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<Option<IntentRecognition>, DialogEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DialogEngineError {
    #[error("dialog engine unavailable: {0}")]
    Unavailable(String),
}

/// Large-language-model completion backend for the fallback path.
pub trait GenerativeModel: Send + Sync {
    fn complete(&self, prompt: &Prompt) -> Result<String, GenerativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerativeError {
    #[error("generative backend unavailable: {0}")]
    Unavailable(String),
    #[error("generative backend returned an unusable payload: {0}")]
    Malformed(String),
}

/// Media download boundary used by the messaging webhook to pull inbound
/// attachments before they enter the document pipeline.
pub trait MediaFetcher: Send + Sync {
    /// `Ok(None)` means the transport could not serve the media (missing
    /// credentials, expired link); the caller degrades gracefully.
    fn download(&self, url: &str) -> Result<Option<Vec<u8>>, MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media download failed: {0}")]
    Download(String),
}
