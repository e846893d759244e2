//! Hybrid conversation engine: a structured dialog engine answers when it is
//! confident, a generative model handles everything else, and every reply is
//! shaped per delivery channel before it leaves the service.

pub mod formatter;
pub mod ports;
pub mod prompts;
pub mod router;
pub mod routing;
pub mod service;

#[cfg(test)]
mod tests;

pub use formatter::ReplyFormatter;
pub use ports::{
    DialogEngine, DialogEngineError, GenerativeError, GenerativeModel, IntentRecognition,
    MediaError, MediaFetcher, FALLBACK_INTENT,
};
pub use prompts::{Prompt, PromptBuilder, QueryCategory};
pub use router::{assistant_router, AssistantState};
pub use routing::{FallbackPolicy, FallbackReason, RoutingDecision};
pub use service::{ChatOutcome, ConversationService};
