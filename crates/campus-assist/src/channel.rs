use serde::{Deserialize, Serialize};

/// Delivery surface for assistant conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Web,
    WhatsApp,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Web => "web",
            Channel::WhatsApp => "whatsapp",
        }
    }

    /// Tuning knobs for routing, prompting, and reply shaping.
    ///
    /// The confidence floors differ on purpose: the web widget accepts
    /// lower-confidence dialog-engine answers (0.3) while the messaging
    /// channel escalates anything below 0.5 to the generative fallback.
    pub const fn policy(self) -> ChannelPolicy {
        match self {
            Channel::Web => ChannelPolicy {
                confidence_floor: 0.3,
                prompt_token_budget: 150,
                temperature: 0.6,
                reply_limit: 800,
            },
            Channel::WhatsApp => ChannelPolicy {
                confidence_floor: 0.5,
                prompt_token_budget: 80,
                temperature: 0.6,
                reply_limit: 400,
            },
        }
    }
}

/// Per-channel policy values. All of these are tunable constants, not derived
/// values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPolicy {
    /// Dialog-engine answers below this confidence route to the fallback.
    pub confidence_floor: f32,
    /// Token budget handed to the generative model.
    pub prompt_token_budget: u16,
    /// Sampling temperature for the generative model.
    pub temperature: f32,
    /// Maximum reply length in characters, ellipsis included.
    pub reply_limit: usize,
}
