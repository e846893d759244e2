use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::application::{render_status, ApplicationStore};
use crate::channel::Channel;

use super::formatter::ReplyFormatter;
use super::ports::{DialogEngine, GenerativeModel};
use super::prompts::{campus, PromptBuilder};
use super::routing::{is_status_request, student_id_lookup, FallbackPolicy, RoutingDecision};

/// Quick-action block appended to web fallback replies that touch on
/// documents or applying.
pub const QUICK_ACTIONS: &str = "\n\n💡 **Quick Actions:**\n• [Upload Documents] - Start your application\n• [Check Requirements] - See what you need";

/// Enhancement appended to direct web replies about funding.
pub const FUNDING_ACTIONS: &str = "\n\n🔗 **Quick Actions:**\n• [Upload Documents] - AI-powered document analysis with name verification\n• [Check Status] - View uploaded documents\n• [Get Help] - Document requirements";

/// One message-in/message-out turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub used_fallback: bool,
    pub show_upload: bool,
}

/// Composes the dialog engine, the generative fallback, and the application
/// store into the assistant's conversational surface. Stateless between
/// turns apart from the session id handed to the dialog engine.
pub struct ConversationService<D, G, S> {
    dialog: Arc<D>,
    generative: Arc<G>,
    store: Arc<S>,
}

impl<D, G, S> ConversationService<D, G, S>
where
    D: DialogEngine,
    G: GenerativeModel,
    S: ApplicationStore,
{
    pub fn new(dialog: Arc<D>, generative: Arc<G>, store: Arc<S>) -> Self {
        Self {
            dialog,
            generative,
            store,
        }
    }

    pub fn respond(
        &self,
        channel: Channel,
        session_id: &str,
        user_name: Option<&str>,
        message: &str,
    ) -> ChatOutcome {
        let lowered = message.to_lowercase();
        let show_upload = channel == Channel::Web
            && (lowered.contains("funding") || lowered.contains("documents"));

        if is_status_request(message) {
            return ChatOutcome {
                reply: self.status_reply(channel, user_name),
                used_fallback: false,
                show_upload,
            };
        }

        if channel == Channel::WhatsApp {
            if let Some(student_id) = student_id_lookup(message) {
                return ChatOutcome {
                    reply: self.student_id_reply(&student_id),
                    used_fallback: false,
                    show_upload: false,
                };
            }
        }

        let recognition = match self
            .dialog
            .recognize(&sanitize_session_id(session_id), message)
        {
            Ok(recognition) => recognition,
            Err(err) => {
                warn!(%err, "dialog engine call failed");
                None
            }
        };

        match FallbackPolicy::for_channel(channel).decide(message, recognition.as_ref()) {
            RoutingDecision::Direct(reply) => {
                let mut reply = ReplyFormatter::finish(&reply, channel);
                if channel == Channel::Web
                    && (lowered.contains("funding") || lowered.contains("financial aid"))
                {
                    reply.push_str(FUNDING_ACTIONS);
                }
                ChatOutcome {
                    reply,
                    used_fallback: false,
                    show_upload,
                }
            }
            RoutingDecision::Fallback(reason) => {
                debug!(?reason, channel = channel.label(), "routing to generative fallback");
                let prompt = PromptBuilder::build(channel, message, user_name);
                let mut reply = match self.generative.complete(&prompt) {
                    Ok(text) => ReplyFormatter::format(&text, channel, user_name),
                    Err(err) => {
                        warn!(%err, "generative fallback failed");
                        degraded_reply(channel)
                    }
                };
                if channel == Channel::Web && wants_quick_actions(&lowered) {
                    reply.push_str(QUICK_ACTIONS);
                }
                ChatOutcome {
                    reply,
                    used_fallback: true,
                    show_upload,
                }
            }
        }
    }

    fn status_reply(&self, channel: Channel, user_name: Option<&str>) -> String {
        match channel {
            Channel::Web => match user_name {
                Some(name) => match self.store.fetch(name) {
                    Ok(record) => render_status(channel, record.as_ref()),
                    Err(err) => {
                        warn!(%err, "status lookup failed");
                        "Unable to retrieve your application status right now.".to_string()
                    }
                },
                None => "Please log in to check your application status.".to_string(),
            },
            Channel::WhatsApp => status_id_prompt(),
        }
    }

    fn student_id_reply(&self, student_id: &str) -> String {
        match self.store.fetch_by_student_id(student_id) {
            Ok(Some(record)) => render_status(Channel::WhatsApp, Some(&record)),
            Ok(None) => format!(
                "No application found for Student ID: {student_id}. Please check your ID and try again."
            ),
            Err(err) => {
                warn!(%err, "status lookup failed");
                "Unable to retrieve your application status right now.".to_string()
            }
        }
    }
}

/// Transport-provided session ids carry characters the dialog engine
/// rejects; scrub them and bound the length.
fn sanitize_session_id(raw: &str) -> String {
    raw.replace('+', "")
        .replace(':', "_")
        .replace("whatsapp", "wa")
        .chars()
        .take(50)
        .collect()
}

fn wants_quick_actions(lowered: &str) -> bool {
    ["document", "upload", "submit", "apply"]
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

fn degraded_reply(channel: Channel) -> String {
    match channel {
        Channel::Web => format!(
            "I'd be happy to help you with that! What specific information about {} would you like to know?",
            campus::UNIVERSITY
        ),
        Channel::WhatsApp => format!(
            "I can help with {} information. What do you need?",
            campus::UNIVERSITY
        ),
    }
}

/// Messaging-channel reply asking for a student id before a status lookup.
fn status_id_prompt() -> String {
    "📋 *Application Status Check*\n\n\
     Please provide your Student ID to check your application status.\n\n\
     Example: DEMO001\n\n\
     Our demo Student IDs:\n\
     • DEMO001 (John Student)\n\
     • DEMO002 (Sarah Wilson)\n\
     • STU2025001 (Mike Johnson)"
        .to_string()
}
