use serde::Serialize;

use crate::channel::Channel;

use super::pipeline::IntakeOutcome;

/// Structured checklist returned alongside rejection replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredDocuments {
    pub identity: Vec<&'static str>,
    pub academic: Vec<&'static str>,
    pub financial: Vec<&'static str>,
    pub supporting: Vec<&'static str>,
}

pub fn required_documents() -> RequiredDocuments {
    RequiredDocuments {
        identity: vec![
            "South African Identity Document",
            "Valid passport (if applicable)",
        ],
        academic: vec![
            "Matric Certificate (Grade 12)",
            "Academic transcripts from previous institutions",
            "Degree/Diploma certificates (if applicable)",
        ],
        financial: vec![
            "Proof of income (payslip/salary certificate)",
            "Bank statements (last 3 months)",
            "Tax certificates or IRP5 forms",
            "Household income affidavit (if dependent)",
        ],
        supporting: vec![
            "Proof of residence (utility bill/municipal account)",
            "Guardian/Parent consent (if under 21)",
            "Disability certificates (if applicable)",
        ],
    }
}

/// Reply for a verified upload.
pub fn accepted_reply(
    channel: Channel,
    claimed_name: &str,
    filename: &str,
    outcome: &IntakeOutcome,
) -> String {
    match channel {
        Channel::Web => accepted_web(claimed_name, filename, outcome),
        Channel::WhatsApp => accepted_whatsapp(outcome),
    }
}

/// Reply for an upload whose identity verification failed.
pub fn rejected_reply(
    channel: Channel,
    claimed_name: &str,
    filename: &str,
    outcome: &IntakeOutcome,
) -> String {
    match channel {
        Channel::Web => rejected_web(claimed_name, filename, outcome),
        Channel::WhatsApp => rejected_whatsapp(outcome),
    }
}

fn found_names_line(outcome: &IntakeOutcome) -> String {
    if outcome.found_names.is_empty() {
        "No names detected".to_string()
    } else {
        outcome.found_names.join(", ")
    }
}

fn progress_line(outcome: &IntakeOutcome) -> String {
    match &outcome.record {
        Some(record) => format!(
            "📋 **Application Progress**: {}% ({}/{} documents verified)",
            record.progress,
            record.verified_count(),
            record.total_slots()
        ),
        None => "📋 **Application Progress**: unavailable".to_string(),
    }
}

fn next_steps_line(outcome: &IntakeOutcome) -> String {
    match &outcome.record {
        Some(record) => record.next_steps.clone(),
        None => "Continue uploading your required documents.".to_string(),
    }
}

fn accepted_web(claimed_name: &str, filename: &str, outcome: &IntakeOutcome) -> String {
    format!(
        "✅ **Document Verified & Accepted!**\n\n\
         📄 **Document**: {filename}\n\
         👤 **Name Verified**: {claimed_name} ✅\n\
         🔍 **AI Detection**: {}\n\
         📊 **Confidence**: {}%\n\
         ✅ **Status**: {}\n\n\
         {}\n\n\
         {}\n\n\
         **Next Steps:**\n{}",
        outcome.classification.detected_type,
        outcome.classification.confidence,
        outcome.classification.status_line,
        outcome.classification.details,
        progress_line(outcome),
        next_steps_line(outcome),
    )
}

fn rejected_web(claimed_name: &str, filename: &str, outcome: &IntakeOutcome) -> String {
    format!(
        "❌ **Document Rejected - Name Mismatch**\n\n\
         📄 **Document**: {filename}\n\
         👤 **Expected Name**: {claimed_name}\n\
         🔍 **Found Names**: {}\n\n\
         **Reason**: Document must belong to the registered user.\n\n\
         **✅ Document Requirements:**\n\
         • All documents must be in **{claimed_name}**'s name\n\
         • Clear, readable images or PDFs\n\
         • Recent documents (not older than 6 months for financial docs)\n\n\
         **💡 Tips for Success:**\n\
         • Ensure your name appears clearly on the document\n\
         • Use good lighting when taking photos\n\
         • Upload documents one at a time\n\n\
         Try uploading a document that belongs to you! 📋",
        found_names_line(outcome),
    )
}

fn accepted_whatsapp(outcome: &IntakeOutcome) -> String {
    format!(
        "✅ *Document Accepted!*\n\n\
         📄 Type: {}\n\
         📊 Confidence: {}%\n\
         👤 Name Match: Verified\n\n\
         {}\n\n\
         Your application status has been updated! Send \"application status\" to check your progress.",
        outcome.classification.detected_type,
        outcome.classification.confidence,
        next_steps_line(outcome),
    )
}

fn rejected_whatsapp(outcome: &IntakeOutcome) -> String {
    format!(
        "❌ *Document Rejected*\n\n\
         📄 Type: {}\n\
         📊 Confidence: {}%\n\
         🔍 Issue: Name verification failed\n\n\
         Found Names: {}\n\n\
         Why rejected:\n\
         • Document must contain your full name\n\
         • Text must be clearly readable\n\n\
         Your application status has been updated. Send \"application status\" to check your progress.",
        outcome.classification.detected_type,
        outcome.classification.confidence,
        found_names_line(outcome),
    )
}
