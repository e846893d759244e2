use crate::channel::Channel;

use super::domain::{ApplicationRecord, DocumentState};

/// Render a channel-appropriate status summary. Pure string templating; the
/// next-steps text is already derived on the record.
pub fn render_status(channel: Channel, record: Option<&ApplicationRecord>) -> String {
    match channel {
        Channel::Web => render_web(record),
        Channel::WhatsApp => render_whatsapp(record),
    }
}

fn render_web(record: Option<&ApplicationRecord>) -> String {
    let Some(record) = record else {
        return "No application found for your account. Please contact admissions.".to_string();
    };

    let mut document_lines = Vec::new();
    for (slot, entry) in &record.documents {
        let line = match entry.state {
            DocumentState::Verified => format!("✅ {} - Verified", slot.label()),
            DocumentState::Pending => format!("⏳ {} - Pending Review", slot.label()),
            DocumentState::Rejected => format!("❌ {} - Rejected (reupload needed)", slot.label()),
            DocumentState::Missing => format!("❌ {} - Missing", slot.label()),
        };
        document_lines.push(line);
    }

    format!(
        "📋 **Application Status for {}**\n\n\
         🎓 **Program**: {}\n\
         📅 **Submitted**: {}\n\
         📊 **Status**: {}\n\
         📈 **Progress**: {}% Complete\n\n\
         **Documents Submitted:**\n{}\n\n\
         **Next Steps:**\n{}",
        record.full_name,
        record.program,
        record.submitted,
        record.status.label(),
        record.progress,
        document_lines.join("\n"),
        record.next_steps,
    )
}

fn render_whatsapp(record: Option<&ApplicationRecord>) -> String {
    let Some(record) = record else {
        return "No application found. Please check your Student ID.".to_string();
    };

    let verified = record.verified_count();
    let total = record.total_slots();

    let mut message = format!(
        "📋 *Application Status*\n\n\
         Program: {}\n\
         Status: {}\n\
         Progress: {}% ({verified}/{total} docs)\n\n\
         Documents:",
        record.program,
        record.status.label(),
        record.progress,
    );

    for (slot, entry) in &record.documents {
        let line = match entry.state {
            DocumentState::Verified => format!("\n✅ {}", slot.label()),
            DocumentState::Pending => format!("\n⏳ {}", slot.label()),
            DocumentState::Rejected => format!("\n❌ {} (rejected)", slot.label()),
            DocumentState::Missing => format!("\n❌ {}", slot.label()),
        };
        message.push_str(&line);
    }

    message.push_str(&format!("\n\n{}", record.next_steps));
    message
}
