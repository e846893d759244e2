use crate::assistant::formatter::ReplyFormatter;
use crate::channel::Channel;

#[test]
fn stage_directions_are_stripped() {
    let cleaned = ReplyFormatter::clean(
        "*speaks in a friendly tone* You can apply online today.",
        None,
    );

    assert_eq!(cleaned, "You can apply online today.");
}

#[test]
fn parenthesised_tone_notes_are_stripped() {
    let cleaned = ReplyFormatter::clean("(in a warm tone) applications open in May.", None);

    assert_eq!(cleaned, "Applications open in May.");
}

#[test]
fn canned_introductions_are_stripped_from_the_start() {
    let cleaned = ReplyFormatter::clean(
        "Hello John! I'm Thandi, an assistant at Crestview University. Applications close soon.",
        Some("John"),
    );

    assert_eq!(cleaned, "Applications close soon.");
}

#[test]
fn introductions_mid_reply_are_left_alone() {
    let input = "Applications close soon. My name is Thandi and I'm here to assist you";
    let cleaned = ReplyFormatter::clean(input, None);

    assert_eq!(cleaned, input);
}

#[test]
fn whitespace_collapses_and_first_letter_capitalizes() {
    let cleaned = ReplyFormatter::clean("  the   fee is\n\nR500  ", None);

    assert_eq!(cleaned, "The fee is R500");
}

#[test]
fn cleanup_is_idempotent() {
    let input = "*nods* Hello John! I'm Thandi, an assistant at Crestview University. you   can apply now.";
    let once = ReplyFormatter::clean(input, Some("John"));
    let twice = ReplyFormatter::clean(&once, Some("John"));

    assert_eq!(once, twice);
}

#[test]
fn full_format_is_idempotent_on_both_channels() {
    let input = format!("*beams* the deadline is December 15. {}", "detail ".repeat(80));
    for channel in [Channel::Web, Channel::WhatsApp] {
        let once = ReplyFormatter::format(&input, channel, None);
        let twice = ReplyFormatter::format(&once, channel, None);
        assert_eq!(once, twice);
    }
}

#[test]
fn truncation_respects_the_channel_limit_with_ellipsis() {
    let long_reply = "word ".repeat(300);
    let web = ReplyFormatter::format(&long_reply, Channel::Web, None);
    let whatsapp = ReplyFormatter::format(&long_reply, Channel::WhatsApp, None);

    assert!(web.chars().count() <= Channel::Web.policy().reply_limit);
    assert!(whatsapp.chars().count() <= Channel::WhatsApp.policy().reply_limit);
    assert!(web.ends_with("..."));
    assert!(whatsapp.ends_with("..."));
    assert!(whatsapp.len() < web.len());
}

#[test]
fn short_replies_pass_through_untouched() {
    let reply = "The fee is R500.";
    assert_eq!(
        ReplyFormatter::format(reply, Channel::WhatsApp, None),
        reply
    );
}
