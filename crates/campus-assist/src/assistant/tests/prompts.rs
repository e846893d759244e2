use crate::assistant::prompts::{campus, PromptBuilder, QueryCategory};
use crate::channel::Channel;

#[test]
fn help_queries_pick_the_help_template() {
    let prompt = PromptBuilder::build(Channel::Web, "help", Some("John Student"));

    assert_eq!(prompt.category, QueryCategory::Help);
    assert!(prompt.text.contains("asked for help"));
    assert!(prompt.text.contains("John Student"));
}

#[test]
fn course_mentions_win_over_generic_apply_phrases() {
    let prompt = PromptBuilder::build(
        Channel::Web,
        "i want to apply for computer science",
        None,
    );

    assert_eq!(prompt.category, QueryCategory::CourseSteps);
    assert!(prompt.text.contains("Computer Science"));
    assert!(prompt.text.contains("4 years"));
}

#[test]
fn apply_phrases_pick_the_application_template() {
    let prompt = PromptBuilder::build(Channel::Web, "how to apply", None);

    assert_eq!(prompt.category, QueryCategory::ApplicationSteps);
    assert!(prompt.text.contains(campus::APPLICATION_FEE));
    assert!(prompt.text.contains("the student"));
}

#[test]
fn upload_phrases_pick_the_upload_template() {
    let prompt = PromptBuilder::build(Channel::Web, "how to upload my id?", None);

    assert_eq!(prompt.category, QueryCategory::UploadHelp);
    assert!(prompt.text.contains("Upload Documents"));
}

#[test]
fn everything_else_gets_the_fact_sheet() {
    let prompt = PromptBuilder::build(Channel::Web, "tell me about the campus", None);

    assert_eq!(prompt.category, QueryCategory::General);
    assert!(prompt.text.contains(campus::DEADLINES));
    assert!(prompt.text.contains("Do NOT introduce yourself"));
}

#[test]
fn token_budget_follows_the_channel() {
    let web = PromptBuilder::build(Channel::Web, "hello", None);
    let whatsapp = PromptBuilder::build(Channel::WhatsApp, "hello", None);

    assert_eq!(web.max_tokens, 150);
    assert_eq!(whatsapp.max_tokens, 80);
    assert_eq!(web.temperature, 0.6);
}
