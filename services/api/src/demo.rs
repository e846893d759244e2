use std::path::PathBuf;
use std::sync::Arc;

use campus_assist::accounts::{login, register, RegistrationRequest};
use campus_assist::application::ApplicationStore;
use campus_assist::channel::Channel;
use campus_assist::error::AppError;
use clap::Args;

use crate::infra::{build_services, seed_demo_accounts, InMemoryAccountDirectory};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Student whose journey the demo walks through
    #[arg(long, default_value = "John Student")]
    pub(crate) user_name: String,
    /// Seed the application store from a CSV roster instead of the defaults
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Skip the document upload portion of the demo
    #[arg(long)]
    pub(crate) skip_upload: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user_name,
        roster,
        skip_upload,
    } = args;

    println!("Registration assistant demo");

    let services = build_services(roster.as_deref())?;
    let directory = Arc::new(InMemoryAccountDirectory::default());
    seed_demo_accounts(&directory);

    println!("\nAccount registration and login");
    let registration = RegistrationRequest {
        student_id: "STU2025100".to_string(),
        full_name: "Lerato Dlamini".to_string(),
        email: "lerato@example.org".to_string(),
        password: "demo-password".to_string(),
    };
    match register(directory.as_ref(), registration) {
        Ok(profile) => println!("- Registered {} ({})", profile.full_name, profile.student_id),
        Err(err) => println!("- Registration rejected: {err}"),
    }
    match login(directory.as_ref(), "DEMO001", "password") {
        Ok(profile) => println!("- Logged in as {} ({})", profile.full_name, profile.student_id),
        Err(err) => println!("- Login rejected: {err}"),
    }

    println!("\nHybrid chat routing");
    for message in [
        "hello",
        "what is the fee?",
        "help",
        "i want to apply for computer science",
    ] {
        let outcome =
            services
                .conversation
                .respond(Channel::Web, "demo-session", Some(&user_name), message);
        let route = if outcome.used_fallback {
            "generative fallback"
        } else {
            "dialog engine"
        };
        println!("\n> {message}  [{route}]");
        println!("{}", outcome.reply);
    }

    println!("\nMessaging-channel status lookup");
    let status = services
        .conversation
        .respond(Channel::WhatsApp, "demo-wa", None, "DEMO001");
    println!("{}", status.reply);

    if skip_upload {
        return Ok(());
    }

    println!("\nDocument verification");
    let matching = services.intake.process(
        &user_name,
        "sa_id_card.txt",
        format!(
            "REPUBLIC OF SOUTH AFRICA\nIdentity Number 9001015800085\n{}",
            user_name.to_uppercase()
        )
        .as_bytes(),
    );
    println!(
        "- {} -> verified={} ({}, {}%)",
        "sa_id_card.txt",
        matching.verified,
        matching.classification.detected_type,
        matching.classification.confidence
    );

    let mismatched = services.intake.process(
        &user_name,
        "bank_statement.txt",
        b"Bank Statement for Account Holder: Mark Smith",
    );
    println!(
        "- {} -> verified={} (found: {})",
        "bank_statement.txt",
        mismatched.verified,
        mismatched.found_names.join(", ")
    );

    if let Ok(Some(record)) = services.store.fetch(&user_name) {
        println!(
            "\nApplication after uploads: {}% complete, status {}",
            record.progress,
            record.status.label()
        );
        println!("{}", record.next_steps);
    }

    Ok(())
}
